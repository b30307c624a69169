use chrono::NaiveDateTime;

use crate::models::{Report, RowTable, Section, SectionItem, NO_VALUE};
use crate::parsers::{
    format_hms, is_all_null_row, localize_cell, parse_hms_secs, parse_timestamp, period_sort_key,
    row_matches_headers,
};

/// Which column carries the sortable timestamp of a table's rows.
#[derive(Debug, Clone, Copy)]
enum DateKey {
    /// A start-time/timestamp column, parsed as date plus time.
    StartTime,
    /// A period column; the sort key is the period's end date.
    Period,
}

struct TableSpec {
    expected: &'static [&'static str],
    labels: &'static [(&'static str, &'static str)],
    date_key: DateKey,
    empty_msg: &'static str,
    legend: &'static str,
}

const RECENT_USAGE: TableSpec = TableSpec {
    expected: &["START TIME", "STATE", "SOURCE", "CAPACITY REMAINING"],
    labels: &[
        ("START TIME", "Start time"),
        ("STATE", "State"),
        ("SOURCE", "Source"),
        ("CAPACITY REMAINING", "Remaining"),
    ],
    date_key: DateKey::StartTime,
    empty_msg: "No entries for the last 7 days.",
    legend: "Columns: Start time | State | Source | Remaining",
};

const BATTERY_USAGE: TableSpec = TableSpec {
    expected: &["START TIME", "STATE", "DURATION", "ENERGY DRAINED"],
    labels: &[
        ("START TIME", "Start time"),
        ("STATE", "State"),
        ("DURATION", "Duration"),
        ("ENERGY DRAINED", "Energy drained"),
    ],
    date_key: DateKey::StartTime,
    empty_msg: "No entries for the last 7 days.",
    legend: "Columns: Start time | State | Duration | Energy drained",
};

const CAPACITY_HISTORY: TableSpec = TableSpec {
    expected: &["PERIOD", "FULL CHARGE CAPACITY", "DESIGN CAPACITY"],
    labels: &[
        ("PERIOD", "Period"),
        ("FULL CHARGE CAPACITY", "Full charge capacity"),
        ("DESIGN CAPACITY", "Design capacity"),
    ],
    date_key: DateKey::Period,
    empty_msg: "No data.",
    legend: "Columns: Period | Full charge capacity | Design capacity",
};

const USAGE_HISTORY: TableSpec = TableSpec {
    expected: &["PERIOD", "ACTIVE", "CONNECTED STANDBY"],
    labels: &[
        ("PERIOD", "Period"),
        ("ACTIVE", "Active"),
        ("CONNECTED STANDBY", "Connected standby"),
    ],
    date_key: DateKey::Period,
    empty_msg: "No data.",
    legend: "Columns: Period | Active | Connected standby",
};

/// Header tokens that identify the life-estimates table's (repeated) header
/// rows. The table's own columns are read positionally, not by name.
const LIFE_HEADER_TOKENS: &[&str] = &["PERIOD", "ACTIVE", "CONNECTED STANDBY"];

const LIFE_LEGEND: &str = "Battery life estimates\n\
    Battery life estimates based on observed drains\n\
    Columns: Period | At full charge \u{2014} Active, Connected standby | At design capacity \u{2014} Active, Connected standby";

/// Per-section item lists carry a count of synthetic prefix items (the
/// life-estimates average line) that row limiting and reordering must not
/// disturb.
#[derive(Debug, Clone, Default)]
pub struct SectionList {
    pub items: Vec<SectionItem>,
    pub prefix: usize,
}

impl SectionList {
    /// Apply the browser's view options: optional oldest-first ordering and
    /// an optional row cap, both over the non-prefix items only.
    pub fn view(&self, oldest_first: bool, rows: Option<usize>) -> Vec<SectionItem> {
        let (head, rest) = self.items.split_at(self.prefix.min(self.items.len()));
        let mut rest: Vec<SectionItem> = rest.to_vec();
        if oldest_first {
            rest.reverse();
        }
        if let Some(n) = rows {
            rest.truncate(n);
        }
        let mut out = head.to_vec();
        out.extend(rest);
        out
    }
}

fn display_label<'a>(labels: &[(&str, &'a str)], header: &'a str) -> &'a str {
    let upper = header.trim().to_uppercase();
    labels
        .iter()
        .find(|(token, _)| *token == upper)
        .map(|(_, label)| *label)
        .unwrap_or(header)
}

/// Scan for the header row (cell-text superset of the expected tokens),
/// then turn each following data row into a `"Label: Value"` line keyed by
/// its extracted timestamp. Stops at a repeated header row; skips all-null
/// placeholder rows. No header row means no items.
fn build_table_items(rows: &RowTable, spec: &TableSpec) -> Vec<(Option<NaiveDateTime>, String)> {
    let Some(header_idx) = rows.iter().position(|r| row_matches_headers(r, spec.expected)) else {
        return Vec::new();
    };
    let headers = &rows[header_idx];

    let mut items = Vec::new();
    for row in &rows[header_idx + 1..] {
        if row_matches_headers(row, spec.expected) {
            break;
        }
        if is_all_null_row(row) {
            continue;
        }
        let mut segments = Vec::new();
        let mut key: Option<NaiveDateTime> = None;
        for (header, raw) in headers.iter().zip(row.iter()) {
            let label = display_label(spec.labels, header);
            let value = localize_cell(header, raw);
            if value.is_empty() {
                segments.push(format!("{}:", label));
            } else {
                segments.push(format!("{}: {}", label, value));
            }
            if key.is_none() {
                key = match spec.date_key {
                    DateKey::StartTime => parse_timestamp(raw),
                    DateKey::Period => period_sort_key(raw),
                };
            }
        }
        items.push((key, segments.join(" | ")));
    }
    items
}

/// Sort newest first (undated rows last), attach the legend as detail text,
/// and substitute the "no data" placeholder for an empty list.
fn finalize(
    mut items: Vec<(Option<NaiveDateTime>, String)>,
    empty_msg: &str,
    legend: &str,
) -> Vec<SectionItem> {
    if items.is_empty() {
        let detail = format!("{}\n\n{}", empty_msg, legend);
        return vec![SectionItem::new(None, empty_msg.to_string(), detail)];
    }
    items.sort_by_key(|(key, _)| std::cmp::Reverse(key.unwrap_or(NaiveDateTime::MIN)));
    items
        .into_iter()
        .map(|(key, line)| {
            let detail = format!("{}\n\n{}", line, legend);
            SectionItem::new(key, line, detail)
        })
        .collect()
}

fn is_life_estimate_row(row: &[String]) -> bool {
    row.len() >= 6 && !is_all_null_row(row) && !row_matches_headers(row, LIFE_HEADER_TOKENS)
}

fn average_hms(samples: &[u64]) -> String {
    if samples.is_empty() {
        return NO_VALUE.to_string();
    }
    format_hms(samples.iter().sum::<u64>() / samples.len() as u64)
}

/// Life-estimates items: one line per qualifying row combining the period
/// with the four duration columns (indices 1, 2, 4, 5; the maximum column
/// at index 3 is deliberately left out), preceded by a synthetic average
/// line over the same four columns.
fn life_estimate_items(rows: &RowTable) -> SectionList {
    let mut items: Vec<(Option<NaiveDateTime>, String)> = Vec::new();
    // per-column duration samples: full-charge active/standby, design active/standby
    let mut samples: [Vec<u64>; 4] = [Vec::new(), Vec::new(), Vec::new(), Vec::new()];

    for row in rows {
        if !is_life_estimate_row(row) {
            continue;
        }
        let period = localize_cell("PERIOD", &row[0]);
        let line = format!(
            "Period: {} | At full charge \u{2014} Active: {}, Connected standby: {} | At design capacity \u{2014} Active: {}, Connected standby: {}",
            period, row[1], row[2], row[4], row[5]
        );
        items.push((period_sort_key(&row[0]), line));

        for (bucket, idx) in samples.iter_mut().zip([1usize, 2, 4, 5]) {
            if let Some(secs) = parse_hms_secs(&row[idx]) {
                bucket.push(secs);
            }
        }
    }

    if items.is_empty() {
        return SectionList::default();
    }
    items.sort_by_key(|(key, _)| std::cmp::Reverse(key.unwrap_or(NaiveDateTime::MIN)));

    let average_line = format!(
        "Average | At full charge \u{2014} Active: {}, Connected standby: {} | At design capacity \u{2014} Active: {}, Connected standby: {}",
        average_hms(&samples[0]),
        average_hms(&samples[1]),
        average_hms(&samples[2]),
        average_hms(&samples[3]),
    );

    let mut out = Vec::with_capacity(items.len() + 1);
    out.push(SectionItem::new(
        None,
        average_line.clone(),
        format!("{}\n\n{}", average_line, LIFE_LEGEND),
    ));
    out.extend(items.into_iter().map(|(key, line)| {
        let detail = format!("{}\n\n{}", line, LIFE_LEGEND);
        SectionItem::new(key, line, detail)
    }));
    SectionList { items: out, prefix: 1 }
}

/// Append a `"Label: Value"` item only when the value is non-empty.
fn add(items: &mut Vec<SectionItem>, label: &str, value: &str, desc: &str) {
    if value.is_empty() {
        return;
    }
    let line = format!("{}: {}", label, value);
    let detail = format!("{}\n\n{}", line, desc);
    items.push(SectionItem::new(None, line, detail));
}

fn overview_items(report: &Report) -> Vec<SectionItem> {
    let mut items = Vec::new();
    let h = &report.header;
    add(&mut items, "Computer name", &h.computer_name, "Computer name is the Windows name of this device.");
    add(&mut items, "System product name", &h.system_product_name, "Model reported by the system firmware (BIOS/UEFI).");
    add(&mut items, "BIOS", &h.bios, "Firmware version and date.");
    add(&mut items, "OS build", &h.os_build, "Windows build installed on this system.");
    add(&mut items, "Platform role", &h.platform_role, "Device role, e.g., Mobile or Desktop.");
    add(&mut items, "Connected standby", &h.connected_standby, "Whether modern standby is supported.");
    add(
        &mut items,
        "Report time",
        &localize_cell("START TIME", &h.report_time),
        "Timestamp when this report was generated.",
    );
    if let (Some(health), Some(design), Some(full)) =
        (report.health_pct, report.design_mwh, report.full_mwh)
    {
        add(
            &mut items,
            "Battery health",
            &format!("{} %", health),
            "Battery health = Full charge capacity / Design capacity.",
        );
        add(
            &mut items,
            "Design capacity (mWh)",
            &crate::report::group_thousands(design),
            "Factory-specified maximum energy in milliwatt-hours.",
        );
        add(
            &mut items,
            "Full charge capacity (mWh)",
            &crate::report::group_thousands(full),
            "Current maximum energy (mWh) after wear.",
        );
    }
    items
}

fn installed_items(report: &Report) -> Vec<SectionItem> {
    let mut items = Vec::new();
    let inst = &report.installed;
    add(&mut items, "Battery name", &inst.name, "Identifier for the installed battery.");
    add(&mut items, "Manufacturer", &inst.manufacturer, "Battery vendor reported by firmware.");
    add(&mut items, "Serial number", &inst.serial_number, "Battery serial number.");
    add(&mut items, "Chemistry", &inst.chemistry, "Battery chemistry code as reported by the system.");
    add(&mut items, "Design capacity", &inst.design_capacity, "Factory-specified maximum energy (mWh).");
    add(&mut items, "Full charge capacity", &inst.full_charge_capacity, "Current maximum energy (mWh) after wear.");
    if inst.cycle_count != "-" && inst.cycle_count != "\u{2014}" {
        add(&mut items, "Cycle count", &inst.cycle_count, "Number of full charge\u{2013}discharge cycles recorded.");
    }
    items
}

/// The presentable item list for one section of a parsed report.
pub fn section_items(report: &Report, section: Section) -> SectionList {
    match section {
        Section::Overview => SectionList { items: overview_items(report), prefix: 0 },
        Section::Installed => SectionList { items: installed_items(report), prefix: 0 },
        Section::RecentUsage => SectionList {
            items: finalize(
                build_table_items(&report.recent_usage, &RECENT_USAGE),
                RECENT_USAGE.empty_msg,
                RECENT_USAGE.legend,
            ),
            prefix: 0,
        },
        Section::BatteryUsage => SectionList {
            items: finalize(
                build_table_items(&report.battery_usage, &BATTERY_USAGE),
                BATTERY_USAGE.empty_msg,
                BATTERY_USAGE.legend,
            ),
            prefix: 0,
        },
        Section::CapacityHistory => SectionList {
            items: finalize(
                build_table_items(&report.capacity_history, &CAPACITY_HISTORY),
                CAPACITY_HISTORY.empty_msg,
                CAPACITY_HISTORY.legend,
            ),
            prefix: 0,
        },
        Section::UsageHistory => SectionList {
            items: finalize(
                build_table_items(&report.usage_history, &USAGE_HISTORY),
                USAGE_HISTORY.empty_msg,
                USAGE_HISTORY.legend,
            ),
            prefix: 0,
        },
        Section::LifeEstimates => life_estimate_items(&report.life_estimates),
    }
}
