use chrono::Local;
use once_cell::sync::Lazy;
use regex::RegexBuilder;

use crate::models::{InstalledBattery, Report, ReportHeader};
use crate::parsers::{cell_after_label, clean_text, find_table_by_heading, format_datetime_local, table_rows};

/// Table directly under the report's fixed top-level heading.
static HEAD_TABLE_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    RegexBuilder::new(r"<h1[^>]*>\s*Battery report\s*</h1>\s*<table[^>]*>(.*?)</table>")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("Invalid head table regex")
});

/// Interpret a capacity string as milliwatt-hours by keeping only its digit
/// characters (drops thousands separators and unit suffixes). No digits
/// means no value.
pub fn capacity_mwh(s: &str) -> Option<u64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parse the report markup into a structured `Report`. Best-effort: any
/// missing section or field yields an empty value, never a failure.
pub fn parse_report(html: &str) -> Report {
    if html.trim().is_empty() {
        return Report::default();
    }
    // One whole-document pass: entities decoded, whitespace collapsed.
    let raw = clean_text(html);

    let head_table = match HEAD_TABLE_REGEX.captures(&raw) {
        Some(caps) => caps[1].to_string(),
        None => String::new(),
    };
    let header = ReportHeader {
        computer_name: cell_after_label(&head_table, "COMPUTER NAME"),
        system_product_name: cell_after_label(&head_table, "SYSTEM PRODUCT NAME"),
        bios: cell_after_label(&head_table, "BIOS"),
        os_build: cell_after_label(&head_table, "OS BUILD"),
        platform_role: cell_after_label(&head_table, "PLATFORM ROLE"),
        connected_standby: cell_after_label(&head_table, "CONNECTED STANDBY"),
        report_time: cell_after_label(&head_table, "REPORT TIME"),
    };

    let installed_table = find_table_by_heading(&raw, "Installed batteries");
    let installed = InstalledBattery {
        name: cell_after_label(&installed_table, "NAME"),
        manufacturer: cell_after_label(&installed_table, "MANUFACTURER"),
        serial_number: cell_after_label(&installed_table, "SERIAL NUMBER"),
        chemistry: cell_after_label(&installed_table, "CHEMISTRY"),
        design_capacity: cell_after_label(&installed_table, "DESIGN CAPACITY"),
        full_charge_capacity: cell_after_label(&installed_table, "FULL CHARGE CAPACITY"),
        cycle_count: cell_after_label(&installed_table, "CYCLE COUNT"),
    };

    let design_mwh = capacity_mwh(&installed.design_capacity);
    let full_mwh = capacity_mwh(&installed.full_charge_capacity);
    let health_pct = match (design_mwh, full_mwh) {
        (Some(design), Some(full)) if design > 0 && full > 0 => {
            Some((full as f64 / design as f64 * 100.0 * 100.0).round() / 100.0)
        }
        _ => None,
    };

    Report {
        header,
        installed,
        design_mwh,
        full_mwh,
        health_pct,
        recent_usage: table_rows(&find_table_by_heading(&raw, "Recent usage")),
        battery_usage: table_rows(&find_table_by_heading(&raw, "Battery usage")),
        usage_history: table_rows(&find_table_by_heading(&raw, "Usage history")),
        capacity_history: table_rows(&find_table_by_heading(&raw, "Battery capacity history")),
        life_estimates: table_rows(&find_table_by_heading(&raw, "Battery life estimates")),
    }
}

/// Group digits in threes, `45000` -> `45,000`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// One-line history summary: a localized "now" timestamp plus, when
/// available, the health percentage and capacity figures.
pub fn format_summary(report: &Report) -> String {
    let ts = format_datetime_local(&Local::now().naive_local());
    match (report.health_pct, report.design_mwh, report.full_mwh) {
        (Some(health), Some(design), Some(full)) => format!(
            "{} \u{2014} Health {}% ({}/{} mWh)",
            ts,
            health,
            group_thousands(full),
            group_thousands(design)
        ),
        _ => format!("{} \u{2014} Battery report", ts),
    }
}
