use pretty_assertions::assert_eq;

use battery_monitor::items::section_items;
use battery_monitor::models::Section;
use battery_monitor::report::{parse_report, format_summary};

/// Shaped like real powercfg output: label spans, ragged whitespace,
/// entities, and chart elements between headings and their tables. The
/// "Recent usage" section is deliberately absent.
const FIXTURE: &str = r#"<html>
<head><title>Battery report</title></head>
<body>
<h1>Battery report</h1>
<table>
<tr><td><span class="label">COMPUTER NAME</span></td><td>PC1</td></tr>
<tr><td><span class="label">SYSTEM PRODUCT NAME</span></td><td>Contoso&nbsp;Laptop 13</td></tr>
<tr><td><span class="label">BIOS</span></td><td>1.14.0 03/02/2024</td></tr>
<tr><td><span class="label">OS BUILD</span></td><td>22631.1.amd64fre</td></tr>
<tr><td><span class="label">PLATFORM ROLE</span></td><td>Mobile</td></tr>
<tr><td><span class="label">CONNECTED STANDBY</span></td><td>Supported</td></tr>
<tr><td><span class="label">REPORT TIME</span></td><td>2024-03-05 14:30:00</td></tr>
</table>

<h2>Installed batteries</h2>
<table>
<tr><td><span>NAME</span></td><td>DELL C8J3X9</td></tr>
<tr><td><span>MANUFACTURER</span></td><td>SMP &amp; Co</td></tr>
<tr><td><span>SERIAL NUMBER</span></td><td>12345</td></tr>
<tr><td><span>CHEMISTRY</span></td><td>LiP</td></tr>
<tr><td><span>DESIGN CAPACITY</span></td><td>50,000 mWh</td></tr>
<tr><td><span>FULL CHARGE CAPACITY</span></td><td>45,000 mWh</td></tr>
<tr><td><span>CYCLE COUNT</span></td><td>-</td></tr>
</table>

<h2>Battery usage</h2>
<div class="explanation">Power drains over the last 7 days</div>
<canvas id="usageGraph" width="800" height="200"></canvas>
<table>
<tr><th>START TIME</th><th>STATE</th><th>DURATION</th><th>ENERGY DRAINED</th></tr>
<tr><td>2024-03-04 09:12:00</td><td>Active</td><td>1:30:00</td><td>12,345 mWh</td></tr>
<tr><td>2024-03-05 08:00:00</td><td>Active</td><td>0:45:00</td><td>6,000 mWh</td></tr>
<tr><td>-</td><td>-</td><td>-</td><td>-</td></tr>
</table>

<h2>Usage history</h2>
<table>
<tr><th>PERIOD</th><th>ACTIVE</th><th>CONNECTED STANDBY</th></tr>
<tr><td>2024-02-19 - 2024-02-25</td><td>20:00:00</td><td>80:00:00</td></tr>
<tr><td>2024-02-26 - 2024-03-03</td><td>25:00:00</td><td>75:00:00</td></tr>
</table>

<h2>Battery capacity history</h2>
<table>
<tr><th>PERIOD</th><th>FULL CHARGE CAPACITY</th><th>DESIGN CAPACITY</th></tr>
<tr><td>2024-02-19 - 2024-02-25</td><td>46,000 mWh</td><td>50,000 mWh</td></tr>
</table>

<h2>Battery life estimates</h2>
<table>
<tr><th>PERIOD</th><th colspan="2">AT FULL CHARGE</th><th colspan="3">AT DESIGN CAPACITY</th></tr>
<tr><th>PERIOD</th><th>ACTIVE</th><th>CONNECTED STANDBY</th><th>MAX</th><th>ACTIVE</th><th>CONNECTED STANDBY</th></tr>
<tr><td>2024-02-19 - 2024-02-25</td><td>4:00:00</td><td>40:00:00</td><td>90:00:00</td><td>5:00:00</td><td>50:00:00</td></tr>
<tr><td>2024-02-26 - 2024-03-03</td><td>6:00:00</td><td>60:00:00</td><td>90:00:00</td><td>7:00:00</td><td>70:00:00</td></tr>
</table>
</body>
</html>"#;

#[test]
fn parses_header_and_capacities() {
    let report = parse_report(FIXTURE);

    assert_eq!(report.header.computer_name, "PC1");
    assert_eq!(report.header.system_product_name, "Contoso Laptop 13");
    assert_eq!(report.header.platform_role, "Mobile");
    assert_eq!(report.header.report_time, "2024-03-05 14:30:00");

    assert_eq!(report.installed.manufacturer, "SMP & Co");
    assert_eq!(report.installed.cycle_count, "-");

    assert_eq!(report.design_mwh, Some(50000));
    assert_eq!(report.full_mwh, Some(45000));
    assert_eq!(report.health_pct, Some(90.0));
}

#[test]
fn absent_section_parses_as_empty_table() {
    let report = parse_report(FIXTURE);
    assert!(report.recent_usage.is_empty());

    // and its item list degrades to the placeholder
    let list = section_items(&report, Section::RecentUsage);
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].line, "No entries for the last 7 days.");
}

#[test]
fn extracts_row_tables() {
    let report = parse_report(FIXTURE);

    // header row + 2 data rows + 1 all-null placeholder row
    assert_eq!(report.battery_usage.len(), 4);
    assert_eq!(report.battery_usage[0][0], "START TIME");
    assert_eq!(report.usage_history.len(), 3);
    assert_eq!(report.capacity_history.len(), 2);
    // double header plus two estimate rows
    assert_eq!(report.life_estimates.len(), 4);
}

#[test]
fn battery_usage_items_are_newest_first_without_null_rows() {
    let report = parse_report(FIXTURE);
    let list = section_items(&report, Section::BatteryUsage);

    assert_eq!(list.items.len(), 2);
    assert!(list.items[0].line.contains("Duration: 0:45:00"));
    assert!(list.items[1].line.contains("Duration: 1:30:00"));
    assert!(!list.items[0].line.contains("Energy drained: 12,345 mWh"));
    assert!(list.items[0].detail.contains("Columns: Start time | State | Duration | Energy drained"));
}

#[test]
fn life_estimates_have_average_prefix_item() {
    let report = parse_report(FIXTURE);
    let list = section_items(&report, Section::LifeEstimates);

    assert_eq!(list.prefix, 1);
    assert_eq!(list.items.len(), 3);
    let avg = &list.items[0];
    // (4h + 6h) / 2 and (40h + 60h) / 2, design columns likewise
    assert!(avg.line.contains("At full charge \u{2014} Active: 5:00:00, Connected standby: 50:00:00"));
    assert!(avg.line.contains("At design capacity \u{2014} Active: 6:00:00, Connected standby: 60:00:00"));
    // the 90:00:00 maximum column never contributes
    assert!(!avg.line.contains("90:00:00"));
    // newest period right after the average
    assert!(list.items[1].key > list.items[2].key);
}

#[test]
fn overview_items_include_health() {
    let report = parse_report(FIXTURE);
    let list = section_items(&report, Section::Overview);
    let lines: Vec<&str> = list.items.iter().map(|i| i.line.as_str()).collect();

    assert!(lines.contains(&"Computer name: PC1"));
    assert!(lines.iter().any(|l| l.starts_with("Battery health: 90 %")));
    assert!(lines.contains(&"Design capacity (mWh): 50,000"));
    assert!(lines.contains(&"Full charge capacity (mWh): 45,000"));
}

#[test]
fn summary_mentions_health_when_present() {
    let report = parse_report(FIXTURE);
    let summary = format_summary(&report);
    assert!(summary.contains("Health 90% (45,000/50,000 mWh)"), "summary: {}", summary);

    let empty = parse_report("<html></html>");
    assert!(format_summary(&empty).contains("Battery report"));
}
