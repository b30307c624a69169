use serde::{Deserialize, Serialize};

/// Raw tabular data: a header row (column names) followed by zero or more
/// data rows. May contain all-null placeholder rows that consumers filter.
pub type RowTable = Vec<Vec<String>>;

/// Fields of the table directly under the report's top-level heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub computer_name: String,
    pub system_product_name: String,
    pub bios: String,
    pub os_build: String,
    pub platform_role: String,
    pub connected_standby: String,
    pub report_time: String,
}

/// Attributes of the "Installed batteries" table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledBattery {
    pub name: String,
    pub manufacturer: String,
    pub serial_number: String,
    pub chemistry: String,
    pub design_capacity: String,
    pub full_charge_capacity: String,
    pub cycle_count: String,
}

/// One parsed battery diagnostic snapshot. Every field is best-effort:
/// sections missing from the markup come through as empty values, never as
/// a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    pub header: ReportHeader,
    pub installed: InstalledBattery,
    /// Factory-specified maximum energy, milliwatt-hours.
    pub design_mwh: Option<u64>,
    /// Current maximum energy after wear, milliwatt-hours.
    pub full_mwh: Option<u64>,
    /// `full / design * 100` rounded to 2 decimals. Present iff both
    /// capacities resolved and design > 0.
    pub health_pct: Option<f64>,
    pub recent_usage: RowTable,
    pub battery_usage: RowTable,
    pub usage_history: RowTable,
    pub capacity_history: RowTable,
    pub life_estimates: RowTable,
}
