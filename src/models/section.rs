use serde::{Deserialize, Serialize};

/// The browsable sections of a parsed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Overview,
    Installed,
    RecentUsage,
    BatteryUsage,
    CapacityHistory,
    UsageHistory,
    LifeEstimates,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Overview,
        Section::Installed,
        Section::RecentUsage,
        Section::BatteryUsage,
        Section::CapacityHistory,
        Section::UsageHistory,
        Section::LifeEstimates,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::Installed => "installed",
            Section::RecentUsage => "recent",
            Section::BatteryUsage => "battery_usage",
            Section::CapacityHistory => "capacity_history",
            Section::UsageHistory => "usage_history",
            Section::LifeEstimates => "life_estimates",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "overview" => Some(Section::Overview),
            "installed" => Some(Section::Installed),
            "recent" => Some(Section::RecentUsage),
            "battery_usage" => Some(Section::BatteryUsage),
            "capacity_history" => Some(Section::CapacityHistory),
            "usage_history" => Some(Section::UsageHistory),
            "life_estimates" => Some(Section::LifeEstimates),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::Installed => "Installed battery",
            Section::RecentUsage => "Recent usage (last 7 days)",
            Section::BatteryUsage => "Battery usage (last 7 days)",
            Section::CapacityHistory => "Capacity history",
            Section::UsageHistory => "Usage history",
            Section::LifeEstimates => "Battery life estimates",
        }
    }
}
