use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Report;

/// Maximum number of entries kept in the persisted history.
pub const HISTORY_CAP: usize = 100;

/// One persisted generation: the one-line summary shown in the history
/// list, the raw HTML file the report came from, and the parsed report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub summary: String,
    pub path: PathBuf,
    pub info: Report,
}
