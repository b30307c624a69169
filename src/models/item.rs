use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One presentable line derived from a report section: an optional sort
/// key, the short display line, and the longer detail text shown when the
/// item is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionItem {
    pub key: Option<NaiveDateTime>,
    pub line: String,
    pub detail: String,
}

impl SectionItem {
    pub fn new(key: Option<NaiveDateTime>, line: String, detail: String) -> Self {
        Self { key, line, detail }
    }
}

