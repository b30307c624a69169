use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

use crate::models::HistoryEntry;
use crate::storage::HistoryStore;

pub struct JsonHistoryStore {
    path: PathBuf,
    cap: usize,
}

impl JsonHistoryStore {
    pub fn new(path: PathBuf, cap: usize) -> Self {
        Self { path, cap }
    }
}

#[async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn load(&self) -> Vec<HistoryEntry> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not parse history file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    async fn save(&self, entries: &[HistoryEntry]) {
        let capped = &entries[..entries.len().min(self.cap)];
        let json = match serde_json::to_vec_pretty(capped) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize history: {}", e);
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, json).await {
            warn!("Could not write history file {}: {}", self.path.display(), e);
        }
    }
}
