use async_trait::async_trait;

use crate::models::HistoryEntry;

mod json;
pub use json::JsonHistoryStore;

/// Persisted report history. Best-effort by contract: loading falls back to
/// an empty list and saving swallows failures, so persistence problems
/// never interrupt the user-visible flow.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn load(&self) -> Vec<HistoryEntry>;
    async fn save(&self, entries: &[HistoryEntry]);
}
