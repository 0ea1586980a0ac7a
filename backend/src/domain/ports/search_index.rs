//! Driving port for rebuilding the alert search indexes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BackendError;

/// Result of a reindex pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReindexOutcome {
    /// Number of indexes (re)created.
    #[serde(default)]
    pub indexes_created: u64,
    /// Wall-clock duration of the pass in milliseconds.
    #[serde(default)]
    pub duration_ms: u64,
    /// Procedure-specific detail payload.
    #[serde(default)]
    pub details: Value,
}

/// Write side of search-index maintenance.
#[async_trait]
pub trait SearchIndexCommand: Send + Sync {
    /// Rebuild the search indexes.
    async fn rebuild(&self) -> Result<ReindexOutcome, BackendError>;
}

/// Fixture returning a canned outcome.
#[derive(Debug, Clone, Default)]
pub struct FixtureSearchIndex {
    /// Outcome returned by every rebuild.
    pub outcome: ReindexOutcome,
}

#[async_trait]
impl SearchIndexCommand for FixtureSearchIndex {
    async fn rebuild(&self) -> Result<ReindexOutcome, BackendError> {
        Ok(self.outcome.clone())
    }
}
