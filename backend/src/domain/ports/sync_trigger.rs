//! Driving port for starting ingestion jobs on the remote sync worker.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BackendError;
use crate::domain::{AdminId, BackfillWindow};

/// Parameters for a manual incremental sync.
///
/// `days` is deliberately unbounded here: the original system never
/// constrained it on this path (unlike backfill) and the remote procedure's
/// tolerance is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Optional look-back window in days; the procedure applies its default
    /// when absent.
    pub days: Option<u32>,
    /// Restrict the sync to these sources; empty means all.
    pub sources: Vec<String>,
    /// The administrator starting the job.
    pub triggered_by: AdminId,
}

/// Parameters for a historical backfill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackfillRequest {
    /// Validated backfill window.
    pub window: BackfillWindow,
    /// Restrict the backfill to these sources; empty means all.
    pub sources: Vec<String>,
    /// The administrator starting the job.
    pub triggered_by: AdminId,
}

/// Acknowledgement for a started manual sync.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyncStart {
    /// Identifier of the started job.
    #[serde(default)]
    pub sync_id: String,
    /// Procedure-specific result payload.
    #[serde(default)]
    pub results: Value,
}

/// Acknowledgement for a started backfill.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BackfillStart {
    /// Identifier of the started job.
    #[serde(default)]
    pub backfill_id: String,
    /// Procedure-specific result payload.
    #[serde(default)]
    pub results: Value,
}

/// Write side of job triggering.
#[async_trait]
pub trait SyncTrigger: Send + Sync {
    /// Start a manual incremental sync.
    async fn start_manual_sync(&self, request: &SyncRequest) -> Result<SyncStart, BackendError>;

    /// Start a historical backfill.
    async fn start_backfill(&self, request: &BackfillRequest)
    -> Result<BackfillStart, BackendError>;
}

/// Fixture acknowledging every trigger with fixed job ids.
#[derive(Debug, Clone)]
pub struct FixtureSyncTrigger {
    /// Sync id returned by every manual trigger.
    pub sync_id: String,
    /// Backfill id returned by every backfill trigger.
    pub backfill_id: String,
}

impl Default for FixtureSyncTrigger {
    fn default() -> Self {
        Self {
            sync_id: "sync-fixture-1".to_owned(),
            backfill_id: "backfill-fixture-1".to_owned(),
        }
    }
}

#[async_trait]
impl SyncTrigger for FixtureSyncTrigger {
    async fn start_manual_sync(&self, _request: &SyncRequest) -> Result<SyncStart, BackendError> {
        Ok(SyncStart {
            sync_id: self.sync_id.clone(),
            results: Value::Null,
        })
    }

    async fn start_backfill(
        &self,
        _request: &BackfillRequest,
    ) -> Result<BackfillStart, BackendError> {
        Ok(BackfillStart {
            backfill_id: self.backfill_id.clone(),
            results: Value::Null,
        })
    }
}
