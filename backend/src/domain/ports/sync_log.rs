//! Read port over the platform's `sync_logs` table.
//!
//! The table is owned by the external sync worker; this service only reads
//! it to detect in-flight jobs before triggering new ones.

use async_trait::async_trait;

use super::BackendError;
use crate::domain::SyncJobKind;

/// Read side of the job log.
#[async_trait]
pub trait SyncLogQuery: Send + Sync {
    /// Whether at least one `running` row exists, optionally filtered by
    /// trigger type.
    async fn any_running(&self, kind: Option<SyncJobKind>) -> Result<bool, BackendError>;
}

/// Fixture with a configurable set of running jobs.
#[derive(Debug, Clone, Default)]
pub struct FixtureSyncLogQuery {
    running: Vec<SyncJobKind>,
}

impl FixtureSyncLogQuery {
    /// A log with no running jobs.
    pub fn idle() -> Self {
        Self::default()
    }

    /// A log with the given jobs currently running.
    pub fn with_running(running: Vec<SyncJobKind>) -> Self {
        Self { running }
    }
}

#[async_trait]
impl SyncLogQuery for FixtureSyncLogQuery {
    async fn any_running(&self, kind: Option<SyncJobKind>) -> Result<bool, BackendError> {
        Ok(match kind {
            Some(kind) => self.running.contains(&kind),
            None => !self.running.is_empty(),
        })
    }
}
