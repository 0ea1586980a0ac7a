//! Synchronization job types and the advisory job-in-flight guard.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::Error;
use super::ports::SyncLogQuery;

/// Discriminates the two kinds of ingestion jobs this service can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncJobKind {
    /// Operator-triggered incremental sync.
    Manual,
    /// Historical backfill over a bounded window of days.
    Backfill,
}

impl SyncJobKind {
    /// The `trigger_type` discriminator used by the platform's `sync_logs`.
    pub fn trigger_type(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Backfill => "backfill",
        }
    }
}

/// Validated backfill window in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillWindow(u32);

/// Validation errors returned when constructing a [`BackfillWindow`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum BackfillWindowError {
    /// The day count falls outside the accepted range.
    #[error("days must be between {min} and {max}", min = BackfillWindow::MIN_DAYS, max = BackfillWindow::MAX_DAYS)]
    OutOfRange {
        /// The rejected day count.
        days: u32,
    },
}

impl BackfillWindow {
    /// Smallest accepted window.
    pub const MIN_DAYS: u32 = 1;
    /// Largest accepted window.
    pub const MAX_DAYS: u32 = 365;

    /// Validate and construct a window.
    pub fn new(days: u32) -> Result<Self, BackfillWindowError> {
        if (Self::MIN_DAYS..=Self::MAX_DAYS).contains(&days) {
            Ok(Self(days))
        } else {
            Err(BackfillWindowError::OutOfRange { days })
        }
    }

    /// The window size in days.
    pub fn days(self) -> u32 {
        self.0
    }

    /// Operator-facing duration estimate: one minute per started week.
    pub fn estimated_duration(self) -> String {
        format!("{} minutes", self.0.div_ceil(7))
    }
}

/// Refuse to start a job while a matching `running` log row exists.
///
/// This check is advisory, not transactional: between the read and the
/// RPC-triggered insert of a new running row, two concurrent requests can
/// both pass. True serialization belongs to the remote trigger procedure.
pub async fn ensure_idle(log: &dyn SyncLogQuery, kind: Option<SyncJobKind>) -> Result<(), Error> {
    let running = log.any_running(kind).await.map_err(|error| {
        tracing::error!(%error, "sync log read failed");
        Error::internal("Internal server error")
    })?;
    if running {
        let message = match kind {
            Some(SyncJobKind::Backfill) => "a backfill job is already running",
            Some(SyncJobKind::Manual) | None => "a sync job is already running",
        };
        return Err(Error::conflict(message));
    }
    Ok(())
}
