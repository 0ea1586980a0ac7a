//! Write port for the admin operations audit log.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::BackendError;
use crate::domain::AdminOperation;

/// Append-only audit log. Callers treat failures as best-effort: log the
/// error, never fail the primary operation.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append one operation record.
    async fn record(&self, operation: &AdminOperation) -> Result<(), BackendError>;
}

/// Recording fixture capturing every appended operation.
#[derive(Debug, Default)]
pub struct FixtureAuditLog {
    recorded: Mutex<Vec<AdminOperation>>,
    fail: bool,
}

impl FixtureAuditLog {
    /// A log that records every append.
    pub fn recording() -> Self {
        Self::default()
    }

    /// A log whose appends always fail, for best-effort coverage.
    pub fn failing() -> Self {
        Self {
            recorded: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Snapshot of the recorded operations.
    pub fn recorded(&self) -> Vec<AdminOperation> {
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AuditLog for FixtureAuditLog {
    async fn record(&self, operation: &AdminOperation) -> Result<(), BackendError> {
        if self.fail {
            return Err(BackendError::query("audit log unavailable"));
        }
        self.recorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(operation.clone());
        Ok(())
    }
}
