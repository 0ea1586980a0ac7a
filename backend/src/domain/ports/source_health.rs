//! Driving ports for data-source health reporting.

use async_trait::async_trait;
use serde_json::Value;

use super::BackendError;
use crate::domain::HealthSnapshot;

/// Read side: the most recent health snapshot.
#[async_trait]
pub trait SourceHealthQuery: Send + Sync {
    /// Fetch the current per-source health snapshot.
    async fn snapshot(&self) -> Result<HealthSnapshot, BackendError>;
}

/// Write side: run the health checks now.
#[async_trait]
pub trait SourceHealthCommand: Send + Sync {
    /// Trigger an immediate health check pass; the platform's results are
    /// passed through unshaped.
    async fn run_checks(&self) -> Result<Value, BackendError>;
}

/// Fixture implementing both health ports with canned data.
#[derive(Debug, Clone, Default)]
pub struct FixtureSourceHealth {
    /// Snapshot returned by every read.
    pub snapshot: HealthSnapshot,
    /// Results payload returned by every check trigger.
    pub results: Value,
}

#[async_trait]
impl SourceHealthQuery for FixtureSourceHealth {
    async fn snapshot(&self) -> Result<HealthSnapshot, BackendError> {
        Ok(self.snapshot.clone())
    }
}

#[async_trait]
impl SourceHealthCommand for FixtureSourceHealth {
    async fn run_checks(&self) -> Result<Value, BackendError> {
        Ok(self.results.clone())
    }
}
