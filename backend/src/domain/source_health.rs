//! Data-source health reporting types and the overall-status derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health classification reported by the remote platform for one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    /// The source is ingesting normally.
    Healthy,
    /// The source is ingesting with elevated failures or lag.
    Degraded,
    /// The source is not ingesting.
    Unhealthy,
    /// The platform reported a status this service does not recognise.
    #[serde(other)]
    Unknown,
}

/// Health report for one government data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceHealth {
    /// Source identifier (e.g. `fda`, `usda`, `epa`).
    pub source: String,
    /// Reported status for the source.
    pub status: SourceStatus,
    /// When the source was last checked, if known.
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,
    /// Number of alerts ingested from the source.
    #[serde(default)]
    pub alert_count: u64,
    /// Optional operator-facing note from the checker.
    #[serde(default)]
    pub message: Option<String>,
}

impl SourceHealth {
    /// Whether the source counts towards the healthy tally.
    pub fn is_healthy(&self) -> bool {
        self.status == SourceStatus::Healthy
    }
}

/// Point-in-time health report across every configured source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Per-source health reports.
    #[serde(default)]
    pub sources: Vec<SourceHealth>,
    /// When the snapshot was produced, if the platform recorded it.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Aggregate status derived from the per-source reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    /// Every source is healthy.
    Healthy,
    /// At least half of the sources are healthy.
    Degraded,
    /// Fewer than half of the sources are healthy, or no sources exist.
    Unhealthy,
}

impl HealthSnapshot {
    /// Derive the aggregate status.
    ///
    /// `Healthy` when every source is healthy, `Degraded` when at least half
    /// are, `Unhealthy` otherwise. An empty source list reports `Unhealthy`:
    /// absence of evidence is not health.
    pub fn overall_status(&self) -> OverallStatus {
        let total = self.sources.len();
        if total == 0 {
            return OverallStatus::Unhealthy;
        }
        let healthy = self.sources.iter().filter(|s| s.is_healthy()).count();
        if healthy == total {
            OverallStatus::Healthy
        } else if healthy * 2 >= total {
            OverallStatus::Degraded
        } else {
            OverallStatus::Unhealthy
        }
    }
}
