//! Driving ports for duplicate-alert management.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::BackendError;
use crate::domain::DuplicateGroupId;

/// Result of a platform-wide deduplication pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DedupeOutcome {
    /// Number of alerts removed as duplicates.
    #[serde(default)]
    pub removed_count: u64,
    /// Procedure-specific detail payload.
    #[serde(default)]
    pub details: Value,
}

/// Result of removing one duplicate group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupRemoval {
    /// Number of alerts removed with the group.
    #[serde(default)]
    pub removed_count: u64,
}

/// Read side: inspect a duplicate group before acting on it.
#[async_trait]
pub trait DuplicateQuery: Send + Sync {
    /// List the alert rows belonging to one duplicate group.
    async fn group_alerts(&self, group: &DuplicateGroupId) -> Result<Vec<Value>, BackendError>;
}

/// Write side: run deduplication or remove a specific group.
#[async_trait]
pub trait DuplicateCommand: Send + Sync {
    /// Run the platform-wide deduplication procedure.
    async fn dedupe_all(&self) -> Result<DedupeOutcome, BackendError>;

    /// Remove one duplicate group by id.
    async fn remove_group(&self, group: &DuplicateGroupId) -> Result<GroupRemoval, BackendError>;
}

/// Fixture implementing both duplicate ports with canned data.
#[derive(Debug, Clone, Default)]
pub struct FixtureDuplicateAdmin {
    /// Alerts returned for every group lookup.
    pub alerts: Vec<Value>,
    /// Removed count reported by dedupe and group removal.
    pub removed_count: u64,
}

#[async_trait]
impl DuplicateQuery for FixtureDuplicateAdmin {
    async fn group_alerts(&self, _group: &DuplicateGroupId) -> Result<Vec<Value>, BackendError> {
        Ok(self.alerts.clone())
    }
}

#[async_trait]
impl DuplicateCommand for FixtureDuplicateAdmin {
    async fn dedupe_all(&self) -> Result<DedupeOutcome, BackendError> {
        Ok(DedupeOutcome {
            removed_count: self.removed_count,
            details: Value::Null,
        })
    }

    async fn remove_group(&self, _group: &DuplicateGroupId) -> Result<GroupRemoval, BackendError> {
        Ok(GroupRemoval {
            removed_count: self.removed_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_default_missing_fields_to_zero() {
        let outcome: DedupeOutcome = serde_json::from_str("{}").expect("deserialises");
        assert_eq!(outcome.removed_count, 0);
        assert_eq!(outcome.details, Value::Null);

        let removal: GroupRemoval = serde_json::from_str("{}").expect("deserialises");
        assert_eq!(removal.removed_count, 0);
    }
}
