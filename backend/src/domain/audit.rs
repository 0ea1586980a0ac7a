//! Audit records for mutating admin operations.
//!
//! Records are written after the primary mutation has committed remotely and
//! are strictly best-effort: a failed write is logged, never propagated.

use serde_json::{Value, json};

use super::admin::AdminId;
use super::duplicates::DuplicateGroupId;

/// One audit log entry describing a privileged operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOperation {
    /// Machine-readable operation discriminator.
    pub operation_type: String,
    /// The administrator who performed the operation.
    pub performed_by: AdminId,
    /// Free-form structured payload describing the operation.
    pub details: Value,
}

impl AdminOperation {
    /// Build a record with an arbitrary operation type.
    pub fn new(operation_type: impl Into<String>, performed_by: AdminId, details: Value) -> Self {
        Self {
            operation_type: operation_type.into(),
            performed_by,
            details,
        }
    }

    /// Record the removal of one duplicate group.
    pub fn duplicate_removal(
        performed_by: AdminId,
        group: &DuplicateGroupId,
        removed_count: u64,
    ) -> Self {
        Self::new(
            "duplicate_removal",
            performed_by,
            json!({
                "group_id": group.as_str(),
                "removed_count": removed_count,
            }),
        )
    }
}
