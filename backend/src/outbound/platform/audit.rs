//! Platform-backed audit log writes into the `admin_operations` table.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{PlatformClient, map_platform_error};
use crate::domain::AdminOperation;
use crate::domain::ports::{AuditLog, BackendError};

/// Appends audit rows to the platform's `admin_operations` table.
///
/// Rows are never updated or deleted by this service.
pub struct PlatformAuditLog {
    client: Arc<PlatformClient>,
}

impl PlatformAuditLog {
    /// Create an audit adapter backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuditLog for PlatformAuditLog {
    async fn record(&self, operation: &AdminOperation) -> Result<(), BackendError> {
        self.client
            .insert(
                "admin_operations",
                &json!({
                    "operation_type": operation.operation_type,
                    "performed_by": operation.performed_by.to_string(),
                    "details": operation.details,
                }),
            )
            .await
            .map_err(map_platform_error)
    }
}
