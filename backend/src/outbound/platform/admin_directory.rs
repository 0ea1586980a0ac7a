//! Platform-backed administrator profile lookup over the `profiles` table.

use std::sync::Arc;

use async_trait::async_trait;

use super::{PlatformClient, map_platform_error};
use crate::domain::ports::{AdminDirectory, BackendError};
use crate::domain::{AdminId, AdminProfile};

/// Reads administrator profiles from the platform's `profiles` table.
pub struct PlatformAdminDirectory {
    client: Arc<PlatformClient>,
}

impl PlatformAdminDirectory {
    /// Create a directory backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminDirectory for PlatformAdminDirectory {
    async fn find_profile(&self, id: AdminId) -> Result<Option<AdminProfile>, BackendError> {
        let rows = self
            .client
            .select(
                "profiles",
                &[
                    ("id", format!("eq.{id}")),
                    ("select", "id,email,is_admin".to_owned()),
                    ("limit", "1".to_owned()),
                ],
            )
            .await
            .map_err(map_platform_error)?;

        let row = rows.as_array().and_then(|rows| rows.first()).cloned();
        match row {
            Some(row) => serde_json::from_value(row)
                .map(Some)
                .map_err(|error| BackendError::query(format!("invalid profile row: {error}"))),
            None => Ok(None),
        }
    }
}
