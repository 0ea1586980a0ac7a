//! Platform-backed duplicate management procedures.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{PlatformClient, decode, map_platform_error};
use crate::domain::DuplicateGroupId;
use crate::domain::ports::{
    BackendError, DedupeOutcome, DuplicateCommand, DuplicateQuery, GroupRemoval,
};

/// Implements both duplicate ports through the platform's procedures.
pub struct PlatformDuplicateAdmin {
    client: Arc<PlatformClient>,
}

impl PlatformDuplicateAdmin {
    /// Create an adapter backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DuplicateQuery for PlatformDuplicateAdmin {
    async fn group_alerts(&self, group: &DuplicateGroupId) -> Result<Vec<Value>, BackendError> {
        let payload = self
            .client
            .rpc(
                "get_duplicate_group_alerts",
                &json!({ "group_id": group.as_str() }),
            )
            .await
            .map_err(map_platform_error)?;
        match payload {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(BackendError::query(format!(
                "unexpected get_duplicate_group_alerts payload: {other}"
            ))),
        }
    }
}

#[async_trait]
impl DuplicateCommand for PlatformDuplicateAdmin {
    async fn dedupe_all(&self) -> Result<DedupeOutcome, BackendError> {
        let payload = self
            .client
            .rpc("deduplicate_alerts", &json!({}))
            .await
            .map_err(map_platform_error)?;
        decode("deduplicate_alerts", payload)
    }

    async fn remove_group(&self, group: &DuplicateGroupId) -> Result<GroupRemoval, BackendError> {
        let payload = self
            .client
            .rpc(
                "remove_duplicate_group",
                &json!({ "group_id": group.as_str() }),
            )
            .await
            .map_err(map_platform_error)?;
        decode("remove_duplicate_group", payload)
    }
}
