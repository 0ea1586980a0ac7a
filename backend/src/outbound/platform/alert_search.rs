//! Platform-backed alert search via the `search_alerts` procedure.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{PlatformClient, map_platform_error};
use crate::domain::ports::{AlertSearch, BackendError};

/// Runs subscriber searches through one stored procedure.
pub struct PlatformAlertSearch {
    client: Arc<PlatformClient>,
}

impl PlatformAlertSearch {
    /// Create a search adapter backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertSearch for PlatformAlertSearch {
    async fn search(&self, query: &str, filters: &Value) -> Result<Vec<Value>, BackendError> {
        let payload = self
            .client
            .rpc(
                "search_alerts",
                &json!({
                    "search_query": query,
                    "filters": filters,
                }),
            )
            .await
            .map_err(map_platform_error)?;
        match payload {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => Err(BackendError::query(format!(
                "unexpected search_alerts payload: {other}"
            ))),
        }
    }
}
