//! Platform-backed search index maintenance.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{PlatformClient, decode, map_platform_error};
use crate::domain::ports::{BackendError, ReindexOutcome, SearchIndexCommand};

/// Rebuilds the alert search indexes through one stored procedure.
pub struct PlatformSearchIndex {
    client: Arc<PlatformClient>,
}

impl PlatformSearchIndex {
    /// Create an adapter backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchIndexCommand for PlatformSearchIndex {
    async fn rebuild(&self) -> Result<ReindexOutcome, BackendError> {
        let payload = self
            .client
            .rpc("reindex_alerts", &json!({}))
            .await
            .map_err(map_platform_error)?;
        decode("reindex_alerts", payload)
    }
}
