//! Platform-backed data-source health procedures.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{PlatformClient, decode, map_platform_error};
use crate::domain::HealthSnapshot;
use crate::domain::ports::{BackendError, SourceHealthCommand, SourceHealthQuery};

/// Implements both health ports through the platform's procedures.
pub struct PlatformSourceHealth {
    client: Arc<PlatformClient>,
}

impl PlatformSourceHealth {
    /// Create an adapter backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceHealthQuery for PlatformSourceHealth {
    async fn snapshot(&self) -> Result<HealthSnapshot, BackendError> {
        let payload = self
            .client
            .rpc("get_health_status", &json!({}))
            .await
            .map_err(map_platform_error)?;
        decode("get_health_status", payload)
    }
}

#[async_trait]
impl SourceHealthCommand for PlatformSourceHealth {
    async fn run_checks(&self) -> Result<Value, BackendError> {
        self.client
            .rpc("run_health_check", &json!({}))
            .await
            .map_err(map_platform_error)
    }
}
