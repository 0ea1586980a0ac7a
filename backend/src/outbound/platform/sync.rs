//! Platform-backed job triggering and sync-log reads.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use super::{PlatformClient, decode, map_platform_error};
use crate::domain::SyncJobKind;
use crate::domain::ports::{
    BackendError, BackfillRequest, BackfillStart, SyncLogQuery, SyncRequest, SyncStart,
    SyncTrigger,
};

/// Implements job triggering and the job-in-flight read.
///
/// Triggers delegate to the platform's procedures, which insert the
/// `running` log row themselves; the read side only ever inspects
/// `sync_logs`, never writes it.
pub struct PlatformSyncGateway {
    client: Arc<PlatformClient>,
}

impl PlatformSyncGateway {
    /// Create a gateway backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SyncTrigger for PlatformSyncGateway {
    async fn start_manual_sync(&self, request: &SyncRequest) -> Result<SyncStart, BackendError> {
        let payload = self
            .client
            .rpc(
                "trigger_manual_sync",
                &json!({
                    "days": request.days,
                    "sources": request.sources,
                    "triggered_by": request.triggered_by.to_string(),
                }),
            )
            .await
            .map_err(map_platform_error)?;
        decode("trigger_manual_sync", payload)
    }

    async fn start_backfill(
        &self,
        request: &BackfillRequest,
    ) -> Result<BackfillStart, BackendError> {
        let payload = self
            .client
            .rpc(
                "trigger_backfill",
                &json!({
                    "days": request.window.days(),
                    "sources": request.sources,
                    "triggered_by": request.triggered_by.to_string(),
                }),
            )
            .await
            .map_err(map_platform_error)?;
        decode("trigger_backfill", payload)
    }
}

#[async_trait]
impl SyncLogQuery for PlatformSyncGateway {
    async fn any_running(&self, kind: Option<SyncJobKind>) -> Result<bool, BackendError> {
        let mut filters = vec![
            ("status", "eq.running".to_owned()),
            ("select", "id".to_owned()),
            ("limit", "1".to_owned()),
        ];
        if let Some(kind) = kind {
            filters.push(("trigger_type", format!("eq.{}", kind.trigger_type())));
        }
        let rows = self
            .client
            .select("sync_logs", &filters)
            .await
            .map_err(map_platform_error)?;
        Ok(rows.as_array().is_some_and(|rows| !rows.is_empty()))
    }
}
