//! Platform-backed search cache store over the `search_cache` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{PlatformClient, map_platform_error};
use crate::domain::ports::{BackendError, SearchCacheStore};
use crate::domain::{CacheEntry, SearchCacheKey};

/// Raw row operations over the platform's `search_cache` table.
///
/// The best-effort policy lives in the domain's cache service; this adapter
/// reports failures faithfully.
pub struct PlatformSearchCacheStore {
    client: Arc<PlatformClient>,
}

impl PlatformSearchCacheStore {
    /// Create a store backed by the given client.
    pub fn new(client: Arc<PlatformClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchCacheStore for PlatformSearchCacheStore {
    async fn fetch(&self, key: &SearchCacheKey) -> Result<Option<CacheEntry>, BackendError> {
        let rows = self
            .client
            .select(
                "search_cache",
                &[
                    ("cache_key", format!("eq.{key}")),
                    (
                        "select",
                        "cache_key,query,result_data,expires_at".to_owned(),
                    ),
                    ("limit", "1".to_owned()),
                ],
            )
            .await
            .map_err(map_platform_error)?;

        let row = rows.as_array().and_then(|rows| rows.first()).cloned();
        match row {
            Some(row) => serde_json::from_value(row)
                .map(Some)
                .map_err(|error| BackendError::query(format!("invalid cache row: {error}"))),
            None => Ok(None),
        }
    }

    async fn store(&self, entry: &CacheEntry) -> Result<(), BackendError> {
        let row = serde_json::to_value(entry)
            .map_err(|error| BackendError::query(format!("cache row serialisation: {error}")))?;
        self.client
            .upsert("search_cache", &row, "cache_key")
            .await
            .map_err(map_platform_error)
    }

    async fn delete(&self, key: &SearchCacheKey) -> Result<(), BackendError> {
        self.client
            .delete("search_cache", &[("cache_key", format!("eq.{key}"))])
            .await
            .map(|_| ())
            .map_err(map_platform_error)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, BackendError> {
        self.client
            .delete(
                "search_cache",
                &[("expires_at", format!("lt.{}", now.to_rfc3339()))],
            )
            .await
            .map_err(map_platform_error)
    }
}
