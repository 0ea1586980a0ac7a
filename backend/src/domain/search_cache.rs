//! Expiring search-result cache: key derivation, entries, and the service
//! that owns the best-effort failure policy.
//!
//! The cache is a pure optimization layered over the platform's
//! `search_cache` table. Storage failures are logged and swallowed so a
//! broken cache can never fail the caller's primary request.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::ports::SearchCacheStore;

/// Maximum stored key length in characters.
const MAX_KEY_CHARS: usize = 255;
/// Maximum stored query length in characters.
const MAX_QUERY_CHARS: usize = 500;
/// How long a cached result remains servable.
const TTL_MINUTES: i64 = 30;

/// Deterministic identifier for one `(query, filters)` search request.
///
/// Derived as `lowercase-trimmed query` + `:` + base64 of the filter JSON
/// with recursively sorted object keys, truncated to 255 characters.
/// Identical requests collide intentionally regardless of filter key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchCacheKey(String);

impl SearchCacheKey {
    /// Derive the cache key for a search request.
    pub fn derive(query: &str, filters: &Value) -> Self {
        let normalized = query.trim().to_lowercase();
        let canonical =
            serde_json::to_string(&sort_object_keys(filters.clone())).unwrap_or_default();
        let encoded = URL_SAFE_NO_PAD.encode(canonical);
        Self(truncate_chars(&format!("{normalized}:{encoded}"), MAX_KEY_CHARS))
    }

    /// Borrow the underlying key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for SearchCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recursively rewrite JSON objects with lexicographically sorted keys so the
/// serialized form is independent of insertion order.
fn sort_object_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(k, v)| (k, sort_object_keys(v)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_object_keys).collect()),
        other => other,
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// One row of the expiring cache table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Deterministic request key; the table's conflict target.
    pub cache_key: SearchCacheKey,
    /// The originating query, truncated for diagnostics.
    pub query: String,
    /// Opaque cached result payload.
    pub result_data: Value,
    /// Instant after which the entry must never be returned.
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Build a fresh entry expiring [`TTL_MINUTES`] minutes after `now`.
    pub fn fresh(query: &str, filters: &Value, result_data: Value, now: DateTime<Utc>) -> Self {
        Self {
            cache_key: SearchCacheKey::derive(query, filters),
            query: truncate_chars(query, MAX_QUERY_CHARS),
            result_data,
            expires_at: now + Duration::minutes(TTL_MINUTES),
        }
    }

    /// Whether the entry has passed its expiry instant.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Cache facade used by search flows.
///
/// Every method swallows storage failures after logging them; callers can
/// treat the cache as infallible and merely lossy.
#[derive(Clone)]
pub struct SearchCacheService {
    store: Arc<dyn SearchCacheStore>,
}

impl SearchCacheService {
    /// Wrap a cache store.
    pub fn new(store: Arc<dyn SearchCacheStore>) -> Self {
        Self { store }
    }

    /// Look up a cached result; expired rows are lazily deleted and reported
    /// as misses.
    pub async fn lookup(&self, query: &str, filters: &Value) -> Option<Value> {
        let key = SearchCacheKey::derive(query, filters);
        let entry = match self.store.fetch(&key).await {
            Ok(entry) => entry?,
            Err(error) => {
                warn!(%error, %key, "search cache read failed; treating as miss");
                return None;
            }
        };
        if entry.is_expired(Utc::now()) {
            if let Err(error) = self.store.delete(&key).await {
                warn!(%error, %key, "failed to delete expired cache entry");
            }
            return None;
        }
        Some(entry.result_data)
    }

    /// Upsert a result for the given request.
    pub async fn store(&self, query: &str, filters: &Value, result_data: Value) {
        let entry = CacheEntry::fresh(query, filters, result_data, Utc::now());
        if let Err(error) = self.store.store(&entry).await {
            warn!(%error, key = %entry.cache_key, "search cache write failed");
        }
    }

    /// Bulk-delete every expired row; returns the number removed (0 when the
    /// store is unreachable).
    pub async fn sweep(&self) -> u64 {
        match self.store.purge_expired(Utc::now()).await {
            Ok(removed) => removed,
            Err(error) => {
                warn!(%error, "search cache sweep failed");
                0
            }
        }
    }
}
