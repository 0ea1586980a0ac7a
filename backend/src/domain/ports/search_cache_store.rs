//! Raw storage port behind the search-result cache.
//!
//! The store exposes fallible row operations; the best-effort policy (log
//! and swallow) lives in [`crate::domain::SearchCacheService`] so the
//! contract stays visible rather than hidden in catch blocks.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::BackendError;
use crate::domain::search_cache::{CacheEntry, SearchCacheKey};

/// Expiring key/value row store over the platform's `search_cache` table.
#[async_trait]
pub trait SearchCacheStore: Send + Sync {
    /// Read the row for `key`, expired or not.
    async fn fetch(&self, key: &SearchCacheKey) -> Result<Option<CacheEntry>, BackendError>;

    /// Insert or replace the row keyed by `entry.cache_key`.
    async fn store(&self, entry: &CacheEntry) -> Result<(), BackendError>;

    /// Delete the row for `key`; deleting a missing row is not an error.
    async fn delete(&self, key: &SearchCacheKey) -> Result<(), BackendError>;

    /// Delete every row with `expires_at` before `now`; returns the count.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, BackendError>;
}

/// In-memory store used by tests and fixture wiring.
#[derive(Debug, Default)]
pub struct FixtureSearchCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
    fail: bool,
}

impl FixtureSearchCacheStore {
    /// A store whose every operation fails, for best-effort coverage.
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    /// Insert a row directly, bypassing the service (test setup).
    pub fn insert_raw(&self, entry: CacheEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(entry.cache_key.as_str().to_owned(), entry);
    }

    /// Whether a row exists for `key`.
    pub fn contains(&self, key: &SearchCacheKey) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key.as_str())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>, BackendError> {
        if self.fail {
            return Err(BackendError::connection("cache store unavailable"));
        }
        Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl SearchCacheStore for FixtureSearchCacheStore {
    async fn fetch(&self, key: &SearchCacheKey) -> Result<Option<CacheEntry>, BackendError> {
        Ok(self.guard()?.get(key.as_str()).cloned())
    }

    async fn store(&self, entry: &CacheEntry) -> Result<(), BackendError> {
        self.guard()?
            .insert(entry.cache_key.as_str().to_owned(), entry.clone());
        Ok(())
    }

    async fn delete(&self, key: &SearchCacheKey) -> Result<(), BackendError> {
        self.guard()?.remove(key.as_str());
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, BackendError> {
        let mut entries = self.guard()?;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        Ok((before - entries.len()) as u64)
    }
}
