//! Driving port for subscriber alert search.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use super::BackendError;

/// Full-text alert search executed by the remote platform.
#[async_trait]
pub trait AlertSearch: Send + Sync {
    /// Run a search; rows are returned as the platform shaped them.
    async fn search(&self, query: &str, filters: &Value) -> Result<Vec<Value>, BackendError>;
}

/// Fixture returning canned rows and counting invocations, so tests can
/// verify that cache hits skip the backend.
#[derive(Debug, Default)]
pub struct FixtureAlertSearch {
    /// Rows returned by every search.
    pub results: Vec<Value>,
    calls: AtomicU64,
}

impl FixtureAlertSearch {
    /// Fixture returning the given rows.
    pub fn with_results(results: Vec<Value>) -> Self {
        Self {
            results,
            calls: AtomicU64::new(0),
        }
    }

    /// Number of times `search` has been invoked.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertSearch for FixtureAlertSearch {
    async fn search(&self, _query: &str, _filters: &Value) -> Result<Vec<Value>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }
}
