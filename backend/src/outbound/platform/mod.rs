//! Adapters for the hosted data platform.
//!
//! The platform exposes stored procedures as `POST {base}/rpc/{function}`
//! and table CRUD with query-string filters. Each adapter implements one
//! domain port with exactly one remote operation per method; error detail
//! stays in the [`crate::domain::ports::BackendError`] message for operator
//! logs and is never returned to clients.

mod admin_directory;
mod agencies;
mod alert_search;
mod audit;
mod client;
mod duplicates;
mod search_cache;
mod search_index;
mod source_health;
mod sync;

pub use admin_directory::PlatformAdminDirectory;
pub use agencies::PlatformAgencyQuery;
pub use alert_search::PlatformAlertSearch;
pub use audit::PlatformAuditLog;
pub use client::{PlatformClient, PlatformError, PlatformSettings, ServiceKey};
pub use duplicates::PlatformDuplicateAdmin;
pub use search_cache::PlatformSearchCacheStore;
pub use search_index::PlatformSearchIndex;
pub use source_health::PlatformSourceHealth;
pub use sync::PlatformSyncGateway;

use crate::domain::ports::BackendError;

/// Map transport-level failures to the shared port error taxonomy.
fn map_platform_error(error: PlatformError) -> BackendError {
    match error {
        PlatformError::Transport { message } | PlatformError::Config { message } => {
            BackendError::connection(message)
        }
        PlatformError::Status { status, message } => {
            BackendError::query(format!("platform returned {status}: {message}"))
        }
        PlatformError::Decode { message } => BackendError::query(message),
    }
}

/// Decode an RPC payload into a typed outcome, mapping decode failures to
/// the shared taxonomy.
fn decode<T: serde::de::DeserializeOwned>(
    function: &str,
    payload: serde_json::Value,
) -> Result<T, BackendError> {
    serde_json::from_value(payload)
        .map_err(|error| BackendError::query(format!("invalid {function} payload: {error}")))
}
