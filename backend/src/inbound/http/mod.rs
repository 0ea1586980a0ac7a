//! HTTP inbound adapter exposing the REST endpoints.

pub mod agencies;
pub mod cache_admin;
pub mod duplicates;
pub mod error;
pub mod guard;
pub mod probes;
pub mod reindex;
pub mod search;
pub mod session;
pub mod source_health;
pub mod state;
pub mod sync;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use crate::domain::Error;
use crate::domain::ports::BackendError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Map a platform failure to the generic 500 returned to clients, keeping
/// the operator detail in the logs only.
pub(crate) fn map_backend_error(error: BackendError) -> Error {
    tracing::error!(%error, "platform operation failed");
    Error::internal("Internal server error")
}
