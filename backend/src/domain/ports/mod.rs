//! Domain ports for the hexagonal boundary.
//!
//! Inbound adapters call these traits without knowing the backing
//! infrastructure; the outbound platform adapters implement them. Every port
//! ships a `Fixture*` in-memory implementation so handler tests and local
//! wiring stay deterministic without I/O.

use thiserror::Error as ThisError;

mod admin_directory;
mod agency_query;
mod alert_search;
mod audit_log;
mod duplicate_admin;
mod search_cache_store;
mod search_index;
mod source_health;
mod sync_log;
mod sync_trigger;

#[cfg(test)]
pub use admin_directory::MockAdminDirectory;
pub use admin_directory::{AdminDirectory, FixtureAdminDirectory};
pub use agency_query::{AgencyListing, AgencyListingRequest, AgencyQuery, FixtureAgencyQuery};
pub use alert_search::{AlertSearch, FixtureAlertSearch};
pub use audit_log::{AuditLog, FixtureAuditLog};
pub use duplicate_admin::{
    DedupeOutcome, DuplicateCommand, DuplicateQuery, FixtureDuplicateAdmin, GroupRemoval,
};
pub use search_cache_store::{FixtureSearchCacheStore, SearchCacheStore};
pub use search_index::{FixtureSearchIndex, ReindexOutcome, SearchIndexCommand};
pub use source_health::{FixtureSourceHealth, SourceHealthCommand, SourceHealthQuery};
pub use sync_log::{FixtureSyncLogQuery, SyncLogQuery};
pub use sync_trigger::{
    BackfillRequest, BackfillStart, FixtureSyncTrigger, SyncRequest, SyncStart, SyncTrigger,
};

/// Failure taxonomy shared by every platform-backed port.
///
/// One hosted platform fronts all of these ports, so a single split between
/// connectivity and query failures is enough. The message carries operator
/// detail; it is logged, never returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum BackendError {
    /// The platform is unreachable or timing out.
    #[error("platform connection failure: {message}")]
    Connection {
        /// Operator-facing failure detail.
        message: String,
    },
    /// The platform rejected or failed the operation.
    #[error("platform query failure: {message}")]
    Query {
        /// Operator-facing failure detail.
        message: String,
    },
}

impl BackendError {
    /// Construct a [`BackendError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`BackendError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}
