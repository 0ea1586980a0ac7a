//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and remain testable without I/O. There is no hidden
//! module-level client: the state is constructed explicitly at startup and
//! cloned per worker.

use std::sync::Arc;

use crate::domain::SearchCacheService;
use crate::domain::ports::{
    AdminDirectory, AgencyQuery, AlertSearch, AuditLog, DuplicateCommand, DuplicateQuery,
    FixtureAdminDirectory, FixtureAgencyQuery, FixtureAlertSearch, FixtureAuditLog,
    FixtureDuplicateAdmin, FixtureSearchCacheStore, FixtureSearchIndex, FixtureSourceHealth,
    FixtureSyncLogQuery, FixtureSyncTrigger, SearchIndexCommand, SourceHealthCommand,
    SourceHealthQuery, SyncLogQuery, SyncTrigger,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Administrator profile lookup backing the admin guard.
    pub admins: Arc<dyn AdminDirectory>,
    /// Agency listing reads.
    pub agencies: Arc<dyn AgencyQuery>,
    /// Duplicate group reads.
    pub duplicate_query: Arc<dyn DuplicateQuery>,
    /// Deduplication and group removal.
    pub duplicates: Arc<dyn DuplicateCommand>,
    /// Data-source health reads.
    pub health_query: Arc<dyn SourceHealthQuery>,
    /// Data-source health check trigger.
    pub health_command: Arc<dyn SourceHealthCommand>,
    /// Search index rebuilds.
    pub search_index: Arc<dyn SearchIndexCommand>,
    /// Sync and backfill job triggers.
    pub sync: Arc<dyn SyncTrigger>,
    /// Job-in-flight reads over the sync log.
    pub sync_log: Arc<dyn SyncLogQuery>,
    /// Best-effort audit log writes.
    pub audit: Arc<dyn AuditLog>,
    /// Subscriber alert search.
    pub alert_search: Arc<dyn AlertSearch>,
    /// Expiring search-result cache.
    pub search_cache: SearchCacheService,
}

impl HttpState {
    /// State wired entirely with in-memory fixtures.
    ///
    /// Used by handler tests and local smoke runs; production wiring lives
    /// in the server module.
    pub fn fixture() -> Self {
        Self {
            admins: Arc::new(FixtureAdminDirectory::empty()),
            agencies: Arc::new(FixtureAgencyQuery::default()),
            duplicate_query: Arc::new(FixtureDuplicateAdmin::default()),
            duplicates: Arc::new(FixtureDuplicateAdmin::default()),
            health_query: Arc::new(FixtureSourceHealth::default()),
            health_command: Arc::new(FixtureSourceHealth::default()),
            search_index: Arc::new(FixtureSearchIndex::default()),
            sync: Arc::new(FixtureSyncTrigger::default()),
            sync_log: Arc::new(FixtureSyncLogQuery::idle()),
            audit: Arc::new(FixtureAuditLog::recording()),
            alert_search: Arc::new(FixtureAlertSearch::default()),
            search_cache: SearchCacheService::new(Arc::new(FixtureSearchCacheStore::default())),
        }
    }
}
