//! Shared helpers for the integration suite.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use actix_http::Request;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, Route, test, web};
use async_trait::async_trait;
use serde_json::Value;

use backend::domain::ports::{
    AgencyListing, AgencyListingRequest, AgencyQuery, AlertSearch, BackendError, BackfillRequest,
    BackfillStart, DedupeOutcome, DuplicateCommand, DuplicateQuery, FixtureAdminDirectory,
    GroupRemoval, ReindexOutcome, SearchIndexCommand, SourceHealthCommand, SourceHealthQuery,
    SyncLogQuery, SyncRequest, SyncStart, SyncTrigger,
};
use backend::domain::{AdminId, AdminProfile, DuplicateGroupId, HealthSnapshot, SyncJobKind};
use backend::inbound::http::state::HttpState;

/// Fixture administrator recognised by [`admin_state`].
pub const TEST_ADMIN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Session middleware configured for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fixture state whose directory recognises [`TEST_ADMIN_ID`] as an admin.
pub fn admin_state() -> HttpState {
    let mut state = HttpState::fixture();
    state.admins = Arc::new(FixtureAdminDirectory::with_profiles(vec![AdminProfile {
        id: AdminId::new(TEST_ADMIN_ID).expect("fixture admin id"),
        email: "ops@example.test".to_owned(),
        is_admin: true,
    }]));
    state
}

/// Route seeding the test session with [`TEST_ADMIN_ID`].
pub fn seed_session_route() -> Route {
    web::get().to(|session: Session| async move {
        session
            .insert("user_id", TEST_ADMIN_ID)
            .expect("seed session");
        HttpResponse::Ok().finish()
    })
}

/// Call the seed route and return the issued session cookie.
pub async fn session_cookie<S, B, E>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        test::TestRequest::get().uri("/api/v1/test/login").to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}

/// Backend double counting every port invocation, so tests can prove that a
/// rejected request never reached the platform.
#[derive(Debug, Default)]
pub struct CountingBackend {
    calls: AtomicU64,
}

impl CountingBackend {
    /// Total number of port invocations observed.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AgencyQuery for CountingBackend {
    async fn list_agencies(
        &self,
        _request: &AgencyListingRequest,
    ) -> Result<AgencyListing, BackendError> {
        self.bump();
        Ok(AgencyListing::default())
    }
}

#[async_trait]
impl DuplicateQuery for CountingBackend {
    async fn group_alerts(&self, _group: &DuplicateGroupId) -> Result<Vec<Value>, BackendError> {
        self.bump();
        Ok(Vec::new())
    }
}

#[async_trait]
impl DuplicateCommand for CountingBackend {
    async fn dedupe_all(&self) -> Result<DedupeOutcome, BackendError> {
        self.bump();
        Ok(DedupeOutcome::default())
    }

    async fn remove_group(&self, _group: &DuplicateGroupId) -> Result<GroupRemoval, BackendError> {
        self.bump();
        Ok(GroupRemoval::default())
    }
}

#[async_trait]
impl SourceHealthQuery for CountingBackend {
    async fn snapshot(&self) -> Result<HealthSnapshot, BackendError> {
        self.bump();
        Ok(HealthSnapshot::default())
    }
}

#[async_trait]
impl SourceHealthCommand for CountingBackend {
    async fn run_checks(&self) -> Result<Value, BackendError> {
        self.bump();
        Ok(Value::Null)
    }
}

#[async_trait]
impl SearchIndexCommand for CountingBackend {
    async fn rebuild(&self) -> Result<ReindexOutcome, BackendError> {
        self.bump();
        Ok(ReindexOutcome::default())
    }
}

#[async_trait]
impl SyncTrigger for CountingBackend {
    async fn start_manual_sync(&self, _request: &SyncRequest) -> Result<SyncStart, BackendError> {
        self.bump();
        Ok(SyncStart::default())
    }

    async fn start_backfill(
        &self,
        _request: &BackfillRequest,
    ) -> Result<BackfillStart, BackendError> {
        self.bump();
        Ok(BackfillStart::default())
    }
}

#[async_trait]
impl SyncLogQuery for CountingBackend {
    async fn any_running(&self, _kind: Option<SyncJobKind>) -> Result<bool, BackendError> {
        self.bump();
        Ok(false)
    }
}

/// State where every backend-facing port is the same counting double.
pub fn counting_state(backend: &Arc<CountingBackend>) -> HttpState {
    let mut state = admin_state();
    state.agencies = backend.clone();
    state.duplicate_query = backend.clone();
    state.duplicates = backend.clone();
    state.health_query = backend.clone();
    state.health_command = backend.clone();
    state.search_index = backend.clone();
    state.sync = backend.clone();
    state.sync_log = backend.clone();
    state
}
