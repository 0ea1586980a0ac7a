//! Test helpers for inbound HTTP components.

use actix_http::Request;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionExt, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{HttpResponse, Route, test, web};

use super::session::{SessionContext, USER_ID_KEY};
use super::state::HttpState;
use crate::domain::ports::FixtureAdminDirectory;
use crate::domain::{AdminId, AdminProfile};
use std::sync::Arc;

/// Fixture administrator id shared by handler tests.
pub const TEST_ADMIN_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Build a session middleware configured for tests.
///
/// Generates a fresh signing/encryption key per invocation and disables the
/// `Secure` flag for local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fixture profile matching [`TEST_ADMIN_ID`].
pub fn admin_profile(is_admin: bool) -> AdminProfile {
    AdminProfile {
        id: AdminId::new(TEST_ADMIN_ID).expect("fixture admin id"),
        email: "ops@example.test".to_owned(),
        is_admin,
    }
}

/// Fixture state whose directory recognises [`TEST_ADMIN_ID`] as an admin.
pub fn admin_state() -> HttpState {
    let mut state = HttpState::fixture();
    state.admins = Arc::new(FixtureAdminDirectory::with_profiles(vec![admin_profile(
        true,
    )]));
    state
}

/// Build a detached session context, optionally seeded with a user id.
pub fn session_context_with(user_id: Option<&str>) -> SessionContext {
    let req = test::TestRequest::default().to_http_request();
    let session = req.get_session();
    if let Some(id) = user_id {
        session.insert(USER_ID_KEY, id).expect("seed session");
    }
    SessionContext::new(session)
}

/// Route seeding the test session with [`TEST_ADMIN_ID`].
///
/// Register under `/test/login`, call it once, and replay the returned
/// cookie against the routes under test.
pub fn seed_session_route() -> Route {
    web::get().to(|session: Session| async move {
        session
            .insert(USER_ID_KEY, TEST_ADMIN_ID)
            .expect("seed session");
        HttpResponse::Ok().finish()
    })
}

/// Call `/test/login` on the app and return the issued session cookie.
pub async fn session_cookie<S, B, E>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = E>,
    E: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        test::TestRequest::get().uri("/test/login").to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}
