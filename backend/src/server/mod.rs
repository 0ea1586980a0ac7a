//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{Error, SearchCacheService};
use crate::inbound::http::agencies::list_agencies;
use crate::inbound::http::cache_admin::sweep_search_cache;
use crate::inbound::http::duplicates::{list_group_alerts, remove_duplicate_group, run_dedupe};
use crate::inbound::http::probes::{ProbeState, live, ready};
use crate::inbound::http::reindex::run_reindex;
use crate::inbound::http::search::search_alerts;
use crate::inbound::http::source_health::{read_source_health, trigger_health_check};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::sync::{trigger_backfill, trigger_manual_sync};
use crate::middleware::Trace;
use crate::outbound::platform::{
    PlatformAdminDirectory, PlatformAgencyQuery, PlatformAlertSearch, PlatformAuditLog,
    PlatformClient, PlatformDuplicateAdmin, PlatformSearchCacheStore, PlatformSearchIndex,
    PlatformSourceHealth, PlatformSyncGateway,
};

/// Wire every port to its platform adapter.
pub fn build_platform_state(client: Arc<PlatformClient>) -> HttpState {
    let duplicates = Arc::new(PlatformDuplicateAdmin::new(client.clone()));
    let health = Arc::new(PlatformSourceHealth::new(client.clone()));
    let sync = Arc::new(PlatformSyncGateway::new(client.clone()));
    HttpState {
        admins: Arc::new(PlatformAdminDirectory::new(client.clone())),
        agencies: Arc::new(PlatformAgencyQuery::new(client.clone())),
        duplicate_query: duplicates.clone(),
        duplicates,
        health_query: health.clone(),
        health_command: health,
        search_index: Arc::new(PlatformSearchIndex::new(client.clone())),
        sync: sync.clone(),
        sync_log: sync,
        audit: Arc::new(PlatformAuditLog::new(client.clone())),
        alert_search: Arc::new(PlatformAlertSearch::new(client.clone())),
        search_cache: SearchCacheService::new(Arc::new(PlatformSearchCacheStore::new(client))),
    }
}

#[derive(Clone)]
struct AppDependencies {
    probe_state: web::Data<ProbeState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

/// Rehandle extractor failures into the standard JSON error envelope so a
/// malformed body or query never produces a bare text response.
fn extractor_configs() -> (web::JsonConfig, web::QueryConfig, web::PathConfig) {
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    });
    let query = web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    });
    let path = web::PathConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("invalid path parameter: {err}")).into()
    });
    (json, query, path)
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        probe_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let (json_config, query_config, path_config) = extractor_configs();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(list_agencies)
        .service(run_dedupe)
        .service(list_group_alerts)
        .service(remove_duplicate_group)
        .service(read_source_health)
        .service(trigger_health_check)
        .service(run_reindex)
        .service(trigger_manual_sync)
        .service(trigger_backfill)
        .service(sweep_search_cache)
        .service(search_alerts);

    let app = App::new()
        .app_data(probe_state)
        .app_data(http_state)
        .app_data(json_config)
        .app_data(query_config)
        .app_data(path_config)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided probe state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the platform client cannot be built or
/// the socket cannot be bound.
pub fn create_server(
    probe_state: web::Data<ProbeState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        platform,
    } = config;

    let client = PlatformClient::new(platform)
        .map_err(|e| std::io::Error::other(format!("platform client: {e}")))?;
    let http_state = web::Data::new(build_platform_state(Arc::new(client)));
    let server_probe_state = probe_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            probe_state: server_probe_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    probe_state.mark_ready();
    Ok(server)
}
