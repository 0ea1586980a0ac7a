//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! endpoint from the inbound layer, the shared error schema, and the session
//! cookie security scheme. Swagger UI serves the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, OverallStatus, SourceStatus};
use crate::inbound::http::agencies::{AgencyListQuery, AgencyListResponse};
use crate::inbound::http::cache_admin::CacheSweepResponse;
use crate::inbound::http::duplicates::{DedupeResponse, GroupAlertsResponse, GroupRemovalResponse};
use crate::inbound::http::search::{AlertSearchBody, AlertSearchResponse};
use crate::inbound::http::source_health::{
    HealthReadResponse, HealthTriggerResponse, SourceHealthBody,
};
use crate::inbound::http::sync::{
    BackfillRequestBody, BackfillResponse, SyncRequestBody, SyncResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by the external auth system.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Regulatory alerts admin backend API",
        description = "HTTP interface for the admin console, subscriber search, and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::agencies::list_agencies,
        crate::inbound::http::duplicates::run_dedupe,
        crate::inbound::http::duplicates::list_group_alerts,
        crate::inbound::http::duplicates::remove_duplicate_group,
        crate::inbound::http::source_health::read_source_health,
        crate::inbound::http::source_health::trigger_health_check,
        crate::inbound::http::reindex::run_reindex,
        crate::inbound::http::sync::trigger_manual_sync,
        crate::inbound::http::sync::trigger_backfill,
        crate::inbound::http::cache_admin::sweep_search_cache,
        crate::inbound::http::search::search_alerts,
        crate::inbound::http::probes::ready,
        crate::inbound::http::probes::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SourceStatus,
        OverallStatus,
        AgencyListQuery,
        AgencyListResponse,
        DedupeResponse,
        GroupAlertsResponse,
        GroupRemovalResponse,
        SourceHealthBody,
        HealthReadResponse,
        HealthTriggerResponse,
        crate::inbound::http::reindex::ReindexResponse,
        SyncRequestBody,
        SyncResponse,
        BackfillRequestBody,
        BackfillResponse,
        CacheSweepResponse,
        AlertSearchBody,
        AlertSearchResponse,
    )),
    tags(
        (name = "admin", description = "Privileged operations for the admin console"),
        (name = "alerts", description = "Subscriber-facing alert search"),
        (name = "probes", description = "Process liveness and readiness")
    )
)]
pub struct ApiDoc;
