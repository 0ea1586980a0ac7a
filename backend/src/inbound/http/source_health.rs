//! Admin endpoints for data-source health.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::guard::require_admin;
use super::session::SessionContext;
use super::state::HttpState;
use super::{ApiResult, map_backend_error};
use crate::domain::{Error, OverallStatus, SourceHealth, SourceStatus};

/// JSON payload for one source's health report.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceHealthBody {
    /// Source identifier (e.g. `fda`).
    pub source: String,
    /// Reported status for the source.
    pub status: SourceStatus,
    /// RFC 3339 instant of the last check, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked: Option<String>,
    /// Number of alerts ingested from the source.
    pub alert_count: u64,
    /// Optional note from the checker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SourceHealth> for SourceHealthBody {
    fn from(value: SourceHealth) -> Self {
        Self {
            source: value.source,
            status: value.status,
            last_checked: value.last_checked.map(|at| at.to_rfc3339()),
            alert_count: value.alert_count,
            message: value.message,
        }
    }
}

/// Response payload for the health read.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthReadResponse {
    /// Per-source health reports.
    pub sources: Vec<SourceHealthBody>,
    /// RFC 3339 instant the snapshot was produced, if recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Aggregate status derived from the per-source reports.
    pub overall_status: OverallStatus,
}

/// Response payload for the health check trigger.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthTriggerResponse {
    /// Whether the checks ran.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Checker results passed through unshaped.
    pub results: Value,
}

/// Read the current per-source health snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/admin/health",
    responses(
        (status = 200, description = "Health snapshot", body = HealthReadResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "readSourceHealth",
    security(("SessionCookie" = []))
)]
#[get("/admin/health")]
pub async fn read_source_health(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _admin = require_admin(&state, &session).await?;
    let snapshot = state
        .health_query
        .snapshot()
        .await
        .map_err(map_backend_error)?;

    let overall_status = snapshot.overall_status();
    Ok(HttpResponse::Ok().json(HealthReadResponse {
        last_updated: snapshot.last_updated.map(|at| at.to_rfc3339()),
        sources: snapshot
            .sources
            .into_iter()
            .map(SourceHealthBody::from)
            .collect(),
        overall_status,
    }))
}

/// Run the health checks now.
#[utoipa::path(
    post,
    path = "/api/v1/admin/health",
    responses(
        (status = 200, description = "Checks completed", body = HealthTriggerResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "triggerHealthCheck",
    security(("SessionCookie" = []))
)]
#[post("/admin/health")]
pub async fn trigger_health_check(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _admin = require_admin(&state, &session).await?;
    let results = state
        .health_command
        .run_checks()
        .await
        .map_err(map_backend_error)?;

    Ok(HttpResponse::Ok().json(HealthTriggerResponse {
        success: true,
        message: "health checks completed".to_owned(),
        results,
    }))
}
