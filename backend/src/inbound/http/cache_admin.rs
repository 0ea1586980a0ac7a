//! Admin trigger for the periodic search-cache sweep.
//!
//! The sweep itself is idempotent and best-effort; this endpoint exists so
//! an external scheduler can drive it without a direct database grant.

use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use super::ApiResult;
use super::guard::require_admin;
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::Error;

/// Response payload for a cache sweep.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheSweepResponse {
    /// Whether the sweep ran.
    pub success: bool,
    /// Number of expired rows removed.
    pub removed_count: u64,
    /// Human-readable summary.
    pub message: String,
}

/// Delete every expired search-cache row.
#[utoipa::path(
    post,
    path = "/api/v1/admin/cache/sweep",
    responses(
        (status = 200, description = "Sweep completed", body = CacheSweepResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "sweepSearchCache",
    security(("SessionCookie" = []))
)]
#[post("/admin/cache/sweep")]
pub async fn sweep_search_cache(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _admin = require_admin(&state, &session).await?;
    let removed_count = state.search_cache.sweep().await;

    Ok(HttpResponse::Ok().json(CacheSweepResponse {
        success: true,
        removed_count,
        message: format!("removed {removed_count} expired cache entries"),
    }))
}
