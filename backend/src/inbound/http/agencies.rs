//! Admin agency listing endpoint.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::guard::require_admin;
use super::session::SessionContext;
use super::state::HttpState;
use super::{ApiResult, map_backend_error};
use crate::domain::Error;
use crate::domain::ports::AgencyListingRequest;

/// Query parameters for the agency listing.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencyListQuery {
    /// Free-text search over agency names.
    pub search: Option<String>,
    /// Restrict to one source system.
    pub source: Option<String>,
    /// Restrict to one agency status.
    pub status: Option<String>,
    /// Restrict to one jurisdiction.
    pub jurisdiction: Option<String>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Page size. Defaults to 25, silently clamped to 100.
    pub page_size: Option<u32>,
}

/// Response payload for the agency listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgencyListResponse {
    /// Agency rows for the requested page.
    pub agencies: Vec<Value>,
    /// Total row count across all pages.
    pub total: u64,
    /// Distinct source systems present in the listing.
    pub sources: Vec<String>,
    /// Distinct jurisdictions present in the listing.
    pub jurisdictions: Vec<String>,
}

/// List regulatory agencies with aggregate statistics.
#[utoipa::path(
    get,
    path = "/api/v1/admin/agencies",
    params(
        ("search" = Option<String>, Query, description = "Free-text search over agency names"),
        ("source" = Option<String>, Query, description = "Restrict to one source system"),
        ("status" = Option<String>, Query, description = "Restrict to one agency status"),
        ("jurisdiction" = Option<String>, Query, description = "Restrict to one jurisdiction"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("pageSize" = Option<u32>, Query, description = "Page size, clamped to 100")
    ),
    responses(
        (status = 200, description = "Agency listing", body = AgencyListResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAgencies",
    security(("SessionCookie" = []))
)]
#[get("/admin/agencies")]
pub async fn list_agencies(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<AgencyListQuery>,
) -> ApiResult<HttpResponse> {
    let _admin = require_admin(&state, &session).await?;
    let query = query.into_inner();
    let request = AgencyListingRequest {
        search: query.search,
        source: query.source,
        status: query.status,
        jurisdiction: query.jurisdiction,
        ..AgencyListingRequest::paged(query.page, query.page_size)
    };

    let listing = state
        .agencies
        .list_agencies(&request)
        .await
        .map_err(map_backend_error)?;

    Ok(HttpResponse::Ok().json(AgencyListResponse {
        agencies: listing.agencies,
        total: listing.total,
        sources: listing.sources,
        jurisdictions: listing.jurisdictions,
    }))
}
