//! Admin endpoints for duplicate-alert management.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

use super::guard::require_admin;
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::parse_group_id;
use super::{ApiResult, map_backend_error};
use crate::domain::{AdminOperation, Error};

/// Response payload for the platform-wide dedupe trigger.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DedupeResponse {
    /// Whether the pass completed.
    pub success: bool,
    /// Number of alerts removed as duplicates.
    pub removed_count: u64,
    /// Human-readable summary.
    pub message: String,
    /// Procedure-specific detail payload.
    pub details: Value,
}

/// Response payload listing the alerts of one duplicate group.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupAlertsResponse {
    /// Alert rows belonging to the group.
    pub alerts: Vec<Value>,
}

/// Response payload for a duplicate-group removal.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupRemovalResponse {
    /// Whether the removal committed.
    pub success: bool,
    /// Number of alerts removed with the group.
    pub removed_count: u64,
    /// Human-readable summary.
    pub message: String,
}

/// Run the platform-wide deduplication procedure.
#[utoipa::path(
    post,
    path = "/api/v1/admin/dedupe",
    responses(
        (status = 200, description = "Deduplication completed", body = DedupeResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "runDedupe",
    security(("SessionCookie" = []))
)]
#[post("/admin/dedupe")]
pub async fn run_dedupe(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _admin = require_admin(&state, &session).await?;
    let outcome = state
        .duplicates
        .dedupe_all()
        .await
        .map_err(map_backend_error)?;

    Ok(HttpResponse::Ok().json(DedupeResponse {
        success: true,
        removed_count: outcome.removed_count,
        message: format!("removed {} duplicate alerts", outcome.removed_count),
        details: outcome.details,
    }))
}

/// List the alerts belonging to one duplicate group.
#[utoipa::path(
    get,
    path = "/api/v1/admin/duplicates/{groupId}/alerts",
    params(("groupId" = String, Path, description = "Duplicate group identifier")),
    responses(
        (status = 200, description = "Alerts in the group", body = GroupAlertsResponse),
        (status = 400, description = "Missing group id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listGroupAlerts",
    security(("SessionCookie" = []))
)]
#[get("/admin/duplicates/{group_id}/alerts")]
pub async fn list_group_alerts(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let _admin = require_admin(&state, &session).await?;
    let group = parse_group_id(&path.into_inner())?;
    let alerts = state
        .duplicate_query
        .group_alerts(&group)
        .await
        .map_err(map_backend_error)?;

    Ok(HttpResponse::Ok().json(GroupAlertsResponse { alerts }))
}

/// Remove one duplicate group, auditing the removal.
///
/// The audit write happens after the remote mutation has committed and is
/// best-effort: its failure is logged and never rolls back the response.
#[utoipa::path(
    delete,
    path = "/api/v1/admin/duplicates/{groupId}",
    params(("groupId" = String, Path, description = "Duplicate group identifier")),
    responses(
        (status = 200, description = "Group removed", body = GroupRemovalResponse),
        (status = 400, description = "Missing group id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "removeDuplicateGroup",
    security(("SessionCookie" = []))
)]
#[delete("/admin/duplicates/{group_id}")]
pub async fn remove_duplicate_group(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let admin = require_admin(&state, &session).await?;
    let group = parse_group_id(&path.into_inner())?;
    let removal = state
        .duplicates
        .remove_group(&group)
        .await
        .map_err(map_backend_error)?;

    let operation = AdminOperation::duplicate_removal(admin.id, &group, removal.removed_count);
    if let Err(error) = state.audit.record(&operation).await {
        warn!(%error, group = %group, "audit write failed; removal already committed");
    }

    Ok(HttpResponse::Ok().json(GroupRemovalResponse {
        success: true,
        removed_count: removal.removed_count,
        message: format!("removed duplicate group {group}"),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{FixtureAuditLog, FixtureDuplicateAdmin};
    use crate::inbound::http::test_utils::{
        admin_state, seed_session_route, session_cookie, test_session_middleware,
    };

    async fn app_with(
        state: HttpState,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/test/login", seed_session_route())
                .service(run_dedupe)
                .service(list_group_alerts)
                .service(remove_duplicate_group),
        )
        .await
    }

    #[actix_web::test]
    async fn dedupe_shapes_the_envelope() {
        let mut state = admin_state();
        state.duplicates = Arc::new(FixtureDuplicateAdmin {
            alerts: Vec::new(),
            removed_count: 12,
        });
        let app = app_with(state).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/dedupe")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("removedCount"), Some(&json!(12)));
        assert_eq!(
            body.get("message"),
            Some(&json!("removed 12 duplicate alerts"))
        );
    }

    #[actix_web::test]
    async fn blank_group_id_is_rejected() {
        let app = app_with(admin_state()).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/admin/duplicates/%20")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn removal_writes_exactly_one_audit_record() {
        let audit = Arc::new(FixtureAuditLog::recording());
        let mut state = admin_state();
        state.duplicates = Arc::new(FixtureDuplicateAdmin {
            alerts: Vec::new(),
            removed_count: 3,
        });
        state.audit = audit.clone();
        let app = app_with(state).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/admin/duplicates/grp-9")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let recorded = audit.recorded();
        assert_eq!(recorded.len(), 1);
        let operation = recorded.first().expect("one record");
        assert_eq!(operation.operation_type, "duplicate_removal");
        assert_eq!(operation.details.get("group_id"), Some(&json!("grp-9")));
    }

    #[actix_web::test]
    async fn audit_failure_does_not_fail_the_removal() {
        let mut state = admin_state();
        state.duplicates = Arc::new(FixtureDuplicateAdmin {
            alerts: Vec::new(),
            removed_count: 1,
        });
        state.audit = Arc::new(FixtureAuditLog::failing());
        let app = app_with(state).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri("/admin/duplicates/grp-1")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("success"), Some(&json!(true)));
    }

    #[actix_web::test]
    async fn group_alerts_requires_admin() {
        let app = app_with(admin_state()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/admin/duplicates/grp-1/alerts")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
