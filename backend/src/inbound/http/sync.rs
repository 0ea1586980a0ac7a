//! Admin endpoints triggering ingestion jobs on the remote sync worker.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::guard::require_admin;
use super::session::SessionContext;
use super::state::HttpState;
use super::validation::parse_backfill_days;
use super::{ApiResult, map_backend_error};
use crate::domain::ports::{BackfillRequest, SyncRequest};
use crate::domain::{Error, SyncJobKind, ensure_idle};

/// Request body for the manual sync trigger.
///
/// `days` is intentionally unbounded on this path, mirroring the asymmetry
/// with backfill in the original admin console.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequestBody {
    /// Optional look-back window in days.
    pub days: Option<u32>,
    /// Restrict the sync to these sources; empty means all.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Request body for the backfill trigger.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackfillRequestBody {
    /// Backfill window in days; must be between 1 and 365.
    pub days: u32,
    /// Restrict the backfill to these sources; empty means all.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Response payload for a started manual sync.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    /// Whether the job was started.
    pub success: bool,
    /// Identifier of the started job.
    pub sync_id: String,
    /// Human-readable summary.
    pub message: String,
    /// Procedure-specific result payload.
    pub results: Value,
}

/// Response payload for a started backfill.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackfillResponse {
    /// Whether the job was started.
    pub success: bool,
    /// Identifier of the started job.
    pub backfill_id: String,
    /// Human-readable summary.
    pub message: String,
    /// Operator-facing duration estimate (one minute per started week).
    pub estimated_duration: String,
    /// Procedure-specific result payload.
    pub results: Value,
}

/// Start a manual incremental sync.
///
/// Refused with 409 while any sync job is running. The check is advisory
/// (see the job guard); the remote trigger procedure owns true
/// serialization.
#[utoipa::path(
    post,
    path = "/api/v1/admin/sync",
    request_body = SyncRequestBody,
    responses(
        (status = 200, description = "Sync started", body = SyncResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "A sync job is already running", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "triggerManualSync",
    security(("SessionCookie" = []))
)]
#[post("/admin/sync")]
pub async fn trigger_manual_sync(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SyncRequestBody>,
) -> ApiResult<HttpResponse> {
    let admin = require_admin(&state, &session).await?;
    ensure_idle(state.sync_log.as_ref(), None).await?;

    let body = payload.into_inner();
    let request = SyncRequest {
        days: body.days,
        sources: body.sources,
        triggered_by: admin.id,
    };
    let start = state
        .sync
        .start_manual_sync(&request)
        .await
        .map_err(map_backend_error)?;

    Ok(HttpResponse::Ok().json(SyncResponse {
        success: true,
        sync_id: start.sync_id,
        message: "sync started".to_owned(),
        results: start.results,
    }))
}

/// Start a historical backfill over a bounded window of days.
#[utoipa::path(
    post,
    path = "/api/v1/admin/backfill",
    request_body = BackfillRequestBody,
    responses(
        (status = 200, description = "Backfill started", body = BackfillResponse),
        (status = 400, description = "Days out of range", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "A backfill job is already running", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "triggerBackfill",
    security(("SessionCookie" = []))
)]
#[post("/admin/backfill")]
pub async fn trigger_backfill(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<BackfillRequestBody>,
) -> ApiResult<HttpResponse> {
    let admin = require_admin(&state, &session).await?;
    let body = payload.into_inner();
    let window = parse_backfill_days(body.days)?;
    ensure_idle(state.sync_log.as_ref(), Some(SyncJobKind::Backfill)).await?;

    let request = BackfillRequest {
        window,
        sources: body.sources,
        triggered_by: admin.id,
    };
    let start = state
        .sync
        .start_backfill(&request)
        .await
        .map_err(map_backend_error)?;

    Ok(HttpResponse::Ok().json(BackfillResponse {
        success: true,
        backfill_id: start.backfill_id,
        message: format!("backfill started over {} days", window.days()),
        estimated_duration: window.estimated_duration(),
        results: start.results,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::FixtureSyncLogQuery;
    use crate::inbound::http::test_utils::{
        admin_state, seed_session_route, session_cookie, test_session_middleware,
    };

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .route("/test/login", seed_session_route())
            .service(trigger_manual_sync)
            .service(trigger_backfill)
    }

    #[actix_web::test]
    async fn backfill_rejects_out_of_range_days() {
        let app = test::init_service(test_app(admin_state())).await;
        let cookie = session_cookie(&app).await;

        for days in [0_u32, 366] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/admin/backfill")
                    .cookie(cookie.clone())
                    .set_json(json!({ "days": days }))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "days={days}");
        }
    }

    #[actix_web::test]
    async fn backfill_conflicts_while_one_is_running() {
        let mut state = admin_state();
        state.sync_log = Arc::new(FixtureSyncLogQuery::with_running(vec![
            SyncJobKind::Backfill,
        ]));
        let app = test::init_service(test_app(state)).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/backfill")
                .cookie(cookie)
                .set_json(json!({ "days": 30 }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn backfill_reports_the_estimated_duration() {
        let app = test::init_service(test_app(admin_state())).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/backfill")
                .cookie(cookie)
                .set_json(json!({ "days": 30, "sources": ["fda"] }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("estimatedDuration"), Some(&json!("5 minutes")));
        assert_eq!(body.get("success"), Some(&json!(true)));
    }

    #[actix_web::test]
    async fn manual_sync_conflicts_with_any_running_job() {
        let mut state = admin_state();
        state.sync_log = Arc::new(FixtureSyncLogQuery::with_running(vec![SyncJobKind::Manual]));
        let app = test::init_service(test_app(state)).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/sync")
                .cookie(cookie)
                .set_json(json!({ "days": 7 }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn manual_sync_accepts_a_large_window() {
        // No bound on this path: the original admin console never
        // constrained manual sync days.
        let app = test::init_service(test_app(admin_state())).await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/sync")
                .cookie(cookie)
                .set_json(json!({ "days": 4000 }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("syncId"), Some(&json!("sync-fixture-1")));
    }

    #[actix_web::test]
    async fn sync_requires_admin() {
        let app = test::init_service(test_app(admin_state())).await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/sync")
                .set_json(json!({}))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
