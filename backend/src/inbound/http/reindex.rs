//! Admin endpoint rebuilding the alert search indexes.

use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::guard::require_admin;
use super::session::SessionContext;
use super::state::HttpState;
use super::{ApiResult, map_backend_error};
use crate::domain::Error;

/// Response payload for a reindex pass.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReindexResponse {
    /// Whether the pass completed.
    pub success: bool,
    /// Number of indexes (re)created.
    pub indexes_created: u64,
    /// Human-readable summary.
    pub message: String,
    /// Wall-clock duration of the pass in milliseconds.
    pub duration: u64,
    /// Procedure-specific detail payload.
    pub details: Value,
}

/// Rebuild the alert search indexes.
#[utoipa::path(
    post,
    path = "/api/v1/admin/reindex",
    responses(
        (status = 200, description = "Reindex completed", body = ReindexResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "runReindex",
    security(("SessionCookie" = []))
)]
#[post("/admin/reindex")]
pub async fn run_reindex(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let _admin = require_admin(&state, &session).await?;
    let outcome = state
        .search_index
        .rebuild()
        .await
        .map_err(map_backend_error)?;

    Ok(HttpResponse::Ok().json(ReindexResponse {
        success: true,
        indexes_created: outcome.indexes_created,
        message: format!("created {} search indexes", outcome.indexes_created),
        duration: outcome.duration_ms,
        details: outcome.details,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{FixtureSearchIndex, ReindexOutcome};
    use crate::inbound::http::test_utils::{
        admin_state, seed_session_route, session_cookie, test_session_middleware,
    };

    #[actix_web::test]
    async fn shapes_the_reindex_envelope() {
        let mut state = admin_state();
        state.search_index = Arc::new(FixtureSearchIndex {
            outcome: ReindexOutcome {
                indexes_created: 6,
                duration_ms: 420,
                details: json!({ "tables": ["alerts"] }),
            },
        });
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/test/login", seed_session_route())
                .service(run_reindex),
        )
        .await;
        let cookie = session_cookie(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/admin/reindex")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("indexesCreated"), Some(&json!(6)));
        assert_eq!(body.get("duration"), Some(&json!(420)));
    }

    #[actix_web::test]
    async fn requires_admin() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(admin_state()))
                .service(run_reindex),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/admin/reindex").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
