//! Subscriber alert search with the expiring result cache in front.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::session::SessionContext;
use super::state::HttpState;
use super::{ApiResult, map_backend_error};
use crate::domain::Error;

/// Request body for an alert search.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertSearchBody {
    /// Free-text search query.
    pub query: String,
    /// Structured filter set; key order does not affect caching.
    #[serde(default)]
    pub filters: Value,
}

/// Response payload for an alert search.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertSearchResponse {
    /// Matching alert rows.
    pub results: Value,
    /// Whether the response was served from the cache.
    pub cached: bool,
}

/// Search alerts, consulting the expiring result cache first.
///
/// Cache reads and writes are best-effort; a broken cache degrades to a
/// direct search rather than failing the request.
#[utoipa::path(
    post,
    path = "/api/v1/alerts/search",
    request_body = AlertSearchBody,
    responses(
        (status = 200, description = "Search results", body = AlertSearchResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["alerts"],
    operation_id = "searchAlerts",
    security(("SessionCookie" = []))
)]
#[post("/alerts/search")]
pub async fn search_alerts(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AlertSearchBody>,
) -> ApiResult<HttpResponse> {
    session.require_user_id()?;
    let body = payload.into_inner();

    if let Some(results) = state.search_cache.lookup(&body.query, &body.filters).await {
        return Ok(HttpResponse::Ok().json(AlertSearchResponse {
            results,
            cached: true,
        }));
    }

    let rows = state
        .alert_search
        .search(&body.query, &body.filters)
        .await
        .map_err(map_backend_error)?;
    let results = Value::Array(rows);
    state
        .search_cache
        .store(&body.query, &body.filters, results.clone())
        .await;

    Ok(HttpResponse::Ok().json(AlertSearchResponse {
        results,
        cached: false,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::FixtureAlertSearch;
    use crate::inbound::http::test_utils::{
        admin_state, seed_session_route, session_cookie, test_session_middleware,
    };

    #[actix_web::test]
    async fn second_identical_search_is_served_from_cache() {
        let search = Arc::new(FixtureAlertSearch::with_results(vec![json!({"id": 1})]));
        let mut state = admin_state();
        state.alert_search = search.clone();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state))
                .route("/test/login", seed_session_route())
                .service(search_alerts),
        )
        .await;
        let cookie = session_cookie(&app).await;

        let request = json!({ "query": "Listeria", "filters": { "source": "fda" } });
        let first = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/alerts/search")
                .cookie(cookie.clone())
                .set_json(request.clone())
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);
        let first_body: Value = test::read_body_json(first).await;
        assert_eq!(first_body.get("cached"), Some(&json!(false)));

        // Same query with reordered filter keys hits the cache.
        let second = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/alerts/search")
                .cookie(cookie)
                .set_json(json!({ "query": " listeria ", "filters": { "source": "fda" } }))
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::OK);
        let second_body: Value = test::read_body_json(second).await;
        assert_eq!(second_body.get("cached"), Some(&json!(true)));
        assert_eq!(second_body.get("results"), first_body.get("results"));
        assert_eq!(search.call_count(), 1);
    }

    #[actix_web::test]
    async fn requires_a_session() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(admin_state()))
                .service(search_alerts),
        )
        .await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/alerts/search")
                .set_json(json!({ "query": "recall" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
