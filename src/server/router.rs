//! Route table

use crate::handlers::{AppState, cars, rentals, requests};
use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build every REST route over `state`
///
/// - GET|POST /cars, GET|PUT|DELETE /cars/{id}, POST /cars/{id}/return
/// - POST /cars/request, GET /cars/getrequests, DELETE /cars/deleterequest
/// - DELETE /cars/requests/{id}, POST /cars/requests/{id}/accept
/// - GET|POST /cars/rentlist
/// - GET /health, GET /healthz
pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
    let api = Router::new()
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route(
            "/cars/{id}",
            get(cars::get_car)
                .put(cars::update_car)
                .delete(cars::delete_car),
        )
        .route("/cars/{id}/return", post(cars::return_car))
        .route("/cars/request", post(requests::submit_request))
        .route("/cars/getrequests", get(requests::list_requests))
        .route("/cars/deleterequest", delete(requests::delete_request_by_key))
        .route("/cars/requests/{id}", delete(requests::reject_request))
        .route("/cars/requests/{id}/accept", post(requests::accept_request))
        .route(
            "/cars/rentlist",
            get(rentals::list_rentals).post(rentals::record_rental),
        )
        .with_state(state);

    let mut app = health_routes().merge(api);
    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "car-rental"
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::SystemClock;
    use crate::server::ServerHost;
    use crate::storage::Stores;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let host = ServerHost::new(AppConfig::default(), Stores::in_memory(), Arc::new(SystemClock));
        build_router(host.app_state(), vec![])
    }

    #[tokio::test]
    async fn test_health_routes() {
        for path in ["/health", "/healthz"] {
            let response = app()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_static_paths_win_over_car_id() {
        for path in ["/cars/getrequests", "/cars/rentlist"] {
            let response = app()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_invalid_car_id_is_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/cars/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
