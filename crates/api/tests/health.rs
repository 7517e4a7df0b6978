//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["store"], "memory");
    assert_eq!(json["store_healthy"], true);
    assert!(json.get("store_error").is_none());
}

#[tokio::test]
async fn unreachable_store_reports_degraded() {
    let app = common::build_unreachable_store_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store"], "postgres");
    assert_eq!(json["store_healthy"], false);
    assert!(json["store_error"]
        .as_str()
        .unwrap()
        .starts_with("Store error during health_check"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app();
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}
