mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use common::*;
use tower::ServiceExt;

async fn text(uri: &str) -> (StatusCode, String) {
    let resp = app().oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn root_and_health() {
    let (status, body) = text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Home hero service running perfectly");

    let (status, body) = get(&app(), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn metrics_expose_matched_routes() {
    let app = app();
    get(&app, "/services", None).await;
    let resp = app.oneshot(Request::get("/metrics").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(body.contains("home_hero_http_requests_total"));
    assert!(body.contains("route=\"/services\""));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, doc) = get(&app(), "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/services"].is_object());
}

#[tokio::test]
async fn unknown_routes_use_error_envelope() {
    let (status, body) = get(&app(), "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not found");
}

#[tokio::test]
async fn unsupported_methods_are_405_even_on_gated_paths() {
    let app = app();
    let (status, _) = send(&app, Method::PUT, "/users", None, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = send(&app, Method::POST, "/my-bookings", None, None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    let (status, _) = get(&app, "/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
