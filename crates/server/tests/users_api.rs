mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn registering_twice_reports_existing_user() {
    let app = app();
    let (status, body) = post(&app, "/users", json!({"email": "carol@example.com", "name": "Carol", "role": "admin"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);
    assert!(body["insertedId"].is_string());

    let (status, body) = post(&app, "/users", json!({"email": "carol@example.com"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "user already exists"}));

    let (_, users) = get(&app, "/users", Some(ALICE)).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["role"], "user");
    assert_eq!(users[0]["name"], "Carol");
    assert!(users[0]["_id"].is_string());
    assert!(users[0]["createdAt"].is_string());
}

#[tokio::test]
async fn registration_without_email_is_bad_request() {
    let (status, body) = post(&app(), "/users", json!({"name": "nobody"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let app = app();
    let req = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let resp = tower::ServiceExt::oneshot(app, req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn role_of_unknown_email_is_user() {
    let (status, body) = get(&app(), "/users/ghost@example.com/role", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"role": "user"}));
}

#[tokio::test]
async fn user_lookup_by_email() {
    let app = app();
    post(&app, "/users", json!({"email": "dave@example.com"})).await;

    let (status, body) = get(&app, "/users?email=dave@example.com", Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "dave@example.com");

    let (status, body) = get(&app, "/users?email=ghost@example.com", Some(ALICE)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn listing_users_requires_a_token() {
    let app = app();
    let (status, body) = get(&app, "/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "unauthorized access");

    let (status, _) = get(&app, "/users", Some("forged")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_requires_email_param() {
    let app = app();
    let (status, body) = get(&app, "/profile", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email query parameter is required");

    let (status, _) = get(&app, "/profile?email=ghost@example.com", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    post(&app, "/users", json!({"email": "erin@example.com", "phone": "555"})).await;
    let (status, body) = get(&app, "/profile?email=erin@example.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "555");
}

#[tokio::test]
async fn role_update_validates_role_and_id() {
    let app = app();
    let (_, created) = post(&app, "/users", json!({"email": "fay@example.com"})).await;
    let uri = format!("/users/{}/role", id_of(&created));

    let (status, _) = send(&app, Method::PATCH, &uri, None, Some(json!({"role": "admin"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::PATCH, &uri, Some(ALICE), Some(json!({"role": "superuser"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::PATCH, "/users/not-an-id/role", Some(ALICE), Some(json!({"role": "admin"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid id");

    let (status, body) = send(&app, Method::PATCH, &uri, Some(ALICE), Some(json!({"role": "admin"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"acknowledged": true, "matchedCount": 1, "modifiedCount": 1}));

    let (_, body) = get(&app, "/users/fay@example.com/role", None).await;
    assert_eq!(body["role"], "admin");
}
