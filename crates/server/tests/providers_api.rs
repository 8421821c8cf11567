mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

async fn applicant(app: &axum::Router, email: &str) -> String {
    post(app, "/users", json!({"email": email})).await;
    let (status, created) = post(app, "/providers", json!({"email": email, "skills": ["plumbing"], "status": "accepted"})).await;
    assert_eq!(status, StatusCode::OK);
    id_of(&created)
}

#[tokio::test]
async fn submitted_requests_start_pending() {
    let app = app();
    applicant(&app, "alice@example.com").await;
    let (status, all) = get(&app, "/all-request", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all[0]["status"], "pending");
    assert_eq!(all[0]["skills"], json!(["plumbing"]));
}

#[tokio::test]
async fn accepting_promotes_applicant() {
    let app = app();
    let id = applicant(&app, "alice@example.com").await;

    let (status, body) = send(&app, Method::PATCH, &format!("/update-request/{id}"), Some(BOB), Some(json!({"status": "accepted"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requestResult"]["modifiedCount"], 1);
    assert_eq!(body["userResult"]["modifiedCount"], 1);

    let (_, role) = get(&app, "/users/alice@example.com/role", None).await;
    assert_eq!(role["role"], "provider");
}

#[tokio::test]
async fn rejecting_leaves_role_unchanged() {
    let app = app();
    let id = applicant(&app, "alice@example.com").await;

    let (status, body) = send(&app, Method::PATCH, &format!("/update-request/{id}"), Some(BOB), Some(json!({"status": "rejected"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userResult"], serde_json::Value::Null);

    let (_, role) = get(&app, "/users/alice@example.com/role", None).await;
    assert_eq!(role["role"], "user");
}

#[tokio::test]
async fn status_update_validates_input() {
    let app = app();
    let id = applicant(&app, "alice@example.com").await;

    let (status, _) = send(&app, Method::PATCH, &format!("/update-request/{id}"), Some(BOB), Some(json!({"status": "approved"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    let (status, _) = send(&app, Method::PATCH, &format!("/update-request/{missing}"), Some(BOB), Some(json!({"status": "accepted"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PATCH, &format!("/update-request/{id}"), None, Some(json!({"status": "accepted"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn only_the_applicant_cancels() {
    let app = app();
    let id = applicant(&app, "alice@example.com").await;
    let uri = format!("/my-request/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden access");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["modifiedCount"], 1);

    let (_, mine) = get(&app, "/my-request?email=alice@example.com", Some(ALICE)).await;
    assert_eq!(mine[0]["status"], "cancelled");
}

#[tokio::test]
async fn admin_delete_is_hard() {
    let app = app();
    let id = applicant(&app, "alice@example.com").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/all-request/{id}"), Some(BOB), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);

    let (_, all) = get(&app, "/all-request", None).await;
    assert_eq!(all, json!([]));
}
