mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn bookings_list_is_gated_and_recent_first() {
    let app = app();
    for (email, at) in [
        ("alice@example.com", "2026-03-01T10:00:00Z"),
        ("bob@example.com", "2026-03-03T10:00:00Z"),
        ("alice@example.com", "2026-03-02T10:00:00Z"),
    ] {
        let (status, _) = post(&app, "/bookings", json!({"customerEmail": email, "serviceId": "s-1", "bookedAt": at, "note": "ring twice"})).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = get(&app, "/bookings", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, all) = get(&app, "/bookings", Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    let times: Vec<&str> = all.as_array().unwrap().iter().map(|b| b["bookedAt"].as_str().unwrap()).collect();
    assert_eq!(times.len(), 3);
    assert!(times[0].starts_with("2026-03-03"));
    assert!(times[2].starts_with("2026-03-01"));
    assert_eq!(all[0]["note"], "ring twice");
}

#[tokio::test]
async fn my_bookings_are_principal_scoped() {
    let app = app();
    post(&app, "/bookings", json!({"customerEmail": "alice@example.com", "serviceId": "s-1"})).await;
    post(&app, "/bookings", json!({"customerEmail": "bob@example.com", "serviceId": "s-2"})).await;

    let (status, mine) = get(&app, "/my-bookings?email=alice@example.com", Some(ALICE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["serviceId"], "s-1");

    let (status, body) = get(&app, "/my-bookings?email=alice@example.com", Some(BOB)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden access");

    let (status, _) = get(&app, "/my-bookings", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleting_bookings() {
    let app = app();
    let (_, created) = post(&app, "/bookings", json!({"customerEmail": "alice@example.com"})).await;
    let uri = format!("/bookings/{}", id_of(&created));

    let (status, body) = send(&app, Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, body) = send(&app, Method::DELETE, &uri, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");
}
