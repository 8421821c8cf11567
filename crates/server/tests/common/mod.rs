#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use server::routes::build_router;
use server::state::AppState;
use service::identity::StaticIdentityVerifier;
use service::store::Repositories;
use tower::ServiceExt;

pub const ALICE: &str = "alice-token";
pub const BOB: &str = "bob-token";

/// Router over a fresh in-memory store; `ALICE` and `BOB` are valid tokens.
pub fn app() -> Router {
    let identity = StaticIdentityVerifier::new()
        .with_token(ALICE, "alice@example.com")
        .with_token(BOB, "bob@example.com");
    build_router(AppState::new(Repositories::memory(), Arc::new(identity)))
}

pub async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub fn id_of(outcome: &Value) -> String {
    outcome["insertedId"].as_str().expect("insertedId").to_string()
}
