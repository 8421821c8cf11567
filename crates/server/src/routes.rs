use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::{metrics, types::Health};

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod bookings;
pub mod gate;
pub mod providers;
pub mod services;
pub mod users;

pub async fn root() -> &'static str {
    "Home hero service running perfectly"
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> impl IntoResponse {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}

/// Record request count and latency under the matched route template.
async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let started = Instant::now();
    let resp = next.run(req).await;
    metrics::observe_request(&method, &route, resp.status().as_u16(), started.elapsed());
    resp
}

/// Build the full application router: public routes, bearer-gated routes and
/// the ancillary endpoints.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/users", post(users::register))
        .route("/users/:ident/role", get(users::role_of))
        .route("/profile", get(users::profile))
        .route("/providers", post(providers::submit))
        .route("/all-request", get(providers::list_all))
        .route("/services", get(services::list).post(services::create))
        .route("/services/:id", get(services::get))
        .route("/bookings", post(bookings::create));

    // Gate the method routers rather than the router so unsupported methods still get 405
    let bearer = middleware::from_fn_with_state(state.clone(), gate::require_bearer);
    let gated = Router::new()
        .route("/users", get(users::list_or_find).route_layer(bearer.clone()))
        .route("/users/:ident/role", patch(users::set_role).route_layer(bearer.clone()))
        .route("/all-request/:id", delete(providers::delete).route_layer(bearer.clone()))
        .route("/my-request", get(providers::mine).route_layer(bearer.clone()))
        .route("/my-request/:id", delete(providers::cancel).route_layer(bearer.clone()))
        .route("/update-request/:id", patch(providers::update_status).route_layer(bearer.clone()))
        .route("/my-services", get(services::mine).route_layer(bearer.clone()))
        .route("/my-services/:id", delete(services::delete_mine).route_layer(bearer.clone()))
        .route("/bookings", get(bookings::list_all).route_layer(bearer.clone()))
        .route("/my-bookings", get(bookings::mine).route_layer(bearer.clone()))
        .route("/bookings/:id", delete(bookings::delete).route_layer(bearer));

    public
        .merge(gated)
        .route_layer(middleware::from_fn(track_metrics))
        .fallback(not_found)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
