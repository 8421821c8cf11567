use axum::{
    extract::{Path, State},
    Extension, Json,
};
use service::catalog::domain::{NewService, Service};
use service::catalog::query::{ServiceListParams, ServicePage, ServiceQuery};
use service::identity::Principal;
use service::outcome::{DeleteOutcome, InsertOutcome};
use tracing::debug;

use crate::errors::ApiError;
use crate::extract::{parse_id, AppJson, AppQuery};
use crate::routes::users::EmailQuery;
use crate::state::AppState;

#[utoipa::path(
    post, path = "/services", tag = "services",
    request_body = crate::openapi::NewServiceDoc,
    responses((status = 200, description = "Service stored", body = crate::openapi::InsertOutcomeDoc))
)]
pub async fn create(State(state): State<AppState>, AppJson(input): AppJson<NewService>) -> Result<Json<InsertOutcome>, ApiError> {
    Ok(Json(state.catalog.create(input).await?))
}

#[utoipa::path(
    get, path = "/services", tag = "services",
    params(crate::openapi::ServiceListDoc),
    responses(
        (status = 200, description = "`{services, total}`; `total` is omitted in popular mode"),
        (status = 400, description = "Malformed query", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<AppState>, AppQuery(params): AppQuery<ServiceListParams>) -> Result<Json<ServicePage>, ApiError> {
    let query = ServiceQuery::new(&params);
    debug!(?query, "list services");
    Ok(Json(state.catalog.list(&query).await?))
}

#[utoipa::path(
    get, path = "/services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service"),
        (status = 404, description = "Service not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Service>, ApiError> {
    Ok(Json(state.catalog.get(parse_id(&id)?).await?))
}

#[utoipa::path(
    get, path = "/my-services", tag = "services",
    params(EmailQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's services, newest first"),
        (status = 403, description = "Forbidden access", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn mine(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    AppQuery(q): AppQuery<EmailQuery>,
) -> Result<Json<Vec<Service>>, ApiError> {
    Ok(Json(state.catalog.list_owned(&principal, q.email.as_deref()).await?))
}

#[utoipa::path(
    delete, path = "/my-services/{id}", tag = "services",
    params(("id" = String, Path, description = "Service id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Delete outcome", body = crate::openapi::DeleteOutcomeDoc),
        (status = 403, description = "Service belongs to another provider", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Service not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete_mine(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    Ok(Json(state.catalog.delete_owned(&principal, parse_id(&id)?).await?))
}
