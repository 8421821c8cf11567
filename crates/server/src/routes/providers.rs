use axum::{
    extract::{Path, State},
    Extension, Json,
};
use service::identity::Principal;
use service::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use service::providers::domain::{NewProviderRequest, ProviderRequest, StatusChange, StatusUpdate};

use crate::errors::ApiError;
use crate::extract::{parse_id, AppJson, AppQuery};
use crate::routes::users::EmailQuery;
use crate::state::AppState;

#[utoipa::path(
    post, path = "/providers", tag = "providers",
    request_body = crate::openapi::NewProviderRequestDoc,
    responses(
        (status = 200, description = "Request filed as pending", body = crate::openapi::InsertOutcomeDoc),
        (status = 400, description = "Missing or invalid email", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn submit(State(state): State<AppState>, AppJson(input): AppJson<NewProviderRequest>) -> Result<Json<InsertOutcome>, ApiError> {
    Ok(Json(state.providers.submit(input).await?))
}

#[utoipa::path(get, path = "/all-request", tag = "providers", responses((status = 200, description = "Every provider request")))]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<ProviderRequest>>, ApiError> {
    Ok(Json(state.providers.list_all().await?))
}

#[utoipa::path(
    delete, path = "/all-request/{id}", tag = "providers",
    params(("id" = String, Path, description = "Request id")),
    security(("bearer" = [])),
    responses((status = 200, description = "Delete outcome", body = crate::openapi::DeleteOutcomeDoc))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<DeleteOutcome>, ApiError> {
    Ok(Json(state.providers.delete(parse_id(&id)?).await?))
}

#[utoipa::path(
    get, path = "/my-request", tag = "providers",
    params(EmailQuery),
    security(("bearer" = [])),
    responses((status = 200, description = "Requests filed with `email`, or all when omitted"))
)]
pub async fn mine(State(state): State<AppState>, AppQuery(q): AppQuery<EmailQuery>) -> Result<Json<Vec<ProviderRequest>>, ApiError> {
    Ok(Json(state.providers.list_for(q.email.as_deref()).await?))
}

#[utoipa::path(
    delete, path = "/my-request/{id}", tag = "providers",
    params(("id" = String, Path, description = "Request id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Request cancelled", body = crate::openapi::UpdateOutcomeDoc),
        (status = 403, description = "Request belongs to another applicant", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Request not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn cancel(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    Ok(Json(state.providers.cancel(&principal, parse_id(&id)?).await?))
}

#[utoipa::path(
    patch, path = "/update-request/{id}", tag = "providers",
    params(("id" = String, Path, description = "Request id")),
    request_body = crate::openapi::StatusUpdateDoc,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "`{requestResult, userResult}`; userResult is null unless accepted"),
        (status = 400, description = "Invalid id or status", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Request not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<StatusUpdate>,
) -> Result<Json<StatusChange>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.providers.update_status(id, body.status).await?))
}
