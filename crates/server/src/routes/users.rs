use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use service::document::non_blank;
use service::identity::Principal;
use service::users::domain::{NewUser, Registration, RoleUpdate, RoleView, User};
use service::outcome::UpdateOutcome;
use tracing::info;
use utoipa::IntoParams;

use crate::errors::ApiError;
use crate::extract::{parse_id, AppJson, AppQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::NewUserDoc,
    responses(
        (status = 200, description = "Insert outcome, or `{message: \"user already exists\"}`"),
        (status = 400, description = "Missing or invalid email", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn register(State(state): State<AppState>, AppJson(input): AppJson<NewUser>) -> Result<Json<Registration>, ApiError> {
    Ok(Json(state.users.register(input).await?))
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    params(EmailQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All users, or the one matching `email`"),
        (status = 401, description = "Missing or invalid token", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list_or_find(State(state): State<AppState>, AppQuery(q): AppQuery<EmailQuery>) -> Result<Response, ApiError> {
    match non_blank(q.email.as_deref()) {
        Some(email) => Ok(Json(state.users.get_by_email(&email).await?).into_response()),
        None => {
            let users: Vec<User> = state.users.list().await?;
            info!(count = users.len(), "list users");
            Ok(Json(users).into_response())
        }
    }
}

#[utoipa::path(
    get, path = "/users/{ident}/role", tag = "users",
    params(("ident" = String, Path, description = "Account email")),
    responses((status = 200, description = "Role, `user` for unknown accounts"))
)]
pub async fn role_of(State(state): State<AppState>, Path(email): Path<String>) -> Result<Json<RoleView>, ApiError> {
    let role = state.users.role_of(&email).await?;
    Ok(Json(RoleView { role }))
}

#[utoipa::path(
    get, path = "/profile", tag = "users",
    params(EmailQuery),
    responses(
        (status = 200, description = "Full user record"),
        (status = 400, description = "Email query parameter is required", body = crate::openapi::ErrorDoc),
        (status = 404, description = "User not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn profile(State(state): State<AppState>, AppQuery(q): AppQuery<EmailQuery>) -> Result<Json<User>, ApiError> {
    let email = non_blank(q.email.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Email query parameter is required".into()))?;
    Ok(Json(state.users.get_by_email(&email).await?))
}

#[utoipa::path(
    patch, path = "/users/{ident}/role", tag = "users",
    params(("ident" = String, Path, description = "User id")),
    request_body = crate::openapi::RoleUpdateDoc,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Update outcome", body = crate::openapi::UpdateOutcomeDoc),
        (status = 400, description = "Invalid id or role", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn set_role(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(ident): Path<String>,
    AppJson(body): AppJson<RoleUpdate>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = parse_id(&ident)?;
    info!(by = %principal.email, user_id = %id, role = %body.role, "role change requested");
    Ok(Json(state.users.set_role(id, body.role).await?))
}
