use axum::{
    extract::{Path, State},
    Extension, Json,
};
use service::bookings::domain::{Booking, Deleted, NewBooking};
use service::identity::Principal;
use service::outcome::InsertOutcome;

use crate::errors::ApiError;
use crate::extract::{parse_id, AppJson, AppQuery};
use crate::routes::users::EmailQuery;
use crate::state::AppState;

#[utoipa::path(
    post, path = "/bookings", tag = "bookings",
    request_body = crate::openapi::NewBookingDoc,
    responses((status = 200, description = "Booking stored", body = crate::openapi::InsertOutcomeDoc))
)]
pub async fn create(State(state): State<AppState>, AppJson(input): AppJson<NewBooking>) -> Result<Json<InsertOutcome>, ApiError> {
    Ok(Json(state.bookings.create(input).await?))
}

#[utoipa::path(
    get, path = "/bookings", tag = "bookings",
    security(("bearer" = [])),
    responses((status = 200, description = "Every booking, most recent first"))
)]
pub async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.list_all().await?))
}

#[utoipa::path(
    get, path = "/my-bookings", tag = "bookings",
    params(EmailQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's bookings, most recent first"),
        (status = 403, description = "Forbidden access", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn mine(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    AppQuery(q): AppQuery<EmailQuery>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.bookings.list_owned(&principal, q.email.as_deref()).await?))
}

#[utoipa::path(
    delete, path = "/bookings/{id}", tag = "bookings",
    params(("id" = String, Path, description = "Booking id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "`{success: true}`"),
        (status = 404, description = "Booking not found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Deleted>, ApiError> {
    Ok(Json(state.bookings.delete(parse_id(&id)?).await?))
}
