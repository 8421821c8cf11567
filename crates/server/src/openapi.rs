//! OpenAPI document served at `/api-docs/openapi.json`.
//!
//! Documents are schema-flexible, so the request schemas below list the
//! known fields only; any other field is stored as-is.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{IntoParams, Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub message: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct InsertOutcomeDoc { pub acknowledged: bool, pub inserted_id: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UpdateOutcomeDoc { pub acknowledged: bool, pub matched_count: u64, pub modified_count: u64 }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DeleteOutcomeDoc { pub acknowledged: bool, pub deleted_count: u64 }

#[derive(ToSchema)]
pub struct NewUserDoc { pub email: String }

#[derive(ToSchema)]
pub struct RoleUpdateDoc {
    /// `user`, `provider` or `admin`
    pub role: String,
}

#[derive(ToSchema)]
pub struct NewProviderRequestDoc { pub email: String }

#[derive(ToSchema)]
pub struct StatusUpdateDoc {
    /// `pending`, `accepted`, `rejected` or `cancelled`
    pub status: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewServiceDoc {
    pub provider_email: Option<String>,
    pub service_name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub ratings: f64,
    pub created_at: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct NewBookingDoc {
    pub customer_email: Option<String>,
    pub service_id: Option<String>,
    pub booked_at: Option<String>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ServiceListDoc {
    /// Exact provider email
    pub email: Option<String>,
    /// Case-insensitive substring over name, description, category, provider email and price
    pub search_text: Option<String>,
    /// Case-insensitive exact category
    pub category: Option<String>,
    /// `true` lists cheapest first without descriptions or total
    pub popular: Option<String>,
    /// `priceLow`, `priceHigh`, `name`, `newest`; ratings by default
    pub sort: Option<String>,
    /// 1-based page, default 1
    pub page: Option<u32>,
    /// Page size 1..=100, default 10
    pub limit: Option<u32>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::register,
        crate::routes::users::list_or_find,
        crate::routes::users::role_of,
        crate::routes::users::profile,
        crate::routes::users::set_role,
        crate::routes::providers::submit,
        crate::routes::providers::list_all,
        crate::routes::providers::delete,
        crate::routes::providers::mine,
        crate::routes::providers::cancel,
        crate::routes::providers::update_status,
        crate::routes::services::create,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::mine,
        crate::routes::services::delete_mine,
        crate::routes::bookings::create,
        crate::routes::bookings::list_all,
        crate::routes::bookings::mine,
        crate::routes::bookings::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDoc,
            InsertOutcomeDoc,
            UpdateOutcomeDoc,
            DeleteOutcomeDoc,
            NewUserDoc,
            RoleUpdateDoc,
            NewProviderRequestDoc,
            StatusUpdateDoc,
            NewServiceDoc,
            NewBookingDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "users"),
        (name = "providers"),
        (name = "services"),
        (name = "bookings")
    )
)]
pub struct ApiDoc;
