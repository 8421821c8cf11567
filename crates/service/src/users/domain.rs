use chrono::{DateTime, Utc};
use models::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Fields;
use crate::outcome::InsertOutcome;

/// Stored user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Fields,
}

/// Registration body. Anything besides `email` is kept as profile data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleView {
    pub role: Role,
}

/// Result of `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Registration {
    Created(InsertOutcome),
    AlreadyExists { message: String },
}

impl Registration {
    pub fn already_exists() -> Self { Registration::AlreadyExists { message: "user already exists".into() } }
}
