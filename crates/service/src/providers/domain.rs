use chrono::{DateTime, Utc};
use models::RequestStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::Fields;
use crate::outcome::UpdateOutcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProviderRequest {
    #[serde(default)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatusUpdate {
    pub status: RequestStatus,
}

/// Outcome of a status change; `user_result` is set only on acceptance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub request_result: UpdateOutcome,
    pub user_result: Option<UpdateOutcome>,
}
