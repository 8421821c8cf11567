use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{number_or_string, Fields};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_email: Option<String>,
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub ratings: f64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Fields,
}

/// Listing body. `email` is accepted in place of `providerEmail`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    #[serde(default)]
    pub provider_email: Option<String>,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub price: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub ratings: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Fields,
}
