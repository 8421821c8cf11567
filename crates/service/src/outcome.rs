//! Write results in the shape the frontend already consumes.

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertOutcome {
    pub fn new(inserted_id: Uuid) -> Self { Self { acknowledged: true, inserted_id } }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// No document matched the filter.
    pub fn unmatched() -> Self { Self { acknowledged: true, matched_count: 0, modified_count: 0 } }

    /// One document matched; `modified` is false when the new value equalled the old one.
    pub fn matched(modified: bool) -> Self {
        Self { acknowledged: true, matched_count: 1, modified_count: u64::from(modified) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self { Self { acknowledged: true, deleted_count } }
}
