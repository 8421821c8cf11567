use async_trait::async_trait;
use models::RequestStatus;
use uuid::Uuid;

use super::domain::{ProviderRequest, StatusChange};
use crate::errors::ServiceError;
use crate::outcome::UpdateOutcome;

#[async_trait]
pub trait ProviderRepository: Send + Sync {
    async fn insert(&self, request: ProviderRequest) -> Result<(), ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<ProviderRequest>, ServiceError>;
    async fn list(&self, email: Option<&str>) -> Result<Vec<ProviderRequest>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
    async fn set_status(&self, id: Uuid, status: RequestStatus) -> Result<UpdateOutcome, ServiceError>;

    /// Set the status and, when it is `Accepted`, promote the applicant to
    /// `provider` atomically. `None` when the request does not exist.
    async fn apply_status(&self, id: Uuid, status: RequestStatus) -> Result<Option<StatusChange>, ServiceError>;
}
