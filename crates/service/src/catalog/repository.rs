use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Service;
use super::query::{ServiceFilter, SortKey};
use crate::errors::ServiceError;
use crate::pagination::Window;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn insert(&self, service: Service) -> Result<(), ServiceError>;
    async fn find(&self, id: Uuid) -> Result<Option<Service>, ServiceError>;
    /// Matching services in `sort` order; `None` returns every match.
    async fn search(&self, filter: &ServiceFilter, sort: SortKey, window: Option<Window>) -> Result<Vec<Service>, ServiceError>;
    async fn count(&self, filter: &ServiceFilter) -> Result<u64, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
}
