use async_trait::async_trait;
use uuid::Uuid;

use super::domain::Booking;
use crate::errors::ServiceError;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Booking) -> Result<(), ServiceError>;
    /// Most recent first, optionally limited to one customer.
    async fn list(&self, customer_email: Option<&str>) -> Result<Vec<Booking>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError>;
}
