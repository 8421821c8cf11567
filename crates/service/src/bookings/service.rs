use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Booking, Deleted, NewBooking};
use super::repository::BookingRepository;
use crate::document::{non_blank, sanitize};
use crate::errors::ServiceError;
use crate::identity::Principal;
use crate::outcome::InsertOutcome;

pub struct BookingService<R: BookingRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: BookingRepository + ?Sized> BookingService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewBooking) -> Result<InsertOutcome, ServiceError> {
        let booking = Booking {
            id: Uuid::new_v4(),
            customer_email: non_blank(input.customer_email.as_deref()),
            service_id: non_blank(input.service_id.as_deref()),
            booked_at: input.booked_at.unwrap_or_else(Utc::now),
            extra: sanitize(input.extra, &[]),
        };
        let id = booking.id;
        self.repo.insert(booking).await?;
        info!(booking_id = %id, "booking_created");
        Ok(InsertOutcome::new(id))
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, ServiceError> { self.repo.list(None).await }

    pub async fn list_owned(&self, principal: &Principal, requested: Option<&str>) -> Result<Vec<Booking>, ServiceError> {
        let email = principal.authorize_email(requested)?;
        self.repo.list(Some(email)).await
    }

    #[instrument(skip(self), fields(booking_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<Deleted, ServiceError> {
        if self.repo.delete(id).await? == 0 {
            return Err(ServiceError::not_found("Booking"));
        }
        info!("booking_deleted");
        Ok(Deleted { success: true })
    }
}
