//! Repository implementations and the bundle handed to the HTTP layer.

pub mod memory;
pub mod seaorm;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::bookings::repository::BookingRepository;
use crate::catalog::repository::ServiceRepository;
use crate::providers::repository::ProviderRepository;
use crate::users::repository::UserRepository;

/// One handle per collection, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub providers: Arc<dyn ProviderRepository>,
    pub services: Arc<dyn ServiceRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self::from_store(Arc::new(seaorm::SeaOrmStore::new(db)))
    }

    pub fn memory() -> Self {
        Self::from_store(Arc::new(memory::MemoryStore::default()))
    }

    fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository + ProviderRepository + ServiceRepository + BookingRepository + 'static,
    {
        Self { users: store.clone(), providers: store.clone(), services: store.clone(), bookings: store }
    }
}
