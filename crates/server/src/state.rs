use std::sync::Arc;

use service::bookings::{repository::BookingRepository, BookingService};
use service::catalog::{repository::ServiceRepository, CatalogService};
use service::identity::IdentityVerifier;
use service::providers::{repository::ProviderRepository, ProviderService};
use service::store::Repositories;
use service::users::{repository::UserRepository, UserService};

/// Shared router state; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService<dyn UserRepository>>,
    pub providers: Arc<ProviderService<dyn ProviderRepository>>,
    pub catalog: Arc<CatalogService<dyn ServiceRepository>>,
    pub bookings: Arc<BookingService<dyn BookingRepository>>,
    pub identity: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(repos: Repositories, identity: Arc<dyn IdentityVerifier>) -> Self {
        Self {
            users: Arc::new(UserService::new(repos.users)),
            providers: Arc::new(ProviderService::new(repos.providers)),
            catalog: Arc::new(CatalogService::new(repos.services)),
            bookings: Arc::new(BookingService::new(repos.bookings)),
            identity,
        }
    }
}
