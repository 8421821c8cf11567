//! In-process store used by tests and the `memory` storage backend.

use async_trait::async_trait;
use models::{RequestStatus, Role};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::bookings::{domain::Booking, repository::BookingRepository};
use crate::catalog::{
    domain::Service,
    query::{ServiceFilter, SortKey},
    repository::ServiceRepository,
};
use crate::errors::ServiceError;
use crate::outcome::UpdateOutcome;
use crate::pagination::Window;
use crate::providers::{
    domain::{ProviderRequest, StatusChange},
    repository::ProviderRepository,
};
use crate::users::{domain::User, repository::UserRepository};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    providers: RwLock<Vec<ProviderRequest>>,
    services: RwLock<Vec<Service>>,
    bookings: RwLock<Vec<Booking>>,
}

fn promote(users: &mut [User], email: &str) -> UpdateOutcome {
    match users.iter_mut().find(|u| u.email == email) {
        None => UpdateOutcome::unmatched(),
        Some(u) if u.role == Role::Provider => UpdateOutcome::matched(false),
        Some(u) => {
            u.role = Role::Provider;
            UpdateOutcome::matched(true)
        }
    }
}

fn remove_by<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> u64 {
    let before = items.len();
    items.retain(|i| !pred(i));
    (before - items.len()) as u64
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        Ok(self.users.read().await.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.users.read().await.clone())
    }

    async fn insert_if_absent(&self, user: User) -> Result<bool, ServiceError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Ok(false);
        }
        users.push(user);
        Ok(true)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<UpdateOutcome, ServiceError> {
        let mut users = self.users.write().await;
        Ok(match users.iter_mut().find(|u| u.id == id) {
            None => UpdateOutcome::unmatched(),
            Some(u) if u.role == role => UpdateOutcome::matched(false),
            Some(u) => {
                u.role = role;
                UpdateOutcome::matched(true)
            }
        })
    }
}

#[async_trait]
impl ProviderRepository for MemoryStore {
    async fn insert(&self, request: ProviderRequest) -> Result<(), ServiceError> {
        self.providers.write().await.push(request);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<ProviderRequest>, ServiceError> {
        Ok(self.providers.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, email: Option<&str>) -> Result<Vec<ProviderRequest>, ServiceError> {
        let requests = self.providers.read().await;
        Ok(requests.iter().filter(|r| email.map_or(true, |e| r.email == e)).cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(remove_by(&mut *self.providers.write().await, |r| r.id == id))
    }

    async fn set_status(&self, id: Uuid, status: RequestStatus) -> Result<UpdateOutcome, ServiceError> {
        let mut requests = self.providers.write().await;
        Ok(match requests.iter_mut().find(|r| r.id == id) {
            None => UpdateOutcome::unmatched(),
            Some(r) if r.status == status => UpdateOutcome::matched(false),
            Some(r) => {
                r.status = status;
                UpdateOutcome::matched(true)
            }
        })
    }

    async fn apply_status(&self, id: Uuid, status: RequestStatus) -> Result<Option<StatusChange>, ServiceError> {
        // lock order: providers, then users
        let mut requests = self.providers.write().await;
        let Some(request) = requests.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        let request_result = UpdateOutcome::matched(request.status != status);
        request.status = status;
        let user_result = if status == RequestStatus::Accepted {
            let mut users = self.users.write().await;
            Some(promote(users.as_mut_slice(), &request.email))
        } else {
            None
        };
        Ok(Some(StatusChange { request_result, user_result }))
    }
}

#[async_trait]
impl ServiceRepository for MemoryStore {
    async fn insert(&self, service: Service) -> Result<(), ServiceError> {
        self.services.write().await.push(service);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Service>, ServiceError> {
        Ok(self.services.read().await.iter().find(|s| s.id == id).cloned())
    }

    async fn search(&self, filter: &ServiceFilter, sort: SortKey, window: Option<Window>) -> Result<Vec<Service>, ServiceError> {
        let mut hits: Vec<Service> = self.services.read().await.iter().filter(|s| filter.matches(s)).cloned().collect();
        hits.sort_by(|a, b| sort.compare(a, b));
        Ok(match window {
            Some(w) => hits.into_iter().skip(w.offset as usize).take(w.limit as usize).collect(),
            None => hits,
        })
    }

    async fn count(&self, filter: &ServiceFilter) -> Result<u64, ServiceError> {
        Ok(self.services.read().await.iter().filter(|s| filter.matches(s)).count() as u64)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(remove_by(&mut *self.services.write().await, |s| s.id == id))
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn insert(&self, booking: Booking) -> Result<(), ServiceError> {
        self.bookings.write().await.push(booking);
        Ok(())
    }

    async fn list(&self, customer_email: Option<&str>) -> Result<Vec<Booking>, ServiceError> {
        let mut hits: Vec<Booking> = self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| customer_email.map_or(true, |e| b.customer_email.as_deref() == Some(e)))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.booked_at.cmp(&a.booked_at).then_with(|| a.id.cmp(&b.id)));
        Ok(hits)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(remove_by(&mut *self.bookings.write().await, |b| b.id == id))
    }
}
