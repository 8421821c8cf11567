use std::sync::Arc;

use chrono::Utc;
use models::RequestStatus;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{NewProviderRequest, ProviderRequest, StatusChange};
use super::repository::ProviderRepository;
use crate::document::{non_blank, require_email, sanitize};
use crate::errors::ServiceError;
use crate::identity::Principal;
use crate::outcome::{DeleteOutcome, InsertOutcome, UpdateOutcome};

pub struct ProviderService<R: ProviderRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProviderRepository + ?Sized> ProviderService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn submit(&self, input: NewProviderRequest) -> Result<InsertOutcome, ServiceError> {
        let request = ProviderRequest {
            id: Uuid::new_v4(),
            email: require_email(&input.email)?,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
            extra: sanitize(input.extra, &["email", "status", "createdAt"]),
        };
        let id = request.id;
        self.repo.insert(request).await?;
        info!(request_id = %id, "provider_request_submitted");
        Ok(InsertOutcome::new(id))
    }

    pub async fn list_all(&self) -> Result<Vec<ProviderRequest>, ServiceError> { self.repo.list(None).await }

    /// Requests filed with `email`, or every request when none is given.
    pub async fn list_for(&self, email: Option<&str>) -> Result<Vec<ProviderRequest>, ServiceError> {
        let email = non_blank(email);
        self.repo.list(email.as_deref()).await
    }

    #[instrument(skip(self), fields(request_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<DeleteOutcome, ServiceError> {
        let deleted = self.repo.delete(id).await?;
        info!(deleted, "provider_request_deleted");
        Ok(DeleteOutcome::new(deleted))
    }

    /// Applicant withdraws their own request.
    #[instrument(skip(self, principal), fields(request_id = %id, email = %principal.email))]
    pub async fn cancel(&self, principal: &Principal, id: Uuid) -> Result<UpdateOutcome, ServiceError> {
        let request = self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("Request"))?;
        if request.email != principal.email {
            return Err(ServiceError::forbidden());
        }
        let outcome = self.repo.set_status(id, RequestStatus::Cancelled).await?;
        info!("provider_request_cancelled");
        Ok(outcome)
    }

    /// Move a request to `status`; acceptance promotes the applicant.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::{RequestStatus, Role};
    /// use service::store::memory::MemoryStore;
    /// use service::providers::{ProviderService, domain::NewProviderRequest};
    /// use service::users::{UserService, domain::NewUser};
    /// let store = Arc::new(MemoryStore::default());
    /// let users = UserService::new(store.clone());
    /// let providers = ProviderService::new(store);
    /// tokio_test::block_on(users.register(NewUser { email: "p@example.com".into(), ..Default::default() })).unwrap();
    /// let submitted = tokio_test::block_on(providers.submit(NewProviderRequest { email: "p@example.com".into(), ..Default::default() })).unwrap();
    /// let change = tokio_test::block_on(providers.update_status(submitted.inserted_id, RequestStatus::Accepted)).unwrap();
    /// assert_eq!(change.user_result.unwrap().modified_count, 1);
    /// assert_eq!(tokio_test::block_on(users.role_of("p@example.com")).unwrap(), Role::Provider);
    /// ```
    #[instrument(skip(self), fields(request_id = %id, status = %status))]
    pub async fn update_status(&self, id: Uuid, status: RequestStatus) -> Result<StatusChange, ServiceError> {
        let change = self.repo.apply_status(id, status).await?.ok_or_else(|| ServiceError::not_found("Request"))?;
        info!(
            modified = change.request_result.modified_count,
            promoted = change.user_result.map_or(0, |u| u.modified_count),
            "provider_request_status_changed"
        );
        Ok(change)
    }
}
