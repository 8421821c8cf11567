use std::sync::Arc;

use chrono::Utc;
use models::Role;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{NewUser, Registration, User};
use super::repository::UserRepository;
use crate::document::{require_email, sanitize};
use crate::errors::ServiceError;
use crate::outcome::{InsertOutcome, UpdateOutcome};

pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register an account with role `user`, or report that the email is taken.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::store::memory::MemoryStore;
    /// use service::users::{UserService, domain::{NewUser, Registration}};
    /// let svc = UserService::new(Arc::new(MemoryStore::default()));
    /// let input = NewUser { email: "ann@example.com".into(), ..Default::default() };
    /// let first = tokio_test::block_on(svc.register(input.clone())).unwrap();
    /// assert!(matches!(first, Registration::Created(_)));
    /// let second = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(second, Registration::already_exists());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: NewUser) -> Result<Registration, ServiceError> {
        let email = require_email(&input.email)?;
        if self.repo.find_by_email(&email).await?.is_some() {
            debug!("registration skipped, email taken");
            return Ok(Registration::already_exists());
        }
        let user = User {
            id: Uuid::new_v4(),
            email,
            role: Role::User,
            created_at: Utc::now(),
            extra: sanitize(input.extra, &["email", "role", "createdAt"]),
        };
        let id = user.id;
        if !self.repo.insert_if_absent(user).await? {
            return Ok(Registration::already_exists());
        }
        info!(user_id = %id, "user_registered");
        Ok(Registration::Created(InsertOutcome::new(id)))
    }

    pub async fn list(&self) -> Result<Vec<User>, ServiceError> { self.repo.list().await }

    pub async fn get_by_email(&self, email: &str) -> Result<User, ServiceError> {
        self.repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }

    /// Role for an email; unknown accounts are plain users.
    pub async fn role_of(&self, email: &str) -> Result<Role, ServiceError> {
        Ok(self.repo.find_by_email(email.trim()).await?.map(|u| u.role).unwrap_or_default())
    }

    #[instrument(skip(self), fields(user_id = %id, role = %role))]
    pub async fn set_role(&self, id: Uuid, role: Role) -> Result<UpdateOutcome, ServiceError> {
        let outcome = self.repo.update_role(id, role).await?;
        info!(matched = outcome.matched_count, modified = outcome.modified_count, "user_role_updated");
        Ok(outcome)
    }
}
