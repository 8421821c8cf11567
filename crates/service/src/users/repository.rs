use async_trait::async_trait;
use models::Role;
use uuid::Uuid;

use super::domain::User;
use crate::errors::ServiceError;
use crate::outcome::UpdateOutcome;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError>;
    async fn list(&self) -> Result<Vec<User>, ServiceError>;
    /// Insert unless the email is taken. Returns `false` when it was.
    async fn insert_if_absent(&self, user: User) -> Result<bool, ServiceError>;
    async fn update_role(&self, id: Uuid, role: Role) -> Result<UpdateOutcome, ServiceError>;
}
