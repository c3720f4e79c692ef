//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage.
///
/// Implementations must enforce email uniqueness themselves (a unique index
/// or equivalent); `save` reports a violation as `DomainError::DuplicateEmail`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user
    async fn find_all(&self) -> Result<Vec<User>, DomainError>;

    /// Look up a user by email. The email is normalized before matching.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Look up a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    async fn save(&self, user: &User) -> Result<(), DomainError>;

    /// Overwrite an existing user
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Delete a user, failing with `NotFound` if nothing matched
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
