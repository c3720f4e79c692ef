//! User service: the create, list, get-by-id and delete use cases

use std::sync::Arc;

use metrics::counter;
use tracing::{info, warn};

use crate::domain::user::{User, UserId, UserProps, UserRepository};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub age: Option<f64>,
}

/// User service orchestrating entity validation and repository calls
#[derive(Debug)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a new user.
    ///
    /// The email pre-check only avoids a doomed write; the repository's
    /// unique constraint decides, and a conflict there also surfaces as
    /// `DuplicateEmail`.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        if let Some(existing) = self.repository.find_by_email(&request.email).await? {
            warn!(email = %existing.email(), "Rejected registration for existing email");
            return Err(DomainError::duplicate_email(existing.email()));
        }

        let user = User::create(
            UserId::generate(),
            UserProps {
                name: request.name,
                email: request.email,
                age: request.age,
                created_at: None,
            },
        )?;

        self.repository.save(&user).await?;

        counter!("users_created_total").increment(1);
        info!(user_id = %user.id(), "User created");

        Ok(user)
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: &str) -> Result<User, DomainError> {
        let user_id = UserId::new(id)?;

        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repository.find_all().await
    }

    /// Delete a user
    pub async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        let user_id = UserId::new(id)?;

        self.repository.delete(&user_id).await?;

        counter!("users_deleted_total").increment(1);
        info!(user_id = %user_id, "User deleted");

        Ok(())
    }

    /// Change a user's age, applying the creation rules
    pub async fn update_user_age(&self, id: &str, age: f64) -> Result<User, DomainError> {
        let mut user = self.get_user_by_id(id).await?;

        user.update_age(age)?;
        self.repository.update(&user).await?;

        info!(user_id = %user.id(), "User age updated");

        Ok(user)
    }

    /// Check that storage is reachable
    pub async fn health_check(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> (UserService<InMemoryUserRepository>, Arc<InMemoryUserRepository>) {
        let repository = Arc::new(InMemoryUserRepository::new());
        (UserService::new(repository.clone()), repository)
    }

    fn make_request(name: &str, email: &str, age: Option<f64>) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn test_create_user_normalizes_email() {
        let (service, repository) = create_service();

        let user = service
            .create_user(make_request("Juan Pérez", "Juan@Example.com", None))
            .await
            .unwrap();

        assert_eq!(user.email(), "juan@example.com");

        let stored = repository.find_by_id(user.id()).await.unwrap().unwrap();
        assert_eq!(stored.email(), "juan@example.com");
        assert_eq!(stored.name(), "Juan Pérez");
    }

    #[tokio::test]
    async fn test_create_duplicate_email_case_insensitive() {
        let (service, repository) = create_service();

        service
            .create_user(make_request("Juan Pérez", "Juan@Example.com", None))
            .await
            .unwrap();

        let result = service
            .create_user(make_request("Otro Juan", "JUAN@EXAMPLE.COM", None))
            .await;

        assert!(matches!(result, Err(DomainError::DuplicateEmail { .. })));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_invalid_age_persists_nothing() {
        let (service, repository) = create_service();

        let result = service
            .create_user(make_request("Ana", "ana@example.com", Some(-1.0)))
            .await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_duplicate_performs_no_write() {
        let existing = User::create(
            UserId::generate(),
            UserProps {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .withf(|email| email == "jane@example.com")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_save().never();

        let service = UserService::new(Arc::new(repository));
        let result = service
            .create_user(make_request("Jane Doe", "jane@example.com", None))
            .await;

        assert!(matches!(result, Err(DomainError::DuplicateEmail { .. })));
    }

    #[tokio::test]
    async fn test_create_surfaces_storage_level_duplicate() {
        // Another writer got there between the pre-check and the insert
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_save()
            .times(1)
            .returning(|user| Err(DomainError::duplicate_email(user.email())));

        let service = UserService::new(Arc::new(repository));
        let result = service
            .create_user(make_request("John", "john@example.com", None))
            .await;

        assert!(matches!(result, Err(DomainError::DuplicateEmail { .. })));
    }

    #[tokio::test]
    async fn test_create_writes_once() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_email().times(1).returning(|_| Ok(None));
        repository.expect_save().times(1).returning(|_| Ok(()));

        let service = UserService::new(Arc::new(repository));
        let user = service
            .create_user(make_request("John Doe", "john@example.com", Some(28.0)))
            .await
            .unwrap();

        assert_eq!(user.email(), "john@example.com");
    }

    #[tokio::test]
    async fn test_get_user_by_id() {
        let (service, _) = create_service();

        let created = service
            .create_user(make_request("Ana", "ana@example.com", Some(30.0)))
            .await
            .unwrap();

        let fetched = service.get_user_by_id(created.id().as_str()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_user_by_id_not_found() {
        let (service, _) = create_service();

        let result = service.get_user_by_id("65a1f0c2e4b0a1b2c3d4e5f6").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_user_by_malformed_id() {
        let (service, _) = create_service();

        let result = service.get_user_by_id("0123456789").await;
        assert!(matches!(result, Err(DomainError::InvalidIdentifier { .. })));
    }

    #[tokio::test]
    async fn test_list_users() {
        let (service, _) = create_service();

        assert!(service.list_users().await.unwrap().is_empty());

        service
            .create_user(make_request("One", "one@example.com", None))
            .await
            .unwrap();
        service
            .create_user(make_request("Two", "two@example.com", None))
            .await
            .unwrap();

        assert_eq!(service.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (service, repository) = create_service();

        let user = service
            .create_user(make_request("Ana", "ana@example.com", None))
            .await
            .unwrap();

        service.delete_user(user.id().as_str()).await.unwrap();
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let (service, repository) = create_service();

        service
            .create_user(make_request("Ana", "ana@example.com", None))
            .await
            .unwrap();

        let result = service.delete_user("65a1f0c2e4b0a1b2c3d4e5f6").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_user_age() {
        let (service, _) = create_service();

        let user = service
            .create_user(make_request("Ana", "ana@example.com", Some(30.0)))
            .await
            .unwrap();

        let updated = service
            .update_user_age(user.id().as_str(), 31.0)
            .await
            .unwrap();
        assert_eq!(updated.age().and_then(|a| a.as_whole()), Some(31));

        let result = service.update_user_age(user.id().as_str(), 0.0).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let stored = service.get_user_by_id(user.id().as_str()).await.unwrap();
        assert_eq!(stored.age().and_then(|a| a.as_whole()), Some(31));
    }

    #[tokio::test]
    async fn test_health_check_uses_repository_ping() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_ping()
            .returning(|| Err(DomainError::storage("connection refused")));

        let service = UserService::new(Arc::new(repository));
        assert!(service.health_check().await.is_err());
    }
}
