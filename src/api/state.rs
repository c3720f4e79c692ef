//! Application state for shared services

use std::sync::Arc;
use std::time::Instant;

use crate::domain::user::UserRepository;
use crate::domain::{DomainError, User};
use crate::infrastructure::user::{CreateUserRequest, UserService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self {
            user_service,
            started_at: Instant::now(),
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn get_user_by_id(&self, id: &str) -> Result<User, DomainError>;
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;
    async fn delete_user(&self, id: &str) -> Result<(), DomainError>;
    async fn update_user_age(&self, id: &str, age: f64) -> Result<User, DomainError>;
    async fn health_check(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> UserServiceTrait for UserService<R> {
    async fn create_user(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create_user(self, request).await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<User, DomainError> {
        UserService::get_user_by_id(self, id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        UserService::list_users(self).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), DomainError> {
        UserService::delete_user(self, id).await
    }

    async fn update_user_age(&self, id: &str, age: f64) -> Result<User, DomainError> {
        UserService::update_user_age(self, id, age).await
    }

    async fn health_check(&self) -> Result<(), DomainError> {
        UserService::health_check(self).await
    }
}
