//! User domain
//!
//! This module provides the user entity, its identifier and validation rules,
//! and the repository trait that storage adapters implement.

mod entity;
mod repository;
mod validation;

pub use entity::{Age, User, UserId, UserProps};
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_age, validate_email, validate_name, validate_user_id,
    UserValidationError, USER_ID_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
