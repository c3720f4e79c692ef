//! Shared API types

pub mod error;
pub mod json;
pub mod user;

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
pub use user::{CreateUserApiRequest, MessageResponse, UpdateAgeApiRequest, UserResponse};
