//! User infrastructure module
//!
//! Storage adapters for the user repository (in-memory and MongoDB) and the
//! user service that implements the application use cases.

mod mongo_repository;
mod repository;
mod service;

pub use mongo_repository::MongoUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UserService};
