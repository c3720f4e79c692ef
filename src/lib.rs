//! User Service
//!
//! REST API for registering, listing, fetching, updating and deleting user
//! records, backed by MongoDB (or an in-memory store for local runs).

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use infrastructure::storage::{MongoStorage, StorageType};
use infrastructure::user::{InMemoryUserRepository, MongoUserRepository, UserService};
use tracing::info;

/// Create the application state with custom configuration.
///
/// Fails when the backend name is unknown or MongoDB cannot be reached,
/// so the process never starts serving without its storage.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend = StorageType::from_str(&config.storage.backend).ok_or_else(|| {
        anyhow::anyhow!("Unknown storage backend '{}'", config.storage.backend)
    })?;

    info!("Storage backend: {:?}", backend);

    let state = match backend {
        StorageType::InMemory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            AppState::new(Arc::new(UserService::new(repository)))
        }
        StorageType::MongoDb => {
            let mongo = &config.storage.mongodb;
            let storage = MongoStorage::connect(mongo)
                .await
                .with_context(|| format!("Failed to connect to MongoDB at {}", mongo.redacted_uri()))?;

            let repository = Arc::new(MongoUserRepository::new(storage));
            AppState::new(Arc::new(UserService::new(repository)))
        }
    };

    Ok(state)
}
