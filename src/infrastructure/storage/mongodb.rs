//! MongoDB storage handle
//!
//! Opens the client once at startup and owns it for the process lifetime.
//! Repositories receive the handle explicitly instead of reaching for a
//! global connection.

use std::time::Duration;

use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::DomainError;

/// MongoDB connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MongoConfig {
    /// Connection string, e.g. mongodb://localhost:27017
    #[serde(default = "default_uri")]
    pub uri: String,
    /// Database name; falls back to the one named in the URI
    #[serde(default)]
    pub database: Option<String>,
    /// Collection holding user documents
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Application name reported to the server
    #[serde(default)]
    pub app_name: Option<String>,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Server selection timeout in seconds
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_secs: u64,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_collection() -> String {
    "users".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_server_selection_timeout() -> u64 {
    30
}

const DEFAULT_DATABASE: &str = "user_service";

/// Name of the unique index on `email`; duplicate-key errors report it
pub const EMAIL_INDEX_NAME: &str = "email_unique";

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: None,
            collection: default_collection(),
            app_name: None,
            connect_timeout_secs: default_connect_timeout(),
            server_selection_timeout_secs: default_server_selection_timeout(),
        }
    }
}

impl MongoConfig {
    /// The URI with any password replaced, safe for logs
    pub fn redacted_uri(&self) -> String {
        redact_uri(&self.uri)
    }
}

/// Hide credentials in a connection string
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end + 3..];
    let authority_end = rest.find('/').unwrap_or(rest.len());

    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***@{}", &uri[..scheme_end], &rest[at + 1..]),
        None => uri.to_string(),
    }
}

/// Owned MongoDB handle shared by the repositories
#[derive(Debug, Clone)]
pub struct MongoStorage {
    database: Database,
    collection_name: String,
}

impl MongoStorage {
    /// Connect, verify the server answers, and ensure the user indexes exist
    pub async fn connect(config: &MongoConfig) -> Result<Self, DomainError> {
        info!(uri = %config.redacted_uri(), "Connecting to MongoDB");

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| DomainError::storage(format!("Invalid MongoDB URI: {}", e)))?;

        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));

        if let Some(ref app_name) = config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options)
            .map_err(|e| DomainError::storage(format!("Failed to create MongoDB client: {}", e)))?;

        let database = match config.database {
            Some(ref name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };

        let storage = Self {
            database,
            collection_name: config.collection.clone(),
        };

        storage.ping().await?;
        storage.ensure_indexes().await?;

        info!(
            database = %storage.database.name(),
            collection = %storage.collection_name,
            "MongoDB connection established"
        );

        Ok(storage)
    }

    /// The user collection as raw documents
    pub fn users(&self) -> Collection<Document> {
        self.database.collection::<Document>(&self.collection_name)
    }

    /// Round-trip a ping command to the server
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DomainError::storage(format!("MongoDB ping failed: {}", e)))?;

        Ok(())
    }

    /// Unique index on the normalized email; concurrent creates rely on it
    async fn ensure_indexes(&self) -> Result<(), DomainError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(EMAIL_INDEX_NAME.to_string())
                    .build(),
            )
            .build();

        self.users()
            .create_index(index)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create email index: {}", e)))?;

        Ok(())
    }
}
