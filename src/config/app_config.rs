use serde::{Deserialize, Serialize};

use crate::infrastructure::observability::ObservabilityConfig;
use crate::infrastructure::storage::MongoConfig;

/// Environment variable that overrides `storage.mongodb.uri`
pub const MONGODB_URI_ENV: &str = "MONGODB_URI";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Storage backend selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// `mongodb` or `memory`
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub mongodb: MongoConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3800
}

fn default_level() -> String {
    "info".to_string()
}

fn default_backend() -> String {
    "mongodb".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            mongodb: MongoConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("storage.mongodb.uri", std::env::var(MONGODB_URI_ENV).ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Copy safe to print: credentials in the MongoDB URI are masked
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.storage.mongodb.uri = self.storage.mongodb.redacted_uri();
        config
    }
}
