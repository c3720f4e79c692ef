//! Storage infrastructure - backend selection and connection handles

mod mongodb;

pub use self::mongodb::{redact_uri, MongoConfig, MongoStorage, EMAIL_INDEX_NAME};

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// MongoDB storage
    MongoDb,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "mongodb" | "mongo" => Some(Self::MongoDb),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!(StorageType::from_str("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("In-Memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::from_str("mongodb"), Some(StorageType::MongoDb));
        assert_eq!(StorageType::from_str("Mongo"), Some(StorageType::MongoDb));
        assert_eq!(StorageType::from_str("postgres"), None);
    }
}
