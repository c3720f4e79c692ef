use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid identifier: {message}")]
    InvalidIdentifier { message: String },

    #[error("Email '{email}' is already registered")]
    DuplicateEmail { email: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            message: message.into(),
        }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Message suitable for returning to API clients
    pub fn client_message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::Validation { message }
            | Self::InvalidIdentifier { message }
            | Self::Conflict { message }
            | Self::StorageUnavailable { message }
            | Self::Internal { message } => message.clone(),
            Self::DuplicateEmail { .. } => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User '65a1f0c2e4b0a1b2c3d4e5f6' not found");
        assert_eq!(
            error.to_string(),
            "Not found: User '65a1f0c2e4b0a1b2c3d4e5f6' not found"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Name is required");
        assert_eq!(error.to_string(), "Validation error: Name is required");
    }

    #[test]
    fn test_duplicate_email_error() {
        let error = DomainError::duplicate_email("juan@example.com");
        assert_eq!(
            error.to_string(),
            "Email 'juan@example.com' is already registered"
        );
        assert_eq!(error.client_message(), error.to_string());
    }

    #[test]
    fn test_client_message_strips_prefix() {
        let error = DomainError::invalid_identifier("User ID must be 24 hexadecimal characters");
        assert_eq!(
            error.client_message(),
            "User ID must be 24 hexadecimal characters"
        );
    }
}
