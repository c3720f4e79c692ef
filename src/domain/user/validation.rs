//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::DomainError;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID cannot be empty")]
    EmptyId,

    #[error("User ID must be exactly {0} hexadecimal characters")]
    InvalidIdFormat(usize),

    #[error("Name is required")]
    EmptyName,

    #[error("Email is required")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Age must be an integer")]
    AgeNotInteger,

    #[error("Age must be a positive number greater than 0")]
    AgeNotPositive,

    #[error("Corrupt user record: name and email are required")]
    CorruptRecord,
}

impl From<UserValidationError> for DomainError {
    fn from(err: UserValidationError) -> Self {
        match err {
            UserValidationError::EmptyId | UserValidationError::InvalidIdFormat(_) => {
                DomainError::invalid_identifier(err.to_string())
            }
            _ => DomainError::validation(err.to_string()),
        }
    }
}

pub const USER_ID_LENGTH: usize = 24;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// Validate a user ID
///
/// Rules:
/// - Cannot be empty
/// - Exactly 24 characters, all hexadecimal (either case)
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() {
        return Err(UserValidationError::EmptyId);
    }

    if id.len() != USER_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(UserValidationError::InvalidIdFormat(USER_ID_LENGTH));
    }

    Ok(())
}

/// Validate a user name. The caller is expected to pass the trimmed value.
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    Ok(())
}

/// Validate an email address exactly as submitted; padding fails the format check.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(UserValidationError::InvalidEmailFormat);
    }

    Ok(())
}

/// Validate an age value
///
/// Rules:
/// - Must be a finite whole number
/// - Must be greater than 0
pub fn validate_age(age: f64) -> Result<(), UserValidationError> {
    if !age.is_finite() || age.fract() != 0.0 {
        return Err(UserValidationError::AgeNotInteger);
    }

    if age <= 0.0 {
        return Err(UserValidationError::AgeNotPositive);
    }

    Ok(())
}

/// Canonical form used for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    // User ID tests
    #[test]
    fn test_valid_user_ids() {
        assert!(validate_user_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
        assert!(validate_user_id("65A1F0C2E4B0A1B2C3D4E5F6").is_ok());
        assert!(validate_user_id("000000000000000000000000").is_ok());
    }

    #[test]
    fn test_empty_user_id() {
        assert_eq!(validate_user_id(""), Err(UserValidationError::EmptyId));
    }

    #[test]
    fn test_user_id_wrong_length() {
        assert_eq!(
            validate_user_id("65a1f0c2e4"),
            Err(UserValidationError::InvalidIdFormat(24))
        );
        assert_eq!(
            validate_user_id("65a1f0c2e4b0a1b2c3d4e5f6a"),
            Err(UserValidationError::InvalidIdFormat(24))
        );
    }

    #[test]
    fn test_user_id_non_hex() {
        assert_eq!(
            validate_user_id("65a1f0c2e4b0a1b2c3d4e5fg"),
            Err(UserValidationError::InvalidIdFormat(24))
        );
        assert!(validate_user_id("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn test_user_id_multibyte_characters_rejected() {
        // 24 bytes but only 12 characters
        assert!(validate_user_id("éééééééééééé").is_err());
    }

    // Email tests
    #[test]
    fn test_valid_emails() {
        assert!(validate_email("juan@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last+tag@sub.domain.org").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_invalid_email_format() {
        assert_eq!(
            validate_email("not-an-email"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("user@localhost"),
            Err(UserValidationError::InvalidEmailFormat)
        );
        assert_eq!(
            validate_email("user name@example.com"),
            Err(UserValidationError::InvalidEmailFormat)
        );
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Juan@Example.COM "), "juan@example.com");
    }

    // Age tests
    #[test]
    fn test_valid_ages() {
        assert!(validate_age(1.0).is_ok());
        assert!(validate_age(42.0).is_ok());
    }

    #[test]
    fn test_non_positive_ages() {
        assert_eq!(validate_age(0.0), Err(UserValidationError::AgeNotPositive));
        assert_eq!(validate_age(-1.0), Err(UserValidationError::AgeNotPositive));
    }

    #[test]
    fn test_non_integer_ages() {
        assert_eq!(validate_age(25.5), Err(UserValidationError::AgeNotInteger));
        assert_eq!(validate_age(f64::NAN), Err(UserValidationError::AgeNotInteger));
        assert_eq!(
            validate_age(f64::INFINITY),
            Err(UserValidationError::AgeNotInteger)
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: DomainError = UserValidationError::InvalidIdFormat(24).into();
        assert!(matches!(err, DomainError::InvalidIdentifier { .. }));

        let err: DomainError = UserValidationError::AgeNotPositive.into();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
