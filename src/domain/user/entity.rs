//! User entity and related types

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

use super::validation::{
    normalize_email, validate_age, validate_email, validate_name, validate_user_id,
    UserValidationError,
};

/// User identifier - exactly 24 hexadecimal characters (document ObjectId format)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        validate_user_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new().to_hex())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Age of a user.
///
/// Held as a number rather than an integer because records loaded from
/// storage may carry values written before validation existed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Age(f64);

impl Age {
    /// Create a validated age (positive whole number)
    pub fn new(value: f64) -> Result<Self, UserValidationError> {
        validate_age(value)?;
        Ok(Self(value))
    }

    /// Wrap a stored value without validation
    pub fn from_stored(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// The age as a whole number, if it is one
    pub fn as_whole(&self) -> Option<i64> {
        let value = self.0;

        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value <= i64::MAX as f64
        {
            Some(value as i64)
        } else {
            None
        }
    }
}

impl Serialize for Age {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_whole() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

/// Input for building a user
#[derive(Debug, Clone, Default)]
pub struct UserProps {
    pub name: String,
    pub email: String,
    pub age: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

/// User entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    name: String,
    /// Always trimmed and lower-cased
    email: String,
    age: Option<Age>,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, enforcing every business rule.
    ///
    /// Used for new registrations. The email must match `^\S+@\S+\.\S+$`
    /// as submitted, so surrounding whitespace is rejected rather than
    /// trimmed away. The stored name is trimmed, the stored email lower-cased,
    /// and age (when given) must be a positive whole number.
    pub fn create(id: UserId, props: UserProps) -> Result<Self, UserValidationError> {
        let name = props.name.trim();
        validate_name(name)?;

        let email = props.email.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        validate_email(&props.email)?;

        let age = props.age.map(Age::new).transpose()?;

        Ok(Self {
            id,
            name: name.to_string(),
            email: normalize_email(email),
            age,
            created_at: props.created_at.unwrap_or_else(Utc::now),
        })
    }

    /// Rebuild a user from a persisted record.
    ///
    /// Only checks that name and email are present. Any stored age is kept
    /// as-is, even one the current rules would reject.
    pub fn reconstruct(id: UserId, props: UserProps) -> Result<Self, UserValidationError> {
        if props.name.is_empty() || props.email.is_empty() {
            return Err(UserValidationError::CorruptRecord);
        }

        Ok(Self {
            id,
            name: props.name.trim().to_string(),
            email: normalize_email(&props.email),
            age: props.age.map(Age::from_stored),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        })
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> Option<Age> {
        self.age
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Mutators

    /// Update the age, applying the same rule as creation
    pub fn update_age(&mut self, new_age: f64) -> Result<(), UserValidationError> {
        self.age = Some(Age::new(new_age)?);
        Ok(())
    }
}
