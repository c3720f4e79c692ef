//! User request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::{Age, User};
use crate::infrastructure::user::CreateUserRequest;

/// Body of `POST /users`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<f64>,
}

impl From<CreateUserApiRequest> for CreateUserRequest {
    fn from(request: CreateUserApiRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            age: request.age,
        }
    }
}

/// Body of `PATCH /users/{id}/age`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAgeApiRequest {
    pub age: f64,
}

/// User as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            age: user.age(),
            created_at: user.created_at(),
        }
    }
}

/// Plain confirmation body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{UserId, UserProps};
    use chrono::TimeZone;

    #[test]
    fn test_create_user_request_deserialization() {
        let json = r#"{
            "name": "Juan Pérez",
            "email": "Juan@Example.com"
        }"#;

        let request: CreateUserApiRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Juan Pérez");
        assert_eq!(request.email, "Juan@Example.com");
        assert!(request.age.is_none());
    }

    #[test]
    fn test_create_user_request_with_age() {
        let request: CreateUserApiRequest =
            serde_json::from_str(r#"{"name": "Ana", "email": "ana@example.com", "age": 30}"#)
                .unwrap();
        assert_eq!(request.age, Some(30.0));

        let request: CreateUserApiRequest =
            serde_json::from_str(r#"{"name": "Ana", "email": "ana@example.com", "age": null}"#)
                .unwrap();
        assert!(request.age.is_none());
    }

    #[test]
    fn test_create_user_request_missing_fields_default_to_empty() {
        // Missing fields reach domain validation instead of failing to parse
        let request: CreateUserApiRequest = serde_json::from_str("{}").unwrap();
        assert!(request.name.is_empty());
        assert!(request.email.is_empty());
    }

    #[test]
    fn test_user_response_serialization() {
        let user = User::create(
            UserId::new("65a1f0c2e4b0a1b2c3d4e5f6").unwrap(),
            UserProps {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                age: Some(30.0),
                created_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()),
            },
        )
        .unwrap();

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json["id"], "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(json["email"], "ana@example.com");
        assert_eq!(json["age"], 30);
        assert_eq!(json["createdAt"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_user_response_omits_missing_age() {
        let user = User::create(
            UserId::generate(),
            UserProps {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(json.get("age").is_none());
    }
}
