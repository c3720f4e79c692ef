//! MongoDB user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::Collection;
use tracing::{instrument, warn};

use crate::domain::user::{normalize_email, User, UserId, UserProps, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{MongoStorage, EMAIL_INDEX_NAME};

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB implementation of UserRepository
///
/// Documents look like `{_id: ObjectId, name, email, age?, createdAt}`.
#[derive(Debug, Clone)]
pub struct MongoUserRepository {
    storage: MongoStorage,
    collection: Collection<Document>,
}

impl MongoUserRepository {
    /// Create a new repository on top of an open storage handle
    pub fn new(storage: MongoStorage) -> Self {
        let collection = storage.users();
        Self {
            storage,
            collection,
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        docs.iter().map(document_to_user).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let doc = self
            .collection
            .find_one(doc! { "email": normalize_email(email) })
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        doc.as_ref().map(document_to_user).transpose()
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let doc = self
            .collection
            .find_one(doc! { "_id": to_object_id(id)? })
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        doc.as_ref().map(document_to_user).transpose()
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn save(&self, user: &User) -> Result<(), DomainError> {
        self.collection
            .insert_one(user_to_document(user)?)
            .await
            .map_err(|e| match duplicate_key_message(&e) {
                Some(message) if violates_email_index(&message) => {
                    DomainError::duplicate_email(user.email())
                }
                Some(_) => DomainError::conflict(format!(
                    "User with ID '{}' already exists",
                    user.id()
                )),
                None => DomainError::storage(format!("Failed to create user: {}", e)),
            })?;

        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id()))]
    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": to_object_id(user.id())? }, user_to_document(user)?)
            .await
            .map_err(|e| match duplicate_key_message(&e) {
                Some(_) => DomainError::duplicate_email(user.email()),
                None => DomainError::storage(format!("Failed to update user: {}", e)),
            })?;

        if result.matched_count == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", user.id())));
        }

        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": to_object_id(id)? })
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        if result.deleted_count == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.storage.ping().await
    }
}

fn to_object_id(id: &UserId) -> Result<ObjectId, DomainError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|e| DomainError::invalid_identifier(format!("Invalid user ID '{}': {}", id, e)))
}

/// Server message of a duplicate-key (E11000) failure, if that is what `err` is
fn duplicate_key_message(err: &MongoError) -> Option<String> {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_error)) => {
            (write_error.code == DUPLICATE_KEY_CODE).then(|| write_error.message.clone())
        }
        _ => {
            let message = err.to_string();
            message.contains("E11000").then_some(message)
        }
    }
}

/// Whether a duplicate-key message names the unique email index.
/// Messages read `... collection: <db>.<coll> index: <name> dup key: {...}`.
fn violates_email_index(message: &str) -> bool {
    message
        .split_once(" index: ")
        .and_then(|(_, rest)| rest.split_whitespace().next())
        .is_some_and(|index| index == EMAIL_INDEX_NAME)
}

/// Convert a user into its stored document form
fn user_to_document(user: &User) -> Result<Document, DomainError> {
    let mut doc = doc! {
        "_id": to_object_id(user.id())?,
        "name": user.name(),
        "email": user.email(),
        "createdAt": BsonDateTime::from_millis(user.created_at().timestamp_millis()),
    };

    if let Some(age) = user.age() {
        let value = match age.as_whole() {
            Some(whole) => Bson::Int64(whole),
            None => Bson::Double(age.value()),
        };
        doc.insert("age", value);
    }

    Ok(doc)
}

/// Rebuild a user from a stored document using the lenient path
fn document_to_user(doc: &Document) -> Result<User, DomainError> {
    let object_id = doc
        .get_object_id("_id")
        .map_err(|e| DomainError::storage(format!("Stored user has no valid _id: {}", e)))?;

    let id = UserId::new(object_id.to_hex())
        .map_err(|e| DomainError::storage(format!("Stored user has invalid _id: {}", e)))?;

    let props = UserProps {
        name: doc.get_str("name").unwrap_or_default().to_string(),
        email: doc.get_str("email").unwrap_or_default().to_string(),
        age: doc.get("age").and_then(|value| stored_age(&id, value)),
        created_at: doc.get_datetime("createdAt").ok().and_then(to_chrono),
    };

    User::reconstruct(id.clone(), props).map_err(|e| {
        DomainError::storage(format!("Stored user '{}' is corrupt: {}", id, e))
    })
}

fn stored_age(id: &UserId, value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        Bson::Null => None,
        other => {
            warn!(user_id = %id, stored = %other, "Ignoring non-numeric stored age");
            None
        }
    }
}

fn to_chrono(value: &BsonDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value.timestamp_millis())
}
