//! Authentication: user entity, credentials, repository and token storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{error::StorageError, outcome::DataResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserEntity {
    pub id: String,
    pub email: String,
    /// `"First Last"`, or the email when the backend has no names.
    pub username: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl UserEntity {
    pub fn display_name(first: Option<&str>, last: Option<&str>, email: &str) -> String {
        let full = format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default());
        let full = full.trim();
        if full.is_empty() {
            email.to_string()
        } else {
            full.to_string()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegisterCredentials {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: LoginCredentials) -> DataResult<UserEntity>;

    async fn register(&self, credentials: RegisterCredentials) -> DataResult<UserEntity>;

    async fn logout(&self) -> DataResult<()>;

    /// The signed-in user, if any.
    async fn current_user(&self) -> DataResult<Option<UserEntity>>;

    async fn refresh_token(&self) -> DataResult<UserEntity>;

    async fn is_logged_in(&self) -> bool;
}

/// Secure storage for the session token and the serialized user.
#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn save_token(&self, token: &str) -> Result<(), StorageError>;
    async fn token(&self) -> Result<Option<String>, StorageError>;
    async fn clear_token(&self) -> Result<(), StorageError>;
    async fn save_user(&self, user_json: &str) -> Result<(), StorageError>;
    async fn user(&self) -> Result<Option<String>, StorageError>;
    async fn clear_user(&self) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_names() {
        assert_eq!(
            UserEntity::display_name(Some("Ada"), Some("Lovelace"), "ada@example.com"),
            "Ada Lovelace"
        );
        assert_eq!(
            UserEntity::display_name(Some("Ada"), None, "ada@example.com"),
            "Ada"
        );
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(
            UserEntity::display_name(None, Some("  "), "ada@example.com"),
            "ada@example.com"
        );
    }
}
