//! # User Accounts
//!
//! User document and account request bodies.
//! Users are stored as documents in the `users` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password, PasswordPolicy};
use super::errors::AuthResult;
use crate::store::Document;

/// Placeholder avatar for comments whose author is gone
pub const UNKNOWN_AVATAR: &str = "https://placehold.co/40x40.png?text=?";

/// User document
///
/// Relations (liked videos, subscriptions, owned channel) live on the video
/// and channel documents; see `catalog::profile` for the assembled view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name
    pub username: String,

    /// Email address (unique, stored lowercase)
    pub email: String,

    /// Argon2id password hash (never plaintext, never serialized)
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Avatar image URL
    pub avatar: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl User {
    /// Create a new user; `username`, `email` and `avatar` must already be
    /// normalized
    pub fn new(
        username: String,
        email: String,
        password: &str,
        avatar: String,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        policy.validate(password)?;
        let password_hash = hash_password(password)?;

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            avatar,
            created_at: now,
            updated_at: now,
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// Avatar derived from the first letter of the username
pub fn default_avatar(username: &str) -> String {
    let initial: String = username
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default();
    format!("https://placehold.co/40x40.png?text={}", initial)
}

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
