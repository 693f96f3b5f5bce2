//! # Account Service
//!
//! Registration, login and bearer-token authentication.

use std::sync::Arc;

use uuid::Uuid;

use super::crypto::PasswordPolicy;
use super::errors::{AuthError, AuthResult};
use super::jwt::{IssuedToken, JwtConfig, TokenSigner};
use super::user::{default_avatar, LoginRequest, RegisterRequest, User};
use crate::store::{DocumentStore, StoreError};
use crate::validate::{self, FieldError};

impl From<FieldError> for AuthError {
    fn from(err: FieldError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

/// Account service combining the user collection, password policy and JWTs
pub struct AccountService {
    users: Arc<dyn DocumentStore<User>>,
    signer: TokenSigner,
    password_policy: PasswordPolicy,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn DocumentStore<User>>,
        jwt_config: JwtConfig,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            signer: TokenSigner::new(jwt_config),
            password_policy,
        }
    }

    /// Register a new user
    pub fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        let username = validate::required("username", &request.username)?;
        let email = validate::email(&request.email)?;
        let password = validate::required("password", &request.password)?;

        let avatar = validate::optional(request.avatar.as_deref())
            .unwrap_or_else(|| default_avatar(&username));

        let user = User::new(username, email, &password, avatar, &self.password_policy)?;

        let user = self
            .users
            .insert_unique(user, &|existing, new| existing.email == new.email)
            .map_err(|e| match e {
                StoreError::Duplicate(_) => AuthError::EmailAlreadyExists,
                other => AuthError::Storage(other),
            })?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Authenticate a user by email and password
    pub fn login(&self, request: LoginRequest) -> AuthResult<(User, IssuedToken)> {
        let email = request.email.trim().to_lowercase();
        let password = request.password.trim();

        let user = self
            .users
            .find_one(&|u| u.email == email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(password)? {
            tracing::warn!(user_id = %user.id, "login rejected: bad password");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.signer.issue(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok((user, issued))
    }

    /// Resolve a bearer token to the caller's user id
    ///
    /// The account must still exist; a token outliving its user (for example
    /// across a restart of the in-memory store) is refused.
    pub fn authenticate(&self, token: &str) -> AuthResult<Uuid> {
        let user_id = self.signer.verify(token)?;
        if self.users.get(user_id)?.is_none() {
            tracing::warn!(%user_id, "token for unknown account");
            return Err(AuthError::AccountGone);
        }
        Ok(user_id)
    }

    /// Get user by ID
    pub fn get_user(&self, user_id: Uuid) -> AuthResult<User> {
        self.users.get(user_id)?.ok_or(AuthError::UserNotFound)
    }
}
