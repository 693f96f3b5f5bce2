//! # Auth Errors
//!
//! Error types for the accounts module.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and account errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Unknown email or wrong password (generic - don't leak which)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Email already registered
    #[error("User already exists")]
    EmailAlreadyExists,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Registration or login body failed validation
    #[error("{0}")]
    Validation(String),

    /// No account behind a valid token or lookup
    #[error("User not found")]
    UserNotFound,

    // ==================
    // Token Errors
    // ==================

    /// Request carried no bearer token
    #[error("Not authorized, no token")]
    AuthenticationRequired,

    /// JWT token is malformed
    #[error("Not authorized, token failed")]
    MalformedToken,

    /// JWT token has expired
    #[error("Not authorized, token expired")]
    TokenExpired,

    /// JWT signature is invalid
    #[error("Not authorized, token failed")]
    InvalidSignature,

    /// Valid token whose user no longer exists
    #[error("Not authorized, user not found")]
    AccountGone,

    // ==================
    // Internal Errors
    // ==================

    /// Password hashing failed
    #[error("Internal error: password hashing failed")]
    HashingFailed,

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Storage operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request
            AuthError::WeakPassword(_) => 400,
            AuthError::Validation(_) => 400,
            AuthError::EmailAlreadyExists => 400,

            // 401 Unauthorized
            AuthError::InvalidCredentials => 401,
            AuthError::AuthenticationRequired => 401,
            AuthError::MalformedToken => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,
            AuthError::AccountGone => 401,

            // 404 Not Found
            AuthError::UserNotFound => 404,

            // 500 Internal Server Error
            AuthError::HashingFailed => 500,
            AuthError::TokenGenerationFailed => 500,
            AuthError::Storage(_) => 500,
        }
    }
}
