//! # Auth Module
//!
//! User accounts, password hashing and bearer tokens.

pub mod api;
pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod user;

pub use api::AccountService;
pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use jwt::{IssuedToken, JwtConfig, TokenSigner, MAX_TOKEN_TTL_HOURS};
pub use user::{LoginRequest, RegisterRequest, User};
