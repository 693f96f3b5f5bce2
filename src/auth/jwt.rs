//! # Access Tokens
//!
//! HS256 bearer tokens whose subject is the user id. Issuer and audience are
//! checked on every request, so a token minted by another deployment sharing
//! the secret is refused.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::user::User;

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

/// Signing settings
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,

    /// Token lifetime in hours
    pub ttl_hours: i64,

    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string(),
            ttl_hours: 24,
            issuer: "vidshare".to_string(),
            audience: "vidshare".to_string(),
        }
    }
}

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: Uuid,
    /// Username at issue time, for log correlation only
    name: String,
    iat: i64,
    exp: i64,
    aud: String,
    iss: String,
}

/// Access token handed out on login
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenSigner {
    issuer: String,
    audience: String,
    ttl_hours: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[&config.issuer]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_hours: config.ttl_hours,
            issuer: config.issuer,
            audience: config.audience,
        }
    }

    /// Issue a token for `user`, valid from now
    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AuthResult<IssuedToken> {
        // Out-of-range lifetimes fail the login instead of panicking in chrono
        let expires_at = Duration::try_hours(self.ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(AuthError::TokenGenerationFailed)?;

        let claims = AccessClaims {
            sub: user.id,
            name: user.username.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: self.audience.clone(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token and return the user id it was issued to
    pub fn verify(&self, token: &str) -> AuthResult<Uuid> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })
    }
}
