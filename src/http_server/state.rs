//! Shared handler state and bearer-token authentication.

use std::sync::Arc;

use axum::http::HeaderMap;
use uuid::Uuid;

use super::errors::ApiResult;
use crate::auth::{AccountService, AuthError, JwtConfig, PasswordPolicy};
use crate::catalog::Catalog;
use crate::store::Database;

/// State shared by every route
pub struct AppState {
    pub accounts: AccountService,
    pub catalog: Catalog,
}

/// Shared state type
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(db: &Database, jwt_config: JwtConfig, password_policy: PasswordPolicy) -> Self {
        Self {
            accounts: AccountService::new(db.users.clone(), jwt_config, password_policy),
            catalog: Catalog::new(db),
        }
    }

    /// Resolve the caller from the `Authorization: Bearer <token>` header
    pub fn caller(&self, headers: &HeaderMap) -> ApiResult<Uuid> {
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::AuthenticationRequired)?;

        Ok(self.accounts.authenticate(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn state() -> AppState {
        AppState::new(
            &Database::in_memory(),
            JwtConfig::default(),
            PasswordPolicy::default(),
        )
    }

    #[test]
    fn test_missing_header() {
        let err = state().caller(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status_code().as_u16(), 401);
        assert_eq!(err.to_string(), "Not authorized, no token");
    }

    #[test]
    fn test_garbage_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer nonsense"));
        let err = state().caller(&headers).unwrap_err();
        assert_eq!(err.status_code().as_u16(), 401);
    }

    #[test]
    fn test_wrong_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(state().caller(&headers).is_err());
    }
}
