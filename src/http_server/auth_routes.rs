//! Account HTTP Routes
//!
//! Registration, login and profile lookups.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Json, Path, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::errors::ApiResult;
use super::state::SharedState;
use crate::auth::{LoginRequest, RegisterRequest};
use crate::catalog::{PublicProfile, UserProfile};

/// Account routes
pub fn auth_routes() -> Router<SharedState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/me", get(me_handler))
        .route("/user/:id", get(user_handler))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user: UserProfile,
}

/// Register handler
async fn register_handler(
    State(state): State<SharedState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let Json(request) = payload?;
    let user = state.accounts.register(request)?;
    let profile = state.catalog.profiles.assemble(user)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Login handler
async fn login_handler(
    State(state): State<SharedState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let (user, issued) = state.accounts.login(request)?;
    let profile = state.catalog.profiles.assemble(user)?;

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer",
        expires_at: issued.expires_at,
        user: profile,
    }))
}

/// Profile of the authenticated caller
async fn me_handler(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> ApiResult<Json<UserProfile>> {
    let caller = state.caller(&headers)?;
    let user = state.accounts.get_user(caller)?;
    Ok(Json(state.catalog.profiles.assemble(user)?))
}

/// Public profile of any user
async fn user_handler(
    State(state): State<SharedState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<PublicProfile>> {
    let Path(id) = path?;
    Ok(Json(state.catalog.profiles.public_profile(id)?))
}
