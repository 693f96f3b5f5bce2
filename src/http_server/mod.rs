//! # HTTP Server Module
//!
//! JSON API over axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/register`, `/api/login`, `/api/me`, `/api/user/:id` - Accounts
//! - `/api/channel/*`, `/api/userChannel/:id`, `/api/updateChannel/:id`,
//!   `/api/deleteChannel/:id` - Channels and subscriptions
//! - `/api/video/*`, `/api/videos` - Videos and reactions
//! - `/api/comment/*` - Comments

pub mod auth_routes;
pub mod channel_routes;
pub mod comment_routes;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod state;
pub mod video_routes;

use serde::Serialize;

pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::{AppState, SharedState};

/// Body for responses that only confirm an action
#[derive(Debug, Serialize)]
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
