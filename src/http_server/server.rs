//! # HTTP Server
//!
//! Combines the route groups into one router and serves it.
//!
//! API routes live under `/api`; `/health` stays at the root.

use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth_routes::auth_routes;
use super::channel_routes::channel_routes;
use super::comment_routes::comment_routes;
use super::observability_routes::health_routes;
use super::state::{AppState, SharedState};
use super::video_routes::video_routes;
use crate::config::ServerSettings;

/// HTTP server for the video-sharing API
pub struct HttpServer {
    config: ServerSettings,
    router: Router,
}

impl HttpServer {
    /// Create a server over shared application state
    pub fn new(config: ServerSettings, state: AppState) -> Self {
        let router = Self::build_router(&config, Arc::new(state));
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &ServerSettings, state: SharedState) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let api = Router::new()
            .merge(auth_routes())
            .merge(channel_routes())
            .merge(video_routes())
            .merge(comment_routes());

        Router::new()
            .merge(health_routes())
            .nest("/api", api)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(state)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> io::Result<()> {
        let addr = self
            .config
            .listen_addr()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "listening");
        tracing::info!("health check: http://{}/health", addr);

        axum::serve(listener, self.router).await
    }
}
