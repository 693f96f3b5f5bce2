//! CLI command implementations
//!
//! `start` follows a fixed boot order: configuration, logging, storage, then
//! the listener. Nothing is served until every earlier step succeeded.

use std::path::Path;

use crate::config::{AppConfig, JWT_SECRET_ENV};
use crate::http_server::{AppState, HttpServer};
use crate::observability::init_logging;
use crate::store::Database;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Start { config, port } => start(config.as_deref(), port),
        Command::CheckConfig { config } => check_config(&config),
    }
}

/// Load the config file, or defaults plus environment overrides
fn load_config(config_path: Option<&Path>) -> CliResult<AppConfig> {
    match config_path {
        Some(path) => Ok(AppConfig::load(path)?),
        None => {
            let mut config = AppConfig::default();
            config.apply_env(std::env::var(JWT_SECRET_ENV).ok());
            config.validate()?;
            Ok(config)
        }
    }
}

/// Serve the HTTP API until the process is stopped
pub fn start(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    init_logging(&config.logging)?;

    if config.auth.uses_dev_secret() {
        tracing::warn!(
            "using the development JWT secret; set {} or auth.jwt_secret",
            JWT_SECRET_ENV
        );
    }

    let db = Database::in_memory();
    let state = AppState::new(
        &db,
        config.auth.jwt_config(),
        config.auth.password_policy.clone(),
    );
    let server = HttpServer::new(config.server.clone(), state);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.server.listen_addr()?,
        "starting vidshare"
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Validate a configuration file and print the effective settings
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let config = load_config(Some(config_path))?;

    println!(
        "{}: ok (listen {}, token ttl {}h)",
        config_path.display(),
        config.server.listen_addr()?,
        config.auth.token_ttl_hours
    );
    if config.auth.uses_dev_secret() {
        println!("warning: development JWT secret in use");
    }

    Ok(())
}
