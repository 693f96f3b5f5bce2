//! CLI module for vidshare
//!
//! Provides command-line interface for:
//! - start: Load configuration and serve the HTTP API
//! - check-config: Validate a configuration file

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, run_command, start};
pub use errors::{CliError, CliErrorCode, CliResult};
