//! CLI argument definitions using clap
//!
//! Commands:
//! - vidshare start [--config <path>] [--port <port>]
//! - vidshare check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vidshare - video sharing API server
#[derive(Parser, Debug)]
#[command(name = "vidshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API server
    Start {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate a configuration file, then exit
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./vidshare.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
