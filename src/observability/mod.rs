//! Observability for vidshare
//!
//! Structured logging through `tracing`. Services emit events with
//! `tracing::{info, warn, error}`; the subscriber installed here decides the
//! format and the level filter.
//!
//! # Usage
//!
//! ```ignore
//! use vidshare::observability::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default())?;
//! tracing::info!(video_id = %id, "video uploaded");
//! ```

mod logging;

pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
