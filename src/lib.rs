//! vidshare - video sharing API
//!
//! Users publish YouTube-hosted videos on their channel; other users
//! subscribe, react and comment.
//!
//! # Layout
//!
//! - `store` - typed document collections with atomic per-document updates
//! - `auth` - accounts, password hashing and bearer tokens
//! - `catalog` - channels, videos, comments and the engagement protocol
//! - `http_server` - axum routes under `/api`
//! - `config`, `observability`, `cli` - process wiring

pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod store;
pub mod validate;
