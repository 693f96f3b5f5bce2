//! Application configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! config for local development. The signing secret may be supplied through
//! `VIDSHARE_JWT_SECRET` instead of the file.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{JwtConfig, PasswordPolicy, MAX_TOKEN_TTL_HOURS};
use crate::observability::LoggingConfig;

/// Environment variable overriding `auth.jwt_secret`
pub const JWT_SECRET_ENV: &str = "VIDSHARE_JWT_SECRET";

/// Secret shipped in defaults; accepted for development only
const DEV_SECRET: &str = "CHANGE_THIS_SECRET_IN_PRODUCTION";

const MIN_SECRET_LEN: usize = 16;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Browser origins allowed by CORS; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// The web client's dev server
fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ]
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerSettings {
    /// Address the listener binds to
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.trim().parse().map_err(|_| {
            ConfigError::Invalid(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Token and password settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HS256 signing secret
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Access token lifetime in hours (default: 24)
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_issuer")]
    pub audience: String,

    #[serde(default)]
    pub password_policy: PasswordPolicy,
}

fn default_jwt_secret() -> String {
    DEV_SECRET.to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_issuer() -> String {
    "vidshare".to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
            issuer: default_issuer(),
            audience: default_issuer(),
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl AuthSettings {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            ttl_hours: self.token_ttl_hours,
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }

    /// Whether the built-in development secret is in use
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_SECRET
    }
}

impl AppConfig {
    /// Load configuration from file, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let mut config: AppConfig = serde_json::from_str(&content)?;

        config.apply_env(std::env::var(JWT_SECRET_ENV).ok());
        config.validate()?;

        Ok(config)
    }

    /// Apply the secret override, ignoring empty values
    pub fn apply_env(&mut self, jwt_secret: Option<String>) {
        if let Some(secret) = jwt_secret.filter(|s| !s.trim().is_empty()) {
            self.auth.jwt_secret = secret;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()));
        }

        self.server.listen_addr()?;

        if let Some(origin) = self
            .server
            .cors_origins
            .iter()
            .find(|o| !o.starts_with("http://") && !o.starts_with("https://"))
        {
            return Err(ConfigError::Invalid(format!(
                "server.cors_origins entry '{}' must start with http:// or https://",
                origin
            )));
        }

        if self.auth.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt_secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }

        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.auth.token_ttl_hours) {
            return Err(ConfigError::Invalid(format!(
                "auth.token_ttl_hours must be between 1 and {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }

        if self.auth.password_policy.min_length == 0 {
            return Err(ConfigError::Invalid(
                "auth.password_policy.min_length must be > 0".to_string(),
            ));
        }

        self.logging
            .filter()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }
}
