//! # Catalog Errors
//!
//! Error types for channels, videos, comments and engagement.

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;
use crate::validate::FieldError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Missing document; carries the document kind ("Channel", "Video", ...)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Caller does not own the document
    #[error("Unauthorized")]
    Forbidden,

    /// Request is well-formed but not allowed in the current state
    #[error("{0}")]
    InvalidOperation(String),

    /// Required field missing or malformed
    #[error("{0}")]
    Validation(String),

    /// Storage operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl CatalogError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::InvalidOperation(_) => 400,
            CatalogError::Validation(_) => 400,
            CatalogError::Forbidden => 403,
            CatalogError::NotFound(_) => 404,
            CatalogError::Storage(_) => 500,
        }
    }
}

impl From<FieldError> for CatalogError {
    fn from(err: FieldError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

/// Owner-only mutation rule
pub fn ensure_owner(owner: Uuid, caller: Uuid) -> CatalogResult<()> {
    if owner == caller {
        Ok(())
    } else {
        Err(CatalogError::Forbidden)
    }
}
