//! # Store Errors
//!
//! Error types for the document store.

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A writer panicked while holding the collection lock
    #[error("Collection '{0}' unavailable: lock poisoned")]
    LockPoisoned(&'static str),

    /// Insert rejected by a uniqueness check
    #[error("Duplicate document in '{0}'")]
    Duplicate(&'static str),

    /// A document with the same id is already stored
    #[error("Document {id} already exists in '{collection}'")]
    IdTaken { collection: &'static str, id: Uuid },
}

impl StoreError {
    /// Returns the HTTP status code for this error when surfaced untranslated
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Duplicate(_) => 409,
            StoreError::LockPoisoned(_) | StoreError::IdTaken { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(StoreError::LockPoisoned("videos").status_code(), 500);
        assert_eq!(StoreError::Duplicate("users").status_code(), 409);
    }

    #[test]
    fn test_error_names_collection() {
        let err = StoreError::LockPoisoned("channels");
        assert!(err.to_string().contains("channels"));
    }
}
