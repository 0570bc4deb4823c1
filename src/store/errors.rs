//! Catalog error types
//!
//! Every data access operation fails with one of four kinds:
//! - Validation: malformed or missing input
//! - NotFound: a referenced joke or category is absent
//! - Conflict: the write would duplicate a unique row
//! - Storage: SQLite itself failed

use rusqlite::ffi;
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Input rejected before touching the store
    #[error("{0}")]
    Validation(String),

    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Write would violate a uniqueness invariant
    #[error("{0}")]
    Conflict(String),

    /// Underlying store failure
    #[error("storage failure: {0}")]
    Storage(String),
}

impl CatalogError {
    /// Joke lookup miss
    pub fn joke_not_found() -> Self {
        Self::NotFound("Joke not found".to_string())
    }

    /// Category lookup miss
    pub fn category_not_found() -> Self {
        Self::NotFound("Category not found".to_string())
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

/// Returns true when `err` is a UNIQUE or PRIMARY KEY constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => {
            failure.code == ffi::ErrorCode::ConstraintViolation
                && (failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}
