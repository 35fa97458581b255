//! Error types for the engagement store.

use thiserror::Error;

/// Errors returned by store operations.
///
/// Malformed writes fail fast with `Validation` instead of being coerced.
/// Lookups of absent rows are not errors; they return `None` or empty
/// lists from the query methods.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A write carried an invalid field value.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The addressed row does not exist (only for operations that require
    /// an existing row, e.g. removing a watchlist entry).
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Backend failure (I/O, connection) for non-memory implementations.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Convenience alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
