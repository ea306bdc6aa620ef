//! Error types for the storequery library.
//!
//! All errors are represented by the [`StoreQueryError`] enum. Filter-parsing
//! problems are recovered locally by the parser and never surface through this
//! type; the only error an orchestrated search propagates to the caller is
//! [`StoreQueryError::IndexUnavailable`].

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for storequery operations.
#[derive(Error, Debug)]
pub enum StoreQueryError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Filter-parameter errors (malformed or inconsistent facet parameters)
    #[error("Filter error: {0}")]
    Filter(String),

    /// Query-construction errors
    #[error("Query error: {0}")]
    Query(String),

    /// The search index collaborator failed or timed out
    #[error("Search index unavailable: {0}")]
    IndexUnavailable(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with StoreQueryError.
pub type Result<T> = std::result::Result<T, StoreQueryError>;

impl StoreQueryError {
    /// Create a new filter error.
    pub fn filter<S: Into<String>>(msg: S) -> Self {
        StoreQueryError::Filter(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        StoreQueryError::Query(msg.into())
    }

    /// Create a new index-unavailable error.
    pub fn index_unavailable<S: Into<String>>(msg: S) -> Self {
        StoreQueryError::IndexUnavailable(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        StoreQueryError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        StoreQueryError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = StoreQueryError::filter("Test filter error");
        assert_eq!(error.to_string(), "Filter error: Test filter error");

        let error = StoreQueryError::query("Test query error");
        assert_eq!(error.to_string(), "Query error: Test query error");

        let error = StoreQueryError::index_unavailable("connection refused");
        assert_eq!(
            error.to_string(),
            "Search index unavailable: connection refused"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = StoreQueryError::from(io_error);

        match error {
            StoreQueryError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
