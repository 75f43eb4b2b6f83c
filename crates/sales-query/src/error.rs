//! Error types for sales-query operations.
//!
//! An unresolvable time expression and an empty result set are not errors:
//! the first is an empty [`DateRange`](crate::DateRange), the second a
//! "no data found" sentence.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Query is required")]
    EmptyQuery,

    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    #[error("Record retrieval failed: {0}")]
    Retrieval(#[from] SourceError),
}

/// Failure reported by a [`RecordSource`](crate::RecordSource).
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading records from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed records: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Record source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
