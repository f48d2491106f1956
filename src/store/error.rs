//! Data store error types
//!
//! Defines all errors that can occur while reading the climate dataset.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the data store adapter
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database file could not be opened
    #[error("Failed to open dataset {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed to prepare or execute
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The file does not match the declared table layout
    #[error("Schema mismatch: {0}")]
    Schema(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
