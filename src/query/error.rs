//! Query error types
//!
//! Defines the error conditions the query service can report.

use std::fmt;
use thiserror::Error;

/// Which caller-supplied date failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Start => write!(f, "start"),
            DateField::End => write!(f, "end"),
        }
    }
}

/// Errors that can occur during query operations
#[derive(Error, Debug)]
pub enum QueryError {
    /// A date parameter is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid {field} date '{input}'. Format should be YYYY-MM-DD.")]
    InvalidDate { field: DateField, input: String },

    /// Store layer error
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
