//! Error types for the data-loader crate.
//!
//! Every failure while reading the catalog or the similarity matrix ends up
//! as a `DataLoadError`. Parse errors carry the file and line so a broken
//! export can be fixed without guessing.

use thiserror::Error;

/// Errors that can occur during data loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The column-oriented JSON catalog was malformed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Matrix shape does not agree with the catalog
    ///
    /// `expected` is what the catalog (or the first row) implies,
    /// `found` is what the matrix actually contains.
    #[error("Dimension mismatch in {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
