//! Error types.
//!
//! The encoding core never returns these: anomalies there are absorbed
//! into [`EncodingResult::valid`](crate::EncodingResult) or into row
//! exclusion.  They come from the typed row accessors, color parsing and
//! settings loading.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' is not {expected}")]
    TypeMismatch { column: String, expected: &'static str },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
