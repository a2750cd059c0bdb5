//! Error types for the helio-core library.
//!
//! A page without a date is not an error: finders and parsers return `None`.
//! These errors cover the I/O and configuration around them.

use thiserror::Error;

/// Main error type for the helio library.
#[derive(Error, Debug)]
pub enum HelioError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page URL could not be parsed.
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the helio library.
pub type Result<T> = std::result::Result<T, HelioError>;
