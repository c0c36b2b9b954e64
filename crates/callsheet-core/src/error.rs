//! Error types for configuration loading and transcript input.
//!
//! The extraction pipeline itself never fails; these errors only surface from
//! the edges that touch files or environment.

use thiserror::Error;

/// Result type alias for callsheet operations
pub type CallsheetResult<T> = Result<T, CallsheetError>;

/// Errors raised outside the pure extraction pipeline
#[derive(Error, Debug)]
pub enum CallsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),
}
