//! Common error types for the filament catalog

use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog crates
///
/// Normalization and filtering are total and never produce these; they
/// come from the edges (dataset loading, state storage, configuration,
/// user-supplied filter keys).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error (dataset or persisted state)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error or non-success status while fetching the dataset
    #[error("HTTP error: {0}")]
    Http(String),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested filament not found in the catalog
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input (unknown filter option, too few filaments to compare)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}
