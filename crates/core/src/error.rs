//! Error types for splitkit.
//!
//! One enum covers every failure the workspace can report: invalid
//! splitter configuration, strict language lookups, application config,
//! I/O and (de)serialization.

use thiserror::Error;

/// Unified error type for splitkit.
///
/// Library functions return `Result<T, AppError>` and never panic on bad
/// input. Oversized pieces are not errors; they are reported on the chunk.
#[derive(Error, Debug)]
pub enum AppError {
    /// Splitter configuration rejected before any text is processed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Strict separator lookup for a language without a table
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Application configuration errors (config file, log filter)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
