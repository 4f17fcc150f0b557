//! Configuration errors.

use super::error_code::{self, FenceErrorCode};

/// Errors raised while loading or validating `fence.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FenceErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => error_code::IO_ERROR,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
