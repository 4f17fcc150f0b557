//! Workspace layout errors.

use super::error_code::{self, FenceErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("Package '{0}' is declared more than once")]
    DuplicatePackage(String),

    #[error("Package '{package}' has an invalid source root: {message}")]
    InvalidSourceRoot { package: String, message: String },

    #[error("Package '{package}' has an invalid name")]
    InvalidPackageName { package: String },
}

impl FenceErrorCode for WorkspaceError {
    fn error_code(&self) -> &'static str {
        error_code::WORKSPACE_ERROR
    }
}
