//! Parser errors. The module parser degrades these to empty results;
//! they only surface from the low-level entry points.

use std::path::PathBuf;

use super::error_code::{self, FenceErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported source extension: {extension}")]
    UnsupportedLanguage { extension: String },

    #[error("Grammar not available for {language}")]
    GrammarNotFound { language: String },

    #[error("tree-sitter failed on {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },
}

impl FenceErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage { .. } => error_code::UNSUPPORTED_LANGUAGE,
            _ => error_code::PARSE_ERROR,
        }
    }
}
