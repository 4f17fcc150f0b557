//! Errors from reading a serialized report back in.

use super::error_code::{self, FenceErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("Report is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("Report must be a JSON object")]
    NotAnObject,

    #[error("Report field '{field}' is invalid: {message}")]
    InvalidField { field: String, message: String },
}

impl FenceErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        error_code::REPORT_ERROR
    }
}
