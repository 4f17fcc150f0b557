//! Stable error codes surfaced to collaborators.

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const WORKSPACE_ERROR: &str = "WORKSPACE_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";

/// Maps an error to its stable code.
pub trait FenceErrorCode {
    fn error_code(&self) -> &'static str;

    /// `[CODE] message`, the form collaborators log and render.
    fn coded_message(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}
