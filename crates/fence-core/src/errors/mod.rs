//! Error types for every Fence subsystem.
//! One enum per concern, each mapped to a stable error code.

pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod report_error;
pub mod workspace_error;

pub use config_error::ConfigError;
pub use error_code::FenceErrorCode;
pub use parse_error::ParseError;
pub use report_error::ReportError;
pub use workspace_error::WorkspaceError;
