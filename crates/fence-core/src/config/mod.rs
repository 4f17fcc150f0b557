//! Configuration: `fence.toml` and its sections.

pub mod fence_config;
pub mod limits_config;
pub mod scope_config;
pub mod workspace_config;

pub use fence_config::FenceConfig;
pub use limits_config::LimitsConfig;
pub use scope_config::ScopeConfig;
pub use workspace_config::{PackageConfig, WorkspaceConfig};
