//! # fence-core
//!
//! Foundation crate for the Fence boundary gate.
//! Defines identifiers, config, errors, tracing, constants, and the
//! source-reading capability every analysis pass is written against.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod sources;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::FenceConfig;
pub use errors::error_code::FenceErrorCode;
pub use sources::{FsSourceReader, SnapshotReader};
pub use traits::SourceReader;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::identifiers::ModuleId;
