//! Module graph: construction, public-surface propagation, per-package
//! public files and cross-package cycles.

pub mod builder;
pub mod cycles;
pub mod propagation;
pub mod public_surface;
pub mod scan;
pub mod types;

pub use builder::GraphBuilder;
pub use cycles::{cross_package_cycles, detect_cycles, ImportCycle};
pub use propagation::{propagate_public_surface, ClosureCache};
pub use public_surface::{PublicFiles, PublicSurface};
pub use scan::{FileScanner, ResolvedImport, ScannedFile};
pub use types::{BuildStats, Edge, EdgeCounts, EdgeKind, GraphBuild, ModuleGraph, NodeMeta};
