//! Violation detection over a diff: boundary, type-only, relative escape,
//! deleted public API and cross-package cycles.

pub mod detector;
pub mod scope;
pub mod types;

pub use detector::{DetectionContext, ViolationDetector};
pub use scope::DiffScope;
pub use types::{
    DetectionOutcome, DiffEntry, DiffStatus, Proof, UnresolvedSpecifier, Violation, ViolationCause,
};
