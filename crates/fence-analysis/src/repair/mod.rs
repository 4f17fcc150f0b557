//! Shadow repair: plan specifier rewrites for violations, apply them to an
//! in-memory overlay, and prove the result is behavior-preserving.

pub mod hashes;
pub mod overlay;
pub mod planner;
pub mod rewrite;
pub mod symbols;
pub mod types;
pub mod verifier;

pub use overlay::OverlayReader;
pub use planner::FixPlanner;
pub use types::{
    EquivalenceHashes, FixEdit, FixPlan, FixRisk, HashPair, PostCondition, RepairDecision,
    RepairVerdict,
};
pub use verifier::{RepairContext, ShadowRepairVerifier};
