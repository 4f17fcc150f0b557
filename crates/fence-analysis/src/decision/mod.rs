//! Minimal cut, severity lattice and the report contract.

pub mod engine;
pub mod minimal_cut;
pub mod report;
pub mod types;

pub use engine::{coverage_ratio, DecisionEngine, DecisionInput, ScopeOutcome};
pub use minimal_cut::{minimal_cut, primary_cause};
pub use report::parse_report;
pub use types::{Classification, Confidence, Decision, DecisionLevel, Report, ReportStatus};
