//! End-to-end analysis pipeline and its wall-clock budget.

pub mod budget;
pub mod pipeline;

pub use budget::Budget;
pub use pipeline::{AnalysisOutcome, AnalysisRequest, BoundaryAnalyzer};
