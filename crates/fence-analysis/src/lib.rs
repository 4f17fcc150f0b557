//! # fence-analysis
//!
//! Analysis engine for the Fence boundary gate.
//! Contains the module parser, specifier resolver, import graph and
//! public-surface propagation, violation detection, decisions, and the
//! shadow repair verifier.

pub mod decision;
pub mod detection;
pub mod engine;
pub mod graph;
pub mod hashing;
pub mod parsers;
pub mod repair;
pub mod resolver;
pub mod workspace;

pub use engine::pipeline::{AnalysisOutcome, AnalysisRequest, BoundaryAnalyzer};
