//! Capability traits shared across Fence crates.

pub mod source_reader;

pub use source_reader::{read_with_retry, read_with_retry_outcome, ReadOutcome, SourceReader};
