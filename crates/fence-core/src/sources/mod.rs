//! Concrete [`SourceReader`](crate::traits::SourceReader) implementations.

pub mod fs;
pub mod snapshot;

pub use fs::FsSourceReader;
pub use snapshot::SnapshotReader;
