//! SourceReader — the only way analysis code reads files.
//!
//! Parser, resolver, detector and the repair hashes are written against this
//! trait, so the same code runs over the working tree, a historical snapshot,
//! or an in-memory overlay of a candidate patch.

use std::io;
use std::path::Path;

/// Read access to source files.
pub trait SourceReader {
    /// Read a file. `Ok(None)` means the file does not exist (or is not a
    /// regular file); `Err` is a transient failure worth retrying.
    fn read_file(&self, path: &Path) -> io::Result<Option<String>>;

    /// True when `path` is an existing regular file. Symlinks are not files.
    fn is_file(&self, path: &Path) -> bool;
}

impl<T: SourceReader + ?Sized> SourceReader for &T {
    fn read_file(&self, path: &Path) -> io::Result<Option<String>> {
        (**self).read_file(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }
}

/// Result of a bounded-retry read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Content(String),
    Absent,
    /// Every attempt failed; callers treat the file as empty.
    Degraded,
}

impl ReadOutcome {
    /// Content with degraded reads folded to empty, `None` when absent.
    pub fn into_content(self) -> Option<String> {
        match self {
            Self::Content(content) => Some(content),
            Self::Absent => None,
            Self::Degraded => Some(String::new()),
        }
    }
}

/// Read with bounded retry, keeping track of degraded reads.
pub fn read_with_retry_outcome(reader: &dyn SourceReader, path: &Path, attempts: u32) -> ReadOutcome {
    let attempts = attempts.max(1);
    let mut last_error = None;
    for _ in 0..attempts {
        match reader.read_file(path) {
            Ok(Some(content)) => return ReadOutcome::Content(content),
            Ok(None) => return ReadOutcome::Absent,
            Err(e) => last_error = Some(e),
        }
    }
    if let Some(e) = last_error {
        tracing::warn!(
            path = %path.display(),
            attempts,
            error = %e,
            "file unreadable, treating as empty"
        );
    }
    ReadOutcome::Degraded
}

/// Read with bounded retry.
///
/// Returns `None` when the file is absent. A file that keeps failing after
/// `attempts` tries degrades to empty content so callers still see it.
pub fn read_with_retry(reader: &dyn SourceReader, path: &Path, attempts: u32) -> Option<String> {
    read_with_retry_outcome(reader, path, attempts).into_content()
}
