//! In-memory file set, typically the content of one historical revision.
//!
//! The history collaborator fills a snapshot ("read file X at revision R")
//! and hands it to detection as the base-revision reader.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::traits::SourceReader;
use crate::types::paths::normalize_path;

/// Path → content map. Paths are normalized on insert and lookup.
#[derive(Debug, Clone, Default)]
pub struct SnapshotReader {
    files: BTreeMap<PathBuf, String>,
}

impl SnapshotReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files.insert(normalize_path(path.as_ref()), content.into());
    }

    /// Builder-style insert.
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.files.remove(&normalize_path(path))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceReader for SnapshotReader {
    fn read_file(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.files.get(&normalize_path(path)).cloned())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize_path(path))
    }
}
