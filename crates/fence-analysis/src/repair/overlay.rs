//! OverlayReader — in-memory edits over any other reader.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use fence_core::types::paths::normalize_path;
use fence_core::SourceReader;

/// Reads consult the overlay first, then fall back to `base`.
pub struct OverlayReader<'a> {
    base: &'a dyn SourceReader,
    files: BTreeMap<PathBuf, String>,
}

impl<'a> OverlayReader<'a> {
    pub fn new(base: &'a dyn SourceReader) -> Self {
        Self {
            base,
            files: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        self.files.insert(normalize_path(path.as_ref()), content.into());
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl SourceReader for OverlayReader<'_> {
    fn read_file(&self, path: &Path) -> io::Result<Option<String>> {
        match self.files.get(&normalize_path(path)) {
            Some(content) => Ok(Some(content.clone())),
            None => self.base.read_file(path),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(&normalize_path(path)) || self.base.is_file(path)
    }
}
