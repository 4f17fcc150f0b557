//! Working-tree reader.

use std::io;
use std::path::Path;

use crate::traits::SourceReader;

/// Reads real files. Symlinks are never followed: a symlink is reported as
/// absent by both `is_file` and `read_file`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceReader;

impl FsSourceReader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceReader for FsSourceReader {
    fn read_file(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        }
        match std::fs::read(path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path)
            .map(|m| m.file_type().is_file())
            .unwrap_or(false)
    }
}
