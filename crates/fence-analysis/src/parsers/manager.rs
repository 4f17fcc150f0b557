//! ModuleParser — dialect detection plus cached extraction.

use std::path::Path;

use fence_core::errors::ParseError;

use super::cache::ParseCache;
use super::types::{Dialect, ParsedModule};
use super::typescript;
use crate::hashing::hash_content;

/// Parses TypeScript/TSX sources into [`ParsedModule`]s, memoized by
/// content hash.
pub struct ModuleParser {
    cache: ParseCache,
}

impl ModuleParser {
    pub fn new() -> Self {
        Self {
            cache: ParseCache::default(),
        }
    }

    pub fn with_cache_capacity(capacity: u64) -> Self {
        Self {
            cache: ParseCache::new(capacity),
        }
    }

    /// Detect the dialect from the file extension.
    pub fn detect_dialect(&self, path: &Path) -> Option<Dialect> {
        Dialect::from_path(path)
    }

    /// Parse a file. Never fails: unsupported extensions and grammar
    /// failures yield an empty module.
    pub fn parse(&self, source: &str, path: &Path) -> ParsedModule {
        match self.try_parse(source, path) {
            Ok(module) => module,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "parse degraded to empty module");
                ParsedModule::default()
            }
        }
    }

    /// Parse a file, surfacing unsupported extensions and grammar errors.
    pub fn try_parse(&self, source: &str, path: &Path) -> Result<ParsedModule, ParseError> {
        let dialect = self.detect_dialect(path).ok_or_else(|| ParseError::UnsupportedLanguage {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        })?;
        self.parse_with_dialect(source, dialect).map_err(|e| match e {
            ParseError::TreeSitterError { message, .. } => ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse with a known dialect (skips detection).
    pub fn parse_with_dialect(
        &self,
        source: &str,
        dialect: Dialect,
    ) -> Result<ParsedModule, ParseError> {
        let content_hash = hash_content(source.as_bytes());
        if let Some(cached) = self.cache.get(content_hash, dialect) {
            return Ok(cached);
        }
        let module = typescript::extract(source, dialect)?;
        self.cache.insert(content_hash, dialect, module.clone());
        Ok(module)
    }

    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for ModuleParser {
    fn default() -> Self {
        Self::new()
    }
}
