//! Parse cache: Moka in-memory, keyed by (content_hash, dialect).
//! Identical content parsed as `.ts` and `.tsx` gets separate entries.

use moka::sync::Cache;

use super::types::{Dialect, ParsedModule};

type CacheKey = (u64, Dialect);

/// In-memory parse cache (TinyLFU admission). Lives as long as the
/// `ModuleParser` that owns it; nothing is persisted.
pub struct ParseCache {
    inner: Cache<CacheKey, ParsedModule>,
}

impl ParseCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            inner: Cache::new(capacity),
        }
    }

    pub fn get(&self, content_hash: u64, dialect: Dialect) -> Option<ParsedModule> {
        self.inner.get(&(content_hash, dialect))
    }

    pub fn insert(&self, content_hash: u64, dialect: Dialect, module: ParsedModule) {
        self.inner.insert((content_hash, dialect), module);
    }

    /// Number of cached entries. Moka counts lazily, so pending writes are
    /// flushed first.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}
