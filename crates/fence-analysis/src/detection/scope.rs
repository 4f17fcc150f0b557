//! Which diff entries take part in detection.

use std::collections::BTreeMap;

use fence_core::config::ScopeConfig;
use fence_core::constants::SOURCE_EXTENSIONS;
use glob::{MatchOptions, Pattern};

use super::types::DiffEntry;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// `.ts`/`.tsx` files not matched by any exclude glob.
#[derive(Debug, Clone, Default)]
pub struct DiffScope {
    excludes: Vec<Pattern>,
}

impl DiffScope {
    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(&config.effective_excludes())
    }

    /// Invalid patterns are dropped with a warning; config validation
    /// rejects them earlier.
    pub fn new(patterns: &[String]) -> Self {
        let excludes = patterns
            .iter()
            .filter_map(|raw| match Pattern::new(raw) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(pattern = %raw, error = %e, "ignoring invalid exclude glob");
                    None
                }
            })
            .collect();
        Self { excludes }
    }

    pub fn includes(&self, path: &str) -> bool {
        let has_source_ext = path
            .rsplit_once('.')
            .is_some_and(|(_, ext)| SOURCE_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)));
        has_source_ext
            && !self
                .excludes
                .iter()
                .any(|p| p.matches_with(path, MATCH_OPTIONS))
    }

    /// In-scope entries, one per path (the last entry for a path wins),
    /// sorted by path.
    pub fn filter(&self, diff: &[DiffEntry]) -> Vec<DiffEntry> {
        let mut by_path: BTreeMap<&str, &DiffEntry> = BTreeMap::new();
        for entry in diff {
            if self.includes(&entry.path) {
                by_path.insert(entry.path.as_str(), entry);
            }
        }
        by_path.into_values().cloned().collect()
    }
}
