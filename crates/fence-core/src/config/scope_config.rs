//! Diff scope filtering.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SCOPE_EXCLUDES;

/// Which changed paths take part in detection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScopeConfig {
    /// Glob patterns (repo-relative, `/`-separated) excluded from diff scope.
    /// Empty means the built-in test/generated excludes.
    pub exclude: Vec<String>,
    /// Keep the built-in excludes in addition to `exclude`. Default: true.
    pub include_default_excludes: Option<bool>,
}

impl ScopeConfig {
    /// The exclude globs in effect, built-ins first.
    pub fn effective_excludes(&self) -> Vec<String> {
        let mut patterns: Vec<String> = Vec::new();
        if self.include_default_excludes.unwrap_or(true) {
            patterns.extend(DEFAULT_SCOPE_EXCLUDES.iter().map(|p| p.to_string()));
        }
        patterns.extend(self.exclude.iter().cloned());
        patterns
    }
}
