//! Monorepo layout: namespace and package declarations.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENTRY, DEFAULT_SOURCE_ROOT};

/// The `[workspace]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Import namespace for workspace packages, e.g. `@acme`.
    pub namespace: Option<String>,
    /// Declared packages.
    pub packages: Vec<PackageConfig>,
}

/// One `[[workspace.packages]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PackageConfig {
    /// Package name as it appears after the namespace (`@acme/<name>`).
    pub name: String,
    /// Package directory, relative to the repo root.
    pub root: String,
    /// Source root, relative to `root`. Default: `src`.
    pub source_root: Option<String>,
    /// Entry file, relative to the source root. Default: `index.ts`.
    pub entry: Option<String>,
}

impl WorkspaceConfig {
    /// Namespace with any trailing `/` removed; empty when unset.
    pub fn effective_namespace(&self) -> String {
        self.namespace
            .as_deref()
            .unwrap_or("")
            .trim_end_matches('/')
            .to_string()
    }
}

impl PackageConfig {
    pub fn new(name: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            source_root: None,
            entry: None,
        }
    }

    pub fn effective_source_root(&self) -> &str {
        self.source_root.as_deref().unwrap_or(DEFAULT_SOURCE_ROOT)
    }

    pub fn effective_entry(&self) -> &str {
        self.entry.as_deref().unwrap_or(DEFAULT_ENTRY)
    }
}
