//! WorkspaceLayout — resolved, absolute view of the `[workspace]` config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fence_core::config::WorkspaceConfig;
use fence_core::constants::DEFAULT_ENTRY;
use fence_core::errors::WorkspaceError;
use fence_core::types::paths::{normalize_path, to_slash_relative};

/// One package with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    pub name: String,
    pub root: PathBuf,
    pub source_root: PathBuf,
    pub entry: PathBuf,
}

impl PackageLayout {
    /// `root` and `source_root` are joined lexically; `entry` is relative to
    /// the source root.
    pub fn new(name: impl Into<String>, root: &Path, source_root: &str, entry: &str) -> Self {
        let root = normalize_path(root);
        let source_root = normalize_path(&root.join(source_root));
        let entry = normalize_path(&source_root.join(entry));
        Self {
            name: name.into(),
            root,
            source_root,
            entry,
        }
    }

    /// Entry files to probe, in order. The default `index.ts` entry also
    /// accepts `index.tsx`.
    pub fn entry_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = vec![self.entry.clone()];
        if self.entry == self.source_root.join(DEFAULT_ENTRY) {
            candidates.push(self.source_root.join("index.tsx"));
        }
        candidates
    }

    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.source_root)
    }
}

/// All packages of a repository, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceLayout {
    repo_root: PathBuf,
    namespace: String,
    packages: BTreeMap<String, PackageLayout>,
}

impl WorkspaceLayout {
    pub fn new(repo_root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            repo_root: normalize_path(&repo_root.into()),
            namespace: namespace.into().trim_end_matches('/').to_string(),
            packages: BTreeMap::new(),
        }
    }

    /// Build from config. Package roots are relative to `repo_root`.
    pub fn from_config(repo_root: &Path, config: &WorkspaceConfig) -> Result<Self, WorkspaceError> {
        let mut layout = Self::new(repo_root, config.effective_namespace());
        for pkg in &config.packages {
            if pkg.name.is_empty() || pkg.name.contains('/') {
                return Err(WorkspaceError::InvalidPackageName {
                    package: pkg.name.clone(),
                });
            }
            let root = layout.repo_root.join(&pkg.root);
            let package = PackageLayout::new(
                pkg.name.clone(),
                &root,
                pkg.effective_source_root(),
                pkg.effective_entry(),
            );
            layout.add_package(package)?;
        }
        tracing::debug!(
            packages = layout.packages.len(),
            namespace = %layout.namespace,
            "workspace layout resolved"
        );
        Ok(layout)
    }

    pub fn add_package(&mut self, package: PackageLayout) -> Result<(), WorkspaceError> {
        if self.package_by_id_name(&package.name).is_some() {
            return Err(WorkspaceError::DuplicatePackage(package.name));
        }
        if !package.source_root.starts_with(&package.root) {
            return Err(WorkspaceError::InvalidSourceRoot {
                package: package.name,
                message: "source root escapes the package root".to_string(),
            });
        }
        self.packages.insert(package.name.clone(), package);
        Ok(())
    }

    /// Builder form of [`add_package`](Self::add_package).
    pub fn with_package(mut self, package: PackageLayout) -> Result<Self, WorkspaceError> {
        self.add_package(package)?;
        Ok(self)
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn packages(&self) -> impl Iterator<Item = &PackageLayout> {
        self.packages.values()
    }

    pub fn package(&self, name: &str) -> Option<&PackageLayout> {
        self.packages.get(name)
    }

    /// Case-insensitive lookup, for names taken from a [`ModuleId`].
    ///
    /// [`ModuleId`]: fence_core::ModuleId
    pub fn package_by_id_name(&self, name: &str) -> Option<&PackageLayout> {
        self.packages
            .get(name)
            .or_else(|| self.packages.values().find(|p| p.name.eq_ignore_ascii_case(name)))
    }

    /// Package whose source root contains `path`; the deepest root wins for
    /// nested packages.
    pub fn package_for_path(&self, path: &Path) -> Option<&PackageLayout> {
        self.packages
            .values()
            .filter(|p| p.contains(path))
            .max_by_key(|p| p.source_root.components().count())
    }

    /// Absolute path for a repo-relative `/`-separated path.
    pub fn absolute(&self, relative: &str) -> PathBuf {
        normalize_path(&self.repo_root.join(relative))
    }

    /// Repo-relative, `/`-separated form of `path`.
    pub fn relative_path(&self, path: &Path) -> String {
        to_slash_relative(path, &self.repo_root)
    }

    /// The public import path of a package, `<namespace>/<name>`.
    pub fn entry_specifier(&self, package: &str) -> String {
        if self.namespace.is_empty() {
            package.to_string()
        } else {
            format!("{}/{}", self.namespace, package)
        }
    }
}
