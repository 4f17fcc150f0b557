//! Per-package public files: everything reachable from the package entry
//! through re-export statements.
//!
//! Computed through a [`FileScanner`], so the same code gives the head
//! surface (working tree) and the base surface (historical snapshot).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::scan::FileScanner;
use crate::workspace::PackageLayout;

/// `types` is a superset of `value`: a file re-exported only as a type is
/// public for type imports but not for value imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicFiles {
    pub value: BTreeSet<PathBuf>,
    pub types: BTreeSet<PathBuf>,
}

impl PublicFiles {
    pub fn contains_value(&self, path: &Path) -> bool {
        self.value.contains(path)
    }

    pub fn contains_type(&self, path: &Path) -> bool {
        self.types.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PublicSurface {
    packages: BTreeMap<String, PublicFiles>,
}

impl PublicSurface {
    /// Public files of every package in the scanner's layout.
    pub fn compute(scanner: &FileScanner) -> Self {
        let packages = scanner
            .layout()
            .packages()
            .map(|pkg| (pkg.name.clone(), Self::package_files(scanner, pkg)))
            .collect();
        Self { packages }
    }

    pub fn for_package(&self, name: &str) -> Option<&PublicFiles> {
        self.packages.get(name)
    }

    /// Walk re-exports from the entry. Only targets inside the package
    /// count; re-exports of another package are that package's surface.
    pub fn package_files(scanner: &FileScanner, package: &PackageLayout) -> PublicFiles {
        let mut files = PublicFiles::default();
        let Some(entry) = package
            .entry_candidates()
            .into_iter()
            .find(|p| scanner.reader().is_file(p))
        else {
            tracing::debug!(package = %package.name, "package entry missing, empty public surface");
            return files;
        };

        let mut stack: Vec<(PathBuf, bool)> = vec![(entry, false)];
        while let Some((path, type_only)) = stack.pop() {
            if type_only {
                if files.value.contains(&path) || !files.types.insert(path.clone()) {
                    continue;
                }
            } else {
                if !files.value.insert(path.clone()) {
                    continue;
                }
                files.types.insert(path.clone());
            }

            let scanned = scanner.scan(&path);
            for import in scanned.imports.iter().rev() {
                if !import.kind.is_reexport() {
                    continue;
                }
                let Some(target) = &import.resolution.resolved_path else {
                    continue;
                };
                if import.resolution.target.is_none() || !package.contains(target) {
                    continue;
                }
                stack.push((target.clone(), type_only || import.kind.is_type_only()));
            }
        }
        files
    }
}
