//! SpecifierResolver — the one resolution algorithm shared by the graph
//! builder, the detector, public-surface computation and repair hashes.

use std::path::{Path, PathBuf};

use fence_core::types::paths::{append_suffix, normalize_path};
use fence_core::SourceReader;

use super::module_id::module_id_for;
use super::types::{Resolution, ResolutionKind};
use crate::workspace::{PackageLayout, WorkspaceLayout};

/// Probe order for a base path. First existing regular file wins.
const PROBE_SUFFIXES: [&str; 5] = ["", ".ts", ".tsx", "/index.ts", "/index.tsx"];

pub struct SpecifierResolver<'a> {
    layout: &'a WorkspaceLayout,
    reader: &'a dyn SourceReader,
}

impl<'a> SpecifierResolver<'a> {
    pub fn new(layout: &'a WorkspaceLayout, reader: &'a dyn SourceReader) -> Self {
        Self { layout, reader }
    }

    /// Resolve `specifier` as written in `importer` (absolute path).
    pub fn resolve(&self, importer: &Path, specifier: &str) -> Resolution {
        if specifier.starts_with('.') {
            return self.resolve_relative(importer, specifier);
        }
        if let Some(rest) = self.strip_namespace(specifier) {
            return self.resolve_workspace(rest);
        }
        Resolution::external()
    }

    fn resolve_relative(&self, importer: &Path, specifier: &str) -> Resolution {
        let dir = importer.parent().unwrap_or_else(|| Path::new(""));
        let base = normalize_path(&dir.join(specifier));
        let Some(path) = self.probe(&base) else {
            return Resolution::unresolved();
        };
        match self.layout.package_for_path(importer) {
            Some(own) if own.contains(&path) => match module_id_for(own, &path) {
                Some(id) => Resolution::resolved(ResolutionKind::Relative, id, path),
                None => Resolution::outside(path, true),
            },
            Some(_) => Resolution::outside(path, true),
            None => Resolution::outside(path, false),
        }
    }

    /// `<ns>/<package>[/<subpath>]` → `<package>[/<subpath>]`.
    fn strip_namespace<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        let namespace = self.layout.namespace();
        if namespace.is_empty() {
            return None;
        }
        specifier
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('/'))
    }

    fn resolve_workspace(&self, rest: &str) -> Resolution {
        let (name, subpath) = match rest.split_once('/') {
            Some((name, sub)) => (name, Some(sub).filter(|s| !s.is_empty())),
            None => (rest, None),
        };
        let Some(package) = self.layout.package(name) else {
            tracing::debug!(package = name, "workspace specifier names an unknown package");
            return Resolution::unresolved();
        };
        let found = match subpath {
            None => package
                .entry_candidates()
                .into_iter()
                .find(|p| self.reader.is_file(p)),
            Some(sub) => self.probe_in_package(package, sub),
        };
        match found.and_then(|path| module_id_for(package, &path).map(|id| (id, path))) {
            Some((id, path)) => Resolution::resolved(ResolutionKind::Workspace, id, path),
            None => Resolution::unresolved(),
        }
    }

    fn probe_in_package(&self, package: &PackageLayout, subpath: &str) -> Option<PathBuf> {
        let base = normalize_path(&package.source_root.join(subpath));
        if !package.contains(&base) {
            return None;
        }
        self.probe(&base).filter(|p| package.contains(p))
    }

    fn probe(&self, base: &Path) -> Option<PathBuf> {
        PROBE_SUFFIXES
            .iter()
            .map(|suffix| append_suffix(base, suffix))
            .find(|candidate| self.reader.is_file(candidate))
    }
}
