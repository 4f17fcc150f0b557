//! Module-id derivation.

use std::path::Path;

use fence_core::types::paths::to_slash;
use fence_core::ModuleId;

use crate::workspace::PackageLayout;

/// Canonical id of `path` inside `package`.
///
/// The path relative to the source root loses its extension, gets `/`
/// separators and is case-folded; an empty path or a root `index` collapses
/// to the bare package id. `None` when `path` is outside the source root.
pub fn module_id_for(package: &PackageLayout, path: &Path) -> Option<ModuleId> {
    let relative = path.strip_prefix(&package.source_root).ok()?;
    let mut module_path = to_slash(relative);
    if let Some(dot) = module_path.rfind('.') {
        let last_slash = module_path.rfind('/').map(|i| i + 1).unwrap_or(0);
        if dot > last_slash {
            module_path.truncate(dot);
        }
    }
    if module_path.is_empty() || module_path.eq_ignore_ascii_case("index") {
        return Some(ModuleId::package_root(&package.name));
    }
    Some(ModuleId::new(&package.name, Some(&module_path)))
}
