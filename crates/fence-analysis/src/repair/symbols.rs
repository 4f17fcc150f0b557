//! Export resolution: which file actually declares a name a module exports.
//!
//! Follows `export {x} from`, `export * from`, `export * as ns from` and
//! `import {x} from …; export {x}` chains, in the value or the type
//! space, with an explicit stack and a visited set, so re-export cycles
//! terminate.

use std::path::{Path, PathBuf};

use fence_core::FxHashSet;

use crate::graph::scan::{FileScanner, ResolvedImport, ScannedFile};
use crate::parsers::{Binding, ImportKind, ImportRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolTarget {
    /// Declared in (or, for namespaces, is) this file.
    File(PathBuf),
    External(String),
    /// A specifier on the chain resolved nowhere.
    Unresolved(String),
    /// No module on the chain exports the name.
    Missing,
}

pub struct SymbolResolver<'s, 'a> {
    scanner: &'s FileScanner<'a>,
}

/// Which declaration space a name is looked up in. Types also travel
/// through `import type`, `export type … from` and `export type { … }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Space {
    Value,
    Type,
}

impl Space {
    /// Statements that re-export names in this space.
    fn follows(self, kind: ImportKind) -> bool {
        match self {
            Self::Value => kind == ImportKind::Reexport,
            Self::Type => kind.is_reexport(),
        }
    }

    /// Statements that bind local names in this space.
    fn imports(self, kind: ImportKind) -> bool {
        match self {
            Self::Value => kind == ImportKind::Value,
            Self::Type => matches!(kind, ImportKind::Value | ImportKind::TypeImport),
        }
    }

    fn bindings(self, record: &ImportRecord) -> impl Iterator<Item = &Binding> {
        let types: &[Binding] = match self {
            Self::Value => &[],
            Self::Type => &record.inline_types,
        };
        record.bindings.iter().chain(types.iter())
    }
}

enum Step {
    Done(SymbolTarget),
    Follow(PathBuf, String),
    Dead,
}

impl<'s, 'a> SymbolResolver<'s, 'a> {
    pub fn new(scanner: &'s FileScanner<'a>) -> Self {
        Self { scanner }
    }

    /// The file that declares runtime export `name` of `module`.
    pub fn resolve_export(&self, module: &Path, name: &str) -> SymbolTarget {
        self.resolve(module, name, Space::Value)
    }

    /// The file that declares type export `name` of `module`. Classes,
    /// enums and other value exports count as types too.
    pub fn resolve_type_export(&self, module: &Path, name: &str) -> SymbolTarget {
        self.resolve(module, name, Space::Type)
    }

    fn resolve(&self, module: &Path, name: &str, space: Space) -> SymbolTarget {
        let mut visited: FxHashSet<(PathBuf, String)> = FxHashSet::default();
        let mut stack: Vec<(PathBuf, String)> = vec![(module.to_path_buf(), name.to_string())];

        while let Some((path, name)) = stack.pop() {
            if !visited.insert((path.clone(), name.clone())) {
                continue;
            }
            let scanned = self.scanner.scan(&path);
            if !scanned.exists {
                continue;
            }
            let parsed = &scanned.parsed;

            if parsed.exports_locally(&name) {
                return SymbolTarget::File(path);
            }

            let type_aliases: &[Binding] = match space {
                Space::Value => &[],
                Space::Type => &parsed.type_export_aliases,
            };
            let alias = parsed
                .export_aliases
                .iter()
                .chain(type_aliases.iter())
                .find(|a| a.local == name);
            if let Some(alias) = alias {
                let step = match local_import(&scanned, &alias.imported, space) {
                    Some((import, binding)) => follow(import, binding),
                    // Declared locally, exported under a list.
                    None => Step::Done(SymbolTarget::File(path.clone())),
                };
                match step {
                    Step::Done(target) => return target,
                    Step::Follow(next, next_name) => stack.push((next, next_name)),
                    Step::Dead => {}
                }
                continue;
            }

            let named = scanned.imports.iter().find_map(|import| {
                if !space.follows(import.kind) {
                    return None;
                }
                let record = parsed.records.get(import.record)?;
                space
                    .bindings(record)
                    .find(|b| !b.is_star() && b.local == name)
                    .map(|b| (import, b))
            });
            if let Some((import, binding)) = named {
                match follow(import, binding) {
                    Step::Done(target) => return target,
                    Step::Follow(next, next_name) => stack.push((next, next_name)),
                    Step::Dead => {}
                }
                continue;
            }

            if name == "default" {
                continue;
            }
            let stars: Vec<PathBuf> = scanned
                .imports
                .iter()
                .filter(|import| space.follows(import.kind))
                .filter(|import| {
                    parsed
                        .records
                        .get(import.record)
                        .is_some_and(|r| r.bindings.iter().any(Binding::is_star))
                })
                .filter_map(|import| import.resolution.resolved_path.clone())
                .collect();
            for next in stars.into_iter().rev() {
                stack.push((next, name.clone()));
            }
        }

        SymbolTarget::Missing
    }
}

/// The import statement that binds `local` in `scanned`, in `space`.
fn local_import<'f>(
    scanned: &'f ScannedFile,
    local: &str,
    space: Space,
) -> Option<(&'f ResolvedImport, &'f Binding)> {
    scanned.imports.iter().find_map(|import| {
        if !space.imports(import.kind) {
            return None;
        }
        let record = scanned.parsed.records.get(import.record)?;
        space
            .bindings(record)
            .find(|b| b.local == local)
            .map(|b| (import, b))
    })
}

fn follow(import: &ResolvedImport, binding: &Binding) -> Step {
    if import.resolution.is_external() {
        return Step::Done(SymbolTarget::External(import.specifier.clone()));
    }
    let Some(target) = import.resolution.resolved_path.clone() else {
        return Step::Done(SymbolTarget::Unresolved(import.specifier.clone()));
    };
    if binding.imported == "*" {
        return Step::Done(SymbolTarget::File(target));
    }
    Step::Follow(target, binding.imported.clone())
}
