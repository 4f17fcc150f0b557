//! ViolationDetector — checks every in-scope changed file against the
//! public surfaces of the packages it reaches into.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use fence_core::constants::DEFAULT_READ_RETRIES;
use fence_core::SourceReader;

use super::scope::DiffScope;
use super::types::{
    DetectionOutcome, DiffEntry, DiffStatus, Proof, UnresolvedSpecifier, Violation, ViolationCause,
};
use crate::engine::budget::Budget;
use crate::graph::scan::{FileScanner, ResolvedImport};
use crate::graph::{cross_package_cycles, EdgeKind, ModuleGraph, PublicSurface};
use crate::parsers::ModuleParser;
use crate::resolver::{module_id_for, ResolutionKind};
use crate::workspace::WorkspaceLayout;

/// Inputs for one detection run.
pub struct DetectionContext<'a> {
    pub layout: &'a WorkspaceLayout,
    /// Head revision.
    pub head: &'a dyn SourceReader,
    /// Base revision, needed for deleted files.
    pub base: Option<&'a dyn SourceReader>,
    pub diff: &'a [DiffEntry],
    /// Graph for cycle detection; no cycle check without one.
    pub graph: Option<&'a ModuleGraph>,
}

pub struct ViolationDetector<'a> {
    parser: &'a ModuleParser,
    scope: DiffScope,
    read_attempts: u32,
}

impl<'a> ViolationDetector<'a> {
    pub fn new(parser: &'a ModuleParser, scope: DiffScope) -> Self {
        Self {
            parser,
            scope,
            read_attempts: DEFAULT_READ_RETRIES,
        }
    }

    pub fn with_read_attempts(mut self, attempts: u32) -> Self {
        self.read_attempts = attempts.max(1);
        self
    }

    pub fn scope(&self) -> &DiffScope {
        &self.scope
    }

    pub fn detect(&self, ctx: &DetectionContext, budget: &Budget) -> DetectionOutcome {
        let layout = ctx.layout;
        let scoped = self.scope.filter(ctx.diff);
        let head = FileScanner::new(layout, ctx.head, self.parser, self.read_attempts);
        let head_surface = PublicSurface::compute(&head);

        let mut violations: BTreeSet<Violation> = BTreeSet::new();
        let mut unresolved: BTreeSet<UnresolvedSpecifier> = BTreeSet::new();
        let mut deleted: Vec<PathBuf> = Vec::new();
        let mut changed: BTreeSet<PathBuf> = BTreeSet::new();
        let mut files_analyzed = 0;
        let mut completed = true;
        let mut ambiguous = false;

        for entry in &scoped {
            if budget.expired() {
                tracing::warn!(
                    analyzed = files_analyzed,
                    in_scope = scoped.len(),
                    "detection stopped at deadline"
                );
                completed = false;
                break;
            }
            let path = layout.absolute(&entry.path);
            match entry.status {
                DiffStatus::Added | DiffStatus::Modified => {
                    self.check_imports(&head, &head_surface, &path, &mut violations, &mut unresolved);
                    let degraded = head.scan(&path).degraded;
                    changed.insert(path);
                    // Unreadable content is not coverage.
                    if degraded {
                        ambiguous = true;
                        continue;
                    }
                }
                DiffStatus::Deleted => deleted.push(path),
            }
            files_analyzed += 1;
        }

        if !deleted.is_empty() {
            match ctx.base {
                Some(base_reader) => {
                    let base = FileScanner::new(layout, base_reader, self.parser, self.read_attempts);
                    let base_surface = PublicSurface::compute(&base);
                    for path in &deleted {
                        self.check_deleted(layout, ctx.head, &base_surface, &head_surface, path, &mut violations);
                    }
                }
                None => {
                    tracing::warn!(
                        deleted = deleted.len(),
                        "deleted files but no base revision reader, result is ambiguous"
                    );
                    ambiguous = true;
                }
            }
        }

        if let Some(graph) = ctx.graph {
            check_cycles(layout, graph, &changed, &mut violations);
        }

        let outcome = DetectionOutcome {
            violations: violations.into_iter().collect(),
            unresolved: unresolved.into_iter().collect(),
            files_in_scope: scoped.len(),
            files_analyzed,
            ambiguous,
            completed,
        };
        tracing::debug!(
            violations = outcome.violations.len(),
            unresolved = outcome.unresolved.len(),
            in_scope = outcome.files_in_scope,
            analyzed = outcome.files_analyzed,
            "detection finished"
        );
        outcome
    }

    fn check_imports(
        &self,
        head: &FileScanner,
        surface: &PublicSurface,
        path: &Path,
        violations: &mut BTreeSet<Violation>,
        unresolved: &mut BTreeSet<UnresolvedSpecifier>,
    ) {
        let layout = head.layout();
        let scanned = head.scan(path);
        if !scanned.exists {
            tracing::debug!(path = %path.display(), "changed file absent at head");
            return;
        }
        let Some(package) = scanned.package.as_deref() else {
            return;
        };
        let relative = layout.relative_path(path);

        for import in &scanned.imports {
            if let Some(cause) = classify(layout, surface, package, import) {
                let target = match cause {
                    ViolationCause::RelativeEscape => import
                        .resolution
                        .resolved_path
                        .as_deref()
                        .map(|p| layout.relative_path(p))
                        .unwrap_or_default(),
                    _ => import
                        .resolution
                        .target
                        .as_ref()
                        .map(|t| t.to_string())
                        .unwrap_or_default(),
                };
                violations.insert(Violation {
                    package: package.to_string(),
                    path: relative.clone(),
                    cause,
                    specifier: import.specifier.clone(),
                    proof: Proof {
                        source: relative.clone(),
                        target,
                        rule: cause,
                    },
                });
            } else if is_unresolved_local(layout, import) {
                unresolved.insert(UnresolvedSpecifier {
                    path: relative.clone(),
                    specifier: import.specifier.clone(),
                });
            }
        }
    }

    fn check_deleted(
        &self,
        layout: &WorkspaceLayout,
        head_reader: &dyn SourceReader,
        base_surface: &PublicSurface,
        head_surface: &PublicSurface,
        path: &Path,
        violations: &mut BTreeSet<Violation>,
    ) {
        let Some(package) = layout.package_for_path(path) else {
            return;
        };
        let was_public = base_surface
            .for_package(&package.name)
            .is_some_and(|files| files.contains_type(path));
        if !was_public {
            return;
        }
        let still_public = head_reader.is_file(path)
            && head_surface
                .for_package(&package.name)
                .is_some_and(|files| files.contains_type(path));
        if still_public {
            return;
        }
        let relative = layout.relative_path(path);
        let target = module_id_for(package, path)
            .map(|id| id.to_string())
            .unwrap_or_else(|| relative.clone());
        violations.insert(Violation {
            package: package.name.clone(),
            path: relative.clone(),
            cause: ViolationCause::DeletedPublicApi,
            specifier: layout.entry_specifier(&package.name),
            proof: Proof {
                source: relative,
                target,
                rule: ViolationCause::DeletedPublicApi,
            },
        });
    }
}

/// The rule one statement breaks, if any.
fn classify(
    layout: &WorkspaceLayout,
    surface: &PublicSurface,
    package: &str,
    import: &ResolvedImport,
) -> Option<ViolationCause> {
    let resolution = &import.resolution;
    if resolution.escapes_package {
        return Some(ViolationCause::RelativeEscape);
    }
    resolution.target.as_ref()?;
    let path = resolution.resolved_path.as_deref()?;
    let target_package = layout.package_for_path(path)?;
    if target_package.name == package {
        return None;
    }
    let public = surface.for_package(&target_package.name);
    if import.kind.is_type_only() {
        let exposed = public.is_some_and(|files| files.contains_type(path));
        (!exposed).then_some(ViolationCause::TypeImportPrivateTarget)
    } else {
        let exposed = public.is_some_and(|files| files.contains_value(path));
        (!exposed).then_some(ViolationCause::BoundaryViolation)
    }
}

/// Relative or workspace-namespaced specifiers that resolved nowhere.
fn is_unresolved_local(layout: &WorkspaceLayout, import: &ResolvedImport) -> bool {
    if import.resolution.kind != ResolutionKind::Unresolved || import.resolution.resolved_path.is_some() {
        return false;
    }
    let namespace = layout.namespace();
    import.specifier.starts_with('.')
        || (!namespace.is_empty() && import.specifier.starts_with(&format!("{namespace}/")))
}

/// One violation per cross-package cycle that touches a changed file.
fn check_cycles(
    layout: &WorkspaceLayout,
    graph: &ModuleGraph,
    changed: &BTreeSet<PathBuf>,
    violations: &mut BTreeSet<Violation>,
) {
    for cycle in cross_package_cycles(graph) {
        let anchor = cycle.members.iter().find(|m| {
            graph
                .nodes
                .get(*m)
                .is_some_and(|meta| changed.contains(&meta.path))
        });
        let Some(anchor) = anchor else { continue };
        let Some(meta) = graph.nodes.get(anchor) else { continue };

        let members: BTreeSet<_> = cycle.members.iter().collect();
        let next = graph
            .outgoing(anchor)
            .filter(|e| e.kind != EdgeKind::PublicSurface && &e.to != anchor && members.contains(&&e.to))
            .map(|e| e.to.to_string())
            .min()
            .unwrap_or_default();
        let relative = layout.relative_path(&meta.path);
        let specifier = cycle
            .members
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",");
        tracing::debug!(members = cycle.members.len(), packages = cycle.packages.len(), "cross-package cycle");
        violations.insert(Violation {
            package: meta.package.clone(),
            path: relative.clone(),
            cause: ViolationCause::CircularImport,
            specifier,
            proof: Proof {
                source: relative,
                target: next,
                rule: ViolationCause::CircularImport,
            },
        });
    }
}
