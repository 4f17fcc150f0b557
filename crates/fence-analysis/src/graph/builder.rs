//! GraphBuilder — one node per source file, typed edges per resolved
//! value import or re-export.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use fence_core::constants::DEFAULT_READ_RETRIES;
use fence_core::{ModuleId, SourceReader};

use super::scan::FileScanner;
use super::types::{BuildStats, Edge, EdgeKind, GraphBuild, ModuleGraph, NodeMeta};
use crate::engine::budget::Budget;
use crate::parsers::ModuleParser;
use crate::resolver::module_id_for;
use crate::workspace::WorkspaceLayout;

pub struct GraphBuilder<'a> {
    layout: &'a WorkspaceLayout,
    reader: &'a dyn SourceReader,
    parser: &'a ModuleParser,
    read_attempts: u32,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        layout: &'a WorkspaceLayout,
        reader: &'a dyn SourceReader,
        parser: &'a ModuleParser,
    ) -> Self {
        Self {
            layout,
            reader,
            parser,
            read_attempts: DEFAULT_READ_RETRIES,
        }
    }

    pub fn with_read_attempts(mut self, attempts: u32) -> Self {
        self.read_attempts = attempts.max(1);
        self
    }

    /// Build without a deadline.
    pub fn build(&self, files: &[PathBuf]) -> GraphBuild {
        self.build_within(files, &Budget::unlimited())
    }

    /// Build, stopping early (with `completed = false`) once `budget` expires.
    /// An unreadable file still gets its node, with no outgoing edges.
    pub fn build_within(&self, files: &[PathBuf], budget: &Budget) -> GraphBuild {
        let scanner = FileScanner::new(self.layout, self.reader, self.parser, self.read_attempts);
        let mut nodes: BTreeMap<ModuleId, NodeMeta> = BTreeMap::new();
        let mut edges: BTreeSet<Edge> = BTreeSet::new();
        let mut stats = BuildStats::default();
        let mut completed = true;

        let ordered: BTreeSet<&PathBuf> = files.iter().collect();
        for file in ordered {
            if budget.expired() {
                tracing::warn!(
                    processed = stats.files,
                    total = files.len(),
                    elapsed_ms = budget.elapsed_ms(),
                    "graph build stopped at deadline"
                );
                completed = false;
                break;
            }
            let Some(from) = self.insert_node(&mut nodes, file) else {
                tracing::debug!(path = %file.display(), "file outside every package, skipped");
                stats.skipped += 1;
                continue;
            };
            stats.files += 1;

            let scanned = scanner.scan(file);
            if scanned.degraded {
                stats.unreadable += 1;
            }
            for import in scanned.behavioral_imports() {
                let resolution = &import.resolution;
                match (&resolution.target, &resolution.resolved_path) {
                    (Some(to), Some(path)) => {
                        self.insert_node(&mut nodes, path);
                        let kind = if import.kind.is_reexport() {
                            EdgeKind::Reexport
                        } else {
                            EdgeKind::ValueImport
                        };
                        edges.insert(Edge::new(from.clone(), to.clone(), kind));
                    }
                    _ if resolution.is_external() => stats.external += 1,
                    _ => stats.unresolved += 1,
                }
            }
        }

        let graph = ModuleGraph::from_parts(nodes, edges);
        tracing::debug!(
            nodes = graph.node_count(),
            value_import = graph.counts.value_import,
            reexport = graph.counts.reexport,
            files = stats.files,
            unreadable = stats.unreadable,
            unresolved = stats.unresolved,
            external = stats.external,
            "module graph built"
        );
        GraphBuild {
            graph,
            stats,
            completed,
        }
    }

    /// Insert the node for `path` if it belongs to a package; returns its id.
    /// The first file to claim an id keeps it.
    fn insert_node(&self, nodes: &mut BTreeMap<ModuleId, NodeMeta>, path: &Path) -> Option<ModuleId> {
        let package = self.layout.package_for_path(path)?;
        let id = module_id_for(package, path)?;
        nodes.entry(id.clone()).or_insert_with(|| NodeMeta {
            path: path.to_path_buf(),
            package: package.name.clone(),
            is_entry: package.entry_candidates().iter().any(|e| e == path),
        });
        Some(id)
    }
}
