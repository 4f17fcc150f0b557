//! Graph types.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use fence_core::ModuleId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    ValueImport,
    Reexport,
    /// Derived by propagation, never inserted by resolution.
    PublicSurface,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValueImport => "value-import",
            Self::Reexport => "reexport",
            Self::PublicSurface => "public-surface",
        }
    }
}

/// Identity is `(from, to, kind)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: ModuleId,
    pub to: ModuleId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(from: ModuleId, to: ModuleId, kind: EdgeKind) -> Self {
        Self { from, to, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMeta {
    pub path: PathBuf,
    pub package: String,
    pub is_entry: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeCounts {
    pub value_import: usize,
    pub reexport: usize,
    pub public_surface: usize,
}

/// Sorted nodes, sorted unique edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleGraph {
    pub nodes: BTreeMap<ModuleId, NodeMeta>,
    pub edges: Vec<Edge>,
    pub counts: EdgeCounts,
}

impl ModuleGraph {
    pub fn from_parts(nodes: BTreeMap<ModuleId, NodeMeta>, edges: BTreeSet<Edge>) -> Self {
        let mut counts = EdgeCounts::default();
        for edge in &edges {
            match edge.kind {
                EdgeKind::ValueImport => counts.value_import += 1,
                EdgeKind::Reexport => counts.reexport += 1,
                EdgeKind::PublicSurface => counts.public_surface += 1,
            }
        }
        Self {
            nodes,
            edges: edges.into_iter().collect(),
            counts,
        }
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }

    pub fn outgoing<'g>(&'g self, from: &'g ModuleId) -> impl Iterator<Item = &'g Edge> {
        self.edges.iter().filter(move |e| &e.from == from)
    }

    pub fn contains_edge(&self, from: &str, to: &str, kind: EdgeKind) -> bool {
        self.edges
            .iter()
            .any(|e| e.from.as_str() == from && e.to.as_str() == to && e.kind == kind)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub files: usize,
    pub unreadable: usize,
    pub unresolved: usize,
    pub external: usize,
    pub skipped: usize,
}

/// Graph plus how the build went.
#[derive(Debug, Clone, Default)]
pub struct GraphBuild {
    pub graph: ModuleGraph,
    pub stats: BuildStats,
    /// False when the deadline stopped the build early.
    pub completed: bool,
}
