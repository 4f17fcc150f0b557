//! Public-surface propagation.
//!
//! A value import A→B really depends on everything B re-exports,
//! transitively. For each value-import edge we walk the re-export-only
//! closure of B and emit derived `public-surface` edges A→C.

use std::collections::{BTreeMap, BTreeSet};

use fence_core::{FxHashMap, FxHashSet, ModuleId};

use super::types::{Edge, EdgeKind, ModuleGraph};

/// Re-export adjacency plus memoized closures. Scoped to one propagation
/// call; build a new one per graph.
pub struct ClosureCache {
    adjacency: BTreeMap<ModuleId, Vec<ModuleId>>,
    closures: FxHashMap<ModuleId, Vec<ModuleId>>,
}

impl ClosureCache {
    pub fn new(graph: &ModuleGraph) -> Self {
        let mut adjacency: BTreeMap<ModuleId, BTreeSet<ModuleId>> = BTreeMap::new();
        for edge in graph.edges_of_kind(EdgeKind::Reexport) {
            adjacency
                .entry(edge.from.clone())
                .or_default()
                .insert(edge.to.clone());
        }
        Self {
            adjacency: adjacency
                .into_iter()
                .map(|(from, to)| (from, to.into_iter().collect()))
                .collect(),
            closures: FxHashMap::default(),
        }
    }

    /// Every module reachable from `start` over re-export edges, `start`
    /// included, sorted. Re-export cycles terminate via the visited set.
    pub fn closure(&mut self, start: &ModuleId) -> Vec<ModuleId> {
        if let Some(hit) = self.closures.get(start) {
            return hit.clone();
        }
        let mut visited: FxHashSet<&ModuleId> = FxHashSet::default();
        let mut stack = vec![start];
        visited.insert(start);
        while let Some(node) = stack.pop() {
            for next in self.adjacency.get(node).into_iter().flatten() {
                if visited.insert(next) {
                    stack.push(next);
                }
            }
        }
        let mut result: Vec<ModuleId> = visited.into_iter().cloned().collect();
        result.sort();
        self.closures.insert(start.clone(), result.clone());
        result
    }

    pub fn cached_len(&self) -> usize {
        self.closures.len()
    }
}

/// Original edges plus derived `public-surface` edges, re-sorted.
pub fn propagate_public_surface(graph: &ModuleGraph) -> ModuleGraph {
    let mut cache = ClosureCache::new(graph);
    let derived = derive_edges(graph, &mut cache);

    let mut edges: BTreeSet<Edge> = graph
        .edges
        .iter()
        .filter(|e| e.kind != EdgeKind::PublicSurface)
        .cloned()
        .collect();
    let derived_count = derived.len();
    edges.extend(derived);

    let propagated = ModuleGraph::from_parts(graph.nodes.clone(), edges);
    tracing::debug!(
        derived = derived_count,
        public_surface = propagated.counts.public_surface,
        closures = cache.cached_len(),
        "public surface propagated"
    );
    propagated
}

fn derive_edges(graph: &ModuleGraph, cache: &mut ClosureCache) -> Vec<Edge> {
    let mut derived = Vec::new();
    for edge in graph.edges_of_kind(EdgeKind::ValueImport) {
        for reached in cache.closure(&edge.to) {
            if reached == edge.to || reached == edge.from {
                continue;
            }
            derived.push(Edge::new(edge.from.clone(), reached, EdgeKind::PublicSurface));
        }
    }
    derived
}
