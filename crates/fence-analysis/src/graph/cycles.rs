//! Tarjan's SCC cycle detection via petgraph, over value-import and
//! re-export edges.

use std::collections::BTreeSet;

use fence_core::{FxHashMap, ModuleId};
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{EdgeKind, ModuleGraph};

/// One strongly connected component with more than one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCycle {
    /// Sorted.
    pub members: Vec<ModuleId>,
    pub packages: BTreeSet<String>,
}

impl ImportCycle {
    pub fn spans_packages(&self) -> bool {
        self.packages.len() >= 2
    }
}

/// All cycles, sorted by first member. Derived edges are ignored.
pub fn detect_cycles(graph: &ModuleGraph) -> Vec<ImportCycle> {
    let mut pg: DiGraph<ModuleId, ()> = DiGraph::new();
    let mut node_map: FxHashMap<&ModuleId, NodeIndex> = FxHashMap::default();

    for id in graph.nodes.keys() {
        let idx = pg.add_node(id.clone());
        node_map.insert(id, idx);
    }
    for edge in &graph.edges {
        if !matches!(edge.kind, EdgeKind::ValueImport | EdgeKind::Reexport) {
            continue;
        }
        if let (Some(&src), Some(&dst)) = (node_map.get(&edge.from), node_map.get(&edge.to)) {
            pg.update_edge(src, dst, ());
        }
    }

    let mut cycles: Vec<ImportCycle> = petgraph::algo::tarjan_scc(&pg)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .map(|scc| {
            let mut members: Vec<ModuleId> = scc.iter().map(|idx| pg[*idx].clone()).collect();
            members.sort();
            let packages = members
                .iter()
                .filter_map(|m| graph.nodes.get(m).map(|meta| meta.package.clone()))
                .collect();
            ImportCycle { members, packages }
        })
        .collect();
    cycles.sort_by(|a, b| a.members.cmp(&b.members));
    cycles
}

/// Cycles spanning two or more packages. Same-package cycles are allowed.
pub fn cross_package_cycles(graph: &ModuleGraph) -> Vec<ImportCycle> {
    detect_cycles(graph)
        .into_iter()
        .filter(ImportCycle::spans_packages)
        .collect()
}
