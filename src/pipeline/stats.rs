// Wed Jan 21 2026 - Alex

use crate::pipeline::{CrateGraph, FoldedGraph};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldStats {
    pub labels: usize,
    pub nodes: usize,
    pub nodes_not_null: usize,
    pub nodes_null: usize,
    pub nodes_external: usize,
    /// Labels whose occurrences all carried an internal crate entry.
    pub labels_with_internal_crate: usize,
    pub labels_without_internal_crate: usize,
    /// Labels that folded occurrences both with and without an internal crate.
    pub labels_mixed: usize,
    /// Labels folded from more than one occurrence.
    pub labels_merged: usize,
    pub occurrences_with_internal_crate: usize,
    pub occurrences_without_internal_crate: usize,
    pub edges: usize,
}

impl FoldStats {
    pub fn from_graph(graph: &FoldedGraph) -> Self {
        let mut stats = Self {
            labels: graph.functions.len(),
            edges: graph.edges.len(),
            ..Self::default()
        };

        for function in graph.functions.values() {
            stats.nodes += function.nodes;
            stats.nodes_not_null += function.nodes_not_null;
            stats.nodes_null += function.nodes_null;
            stats.nodes_external += function.nodes_external;
            stats.occurrences_with_internal_crate += function.nodes_with_internal_crate;
            stats.occurrences_without_internal_crate += function.nodes_without_internal_crate;
            if function.is_merged() {
                stats.labels_merged += 1;
            }

            match (function.nodes_with_internal_crate > 0, function.nodes_without_internal_crate > 0) {
                (true, true) => stats.labels_mixed += 1,
                (true, false) => stats.labels_with_internal_crate += 1,
                (false, true) => stats.labels_without_internal_crate += 1,
                (false, false) => {}
            }
        }

        stats
    }

    pub fn log(&self) {
        log::info!("Reduced to {} nodes, starting from {}", self.labels, self.nodes);
        log::info!("{} nodes were merged from several occurrences", self.labels_merged);
        log::info!(
            "Of these, {} had a merged non-null node and {} did not",
            self.nodes_not_null,
            self.nodes_null
        );
        log::info!(
            "{} internal crate merged nodes and {} without",
            self.labels_with_internal_crate,
            self.labels_without_internal_crate
        );
        log::info!(
            "In total, {} internal crate occurrences were merged and {} without",
            self.occurrences_with_internal_crate,
            self.occurrences_without_internal_crate
        );
        log::info!("Merged with definition expanded: {}", self.labels_mixed);
        log::info!("{} had an external merged node", self.nodes_external);
        log::info!("{} distinct call edges", self.edges);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub crates: usize,
    pub dependencies: usize,
    pub resolved_functions: usize,
    pub unresolved_functions: usize,
}

impl ResolveStats {
    pub fn from_graph(graph: &CrateGraph) -> Self {
        Self {
            crates: graph.crates.len(),
            dependencies: graph.dependencies.len(),
            resolved_functions: graph.owners.len(),
            unresolved_functions: graph.diagnostics.iter().filter(|d| d.is_unresolved()).count(),
        }
    }

    pub fn log(&self) {
        log::info!(
            "Resolved {} functions into {} crates, {} could not be attributed",
            self.resolved_functions,
            self.crates,
            self.unresolved_functions
        );
        log::info!("{} crate dependencies", self.dependencies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AttrValue, Attributes, NodeRecord, Record};
    use crate::pipeline::fold;

    fn occurrence(label: &str, ext: bool, namespace: &str) -> Record {
        Record::Node(NodeRecord::new(
            label,
            Attributes::new()
                .with("ext", AttrValue::flag(ext))
                .with("null", AttrValue::flag(false))
                .with("type", AttrValue::braced(namespace)),
        ))
    }

    #[test]
    fn test_fold_stats_conserve_totals() {
        let internal = r#"[{"path":"io :: crates :: a :: v_1","symbol":"InternalCrate"}]"#;
        let plain = r#"[{"path":"core","symbol":"RustCrate"}]"#;
        let graph = fold(&[
            occurrence("f", true, internal),
            occurrence("f", false, plain),
            occurrence("g", true, internal),
            occurrence("h", false, plain),
        ]);
        let stats = graph.stats();

        assert_eq!(stats.labels, 3);
        assert_eq!(stats.nodes, graph.functions.values().map(|f| f.nodes).sum::<usize>());
        assert_eq!(stats.nodes, 4);
        assert!(stats.nodes_external <= stats.nodes);
        assert_eq!(stats.nodes_external, 2);
        assert_eq!(stats.labels_mixed, 1);
        assert_eq!(stats.labels_merged, 1);
        assert_eq!(stats.labels_with_internal_crate, 1);
        assert_eq!(stats.labels_without_internal_crate, 1);
        assert_eq!(stats.occurrences_with_internal_crate, 2);
        assert_eq!(stats.occurrences_without_internal_crate, 2);
    }
}
