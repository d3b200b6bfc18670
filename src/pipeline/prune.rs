// Tue Jan 20 2026 - Alex

use crate::config::DEFAULT_EXTERNAL_NODE_LABEL;
use crate::graph::{AttrValue, Attributes, EdgeRecord, NodeRecord, Record, RecordWriter};
use crate::pipeline::{Diagnostic, DiagnosticLog, PipelineError};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedNode {
    pub id: String,
    pub label: String,
    pub external: bool,
    pub null: bool,
    /// Namespace metadata carried over from the input node, if it had any.
    pub namespace: Option<AttrValue>,
}

impl PrunedNode {
    pub fn to_record(&self) -> NodeRecord {
        let mut attributes = Attributes::new()
            .with("shape", AttrValue::Bare("record".to_string()))
            .with("label", AttrValue::braced(self.label.as_str()))
            .with("ext", AttrValue::flag(self.external))
            .with("null", AttrValue::flag(self.null));
        if let Some(namespace) = &self.namespace {
            attributes.insert("type", namespace.clone());
        }
        NodeRecord::new(self.id.as_str(), attributes)
    }
}

/// One unit with its sentinel nodes removed, still keyed by raw ids.
#[derive(Debug, Clone, Default)]
pub struct PrunedUnit {
    pub nodes: Vec<PrunedNode>,
    pub edges: Vec<(String, String)>,
    pub external_node: Option<String>,
    pub null_node: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PrunedUnit {
    pub fn node(&self, id: &str) -> Option<&PrunedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn to_records(&self) -> Vec<Record> {
        self.nodes
            .iter()
            .map(|n| Record::Node(n.to_record()))
            .chain(
                self.edges
                    .iter()
                    .map(|(s, t)| Record::Edge(EdgeRecord::new(s.as_str(), t.as_str()))),
            )
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Pruner {
    external_label: String,
}

impl Default for Pruner {
    fn default() -> Self {
        Self::new()
    }
}

impl Pruner {
    pub fn new() -> Self {
        Self {
            external_label: DEFAULT_EXTERNAL_NODE_LABEL.to_string(),
        }
    }

    pub fn with_external_label(mut self, label: impl Into<String>) -> Self {
        self.external_label = label.into();
        self
    }

    pub fn prune(&self, records: &[Record]) -> Result<PrunedUnit, PipelineError> {
        let mut diagnostics = DiagnosticLog::new();
        let mut nodes: IndexMap<String, (String, Option<AttrValue>)> = IndexMap::new();
        let mut edges: Vec<(String, String)> = Vec::new();
        let mut external_node: Option<String> = None;
        // Defined without a label: not dangling, but nothing to emit either.
        let mut unlabeled: HashSet<String> = HashSet::new();

        for record in records {
            match record {
                Record::Node(node) => {
                    let Some(label) = node.attributes.get_str("label") else {
                        unlabeled.insert(node.id.clone());
                        diagnostics.push(Diagnostic::MissingLabel(RecordWriter::raw().node_line(node)));
                        continue;
                    };
                    if let Some((kept, _)) = nodes.get(&node.id) {
                        diagnostics.push(Diagnostic::DuplicateNode {
                            id: node.id.clone(),
                            kept: kept.clone(),
                            ignored: label.to_string(),
                        });
                        continue;
                    }
                    if label == self.external_label && external_node.is_none() {
                        external_node = Some(node.id.clone());
                    }
                    nodes.insert(node.id.clone(), (label.to_string(), node.attributes.get("type").cloned()));
                }
                Record::Edge(edge) => edges.push((edge.source.clone(), edge.target.clone())),
                Record::Structural => {}
                Record::Unrecognized(line) => diagnostics.push(Diagnostic::UnrecognizedLine(line.clone())),
            }
        }

        if nodes.is_empty() {
            diagnostics.push(Diagnostic::NoNodes);
            return Ok(PrunedUnit {
                diagnostics: diagnostics.into_vec(),
                ..PrunedUnit::default()
            });
        }

        let null_node = find_null_node(&nodes, &unlabeled, &edges)?;

        let mut null_flagged: HashSet<&str> = HashSet::new();
        let mut external_flagged: HashSet<&str> = HashSet::new();
        let mut pruned_edges = Vec::new();

        for (source, target) in &edges {
            let to_null = null_node.as_deref() == Some(target.as_str());
            let from_external = external_node.as_deref() == Some(source.as_str());

            if to_null {
                null_flagged.insert(source.as_str());
            }
            if from_external {
                external_flagged.insert(target.as_str());
            }
            let touches_unlabeled = unlabeled.contains(source) || unlabeled.contains(target);
            if !to_null && !from_external && !touches_unlabeled {
                pruned_edges.push((source.clone(), target.clone()));
            }
        }

        let pruned_nodes: Vec<PrunedNode> = nodes
            .iter()
            .filter(|(id, _)| external_node.as_deref() != Some(id.as_str()))
            .map(|(id, (label, namespace))| PrunedNode {
                id: id.clone(),
                label: label.clone(),
                external: external_flagged.contains(id.as_str()),
                null: null_flagged.contains(id.as_str()),
                namespace: namespace.clone(),
            })
            .collect();

        log::debug!(
            "Pruned {} of {} edges, {} nodes remain",
            edges.len() - pruned_edges.len(),
            edges.len(),
            pruned_nodes.len()
        );

        Ok(PrunedUnit {
            nodes: pruned_nodes,
            edges: pruned_edges,
            external_node,
            null_node,
            diagnostics: diagnostics.into_vec(),
        })
    }
}

/// The null node has no definition of its own; it only shows up as the
/// target of edges. A unit carries at most one.
fn find_null_node(
    nodes: &IndexMap<String, (String, Option<AttrValue>)>,
    unlabeled: &HashSet<String>,
    edges: &[(String, String)],
) -> Result<Option<String>, PipelineError> {
    let dangling: IndexSet<&str> = edges
        .iter()
        .map(|(_, target)| target.as_str())
        .filter(|target| !nodes.contains_key(*target) && !unlabeled.contains(*target))
        .collect();

    match dangling.len() {
        0 => {
            log::info!("There are no null nodes");
            Ok(None)
        }
        1 => Ok(dangling.first().map(|id| id.to_string())),
        _ => Err(PipelineError::MultipleNullNodes(
            dangling.into_iter().map(String::from).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RecordParser;

    const UNIT: &str = r#"digraph "Call graph" {
	label="Call graph";

	Node0x10 [shape=record,label="{external node}"];
	Node0x10 -> Node0x11;
	Node0x10 -> Node0x12;
	Node0x11 [shape=record,label="{ io :: crates :: a :: v_1 :: main }"];
	Node0x11 -> Node0x12;
	Node0x11 -> Node0x0;
	Node0x12 [shape=record,label="{io :: crates :: a :: v_1 :: helper}",type="{[{"path":"io :: crates :: a :: v_1","symbol":"InternalCrate"}]}"];
	Node0x12 -> Node0x0;
	Node0x13 [shape=record,label="{core :: ptr :: drop_in_place}"];
}
"#;

    fn prune(text: &str) -> Result<PrunedUnit, PipelineError> {
        Pruner::new().prune(&RecordParser::raw().parse_document(text))
    }

    #[test]
    fn test_sentinels_removed_and_flags_set() {
        let unit = prune(UNIT).unwrap();

        assert_eq!(unit.external_node.as_deref(), Some("Node0x10"));
        assert_eq!(unit.null_node.as_deref(), Some("Node0x0"));
        assert!(unit.node("Node0x10").is_none());
        assert_eq!(unit.nodes.len(), 3);

        let main = unit.node("Node0x11").unwrap();
        assert!(main.external && main.null);
        assert_eq!(main.label, "io :: crates :: a :: v_1 :: main");

        let helper = unit.node("Node0x12").unwrap();
        assert!(helper.external && helper.null);

        let drop = unit.node("Node0x13").unwrap();
        assert!(!drop.external && !drop.null);

        assert_eq!(unit.edges, vec![("Node0x11".to_string(), "Node0x12".to_string())]);
        assert!(unit.diagnostics.is_empty());
    }

    #[test]
    fn test_namespace_carried_through() {
        let unit = prune(UNIT).unwrap();
        let records = unit.to_records();
        let text = RecordWriter::raw().render(&records);

        assert!(text.contains(
            r#"Node0x12 [shape=record,label="{io :: crates :: a :: v_1 :: helper}",ext="{True}",null="{True}",type="{[{"path":"io :: crates :: a :: v_1","symbol":"InternalCrate"}]}"];"#
        ));
        assert!(text.contains(r#"Node0x13 [shape=record,label="{core :: ptr :: drop_in_place}",ext="{False}",null="{False}"];"#));
        assert!(text.contains("Node0x11 -> Node0x12;"));
    }

    #[test]
    fn test_null_flag_on_dangling_target() {
        let text = "Node0x1 [shape=record,label=\"{pkgA::foo}\"];\nNode0x1 -> Node0xdead;\n";
        let unit = prune(text).unwrap();

        assert_eq!(unit.null_node.as_deref(), Some("Node0xdead"));
        assert!(unit.node("Node0x1").unwrap().null);
        assert!(unit.edges.is_empty());
    }

    #[test]
    fn test_multiple_null_nodes_is_fatal() {
        let text = "Node0x1 [shape=record,label=\"{f}\"];\nNode0x1 -> Node0x2;\nNode0x1 -> Node0x3;\n";
        match prune(text) {
            Err(PipelineError::MultipleNullNodes(ids)) => assert_eq!(ids, vec!["Node0x2", "Node0x3"]),
            other => panic!("expected MultipleNullNodes, got {:?}", other),
        }
    }

    #[test]
    fn test_no_null_node() {
        let text = "Node0x1 [shape=record,label=\"{f}\"];\nNode0x2 [shape=record,label=\"{g}\"];\nNode0x1 -> Node0x2;\n";
        let unit = prune(text).unwrap();
        assert!(unit.null_node.is_none());
        assert!(unit.external_node.is_none());
        assert_eq!(unit.edges.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let text = "Node0x1 [shape=record,label=\"{f}\"];\nNode0x1 [shape=record,label=\"{g}\"];\n";
        let unit = prune(text).unwrap();

        assert_eq!(unit.nodes.len(), 1);
        assert_eq!(unit.nodes[0].label, "f");
        assert!(matches!(unit.diagnostics[0], Diagnostic::DuplicateNode { .. }));
    }

    #[test]
    fn test_empty_unit() {
        let unit = prune("digraph \"Call graph\" {\n}\n").unwrap();
        assert!(unit.nodes.is_empty());
        assert_eq!(unit.diagnostics, vec![Diagnostic::NoNodes]);
    }

    #[test]
    fn test_unlabeled_nodes_are_not_null_targets() {
        let text = concat!(
            "Node0x1 [shape=record,label=\"{f}\"];\n",
            "Node0x2 [shape=record];\n",
            "Node0x3 [shape=record];\n",
            "Node0x4 [shape=record,label=\"{g}\"];\n",
            "Node0x1 -> Node0x2;\n",
            "Node0x1 -> Node0x3;\n",
            "Node0x1 -> Node0x4;\n",
        );
        let unit = prune(text).unwrap();

        assert!(unit.null_node.is_none());
        assert!(!unit.node("Node0x1").unwrap().null);
        assert_eq!(unit.nodes.len(), 2);
        assert_eq!(unit.edges, vec![("Node0x1".to_string(), "Node0x4".to_string())]);
        let missing = unit
            .diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::MissingLabel(_)))
            .count();
        assert_eq!(missing, 2);
    }

    #[test]
    fn test_unrecognized_line_reported() {
        let text = "Node0x1 [shape=record,label=\"{f}\"];\n!! garbage\n";
        let unit = prune(text).unwrap();
        assert_eq!(unit.diagnostics, vec![Diagnostic::UnrecognizedLine("!! garbage".to_string())]);
        assert_eq!(unit.nodes.len(), 1);
    }
}
