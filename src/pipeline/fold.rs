// Wed Jan 21 2026 - Alex

use crate::graph::{AttrValue, Attributes, EdgeRecord, GraphError, Namespace, NodeRecord, Record};
use crate::pipeline::{Diagnostic, DiagnosticLog, FoldStats};
use indexmap::{IndexMap, IndexSet};

const COUNTERS: [&str; 6] = [
    "nodes",
    "nodes_external",
    "nodes_not_null",
    "nodes_null",
    "nodes_with_internal_crate",
    "nodes_without_internal_crate",
];

/// All occurrences of one function label, folded together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CgFunction {
    pub label: String,
    /// Raw occurrences folded into this node; more than one means a merge happened.
    pub nodes: usize,
    pub nodes_external: usize,
    pub nodes_not_null: usize,
    pub nodes_null: usize,
    pub nodes_with_internal_crate: usize,
    pub nodes_without_internal_crate: usize,
    /// Namespace metadata as JSON text.
    pub namespace: Option<String>,
    namespace_internal: bool,
}

impl CgFunction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn is_merged(&self) -> bool {
        self.nodes > 1
    }

    fn add_occurrence(&mut self, attributes: &Attributes, diagnostics: &mut DiagnosticLog) {
        self.nodes += 1;

        match attributes.get_bool("ext") {
            Ok(Some(true)) => self.nodes_external += 1,
            Ok(_) => {}
            Err(e) => self.malformed_counter(e, diagnostics),
        }

        match attributes.get_bool("null") {
            Ok(Some(true)) => self.nodes_null += 1,
            Ok(Some(false)) => self.nodes_not_null += 1,
            Ok(None) => {}
            Err(e) => self.malformed_counter(e, diagnostics),
        }

        if let Some(text) = attributes.get_str("type").filter(|t| !t.is_empty()) {
            if self.offer_namespace(text, diagnostics) {
                self.nodes_with_internal_crate += 1;
            } else {
                self.nodes_without_internal_crate += 1;
            }
        }
    }

    fn add_aggregate(&mut self, attributes: &Attributes, diagnostics: &mut DiagnosticLog) {
        for key in COUNTERS {
            let value = match attributes.get_count(key) {
                Ok(value) => value.unwrap_or(0),
                Err(e) => {
                    self.malformed_counter(e, diagnostics);
                    0
                }
            };
            match key {
                "nodes" => self.nodes += value,
                "nodes_external" => self.nodes_external += value,
                "nodes_not_null" => self.nodes_not_null += value,
                "nodes_null" => self.nodes_null += value,
                "nodes_with_internal_crate" => self.nodes_with_internal_crate += value,
                _ => self.nodes_without_internal_crate += value,
            }
        }

        if let Some(text) = attributes.get_str("type").filter(|t| !t.is_empty()) {
            self.offer_namespace(text, diagnostics);
        }
    }

    /// Keeps the first non-empty namespace, unless a later one names an
    /// internal crate and the kept one does not. Returns whether `text`
    /// names an internal crate.
    fn offer_namespace(&mut self, text: &str, diagnostics: &mut DiagnosticLog) -> bool {
        let (internal, empty) = match Namespace::decode(text) {
            Ok(namespace) => (namespace.has_internal_crate(), namespace.is_empty()),
            Err(e) => {
                diagnostics.push(Diagnostic::MalformedNamespace {
                    label: self.label.clone(),
                    reason: e.to_string(),
                });
                (false, false)
            }
        };

        if !empty && (self.namespace.is_none() || (internal && !self.namespace_internal)) {
            self.namespace = Some(text.to_string());
            self.namespace_internal = internal;
        }
        internal
    }

    fn malformed_counter(&self, error: GraphError, diagnostics: &mut DiagnosticLog) {
        diagnostics.push(Diagnostic::MalformedCounter {
            label: self.label.clone(),
            reason: error.to_string(),
        });
    }

    pub fn to_record(&self) -> NodeRecord {
        let mut attributes = Attributes::new()
            .with("nodes", AttrValue::count(self.nodes))
            .with("nodes_external", AttrValue::count(self.nodes_external))
            .with("nodes_not_null", AttrValue::count(self.nodes_not_null))
            .with("nodes_null", AttrValue::count(self.nodes_null))
            .with("nodes_with_internal_crate", AttrValue::count(self.nodes_with_internal_crate))
            .with("nodes_without_internal_crate", AttrValue::count(self.nodes_without_internal_crate));
        if let Some(namespace) = &self.namespace {
            attributes.insert("type", AttrValue::braced(namespace.as_str()));
        }
        NodeRecord::new(self.label.as_str(), attributes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoldedGraph {
    pub functions: IndexMap<String, CgFunction>,
    pub edges: IndexSet<(String, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FoldedGraph {
    pub fn function(&self, label: &str) -> Option<&CgFunction> {
        self.functions.get(label)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(&(source.to_string(), target.to_string()))
    }

    pub fn stats(&self) -> FoldStats {
        FoldStats::from_graph(self)
    }

    pub fn to_records(&self) -> Vec<Record> {
        self.functions
            .values()
            .map(|f| Record::Node(f.to_record()))
            .chain(
                self.edges
                    .iter()
                    .map(|(s, t)| Record::Edge(EdgeRecord::new(s.as_str(), t.as_str()))),
            )
            .collect()
    }
}

/// Folds labeled records from any number of units into one node per label.
/// Records already produced by a fold are recognised by their `nodes`
/// counter and merged counter-wise, so folding can be repeated.
#[derive(Debug, Default)]
pub struct Folder {
    functions: IndexMap<String, CgFunction>,
    edges: IndexSet<(String, String)>,
    diagnostics: DiagnosticLog,
}

impl Folder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_records(&mut self, records: &[Record]) {
        for record in records {
            match record {
                Record::Node(node) => {
                    let function = self
                        .functions
                        .entry(node.id.clone())
                        .or_insert_with(|| CgFunction::new(node.id.as_str()));
                    if node.attributes.contains("nodes") {
                        function.add_aggregate(&node.attributes, &mut self.diagnostics);
                    } else {
                        function.add_occurrence(&node.attributes, &mut self.diagnostics);
                    }
                }
                Record::Edge(edge) => {
                    self.edges.insert((edge.source.clone(), edge.target.clone()));
                }
                Record::Structural => {}
                Record::Unrecognized(line) => {
                    self.diagnostics.push(Diagnostic::UnrecognizedLine(line.clone()))
                }
            }
        }
    }

    pub fn finish(self) -> FoldedGraph {
        FoldedGraph {
            functions: self.functions,
            edges: self.edges,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}

pub fn fold(records: &[Record]) -> FoldedGraph {
    let mut folder = Folder::new();
    folder.add_records(records);
    folder.finish()
}
