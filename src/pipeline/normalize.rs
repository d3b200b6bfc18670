// Tue Jan 20 2026 - Alex

use crate::graph::{EdgeRecord, NodeRecord, Record, RecordWriter};
use crate::pipeline::{Diagnostic, DiagnosticLog, PipelineError};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct NormalizedUnit {
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rewrites raw node ids into their labels. The id table is built while
/// node records stream past, so a unit must define a node before any edge
/// uses it.
#[derive(Debug, Default)]
pub struct Normalizer {
    labels: HashMap<String, String>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn mapped_count(&self) -> usize {
        self.labels.len()
    }

    pub fn normalize(&mut self, records: &[Record]) -> Result<NormalizedUnit, PipelineError> {
        let mut diagnostics = DiagnosticLog::new();
        let mut out = Vec::with_capacity(records.len());

        for record in records {
            match record {
                Record::Node(node) => {
                    let mut attributes = node.attributes.clone();
                    let Some(label) = attributes.remove("label") else {
                        diagnostics.push(Diagnostic::MissingLabel(RecordWriter::raw().node_line(node)));
                        continue;
                    };
                    let label = label.as_str().trim().to_string();
                    self.labels.insert(node.id.clone(), label.clone());
                    out.push(Record::Node(NodeRecord::new(label, attributes)));
                }
                Record::Edge(edge) => {
                    let source = self.lookup(&edge.source, edge)?;
                    let target = self.lookup(&edge.target, edge)?;
                    out.push(Record::Edge(
                        EdgeRecord::new(source, target).with_attributes(edge.attributes.clone()),
                    ));
                }
                Record::Structural => {}
                Record::Unrecognized(line) => diagnostics.push(Diagnostic::UnrecognizedLine(line.clone())),
            }
        }

        Ok(NormalizedUnit {
            records: out,
            diagnostics: diagnostics.into_vec(),
        })
    }

    fn lookup(&self, id: &str, edge: &EdgeRecord) -> Result<String, PipelineError> {
        self.labels
            .get(id)
            .cloned()
            .ok_or_else(|| PipelineError::UnmappedEdge {
                id: id.to_string(),
                line: RecordWriter::raw().edge_line(edge),
            })
    }
}
