// Mon Jan 19 2026 - Alex

use crate::graph::{Dialect, EdgeRecord, NodeRecord, Record};
use std::io::{self, Write};

/// Renders records back into the line syntax the parser reads.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    dialect: Dialect,
    graph_name: Option<String>,
}

impl RecordWriter {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            graph_name: None,
        }
    }

    pub fn raw() -> Self {
        Self::new(Dialect::Raw)
    }

    pub fn labeled() -> Self {
        Self::new(Dialect::Labeled)
    }

    /// Surround the output with `digraph "<name>" { ... }`.
    pub fn wrapped(mut self, name: impl Into<String>) -> Self {
        self.graph_name = Some(name.into());
        self
    }

    pub fn node_line(&self, node: &NodeRecord) -> String {
        let id = self.identifier(&node.id);
        if node.attributes.is_empty() {
            format!("{};", id)
        } else {
            format!("{} [{}];", id, node.attributes)
        }
    }

    pub fn edge_line(&self, edge: &EdgeRecord) -> String {
        let source = self.identifier(&edge.source);
        let target = self.identifier(&edge.target);
        if edge.attributes.is_empty() {
            format!("{} -> {};", source, target)
        } else {
            format!("{} -> {} [{}];", source, target, edge.attributes)
        }
    }

    pub fn record_line(&self, record: &Record) -> Option<String> {
        match record {
            Record::Node(node) => Some(self.node_line(node)),
            Record::Edge(edge) => Some(self.edge_line(edge)),
            Record::Structural | Record::Unrecognized(_) => None,
        }
    }

    pub fn render(&self, records: &[Record]) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer, records);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    pub fn write_to<W: Write>(&self, out: &mut W, records: &[Record]) -> io::Result<()> {
        let indent = match &self.graph_name {
            Some(name) => {
                writeln!(out, "digraph \"{}\" {{", name)?;
                "\t"
            }
            None => "",
        };

        for line in records.iter().filter_map(|r| self.record_line(r)) {
            writeln!(out, "{}{}", indent, line)?;
        }

        if self.graph_name.is_some() {
            writeln!(out, "}}")?;
        }
        Ok(())
    }

    fn identifier(&self, id: &str) -> String {
        match self.dialect {
            Dialect::Raw => id.to_string(),
            Dialect::Labeled => format!("\"{}\"", id),
        }
    }
}
