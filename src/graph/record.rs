// Mon Jan 19 2026 - Alex

use crate::graph::Attributes;

/// Which identifier syntax a document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Compiler-local tokens such as `Node0x580c640`, label inside the attributes.
    Raw,
    /// Quoted labels as identifiers.
    Labeled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: String,
    pub attributes: Attributes,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    pub fn bare(id: impl Into<String>) -> Self {
        Self::new(id, Attributes::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub attributes: Attributes,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Node(NodeRecord),
    Edge(EdgeRecord),
    /// Blank lines, `digraph ... {`, `}` and graph-level statements.
    Structural,
    Unrecognized(String),
}

impl Record {
    pub fn as_node(&self) -> Option<&NodeRecord> {
        match self {
            Record::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeRecord> {
        match self {
            Record::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Record::Node(_))
    }
}
