// Mon Jan 19 2026 - Alex

use crate::graph::{Attributes, Dialect, EdgeRecord, NodeRecord, Record};
use once_cell::sync::Lazy;
use regex::Regex;

static STRUCTURAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(?:|\}\s*;?|(?:strict\s+)?(?:di)?graph\b.*\{|(?:node|edge|graph)\s*\[.*\]\s*;?|[A-Za-z_][A-Za-z0-9_]*\s*=.*)\s*$"#,
    )
    .expect("structural line regex should be valid")
});

static LABELED_EDGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*"([^"]*)"\s*->\s*"([^"]*)"\s*(?:\[(.*)\])?\s*;?\s*$"#)
        .expect("labeled edge regex should be valid")
});

static LABELED_NODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*"([^"]*)"\s*(?:\[(.*)\])?\s*;?\s*$"#)
        .expect("labeled node regex should be valid")
});

static RAW_EDGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([A-Za-z0-9_]+)\s*->\s*([A-Za-z0-9_]+)\s*(?:\[(.*)\])?\s*;?\s*$"#)
        .expect("raw edge regex should be valid")
});

static RAW_NODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*([A-Za-z0-9_]+)\s*(?:\[(.*)\])?\s*;?\s*$"#)
        .expect("raw node regex should be valid")
});

/// Line-oriented parser for one dialect of the call graph format.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    dialect: Dialect,
}

impl RecordParser {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    pub fn raw() -> Self {
        Self::new(Dialect::Raw)
    }

    pub fn labeled() -> Self {
        Self::new(Dialect::Labeled)
    }

    pub fn parse_document(&self, text: &str) -> Vec<Record> {
        text.lines().map(|line| self.parse_line(line)).collect()
    }

    pub fn parse_line(&self, line: &str) -> Record {
        let (edge_re, node_re) = match self.dialect {
            Dialect::Raw => (&*RAW_EDGE, &*RAW_NODE),
            Dialect::Labeled => (&*LABELED_EDGE, &*LABELED_NODE),
        };

        if let Some(caps) = edge_re.captures(line) {
            return match parse_attributes(caps.get(3).map(|m| m.as_str()), line) {
                Some(attributes) => Record::Edge(EdgeRecord {
                    source: caps[1].to_string(),
                    target: caps[2].to_string(),
                    attributes,
                }),
                None => Record::Unrecognized(line.to_string()),
            };
        }

        // Raw ids share their alphabet with graph keywords, so structural
        // statements have to be ruled out before a raw node is accepted.
        if STRUCTURAL.is_match(line) {
            return Record::Structural;
        }

        if let Some(caps) = node_re.captures(line) {
            return match parse_attributes(caps.get(2).map(|m| m.as_str()), line) {
                Some(attributes) => Record::Node(NodeRecord {
                    id: caps[1].to_string(),
                    attributes,
                }),
                None => Record::Unrecognized(line.to_string()),
            };
        }

        Record::Unrecognized(line.to_string())
    }
}

fn parse_attributes(text: Option<&str>, line: &str) -> Option<Attributes> {
    match text {
        None => Some(Attributes::new()),
        Some(text) => match Attributes::parse(text) {
            Ok(attributes) => Some(attributes),
            Err(e) => {
                log::debug!("{} in '{}'", e, line);
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_node() {
        let parser = RecordParser::raw();
        let line = r#"	Node0x580c640 [shape=record,label="{ core :: num :: < impl usize > :: wrapping_mul }",ext="{False}",null="{False}",type="{[{"path":"core :: num :: < impl usize > :: wrapping_mul","symbol":"RustCrate"},{"path":"usize","symbol":"RustPrimitiveType"}]}"];"#;

        let node = match parser.parse_line(line) {
            Record::Node(node) => node,
            other => panic!("expected node, got {:?}", other),
        };
        assert_eq!(node.id, "Node0x580c640");
        assert_eq!(node.attributes.get_str("label"), Some("core :: num :: < impl usize > :: wrapping_mul"));
        assert!(node.attributes.get_str("type").unwrap().contains("RustPrimitiveType"));
    }

    #[test]
    fn test_raw_edge() {
        let parser = RecordParser::raw();
        assert_eq!(
            parser.parse_line("\tNode0x1 -> Node0x2;"),
            Record::Edge(EdgeRecord::new("Node0x1", "Node0x2"))
        );
    }

    #[test]
    fn test_structural_lines() {
        let parser = RecordParser::raw();
        for line in ["digraph \"Call graph\" {", "\tlabel=\"Call graph\";", "", "   ", "}", "\tnode [shape=record];"] {
            assert_eq!(parser.parse_line(line), Record::Structural, "line: {:?}", line);
        }
    }

    #[test]
    fn test_labeled_records() {
        let parser = RecordParser::labeled();

        let node = parser.parse_line(r#""io :: crates :: a :: v_1 :: foo" [nodes="{2}"];"#);
        assert_eq!(node.as_node().map(|n| n.id.as_str()), Some("io :: crates :: a :: v_1 :: foo"));

        let bare = parser.parse_line(r#""pkgA";"#);
        assert_eq!(bare, Record::Node(NodeRecord::bare("pkgA")));

        let edge = parser.parse_line(r#""a :: < impl [ T ] > :: f" -> "b";"#);
        assert_eq!(edge, Record::Edge(EdgeRecord::new("a :: < impl [ T ] > :: f", "b")));

        let counted = parser.parse_line(r#""a" -> "b" [occurrences="{4}"];"#);
        assert_eq!(counted.as_edge().unwrap().attributes.get_count("occurrences").unwrap(), Some(4));
    }

    #[test]
    fn test_aggregate_with_colon_spelling() {
        let parser = RecordParser::labeled();
        let line = r#""io :: crates :: a :: v_1 :: f" [nodes: "2", nodes_external: "0", type: "[{"path":"io :: crates :: a :: v_1","symbol":"InternalCrate"}]"];"#;

        let node = match parser.parse_line(line) {
            Record::Node(node) => node,
            other => panic!("expected node, got {:?}", other),
        };
        assert_eq!(node.id, "io :: crates :: a :: v_1 :: f");
        assert_eq!(node.attributes.get_count("nodes").unwrap(), Some(2));
        assert_eq!(
            node.attributes.get_str("type"),
            Some(r#"[{"path":"io :: crates :: a :: v_1","symbol":"InternalCrate"}]"#)
        );
    }

    #[test]
    fn test_node_type_with_arrow_is_not_an_edge() {
        let parser = RecordParser::labeled();
        let line = r#""f" [type="{[{"path":"fn ( ) -> i32","symbol":"RustSymbol"}]}"];"#;
        assert!(parser.parse_line(line).is_node());
    }

    #[test]
    fn test_unrecognized() {
        let labeled = RecordParser::labeled();
        assert_eq!(
            labeled.parse_line("Node0x1 -> Node0x2;"),
            Record::Unrecognized("Node0x1 -> Node0x2;".to_string())
        );
        assert!(matches!(labeled.parse_line(r#""f" [=broken];"#), Record::Unrecognized(_)));

        let raw = RecordParser::raw();
        assert!(matches!(raw.parse_line(r#""a" -> "b";"#), Record::Unrecognized(_)));
    }
}
