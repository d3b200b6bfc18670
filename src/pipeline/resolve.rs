// Thu Jan 22 2026 - Alex

use crate::config::{Config, DEFAULT_CRATE_PATTERN};
use crate::graph::{AttrValue, Attributes, EdgeRecord, Namespace, NodeRecord, Record, RecordWriter};
use crate::pipeline::{Diagnostic, DiagnosticLog, PipelineError, ResolveStats};
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;

static DEFAULT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(DEFAULT_CRATE_PATTERN).expect("default crate pattern should be valid"));

/// Finds crate-qualified paths inside a function label. The crate is taken
/// from the `krate` named group, else the first capture group, else the
/// whole match.
#[derive(Debug, Clone)]
pub struct CratePattern {
    regex: Regex,
}

impl Default for CratePattern {
    fn default() -> Self {
        Self {
            regex: DEFAULT_PATTERN.clone(),
        }
    }
}

impl CratePattern {
    pub fn new(pattern: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Distinct candidate crates in `label`, first-seen order.
    pub fn candidates<'a>(&self, label: &'a str) -> IndexSet<&'a str> {
        self.regex
            .captures_iter(label)
            .filter_map(|caps| caps.name("krate").or_else(|| caps.get(1)).or_else(|| caps.get(0)))
            .map(|m| m.as_str())
            .collect()
    }
}

/// The program-level crate dependency graph.
#[derive(Debug, Clone, Default)]
pub struct CrateGraph {
    /// Crate -> number of functions resolved to it.
    pub crates: IndexMap<String, usize>,
    /// (source, target) -> number of contributing call edges or namespace entries.
    pub dependencies: IndexMap<(String, String), usize>,
    /// Function label -> owning crate.
    pub owners: IndexMap<String, String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CrateGraph {
    pub fn owner_of(&self, label: &str) -> Option<&str> {
        self.owners.get(label).map(String::as_str)
    }

    pub fn has_crate(&self, krate: &str) -> bool {
        self.crates.contains_key(krate)
    }

    pub fn has_dependency(&self, source: &str, target: &str) -> bool {
        self.dependencies.contains_key(&(source.to_string(), target.to_string()))
    }

    pub fn stats(&self) -> ResolveStats {
        ResolveStats::from_graph(self)
    }

    pub fn to_records(&self, with_counts: bool) -> Vec<Record> {
        let nodes = self.crates.iter().map(|(krate, functions)| {
            let attributes = if with_counts {
                Attributes::new().with("functions", AttrValue::count(*functions))
            } else {
                Attributes::new()
            };
            Record::Node(NodeRecord::new(krate.as_str(), attributes))
        });

        let edges = self.dependencies.iter().map(|((source, target), occurrences)| {
            let edge = EdgeRecord::new(source.as_str(), target.as_str());
            Record::Edge(if with_counts {
                edge.with_attributes(Attributes::new().with("occurrences", AttrValue::count(*occurrences)))
            } else {
                edge
            })
        });

        nodes.chain(edges).collect()
    }

    fn register(&mut self, label: &str, krate: &str) {
        *self.crates.entry(krate.to_string()).or_insert(0) += 1;
        self.owners.insert(label.to_string(), krate.to_string());
    }

    fn add_dependency(&mut self, source: &str, target: &str) {
        // A crate trivially depends on itself.
        if source == target {
            return;
        }
        *self
            .dependencies
            .entry((source.to_string(), target.to_string()))
            .or_insert(0) += 1;
    }
}

/// Collapses a folded function-level call graph into crate dependencies.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    pattern: CratePattern,
}

impl Resolver {
    pub fn new(pattern: CratePattern) -> Self {
        Self { pattern }
    }

    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        Ok(Self::new(CratePattern::new(&config.crate_pattern)?))
    }

    pub fn resolve(&self, records: &[Record]) -> CrateGraph {
        let mut graph = CrateGraph::default();
        let mut diagnostics = DiagnosticLog::new();

        for record in records {
            match record {
                Record::Node(node) => self.resolve_node(node, &mut graph, &mut diagnostics),
                Record::Edge(_) | Record::Structural => {}
                Record::Unrecognized(line) => diagnostics.push(Diagnostic::UnrecognizedLine(line.clone())),
            }
        }

        for edge in records.iter().filter_map(Record::as_edge) {
            match (graph.owner_of(&edge.source), graph.owner_of(&edge.target)) {
                (Some(source), Some(target)) => {
                    let (source, target) = (source.to_string(), target.to_string());
                    graph.add_dependency(&source, &target);
                }
                _ => diagnostics.push(Diagnostic::UnresolvedEdge {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                }),
            }
        }

        graph.diagnostics = diagnostics.into_vec();
        graph
    }

    fn resolve_node(&self, node: &NodeRecord, graph: &mut CrateGraph, diagnostics: &mut DiagnosticLog) {
        let candidates = self.pattern.candidates(&node.id);

        let owner = match candidates.len() {
            0 => {
                diagnostics.push(Diagnostic::UnattributedNode(node.id.clone()));
                return;
            }
            1 => candidates[0].to_string(),
            _ => {
                let unresolved = |reason: String| Diagnostic::UnresolvedNode {
                    line: RecordWriter::labeled().node_line(node),
                    reason,
                };

                let namespace = match node.attributes.get_str("type").map(Namespace::decode) {
                    Some(Ok(namespace)) => namespace,
                    Some(Err(e)) => {
                        diagnostics.push(unresolved(e.to_string()));
                        return;
                    }
                    None => {
                        diagnostics.push(unresolved(format!(
                            "{} candidates and no namespace metadata",
                            candidates.len()
                        )));
                        return;
                    }
                };

                let internal = namespace.internal_crates();
                if internal.len() != 1 {
                    diagnostics.push(unresolved(format!(
                        "{} candidates and {} internal crates",
                        candidates.len(),
                        internal.len()
                    )));
                    return;
                }

                let owner = internal[0].to_string();
                diagnostics.push(Diagnostic::MultiSourceResolved {
                    label: node.id.clone(),
                    krate: owner.clone(),
                });
                // Signatures can depend on structs and traits of other crates
                // without calling into them.
                for external in namespace.external_crates() {
                    graph.add_dependency(&owner, external);
                }
                owner
            }
        };

        graph.register(&node.id, &owner);
    }
}
