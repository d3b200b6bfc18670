// Tue Jan 20 2026 - Alex

use log::Level;
use std::fmt;

/// A per-record problem that was reported and skipped without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnrecognizedLine(String),
    MissingLabel(String),
    DuplicateNode { id: String, kept: String, ignored: String },
    NoNodes,
    MalformedNamespace { label: String, reason: String },
    MalformedCounter { label: String, reason: String },
    UnattributedNode(String),
    UnresolvedNode { line: String, reason: String },
    MultiSourceResolved { label: String, krate: String },
    UnresolvedEdge { source: String, target: String },
}

impl Diagnostic {
    pub fn level(&self) -> Level {
        match self {
            Diagnostic::DuplicateNode { .. }
            | Diagnostic::NoNodes
            | Diagnostic::UnattributedNode(_)
            | Diagnostic::MultiSourceResolved { .. } => Level::Info,
            _ => Level::Warn,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            Diagnostic::UnattributedNode(_) | Diagnostic::UnresolvedNode { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnrecognizedLine(line) => write!(f, "Could not match line '{}'", line),
            Diagnostic::MissingLabel(line) => write!(f, "Node without label '{}'", line),
            Diagnostic::DuplicateNode { id, kept, ignored } => write!(
                f,
                "{} already exists in the lookup table, keeping '{}' over '{}'",
                id, kept, ignored
            ),
            Diagnostic::NoNodes => write!(f, "No nodes in input"),
            Diagnostic::MalformedNamespace { label, reason } => {
                write!(f, "Malformed namespace metadata for '{}': {}", label, reason)
            }
            Diagnostic::MalformedCounter { label, reason } => {
                write!(f, "Malformed counter for '{}': {}", label, reason)
            }
            Diagnostic::UnattributedNode(label) => write!(f, "No crate candidate in '{}'", label),
            Diagnostic::UnresolvedNode { line, reason } => {
                write!(f, "Could not find source for '{}': {}", line, reason)
            }
            Diagnostic::MultiSourceResolved { label, krate } => {
                write!(f, "Found multi source for '{}', resolved to '{}'", label, krate)
            }
            Diagnostic::UnresolvedEdge { source, target } => write!(
                f,
                "Could not find both dependencies '{}' and '{}'",
                source, target
            ),
        }
    }
}

/// Collects diagnostics for a stage and logs each one as it arrives.
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::log!(diagnostic.level(), "{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
