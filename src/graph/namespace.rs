// Mon Jan 19 2026 - Alex

use crate::graph::GraphError;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification attached to a namespace path by the annotation pass.
/// Kinds this crate does not interpret are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum SymbolKind {
    InternalCrate,
    ExternalCrate,
    RustCrate,
    RustPrimitiveType,
    RustSymbol,
    LlvmSymbol,
    ExportedSymbol,
    Other(Value),
}

impl SymbolKind {
    pub fn name(&self) -> Option<&'static str> {
        match self {
            SymbolKind::InternalCrate => Some("InternalCrate"),
            SymbolKind::ExternalCrate => Some("ExternalCrate"),
            SymbolKind::RustCrate => Some("RustCrate"),
            SymbolKind::RustPrimitiveType => Some("RustPrimitiveType"),
            SymbolKind::RustSymbol => Some("RustSymbol"),
            SymbolKind::LlvmSymbol => Some("LLVMSymbol"),
            SymbolKind::ExportedSymbol => Some("ExportedSymbol"),
            SymbolKind::Other(_) => None,
        }
    }
}

impl From<Value> for SymbolKind {
    fn from(value: Value) -> Self {
        match value.as_str() {
            Some("InternalCrate") => SymbolKind::InternalCrate,
            Some("ExternalCrate") => SymbolKind::ExternalCrate,
            Some("RustCrate") => SymbolKind::RustCrate,
            Some("RustPrimitiveType") => SymbolKind::RustPrimitiveType,
            Some("RustSymbol") => SymbolKind::RustSymbol,
            Some("LLVMSymbol") => SymbolKind::LlvmSymbol,
            Some("ExportedSymbol") => SymbolKind::ExportedSymbol,
            _ => SymbolKind::Other(value),
        }
    }
}

impl From<SymbolKind> for Value {
    fn from(kind: SymbolKind) -> Self {
        match kind.name() {
            Some(name) => Value::String(name.to_string()),
            None => match kind {
                SymbolKind::Other(value) => value,
                _ => Value::Null,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    pub path: String,
    pub symbol: SymbolKind,
}

impl NamespaceEntry {
    pub fn new(path: impl Into<String>, symbol: SymbolKind) -> Self {
        Self { path: path.into(), symbol }
    }
}

/// Ordered namespace entries decoded from a node's `type` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    entries: Vec<NamespaceEntry>,
}

impl Namespace {
    pub fn new(entries: Vec<NamespaceEntry>) -> Self {
        Self { entries }
    }

    pub fn decode(text: &str) -> Result<Self, GraphError> {
        serde_json::from_str(text)
            .map(|entries| Self { entries })
            .map_err(|e| GraphError::InvalidNamespace(e.to_string()))
    }

    pub fn entries(&self) -> &[NamespaceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_internal_crate(&self) -> bool {
        self.entries.iter().any(|e| e.symbol == SymbolKind::InternalCrate)
    }

    /// Distinct `InternalCrate` paths, first-seen order.
    pub fn internal_crates(&self) -> IndexSet<&str> {
        self.paths_of(&SymbolKind::InternalCrate)
    }

    /// Distinct `ExternalCrate` paths, first-seen order.
    pub fn external_crates(&self) -> IndexSet<&str> {
        self.paths_of(&SymbolKind::ExternalCrate)
    }

    fn paths_of(&self, kind: &SymbolKind) -> IndexSet<&str> {
        self.entries
            .iter()
            .filter(|e| &e.symbol == kind)
            .map(|e| e.path.as_str())
            .collect()
    }
}
