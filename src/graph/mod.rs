// Mon Jan 19 2026 - Alex

pub mod attributes;
pub mod error;
pub mod namespace;
pub mod parser;
pub mod record;
pub mod writer;

pub use attributes::{AttrValue, Attributes};
pub use error::GraphError;
pub use namespace::{Namespace, NamespaceEntry, SymbolKind};
pub use parser::RecordParser;
pub use record::{Dialect, EdgeRecord, NodeRecord, Record};
pub use writer::RecordWriter;
