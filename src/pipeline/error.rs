// Tue Jan 20 2026 - Alex

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input file does not exist: {0:?}")]
    MissingInput(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Found {} null nodes, expected at most one: {}", .0.len(), .0.join(", "))]
    MultipleNullNodes(Vec<String>),
    #[error("Edge references node {id} before its definition: {line}")]
    UnmappedEdge { id: String, line: String },
    #[error("Invalid crate pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
