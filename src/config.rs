// Tue Jan 20 2026 - Alex

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Matches the Präzi unique function identifier prefix
/// `io :: crates :: <name> :: <version> `.
pub const DEFAULT_CRATE_PATTERN: &str = r"(?P<krate>io :: crates :: .+? :: .+?) ";

pub const DEFAULT_EXTERNAL_NODE_LABEL: &str = "external node";

pub const DEFAULT_GRAPH_NAME: &str = "Call graph";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crate_pattern: String,
    pub external_node_label: String,
    pub emit_counts: bool,
    pub wrap_output: bool,
    pub graph_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crate_pattern: DEFAULT_CRATE_PATTERN.to_string(),
            external_node_label: DEFAULT_EXTERNAL_NODE_LABEL.to_string(),
            emit_counts: false,
            wrap_output: false,
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_crate_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.crate_pattern = pattern.into();
        self
    }

    pub fn with_external_node_label(mut self, label: impl Into<String>) -> Self {
        self.external_node_label = label.into();
        self
    }

    pub fn with_emit_counts(mut self, emit: bool) -> Self {
        self.emit_counts = emit;
        self
    }

    pub fn with_wrap_output(mut self, wrap: bool) -> Self {
        self.wrap_output = wrap;
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match ext.to_lowercase().as_str() {
            "json" => {
                let contents = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&contents)?)
            }
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Regex::new(&self.crate_pattern)
            .map_err(|e| ConfigError::Validation(format!("crate_pattern: {}", e)))?;

        if self.external_node_label.trim().is_empty() {
            return Err(ConfigError::Validation("external_node_label must not be empty".to_string()));
        }
        if self.graph_name.contains('"') {
            return Err(ConfigError::Validation("graph_name must not contain quotes".to_string()));
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Validation error: {0}")]
    Validation(String),
}
