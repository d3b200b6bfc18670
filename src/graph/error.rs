// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Invalid attribute list: {0}")]
    InvalidAttributes(String),
    #[error("Missing value for attribute: {0}")]
    MissingValue(String),
    #[error("Unterminated value for attribute: {0}")]
    UnterminatedValue(String),
    #[error("Invalid boolean for {key}: {value}")]
    InvalidBool { key: String, value: String },
    #[error("Invalid counter for {key}: {value}")]
    InvalidCounter { key: String, value: String },
    #[error("Invalid namespace metadata: {0}")]
    InvalidNamespace(String),
}
