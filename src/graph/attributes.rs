// Mon Jan 19 2026 - Alex

use crate::graph::GraphError;
use indexmap::IndexMap;
use itertools::Itertools;
use std::fmt;

/// A single attribute value, keeping the spelling it was read with so that
/// records survive a parse/render cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bare(String),
    Quoted(String),
    Braced(String),
}

impl AttrValue {
    pub fn braced(value: impl Into<String>) -> Self {
        AttrValue::Braced(value.into())
    }

    pub fn flag(value: bool) -> Self {
        AttrValue::Braced(if value { "True" } else { "False" }.to_string())
    }

    pub fn count(value: usize) -> Self {
        AttrValue::Braced(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttrValue::Bare(v) | AttrValue::Quoted(v) | AttrValue::Braced(v) => v,
        }
    }

    pub fn as_bool(&self, key: &str) -> Result<bool, GraphError> {
        match self.as_str().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(GraphError::InvalidBool {
                key: key.to_string(),
                value: self.as_str().to_string(),
            }),
        }
    }

    pub fn as_count(&self, key: &str) -> Result<usize, GraphError> {
        self.as_str().parse().map_err(|_| GraphError::InvalidCounter {
            key: key.to_string(),
            value: self.as_str().to_string(),
        })
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bare(v) => write!(f, "{}", v),
            AttrValue::Quoted(v) => write!(f, "\"{}\"", v),
            AttrValue::Braced(v) => write!(f, "\"{{{}}}\"", v),
        }
    }
}

/// Ordered `key=value` list found between the square brackets of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<String, AttrValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma separated attribute list. Both `key=value` and the
    /// older `key: value` spelling are accepted. Braced values (`"{...}"`)
    /// are delimited by brace depth, so they may carry quotes, commas and
    /// nested braces such as JSON namespace payloads.
    pub fn parse(text: &str) -> Result<Self, GraphError> {
        let bytes = text.as_bytes();
        let mut entries = IndexMap::new();
        let mut pos = 0;

        loop {
            while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b',') {
                pos += 1;
            }
            if pos >= bytes.len() {
                break;
            }

            let key_start = pos;
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            if pos == key_start {
                return Err(GraphError::InvalidAttributes(text.to_string()));
            }
            let key = &text[key_start..pos];

            pos = skip_whitespace(bytes, pos);
            if pos >= bytes.len() || (bytes[pos] != b'=' && bytes[pos] != b':') {
                return Err(GraphError::MissingValue(key.to_string()));
            }
            pos = skip_whitespace(bytes, pos + 1);
            if pos >= bytes.len() {
                return Err(GraphError::MissingValue(key.to_string()));
            }

            let (value, next) = read_value(text, pos, key)?;
            entries.insert(key.to_string(), value);

            pos = skip_whitespace(bytes, next);
            if pos < bytes.len() && bytes[pos] != b',' {
                return Err(GraphError::InvalidAttributes(text.to_string()));
            }
        }

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|v| v.as_str())
    }

    /// `Ok(None)` when the key is absent.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, GraphError> {
        self.entries.get(key).map(|v| v.as_bool(key)).transpose()
    }

    pub fn get_count(&self, key: &str) -> Result<Option<usize>, GraphError> {
        self.entries.get(key).map(|v| v.as_count(key)).transpose()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AttrValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: AttrValue) -> Self {
        self.insert(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .entries
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .join(",");
        write!(f, "{}", rendered)
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn read_value(text: &str, start: usize, key: &str) -> Result<(AttrValue, usize), GraphError> {
    let bytes = text.as_bytes();

    if bytes[start] != b'"' {
        let mut end = start;
        while end < bytes.len() && bytes[end] != b',' {
            end += 1;
        }
        return Ok((AttrValue::Bare(text[start..end].trim().to_string()), end));
    }

    if bytes.get(start + 1) == Some(&b'{') {
        if let Some(close) = closing_brace(bytes, start + 1) {
            let inner = text[start + 2..close].trim();
            return Ok((AttrValue::Braced(inner.to_string()), close + 2));
        }
    }

    // The older `key: "value"` spelling quotes JSON payloads directly.
    if matches!(bytes.get(start + 1), Some(b'[') | Some(b'{')) {
        if let Some(close) = closing_bracket(bytes, start + 1) {
            if bytes.get(close + 1) == Some(&b'"') {
                return Ok((AttrValue::Quoted(text[start + 1..=close].to_string()), close + 2));
            }
        }
    }

    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return Ok((AttrValue::Quoted(text[start + 1..pos].to_string()), pos + 1)),
            _ => pos += 1,
        }
    }
    Err(GraphError::UnterminatedValue(key.to_string()))
}

// Index of the `}` that brings the depth back to zero right before a `"`.
fn closing_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && bytes.get(i + 1) == Some(&b'"') {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

// Index of the bracket closing the JSON value opened at `open`. Brackets
// inside JSON strings are not counted.
fn closing_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut i = open;
    while i < bytes.len() {
        match (in_string, bytes[i]) {
            (true, b'\\') => i += 1,
            (true, b'"') => in_string = false,
            (false, b'"') => in_string = true,
            (false, b'[') | (false, b'{') => depth += 1,
            (false, b']') | (false, b'}') => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
