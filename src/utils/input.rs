// Fri Jan 23 2026 - Alex

use crate::pipeline::{PipelineError, Unit};
use std::fs;
use std::path::Path;

/// Reads one graph file. Invalid UTF-8 is replaced rather than rejected,
/// since labels are only compared, never decoded further.
pub fn read_input<P: AsRef<Path>>(path: P) -> Result<String, PipelineError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::MissingInput(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads every file up front so a missing path fails before any output.
pub fn read_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Unit>, PipelineError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            read_input(path).map(|text| Unit::new(path.display().to_string(), text))
        })
        .collect()
}
