use crate::domain::{AnalysisError, AnalysisResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Writes a JSON artifact with a trailing newline, creating parent
/// directories as needed. Repeated writes of the same value produce
/// identical bytes.
pub fn write_json_artifact<T: Serialize>(path: &Path, value: &T) -> AnalysisResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| AnalysisError::io(parent, source))?;
        }
    }
    let mut rendered = serde_json::to_string_pretty(value)
        .map_err(|error| AnalysisError::parse(path.display().to_string(), error.to_string()))?;
    rendered.push('\n');
    fs::write(path, rendered).map_err(|source| AnalysisError::io(path, source))
}

pub fn read_json_artifact<T: DeserializeOwned>(path: &Path) -> AnalysisResult<T> {
    let raw = fs::read_to_string(path).map_err(|source| AnalysisError::io(path, source))?;
    serde_json::from_str(&raw)
        .map_err(|error| AnalysisError::parse(path.display().to_string(), error.to_string()))
}
