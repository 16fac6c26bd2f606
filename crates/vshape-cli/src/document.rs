//! # Document Loading
//!
//! Reads a data document from disk and converts it to a `serde_json::Value`.
//! The format is chosen by extension: `.yaml`/`.yml` parse as YAML,
//! anything else as JSON. Key order is preserved in both cases.

use std::path::Path;

use serde_json::Value;
use serde_yaml::Value as YamlValue;
use thiserror::Error;

/// The document file could not be loaded or parsed.
#[derive(Error, Debug)]
#[error("document load error for '{path}': {reason}")]
pub struct DocumentError {
    /// Path to the document that failed to load.
    pub path: String,
    /// Reason the document could not be loaded.
    pub reason: String,
}

impl DocumentError {
    fn new(path: &Path, reason: String) -> Self {
        Self {
            path: path.display().to_string(),
            reason,
        }
    }
}

/// Load a JSON or YAML document.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DocumentError::new(path, format!("cannot read file: {e}")))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value = match ext {
        "yaml" | "yml" => parse_yaml(&content),
        _ => serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {e}")),
    };
    value.map_err(|reason| DocumentError::new(path, reason))
}

fn parse_yaml(content: &str) -> Result<Value, String> {
    let yaml: YamlValue = serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
    yaml_to_json_value(&yaml).map_err(|e| format!("YAML document is not JSON-compatible: {e}"))
}

/// YAML to JSON, keeping mapping order. Tags are transparent.
pub fn yaml_to_json_value(yaml: &YamlValue) -> Result<Value, String> {
    Ok(match yaml {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => json_number(n)?,
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => {
            Value::Array(items.iter().map(yaml_to_json_value).collect::<Result<_, _>>()?)
        }
        YamlValue::Mapping(entries) => {
            let mut object = serde_json::Map::with_capacity(entries.len());
            for (key, value) in entries {
                object.insert(mapping_key(key)?, yaml_to_json_value(value)?);
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json_value(&tagged.value)?,
    })
}

// Integers stay integers so `is_integer` sees the same value either format.
fn json_number(n: &serde_yaml::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("number {n} has no JSON form"))
}

/// Object keys are strings in JSON; scalar YAML keys are stringified.
fn mapping_key(key: &YamlValue) -> Result<String, String> {
    match key {
        YamlValue::String(s) => Ok(s.clone()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(format!("mapping key {other:?} is not a scalar")),
    }
}
