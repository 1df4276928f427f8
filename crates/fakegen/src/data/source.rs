//! YAML data sources.
//!
//! A source is a mapping of lowercase keys to values, lists of values, or
//! nested mappings. Documents in the `<locale>: { faker: { ... } }` layout are
//! unwrapped to the inner mapping.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::data::DataNode;
use crate::interpreter::LoadError;

/// Data compiled into the crate, as `(locale, yaml)` pairs.
pub const BUILTIN_SOURCES: [(&str, &str); 3] = [
    ("en", include_str!("../../data/en.yml")),
    ("en-GB", include_str!("../../data/en-GB.yml")),
    ("de", include_str!("../../data/de.yml")),
];

/// Read and parse the YAML data file at `path`.
pub fn load_file(path: &Path) -> Result<DataNode, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_yaml(&text, path)
}

/// Parse a YAML data document. `origin` names the source in errors.
pub fn parse_yaml(text: &str, origin: &Path) -> Result<DataNode, LoadError> {
    let fail = |message: String| LoadError::Parse {
        path: origin.to_path_buf(),
        message,
    };
    let document: Value = serde_yaml::from_str(text).map_err(|e| fail(e.to_string()))?;
    let root = match document {
        Value::Mapping(mapping) => unwrap_faker_root(mapping),
        Value::Null => Mapping::new(),
        _ => return Err(fail("top level of a data source must be a mapping".to_string())),
    };
    convert_mapping(root, "").map_err(fail)
}

/// Strip a `<locale>: { faker: ... }` wrapper if present.
fn unwrap_faker_root(mapping: Mapping) -> Mapping {
    if mapping.len() != 1 {
        return mapping;
    }
    let faker = mapping
        .values()
        .next()
        .and_then(Value::as_mapping)
        .filter(|locale| locale.len() == 1)
        .and_then(|locale| locale.get("faker"))
        .and_then(Value::as_mapping)
        .cloned();
    faker.unwrap_or(mapping)
}

fn convert_mapping(mapping: Mapping, path: &str) -> Result<DataNode, String> {
    let mut children = BTreeMap::new();
    for (key, value) in mapping {
        let name = scalar_text(&key)
            .ok_or_else(|| format!("non-scalar key under '{}'", display_path(path)))?
            .to_lowercase();
        let child_path = if path.is_empty() {
            name.clone()
        } else {
            format!("{path}.{name}")
        };
        let node = convert_value(value, &child_path)?;
        children.insert(name, node);
    }
    Ok(DataNode::Table(children))
}

fn convert_value(value: Value, path: &str) -> Result<DataNode, String> {
    match value {
        Value::Mapping(mapping) => convert_mapping(mapping, path),
        Value::Sequence(items) => {
            if items.is_empty() {
                return Err(format!("empty list at '{path}'"));
            }
            items
                .iter()
                .map(|item| {
                    scalar_text(item)
                        .ok_or_else(|| format!("lists may only hold scalar values at '{path}'"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(DataNode::List)
        }
        Value::Tagged(tagged) => convert_value(tagged.value, path),
        Value::Null => Err(format!("missing value at '{path}'")),
        scalar => scalar_text(&scalar)
            .map(DataNode::Text)
            .ok_or_else(|| format!("unsupported value at '{path}'")),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}
