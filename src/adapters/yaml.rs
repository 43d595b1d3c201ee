// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document parser adapter.
//!
//! This module provides the `serde_yaml` backed implementation of the
//! `DocumentParser` port, together with the conversion from `serde_yaml::Value`
//! into the crate's own [`Value`] model.

use crate::domain::{Result, SpecError, Value, ValueMap};
use crate::ports::DocumentParser;

/// YAML parser implementation.
///
/// Parses a document into its top-level mapping, keeping keys in the order they
/// appear. Numeric and boolean keys are converted to their string form.
///
/// # Examples
///
/// ```rust
/// use yamlspec::adapters::YamlParser;
/// use yamlspec::domain::Value;
/// use yamlspec::ports::DocumentParser;
///
/// let parser = YamlParser::new();
/// let map = parser.parse("server:\n  host: localhost\n  port: 5432\n").unwrap();
/// let server = map.get("server").and_then(Value::as_map).unwrap();
/// assert_eq!(server.get("port"), Some(&Value::Int(5432)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }
}

impl DocumentParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ValueMap> {
        if content.trim().is_empty() {
            return Ok(ValueMap::new());
        }
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(SpecError::from_yaml_error)?;

        match yaml_to_value(value)? {
            Value::Null => Ok(ValueMap::new()),
            Value::Map(map) => Ok(map),
            other => Err(parse_error(format!(
                "Document root must be a mapping, found {}",
                other.type_name()
            ))),
        }
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// Converts a `serde_yaml` value into a [`Value`].
///
/// # Errors
///
/// Returns [`SpecError::ParseError`] for tagged values, integers that do not fit
/// in an `i64`, keys that are not strings, numbers or booleans, and keys that
/// collide once converted to strings.
pub fn yaml_to_value(value: serde_yaml::Value) -> Result<Value> {
    match value {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if n.is_u64() {
                Err(parse_error(format!("Integer {} is out of range", n)))
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| parse_error(format!("Unsupported number {}", n)))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .map(yaml_to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = ValueMap::new();
            for (key, value) in mapping {
                let key = key_to_string(key)?;
                if map.contains_key(&key) {
                    return Err(parse_error(format!("Duplicate key '{}'", key)));
                }
                map.insert(key, yaml_to_value(value)?);
            }
            Ok(Value::Map(map))
        }
        serde_yaml::Value::Tagged(tagged) => Err(parse_error(format!(
            "Tagged values are not supported: {}",
            tagged.tag
        ))),
    }
}

fn key_to_string(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(parse_error(format!(
            "Mapping keys must be strings, numbers or booleans, found {}",
            describe_yaml(&other)
        ))),
    }
}

fn describe_yaml(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

fn parse_error(message: String) -> SpecError {
    SpecError::ParseError {
        message,
        line: None,
        column: None,
        source: None,
    }
}
