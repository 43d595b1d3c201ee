// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding of untyped values against a schema.
//!
//! Binding fills absent keys with defaults, applies the accepted coercions and
//! runs property validators. The same rules are used when a document is built
//! from runtime values and when a parsed document is loaded; only the error
//! reported for a shape mismatch differs (see [`Stage`]).

use crate::domain::{NodeKind, Result, Schema, SpecError, SpecPath, Value, ValueMap};

/// The pipeline stage a value is bound in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Runtime values handed to the document builder or to `set`.
    /// Mismatches are [`SpecError::BindingError`]s.
    Build,
    /// Values parsed from a document. Mismatches are [`SpecError::ValidationError`]s.
    Load,
}

impl Stage {
    fn mismatch(self, path: &SpecPath, expected: String, value: &Value) -> SpecError {
        match self {
            Stage::Build => SpecError::BindingError {
                path: path.to_string(),
                expected,
                found: value.describe(),
            },
            Stage::Load => SpecError::validation(
                path,
                format!("expected {}, found {}", expected, value.describe()),
            ),
        }
    }

    /// Error for a map key whose canonical spelling is already taken.
    fn duplicate_key(self, path: &SpecPath, canonical: &str) -> SpecError {
        match self {
            Stage::Build => SpecError::BindingError {
                path: path.to_string(),
                expected: "unique key".to_string(),
                found: format!("duplicate of '{}'", canonical),
            },
            Stage::Load => {
                SpecError::validation(path, format!("duplicate of key '{}'", canonical))
            }
        }
    }
}

/// Binds a mapping against a schema.
///
/// Every declared key is present in the result, in schema order. Absent and
/// `null` values take the node's default. Keys the schema does not declare are
/// dropped with a warning.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::binder::{bind, Stage};
/// use yamlspec::domain::{MethodDecl, Reflector, SpecDecl, TypeRef, Value, ValueMap};
///
/// let schema = Reflector::new()
///     .with_spec(
///         SpecDecl::new("Config")
///             .method(MethodDecl::getter("port", TypeRef::Int).default(8080))
///             .property("ratio", TypeRef::Float),
///     )
///     .reflect("Config")
///     .unwrap();
///
/// let mut input = ValueMap::new();
/// input.insert("ratio", 2);
///
/// let bound = bind(&schema, Some(&input), Stage::Load).unwrap();
/// assert_eq!(bound.get("port"), Some(&Value::Int(8080)));
/// assert_eq!(bound.get("ratio"), Some(&Value::Float(2.0)));
/// ```
pub fn bind(schema: &Schema, values: Option<&ValueMap>, stage: Stage) -> Result<ValueMap> {
    bind_object(schema, values, &SpecPath::root(), stage)
}

fn bind_object(
    schema: &Schema,
    values: Option<&ValueMap>,
    path: &SpecPath,
    stage: Stage,
) -> Result<ValueMap> {
    if let Some(values) = values {
        for key in values.keys().filter(|key| schema.node(key).is_none()) {
            tracing::warn!(
                "Dropping key '{}' which is not declared by spec '{}'",
                path.child(key),
                schema.name()
            );
        }
    }

    let mut bound = ValueMap::new();
    for node in schema.nodes() {
        let node_path = path.child(node.key());
        let value = match values.and_then(|v| v.get(node.key())) {
            None | Some(Value::Null) => node.default_value(),
            Some(value) => {
                let value = coerce(node.kind(), value, &node_path, stage)?;
                node.validate(&node_path, &value)?;
                value
            }
        };
        bound.insert(node.key(), value);
    }
    Ok(bound)
}

/// Coerces a single value into the shape of `kind`.
///
/// `null` becomes the kind's implicit default. Integers widen into floats,
/// booleans and numbers are stringified for string nodes, and enum names match
/// exactly first, then case-insensitively, yielding the declared spelling.
pub fn coerce(kind: &NodeKind, value: &Value, path: &SpecPath, stage: Stage) -> Result<Value> {
    if value.is_null() {
        return Ok(kind.implicit_default());
    }
    let coerced = match (kind, value) {
        (NodeKind::Bool, Value::Bool(_))
        | (NodeKind::Int, Value::Int(_))
        | (NodeKind::Float, Value::Float(_))
        | (NodeKind::String, Value::String(_)) => value.clone(),
        (NodeKind::Float, Value::Int(i)) => Value::Float(*i as f64),
        (NodeKind::String, Value::Bool(_) | Value::Int(_) | Value::Float(_)) => {
            Value::String(value.to_string())
        }
        (NodeKind::Enum { variants, .. }, Value::String(name)) => {
            match canonical_variant(variants, name) {
                Some(variant) => Value::String(variant.to_string()),
                None => return Err(stage.mismatch(path, expected_enum(kind, variants), value)),
            }
        }
        (NodeKind::List(element), Value::List(items)) => Value::List(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| coerce(element, item, &path.index(i), stage))
                .collect::<Result<Vec<_>>>()?,
        ),
        (NodeKind::Map { key, value: inner }, Value::Map(entries)) => {
            let mut map = ValueMap::new();
            for (k, v) in entries.iter() {
                let entry_path = path.child(k);
                let k = coerce_key(key, k, &entry_path, stage)?;
                if map.contains_key(&k) {
                    return Err(stage.duplicate_key(&entry_path, &k));
                }
                let v = coerce(inner, v, &entry_path, stage)?;
                map.insert(k, v);
            }
            Value::Map(map)
        }
        (NodeKind::Object(schema), Value::Map(entries)) => {
            Value::Map(bind_object(schema, Some(entries), path, stage)?)
        }
        (NodeKind::Enum { variants, .. }, _) => {
            return Err(stage.mismatch(path, expected_enum(kind, variants), value))
        }
        _ => return Err(stage.mismatch(path, kind.type_name(), value)),
    };
    Ok(coerced)
}

/// Checks a map key against the key kind and returns its canonical spelling.
fn coerce_key(kind: &NodeKind, key: &str, path: &SpecPath, stage: Stage) -> Result<String> {
    let canonical = match kind {
        NodeKind::String => Some(key.to_string()),
        NodeKind::Int => key.parse::<i64>().ok().map(|i| i.to_string()),
        NodeKind::Bool => key.parse::<bool>().ok().map(|b| b.to_string()),
        NodeKind::Enum { variants, .. } => canonical_variant(variants, key).map(str::to_string),
        _ => None,
    };
    canonical.ok_or_else(|| {
        let key_value = Value::String(key.to_string());
        match kind {
            NodeKind::Enum { variants, .. } => {
                stage.mismatch(path, format!("key of {}", expected_enum(kind, variants)), &key_value)
            }
            _ => stage.mismatch(path, format!("{} key", kind.type_name()), &key_value),
        }
    })
}

fn canonical_variant<'a>(variants: &'a [String], name: &str) -> Option<&'a str> {
    variants
        .iter()
        .find(|v| *v == name)
        .or_else(|| variants.iter().find(|v| v.eq_ignore_ascii_case(name)))
        .map(String::as_str)
}

fn expected_enum(kind: &NodeKind, variants: &[String]) -> String {
    format!("{} (one of {})", kind.type_name(), variants.join(", "))
}
