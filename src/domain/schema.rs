// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolved schema description.
//!
//! A [`Schema`] is what the reflector produces from a [`SpecDecl`](crate::domain::SpecDecl):
//! an ordered list of [`SchemaNode`]s, each carrying its emitted key, semantic type,
//! default value, comments and validators. Nested specs own their own schema.

use crate::domain::{PathSegment, Result, SpecError, SpecPath, Value, ValueMap};
use crate::ports::PropertyValidator;
use std::fmt;
use std::sync::Arc;

/// The semantic type of a schema node.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A boolean scalar
    Bool,
    /// An integer scalar
    Int,
    /// A float scalar
    Float,
    /// A string scalar
    String,
    /// A string scalar restricted to the given variant names
    Enum {
        /// The enum name
        name: String,
        /// The allowed variant names
        variants: Vec<String>,
    },
    /// A sequence of the inner kind
    List(Box<NodeKind>),
    /// A mapping from scalar keys to values of the inner kind
    Map {
        /// Kind of the keys
        key: Box<NodeKind>,
        /// Kind of the values
        value: Box<NodeKind>,
    },
    /// A nested spec
    Object(Arc<Schema>),
}

impl NodeKind {
    /// Returns the type name used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            NodeKind::Bool => "boolean".to_string(),
            NodeKind::Int => "integer".to_string(),
            NodeKind::Float => "float".to_string(),
            NodeKind::String => "string".to_string(),
            NodeKind::Enum { name, .. } => format!("enum {}", name),
            NodeKind::List(element) => format!("list of {}", element.type_name()),
            NodeKind::Map { key, value } => {
                format!("map of {} to {}", key.type_name(), value.type_name())
            }
            NodeKind::Object(schema) => format!("object {}", schema.name()),
        }
    }

    /// Returns the value a property of this kind takes when no default is declared.
    ///
    /// Nested objects take their own defaults, collections are empty, booleans
    /// are `false`, numbers are zero, and strings and enums are `Null`.
    pub fn implicit_default(&self) -> Value {
        match self {
            NodeKind::Bool => Value::Bool(false),
            NodeKind::Int => Value::Int(0),
            NodeKind::Float => Value::Float(0.0),
            NodeKind::String | NodeKind::Enum { .. } => Value::Null,
            NodeKind::List(_) => Value::List(Vec::new()),
            NodeKind::Map { .. } => Value::Map(ValueMap::new()),
            NodeKind::Object(schema) => Value::Map(schema.default_values()),
        }
    }

    /// Returns `true` if values of this kind can be used as map keys.
    pub fn is_map_key(&self) -> bool {
        matches!(
            self,
            NodeKind::Bool | NodeKind::Int | NodeKind::String | NodeKind::Enum { .. }
        )
    }
}

/// One entry of a schema.
#[derive(Clone)]
pub struct SchemaNode {
    pub(crate) key: String,
    pub(crate) property: String,
    pub(crate) kind: NodeKind,
    pub(crate) default: Option<Value>,
    pub(crate) comments: Vec<String>,
    pub(crate) validators: Vec<Arc<dyn PropertyValidator>>,
}

impl SchemaNode {
    /// Returns the key emitted in the document.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the property name the node was declared under.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Returns the semantic type.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the comment lines attached to the node.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Returns the declared default, if any.
    pub fn declared_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Returns the default value: the declared one, or the kind's implicit default.
    pub fn default_value(&self) -> Value {
        match &self.default {
            Some(value) => value.clone(),
            None => self.kind.implicit_default(),
        }
    }

    /// Runs the node's validators on a non-null value.
    pub fn validate(&self, path: &SpecPath, value: &Value) -> Result<()> {
        if value.is_null() {
            return Ok(());
        }
        for validator in &self.validators {
            validator
                .validate(value)
                .map_err(|message| SpecError::validation(path, message))?;
        }
        Ok(())
    }
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNode")
            .field("key", &self.key)
            .field("property", &self.property)
            .field("kind", &self.kind)
            .field("default", &self.default)
            .field("comments", &self.comments)
            .field("validators", &self.validators.len())
            .finish()
    }
}

/// The resolved description of a spec.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::{Reflector, SpecDecl, TypeRef, MethodDecl, Value};
///
/// let schema = Reflector::new()
///     .with_spec(
///         SpecDecl::new("Config")
///             .property("serverName", TypeRef::String)
///             .method(MethodDecl::getter("port", TypeRef::Int).default(25565)),
///     )
///     .reflect("Config")
///     .unwrap();
///
/// let keys: Vec<_> = schema.nodes().iter().map(|n| n.key()).collect();
/// assert_eq!(keys, ["server-name", "port"]);
/// assert_eq!(schema.default_values().get("port"), Some(&Value::Int(25565)));
/// ```
#[derive(Clone, Debug)]
pub struct Schema {
    pub(crate) name: String,
    pub(crate) header: Vec<String>,
    pub(crate) nodes: Vec<SchemaNode>,
}

impl Schema {
    /// Returns the spec name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the header lines.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Returns the nodes in document order.
    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }

    /// Looks up a node by its emitted key.
    pub fn node(&self, key: &str) -> Option<&SchemaNode> {
        self.nodes.iter().find(|node| node.key == key)
    }

    /// Returns the default value of every node, in document order.
    pub fn default_values(&self) -> ValueMap {
        self.nodes
            .iter()
            .map(|node| (node.key.clone(), node.default_value()))
            .collect()
    }

    /// Resolves a path of keys through nested objects to a declared node.
    ///
    /// Returns `None` for the root path, for index segments and for keys that
    /// are not declared.
    pub fn resolve(&self, path: &SpecPath) -> Option<&SchemaNode> {
        let (last, parents) = path.segments().split_last()?;
        let mut schema = self;
        for segment in parents {
            let node = match segment {
                PathSegment::Key(key) => schema.node(key)?,
                PathSegment::Index(_) => return None,
            };
            match &node.kind {
                NodeKind::Object(nested) => schema = &**nested,
                _ => return None,
            }
        }
        match last {
            PathSegment::Key(key) => schema.node(key),
            PathSegment::Index(_) => None,
        }
    }
}
