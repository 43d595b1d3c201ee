// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document builder.
//!
//! Projects a schema and runtime values into a [`Document`] tree: values are
//! bound first, then every declared entry is emitted in schema order with its
//! comments attached.

use crate::domain::binder::{bind, Stage};
use crate::domain::{
    DocEntry, DocNode, Document, NodeKind, Result, Scalar, Schema, Value, ValueMap,
};

/// Builds the document tree for `schema`, substituting defaults where `values`
/// has no entry.
///
/// # Errors
///
/// Returns [`SpecError::BindingError`](crate::domain::SpecError::BindingError)
/// when a provided value does not have the shape its node expects, and
/// [`SpecError::ValidationError`](crate::domain::SpecError::ValidationError)
/// when a property validator rejects it.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::{build_document, DocNode, MethodDecl, Reflector, Scalar, SpecDecl, TypeRef};
///
/// let schema = Reflector::new()
///     .with_spec(
///         SpecDecl::new("Config")
///             .method(MethodDecl::getter("port", TypeRef::Int).comment("Port").default(80)),
///     )
///     .reflect("Config")
///     .unwrap();
///
/// let doc = build_document(&schema, None).unwrap();
/// assert_eq!(doc.entries[0].key, "port");
/// assert_eq!(doc.entries[0].comments, ["Port"]);
/// assert_eq!(doc.entries[0].node, DocNode::Scalar(Scalar::Int(80)));
/// ```
pub fn build_document(schema: &Schema, values: Option<&ValueMap>) -> Result<Document> {
    let bound = bind(schema, values, Stage::Build)?;
    let document = Document {
        header: schema.header().to_vec(),
        entries: object_entries(schema, &bound),
    };
    tracing::debug!(
        "Built document for spec '{}' with {} entries",
        schema.name(),
        document.entries.len()
    );
    Ok(document)
}

fn object_entries(schema: &Schema, values: &ValueMap) -> Vec<DocEntry> {
    schema
        .nodes()
        .iter()
        .map(|node| DocEntry {
            key: node.key().to_string(),
            comments: node.comments().to_vec(),
            node: project(node.kind(), values.get(node.key()).unwrap_or(&Value::Null)),
        })
        .collect()
}

fn project(kind: &NodeKind, value: &Value) -> DocNode {
    match (kind, value) {
        (NodeKind::Object(schema), Value::Map(map)) => DocNode::Mapping(object_entries(schema, map)),
        (NodeKind::List(element), Value::List(items)) => {
            DocNode::Sequence(items.iter().map(|item| project(element, item)).collect())
        }
        (NodeKind::Map { value: inner, .. }, Value::Map(map)) => DocNode::Mapping(
            map.iter()
                .map(|(key, value)| DocEntry {
                    key: key.to_string(),
                    comments: Vec::new(),
                    node: project(inner, value),
                })
                .collect(),
        ),
        _ => plain(value),
    }
}

/// Projects a value with no schema information attached.
fn plain(value: &Value) -> DocNode {
    match value {
        Value::Null => DocNode::Scalar(Scalar::Null),
        Value::Bool(b) => DocNode::Scalar(Scalar::Bool(*b)),
        Value::Int(i) => DocNode::Scalar(Scalar::Int(*i)),
        Value::Float(f) => DocNode::Scalar(Scalar::Float(*f)),
        Value::String(s) => DocNode::Scalar(Scalar::String(s.clone())),
        Value::List(items) => DocNode::Sequence(items.iter().map(plain).collect()),
        Value::Map(map) => DocNode::Mapping(
            map.iter()
                .map(|(key, value)| DocEntry {
                    key: key.to_string(),
                    comments: Vec::new(),
                    node: plain(value),
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MethodDecl, Reflector, SpecDecl, SpecError, TypeRef};
    use std::sync::Arc;

    fn schema() -> Arc<Schema> {
        Reflector::new()
            .with_spec(
                SpecDecl::new("Server")
                    .method(MethodDecl::getter("host", TypeRef::String).comment("Host name"))
                    .property("port", TypeRef::Int),
            )
            .with_spec(
                SpecDecl::new("Config")
                    .header("Generated")
                    .method(MethodDecl::getter("name", TypeRef::String).default("spec"))
                    .property("servers", TypeRef::list(TypeRef::named("Server")))
                    .property("aliases", TypeRef::map(TypeRef::String, TypeRef::named("Server"))),
            )
            .reflect("Config")
            .unwrap()
    }

    #[test]
    fn test_defaults_document() {
        let doc = build_document(&schema(), None).unwrap();
        assert_eq!(doc.header, ["Generated"]);
        let keys: Vec<_> = doc.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["name", "servers", "aliases"]);
        assert_eq!(
            doc.entries[0].node,
            DocNode::Scalar(Scalar::String("spec".to_string()))
        );
        assert_eq!(doc.entries[1].node, DocNode::Sequence(Vec::new()));
        assert_eq!(doc.entries[2].node, DocNode::Mapping(Vec::new()));
    }

    #[test]
    fn test_comments_inside_collections() {
        let mut server = ValueMap::new();
        server.insert("host", "a");
        let mut aliases = ValueMap::new();
        aliases.insert("main", Value::Map(server.clone()));
        let mut values = ValueMap::new();
        values.insert("servers", vec![Value::Map(server)]);
        values.insert("aliases", aliases);

        let doc = build_document(&schema(), Some(&values)).unwrap();
        match &doc.entries[1].node {
            DocNode::Sequence(items) => match &items[0] {
                DocNode::Mapping(entries) => {
                    assert_eq!(entries[0].comments, ["Host name"]);
                    assert_eq!(entries[1].key, "port");
                }
                other => panic!("unexpected node {other:?}"),
            },
            other => panic!("unexpected node {other:?}"),
        }
        match &doc.entries[2].node {
            DocNode::Mapping(entries) => {
                assert_eq!(entries[0].key, "main");
                assert!(entries[0].comments.is_empty());
                match &entries[0].node {
                    DocNode::Mapping(fields) => assert_eq!(fields[0].comments, ["Host name"]),
                    other => panic!("unexpected node {other:?}"),
                }
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_binding_error() {
        let mut values = ValueMap::new();
        values.insert("servers", "not a list");
        let err = build_document(&schema(), Some(&values)).unwrap_err();
        assert!(matches!(err, SpecError::BindingError { .. }));
    }
}
