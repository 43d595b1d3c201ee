// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema reflector.
//!
//! The [`Reflector`] holds the registered spec, enum and post-processor
//! declarations and resolves a spec into a [`Schema`]. Resolution is a pure
//! transformation: nothing is cached between calls.

use crate::domain::binder::{coerce, Stage};
use crate::domain::naming::{camel_to_kebab, implies_setter, property_name};
use crate::domain::{
    EnumDecl, MethodDecl, NodeKind, Result, Schema, SchemaNode, SpecDecl, SpecError, SpecPath,
    TypeRef, Value,
};
use crate::ports::{PostProcessor, PropertyValidator};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves spec declarations into schemas.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::{EnumDecl, MethodDecl, NodeKind, Reflector, SpecDecl, TypeRef};
///
/// let reflector = Reflector::new()
///     .with_enum(EnumDecl::new("Mode", ["SURVIVAL", "CREATIVE"]))
///     .with_spec(
///         SpecDecl::new("ServerConfig")
///             .method(
///                 MethodDecl::getter("getGameMode", TypeRef::named("Mode"))
///                     .comment("The default game mode")
///                     .default("SURVIVAL"),
///             )
///             .method(MethodDecl::setter("setGameMode", TypeRef::named("Mode"))),
///     );
///
/// let schema = reflector.reflect("ServerConfig").unwrap();
/// let node = schema.node("game-mode").unwrap();
/// assert!(matches!(node.kind(), NodeKind::Enum { .. }));
/// assert_eq!(node.property(), "gameMode");
/// ```
#[derive(Clone, Default)]
pub struct Reflector {
    specs: HashMap<String, SpecDecl>,
    enums: HashMap<String, EnumDecl>,
    post_processors: Vec<Arc<dyn PostProcessor>>,
}

/// A property being assembled from its getter and setter.
struct Draft<'a> {
    name: String,
    remap: bool,
    ty: Option<&'a TypeRef>,
    has_getter: bool,
    has_setter: bool,
    comments: Option<&'a [String]>,
    default: Option<&'a Value>,
    validators: Vec<Arc<dyn PropertyValidator>>,
}

impl<'a> Draft<'a> {
    fn new(name: String) -> Self {
        Draft {
            name,
            remap: true,
            ty: None,
            has_getter: false,
            has_setter: false,
            comments: None,
            default: None,
            validators: Vec::new(),
        }
    }

    fn set_type(&mut self, ty: &'a TypeRef) -> std::result::Result<(), String> {
        match self.ty {
            None => {
                self.ty = Some(ty);
                Ok(())
            }
            Some(existing) if existing == ty => Ok(()),
            Some(existing) => Err(format!(
                "Inconsistent types for property '{}': received '{}' and '{}'",
                self.name, existing, ty
            )),
        }
    }

    fn key(&self) -> String {
        if self.remap {
            camel_to_kebab(&self.name)
        } else {
            self.name.clone()
        }
    }
}

impl Reflector {
    /// Creates an empty reflector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a spec declaration, returning the reflector.
    pub fn with_spec(mut self, spec: SpecDecl) -> Self {
        self.register(spec);
        self
    }

    /// Registers a spec declaration, replacing any spec with the same name.
    pub fn register(&mut self, spec: SpecDecl) {
        self.specs.insert(spec.name.clone(), spec);
    }

    /// Registers an enum declaration, returning the reflector.
    pub fn with_enum(mut self, decl: EnumDecl) -> Self {
        self.register_enum(decl);
        self
    }

    /// Registers an enum declaration, replacing any enum with the same name.
    pub fn register_enum(&mut self, decl: EnumDecl) {
        self.enums.insert(decl.name.clone(), decl);
    }

    /// Adds a post processor consulted for every resolved node.
    pub fn with_post_processor(mut self, processor: impl PostProcessor + 'static) -> Self {
        self.post_processors.push(Arc::new(processor));
        self
    }

    /// Returns `true` if a spec is registered under `name`.
    pub fn is_spec(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    /// Resolves the named spec, and every spec it references, into a schema.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::SchemaError`] if the spec is unknown, if a property
    /// type has no document mapping, if the spec references itself, or if its
    /// accessor methods do not form valid properties.
    pub fn reflect(&self, name: &str) -> Result<Arc<Schema>> {
        let mut stack = Vec::new();
        self.reflect_spec(name, &mut stack)
    }

    fn reflect_spec(&self, name: &str, stack: &mut Vec<String>) -> Result<Arc<Schema>> {
        let spec = self
            .specs
            .get(name)
            .ok_or_else(|| SpecError::schema(name, "No spec is registered under this name"))?;
        if stack.iter().any(|s| s == name) {
            return Err(SpecError::schema(
                name,
                format!(
                    "Recursive spec reference: {} -> {}",
                    stack.join(" -> "),
                    name
                ),
            ));
        }

        stack.push(name.to_string());
        let schema = self.build_schema(spec, stack);
        stack.pop();

        let schema = schema?;
        tracing::debug!(
            "Reflected spec '{}' with {} properties",
            schema.name,
            schema.nodes.len()
        );
        Ok(Arc::new(schema))
    }

    fn build_schema(&self, spec: &SpecDecl, stack: &mut Vec<String>) -> Result<Schema> {
        let drafts = collect_drafts(spec).map_err(|message| SpecError::schema(&spec.name, message))?;

        let mut keys: HashMap<String, &str> = HashMap::new();
        for draft in &drafts {
            if let Some(other) = keys.insert(draft.key(), &draft.name) {
                return Err(SpecError::schema(
                    &spec.name,
                    format!(
                        "Properties '{}' and '{}' have the same key '{}'",
                        other,
                        draft.name,
                        draft.key()
                    ),
                ));
            }
        }

        let mut nodes = Vec::with_capacity(drafts.len());
        for draft in drafts {
            nodes.push(self.build_node(spec, draft, stack)?);
        }

        Ok(Schema {
            name: spec.name.clone(),
            header: spec.header.clone(),
            nodes,
        })
    }

    fn build_node(&self, spec: &SpecDecl, draft: Draft<'_>, stack: &mut Vec<String>) -> Result<SchemaNode> {
        let ty = draft.ty.ok_or_else(|| {
            SpecError::schema(
                &spec.name,
                format!("Failed to infer the type of property '{}'", draft.name),
            )
        })?;
        let kind = self.resolve_kind(ty, spec, &draft.name, stack)?;
        let key = draft.key();

        let mut node = SchemaNode {
            key,
            property: draft.name,
            kind,
            default: None,
            comments: draft.comments.map(<[String]>::to_vec).unwrap_or_default(),
            validators: draft.validators,
        };
        for processor in &self.post_processors {
            if let Some(validator) = processor.validator_for(&node) {
                node.validators.push(validator);
            }
        }

        if let Some(default) = draft.default.filter(|v| !v.is_null()) {
            let path = SpecPath::root().child(node.key.as_str());
            let invalid = |err: SpecError| {
                SpecError::schema(
                    &spec.name,
                    format!("Invalid default for property '{}': {}", node.property, err),
                )
            };
            let bound = coerce(&node.kind, default, &path, Stage::Load).map_err(invalid)?;
            node.validate(&path, &bound).map_err(invalid)?;
            node.default = Some(bound);
        }
        Ok(node)
    }

    fn resolve_kind(
        &self,
        ty: &TypeRef,
        spec: &SpecDecl,
        property: &str,
        stack: &mut Vec<String>,
    ) -> Result<NodeKind> {
        let kind = match ty {
            TypeRef::Bool => NodeKind::Bool,
            TypeRef::Int => NodeKind::Int,
            TypeRef::Float => NodeKind::Float,
            TypeRef::String => NodeKind::String,
            TypeRef::List(element) => {
                NodeKind::List(Box::new(self.resolve_kind(element, spec, property, stack)?))
            }
            TypeRef::Map(key, value) => {
                let key_kind = self.resolve_kind(key, spec, property, stack)?;
                if !key_kind.is_map_key() {
                    return Err(SpecError::schema(
                        &spec.name,
                        format!(
                            "Property '{}' uses '{}' as a map key; keys must be strings, integers, booleans or enums",
                            property, key
                        ),
                    ));
                }
                NodeKind::Map {
                    key: Box::new(key_kind),
                    value: Box::new(self.resolve_kind(value, spec, property, stack)?),
                }
            }
            TypeRef::Named(name) => {
                if let Some(decl) = self.enums.get(name) {
                    if decl.variants.is_empty() {
                        return Err(SpecError::schema(
                            &spec.name,
                            format!("Enum '{}' used by property '{}' has no variants", name, property),
                        ));
                    }
                    NodeKind::Enum {
                        name: decl.name.clone(),
                        variants: decl.variants.clone(),
                    }
                } else if self.specs.contains_key(name) {
                    NodeKind::Object(self.reflect_spec(name, stack)?)
                } else {
                    return Err(SpecError::schema(
                        &spec.name,
                        format!(
                            "Property '{}' has type '{}' which has no document mapping",
                            property, name
                        ),
                    ));
                }
            }
        };
        Ok(kind)
    }
}

impl std::fmt::Debug for Reflector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut specs: Vec<_> = self.specs.keys().collect();
        specs.sort();
        let mut enums: Vec<_> = self.enums.keys().collect();
        enums.sort();
        f.debug_struct("Reflector")
            .field("specs", &specs)
            .field("enums", &enums)
            .field("post_processors", &self.post_processors.len())
            .finish()
    }
}

/// Groups the methods of a spec into properties, in document order.
fn collect_drafts(spec: &SpecDecl) -> std::result::Result<Vec<Draft<'_>>, String> {
    let mut methods: Vec<&MethodDecl> = spec.methods.iter().collect();
    // Unordered methods first, then ascending order; ties keep declaration order.
    methods.sort_by_key(|m| (m.order.is_some(), m.order.unwrap_or(0)));

    let mut drafts: Vec<Draft<'_>> = Vec::new();
    for method in methods {
        if method.ignored {
            if method.default.is_some() {
                continue;
            }
            return Err(format!(
                "Cannot ignore method '{}' without a default; ignored methods must declare one",
                method.name
            ));
        }

        let name = match &method.key {
            Some(key) => key.clone(),
            None => property_name(&method.name),
        };
        let index = match drafts.iter().position(|d| d.name == name) {
            Some(index) => index,
            None => {
                drafts.push(Draft::new(name.clone()));
                drafts.len() - 1
            }
        };
        let draft = &mut drafts[index];

        if method.key.is_some() {
            draft.remap = false;
        }
        if let Some(comments) = &method.comments {
            if draft.comments.is_some() {
                return Err(format!("Inconsistent comments for property '{}'", name));
            }
            draft.comments = Some(comments.as_slice());
        }
        if let Some(default) = &method.default {
            if draft.default.is_some() {
                return Err(format!("Inconsistent defaults for property '{}'", name));
            }
            draft.default = Some(default);
        }

        if method.returns.is_none() || implies_setter(&method.name) {
            if draft.has_setter {
                return Err(format!("Found 2 setters for property '{}'", name));
            }
            if method.returns.is_some() {
                return Err(format!("Setter for property '{}' must not return a value", name));
            }
            match method.params.as_slice() {
                [] => return Err(format!("Setter for property '{}' has no parameters", name)),
                [ty] => draft.set_type(ty)?,
                _ => {
                    return Err(format!(
                        "Setter for property '{}' has more than 1 parameter",
                        name
                    ))
                }
            }
            draft.has_setter = true;
        } else {
            if draft.has_getter {
                return Err(format!("Found 2 getters for property '{}'", name));
            }
            if !method.params.is_empty() {
                return Err(format!("Getter for property '{}' cannot take parameters", name));
            }
            if let Some(ty) = &method.returns {
                draft.set_type(ty)?;
            }
            draft.has_getter = true;
        }
        draft.validators.extend(method.validators.iter().cloned());
    }

    if let Some(draft) = drafts.iter().find(|d| !d.has_getter) {
        return Err(format!("No getter exists for property '{}'", draft.name));
    }
    Ok(drafts)
}
