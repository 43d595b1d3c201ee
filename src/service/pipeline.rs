// SPDX-License-Identifier: MIT OR Apache-2.0

//! The generate and load pipelines.
//!
//! These are the pure entry points of the crate: [`generate`] turns a schema and
//! runtime values into commented YAML text, and [`load`] turns such text back
//! into values bound to the schema.

use crate::adapters::YamlParser;
use crate::domain::binder::{bind, Stage};
use crate::domain::{
    build_document, RenderOptions, RenderedDocument, Result, Schema, Serializer, ValueMap,
};
use crate::ports::DocumentParser;

/// Builds and renders the document for `schema`.
///
/// Missing values take their defaults, so `generate(schema, None, ..)` produces
/// the fully commented default document.
///
/// # Examples
///
/// ```rust
/// use yamlspec::domain::{MethodDecl, Reflector, RenderOptions, SpecDecl, TypeRef};
/// use yamlspec::service::generate;
///
/// let schema = Reflector::new()
///     .with_spec(
///         SpecDecl::new("Arena")
///             .header("Arena settings")
///             .method(MethodDecl::getter("capacity", TypeRef::Int).comment("The arena capacity")),
///     )
///     .reflect("Arena")
///     .unwrap();
///
/// let text = generate(&schema, None, &RenderOptions::default()).unwrap().text();
/// assert_eq!(text, "# Arena settings\n\n# The arena capacity\ncapacity: 0\n");
/// ```
pub fn generate(
    schema: &Schema,
    values: Option<&ValueMap>,
    options: &RenderOptions,
) -> Result<RenderedDocument> {
    let document = build_document(schema, values)?;
    let rendered = Serializer::new(*options).render(&document)?;
    tracing::debug!(
        "Generated {} lines for spec '{}'",
        rendered.lines().len(),
        schema.name()
    );
    Ok(rendered)
}

/// Parses `text` as YAML and binds it to `schema`.
///
/// # Examples
///
/// ```rust
/// use yamlspec::domain::{MethodDecl, Reflector, SpecDecl, TypeRef, Value};
/// use yamlspec::service::load;
///
/// let schema = Reflector::new()
///     .with_spec(
///         SpecDecl::new("Arena")
///             .property("capacity", TypeRef::Int)
///             .method(MethodDecl::getter("name", TypeRef::String).default("arena")),
///     )
///     .reflect("Arena")
///     .unwrap();
///
/// let values = load("capacity: 16\n", &schema).unwrap();
/// assert_eq!(values.get("capacity"), Some(&Value::Int(16)));
/// assert_eq!(values.get("name"), Some(&Value::from("arena")));
/// ```
pub fn load(text: &str, schema: &Schema) -> Result<ValueMap> {
    Loader::new().load(text, schema)
}

/// Parses documents and binds them to a schema.
///
/// The parser is pluggable through the [`DocumentParser`] port; YAML is the
/// default.
pub struct Loader {
    parser: Box<dyn DocumentParser>,
}

impl Loader {
    /// Creates a loader using the YAML parser.
    pub fn new() -> Self {
        Self::with_parser(Box::new(YamlParser::new()))
    }

    /// Creates a loader using the given parser.
    pub fn with_parser(parser: Box<dyn DocumentParser>) -> Self {
        Loader { parser }
    }

    /// Returns the parser in use.
    pub fn parser(&self) -> &dyn DocumentParser {
        self.parser.as_ref()
    }

    /// Parses `text` and binds it to `schema`, filling absent keys with defaults.
    ///
    /// # Errors
    ///
    /// * [`SpecError::ParseError`](crate::domain::SpecError::ParseError) - The text is malformed
    /// * [`SpecError::ValidationError`](crate::domain::SpecError::ValidationError) - A value has
    ///   the wrong type or was rejected by a validator
    pub fn load(&self, text: &str, schema: &Schema) -> Result<ValueMap> {
        let parsed = self.parser.parse(text)?;
        let values = bind(schema, Some(&parsed), Stage::Load)?;
        tracing::debug!(
            "Loaded {} keys for spec '{}'",
            parsed.len(),
            schema.name()
        );
        Ok(values)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("extensions", &self.parser.supported_extensions())
            .finish()
    }
}
