// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default spec service implementation.
//!
//! This module provides [`SpecFile`], the implementation of the `SpecService`
//! trait that keeps the values of one schema in sync with a document store.

use crate::adapters::{FileStore, MemoryStore};
use crate::domain::binder::{bind, coerce, Stage};
use crate::domain::{
    ArrayCommentStyle, RenderOptions, RenderedDocument, Result, Schema, Serializer, SpecError,
    SpecPath, SpecService, Value, ValueMap,
};
use crate::ports::{DocumentParser, DocumentStore, SpecWatcher};
use crate::service::pipeline::{generate, Loader};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// A schema bound to a document store.
///
/// The values are always complete: every declared key holds either a loaded,
/// assigned or default value. Saving renders them with their comments, so
/// opening an old file and saving it adds any keys declared since.
///
/// # Examples
///
/// ```rust
/// use yamlspec::adapters::MemoryStore;
/// use yamlspec::domain::{MethodDecl, Reflector, SpecDecl, SpecPath, SpecService, TypeRef, Value};
/// use yamlspec::service::SpecFile;
///
/// # fn main() -> yamlspec::domain::Result<()> {
/// let schema = Reflector::new()
///     .with_spec(
///         SpecDecl::new("Server")
///             .method(MethodDecl::getter("port", TypeRef::Int).comment("Listen port").default(25565))
///             .method(MethodDecl::setter("port", TypeRef::Int)),
///     )
///     .reflect("Server")?;
///
/// let store = MemoryStore::new();
/// let mut spec = SpecFile::builder(schema)
///     .with_store(Box::new(store.clone()))
///     .build()?;
///
/// spec.set(&SpecPath::from("port"), Value::from(8080))?;
/// spec.save()?;
/// assert_eq!(store.content().as_deref(), Some("# Listen port\nport: 8080\n"));
/// # Ok(())
/// # }
/// ```
pub struct SpecFile {
    /// The schema the values are bound to
    schema: Arc<Schema>,
    /// Where the document is read from and saved to
    store: Box<dyn DocumentStore>,
    /// Parses and binds stored text
    loader: Loader,
    /// Renders the values on save
    serializer: Serializer,
    /// The current values, in document order
    values: ValueMap,
    /// List of registered watchers
    watchers: Vec<Box<dyn SpecWatcher>>,
}

impl SpecFile {
    /// Creates a new spec file builder.
    pub fn builder(schema: Arc<Schema>) -> SpecFileBuilder {
        SpecFileBuilder::new(schema)
    }

    /// Opens the spec file at `path`.
    ///
    /// The file is read if it exists, then written back so it holds every
    /// declared key with its comments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yamlspec::domain::{MethodDecl, Reflector, SpecDecl, SpecService, TypeRef};
    /// use yamlspec::service::SpecFile;
    ///
    /// # fn main() -> yamlspec::domain::Result<()> {
    /// let schema = Reflector::new()
    ///     .with_spec(SpecDecl::new("Server").method(MethodDecl::getter("motd", TypeRef::String).default("hi")))
    ///     .reflect("Server")?;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let path = dir.path().join("server.yml");
    /// let spec = SpecFile::open(schema, &path)?;
    ///
    /// assert_eq!(std::fs::read_to_string(&path).unwrap(), "motd: hi\n");
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(schema: Arc<Schema>, path: impl AsRef<Path>) -> Result<Self> {
        let spec = Self::builder(schema).with_file(path).build()?;
        spec.save()?;
        Ok(spec)
    }

    /// Returns the schema as a shared handle.
    pub fn schema_handle(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    /// Returns the backing store.
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Returns the render options used on save.
    pub fn render_options(&self) -> &RenderOptions {
        self.serializer.options()
    }

    /// Renders the current values without saving them.
    pub fn render(&self) -> Result<RenderedDocument> {
        generate(&self.schema, Some(&self.values), self.serializer.options())
    }

    /// Deserializes the current values into `T`.
    ///
    /// Keys are the emitted document keys, so serde types usually need
    /// `#[serde(rename_all = "kebab-case")]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde::Deserialize;
    /// use yamlspec::domain::{MethodDecl, Reflector, SpecDecl, TypeRef};
    /// use yamlspec::service::SpecFile;
    ///
    /// #[derive(Deserialize)]
    /// #[serde(rename_all = "kebab-case")]
    /// struct Server {
    ///     max_players: i64,
    /// }
    ///
    /// # fn main() -> yamlspec::domain::Result<()> {
    /// let schema = Reflector::new()
    ///     .with_spec(SpecDecl::new("Server").method(MethodDecl::getter("maxPlayers", TypeRef::Int).default(20)))
    ///     .reflect("Server")?;
    ///
    /// let spec = SpecFile::builder(schema).build()?;
    /// let server: Server = spec.get_as()?;
    /// assert_eq!(server.max_players, 20);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self) -> Result<T> {
        let yaml = serde_yaml::to_value(&self.values).map_err(|e| self.typed_error::<T>(e))?;
        serde_yaml::from_value(yaml).map_err(|e| self.typed_error::<T>(e))
    }

    /// Replaces all values with the serialized form of `value`.
    ///
    /// Keys missing from `value` take their defaults. The values are coerced
    /// and validated like any other runtime values; on error nothing changes.
    pub fn set_from<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let yaml = serde_yaml::to_value(value).map_err(|e| self.typed_error::<T>(e))?;
        let map = match crate::adapters::yaml_to_value(yaml)? {
            Value::Map(map) => map,
            Value::Null => ValueMap::new(),
            other => {
                return Err(SpecError::BindingError {
                    path: SpecPath::root().to_string(),
                    expected: format!("object {}", self.schema.name()),
                    found: other.describe(),
                })
            }
        };
        self.values = bind(&self.schema, Some(&map), Stage::Build)?;
        Ok(())
    }

    fn typed_error<T>(&self, err: serde_yaml::Error) -> SpecError {
        SpecError::BindingError {
            path: SpecPath::root().to_string(),
            expected: std::any::type_name::<T>().to_string(),
            found: err.to_string(),
        }
    }

    /// Returns the number of registered watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }
}

impl SpecService for SpecFile {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn values(&self) -> &ValueMap {
        &self.values
    }

    fn get(&self, path: &SpecPath) -> Result<Value> {
        self.values
            .lookup(path)
            .cloned()
            .ok_or_else(|| SpecError::PropertyNotFound {
                path: path.to_string(),
            })
    }

    fn set(&mut self, path: &SpecPath, value: Value) -> Result<()> {
        let not_found = || SpecError::PropertyNotFound {
            path: path.to_string(),
        };
        let node = self.schema.resolve(path).ok_or_else(not_found)?;
        let value = if value.is_null() {
            node.default_value()
        } else {
            let coerced = coerce(node.kind(), &value, path, Stage::Build)?;
            node.validate(path, &coerced)?;
            coerced
        };

        let slot = self.values.lookup_mut(path).ok_or_else(not_found)?;
        *slot = value;
        tracing::debug!("Set '{}' in spec '{}'", path, self.schema.name());
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let values = match self.store.read()? {
            Some(text) => self.loader.load(&text, &self.schema)?,
            None => self.schema.default_values(),
        };
        self.values = values;
        tracing::debug!(
            "Reloaded spec '{}' from {} store",
            self.schema.name(),
            self.store.name()
        );
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let rendered = self.render()?;
        self.store.write(&rendered.text())
    }

    fn reset(&mut self) {
        self.values = self.schema.default_values();
    }

    fn register_watcher(&mut self, watcher: Box<dyn SpecWatcher>) -> Result<()> {
        self.watchers.push(watcher);
        Ok(())
    }
}

impl std::fmt::Debug for SpecFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecFile")
            .field("schema", &self.schema.name())
            .field("store", &self.store.name())
            .field("loader", &self.loader)
            .field("serializer", &self.serializer)
            .field("values", &self.values)
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

/// Builder for [`SpecFile`].
///
/// Without a store the spec lives in a fresh [`MemoryStore`]. `build` reads
/// the store once, so the returned spec already holds the stored values.
///
/// # Examples
///
/// ```rust
/// use yamlspec::adapters::MemoryStore;
/// use yamlspec::domain::{ArrayCommentStyle, Reflector, SpecDecl, TypeRef};
/// use yamlspec::service::SpecFileBuilder;
///
/// # fn main() -> yamlspec::domain::Result<()> {
/// let schema = Reflector::new()
///     .with_spec(SpecDecl::new("Server").property("port", TypeRef::Int))
///     .reflect("Server")?;
///
/// let spec = SpecFileBuilder::new(schema)
///     .with_store(Box::new(MemoryStore::with_content("port: 80\n")))
///     .with_indent(4)
///     .with_array_comment_style(ArrayCommentStyle::AllElements)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SpecFileBuilder {
    schema: Arc<Schema>,
    store: Option<Box<dyn DocumentStore>>,
    parser: Option<Box<dyn DocumentParser>>,
    indent: Option<usize>,
    options: RenderOptions,
}

impl SpecFileBuilder {
    /// Creates a new builder for `schema`.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            store: None,
            parser: None,
            indent: None,
            options: RenderOptions::default(),
        }
    }

    /// Sets the document store.
    pub fn with_store(mut self, store: Box<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Stores the document in the file at `path`.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_store(Box::new(FileStore::new(path)))
    }

    /// Sets the parser used on reload. YAML by default.
    pub fn with_parser(mut self, parser: Box<dyn DocumentParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Sets the indentation width. Checked by [`build`](Self::build).
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Sets how comments on list items are emitted.
    pub fn with_array_comment_style(mut self, style: ArrayCommentStyle) -> Self {
        self.options = self.options.with_array_comment_style(style);
        self
    }

    /// Replaces all render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self.indent = None;
        self
    }

    /// Builds the spec file and loads the stored values.
    ///
    /// # Errors
    ///
    /// * [`SpecError::RenderError`] - The indent is out of range
    /// * Any error from reading, parsing or binding the stored document
    pub fn build(self) -> Result<SpecFile> {
        let options = match self.indent {
            Some(indent) => self.options.with_indent(indent)?,
            None => self.options,
        };
        let loader = match self.parser {
            Some(parser) => Loader::with_parser(parser),
            None => Loader::new(),
        };
        let store = self
            .store
            .unwrap_or_else(|| Box::new(MemoryStore::new()));

        let mut spec = SpecFile {
            values: self.schema.default_values(),
            schema: self.schema,
            store,
            loader,
            serializer: Serializer::new(options),
            watchers: Vec::new(),
        };
        spec.reload()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RangeValidator;
    use crate::domain::{EnumDecl, MethodDecl, Reflector, SpecDecl, TypeRef};
    use crate::ports::ChangeCallback;
    use serde::Deserialize;

    fn server() -> Arc<Schema> {
        Reflector::new()
            .with_enum(EnumDecl::new("Mode", ["SURVIVAL", "CREATIVE"]))
            .with_spec(
                SpecDecl::new("Messages")
                    .method(MethodDecl::getter("welcome", TypeRef::String).default("Hello")),
            )
            .with_spec(
                SpecDecl::new("Server")
                    .method(
                        MethodDecl::getter("maxPlayers", TypeRef::Int)
                            .comment("Player limit")
                            .default(20)
                            .validator(RangeValidator::new(1.0, 100.0)),
                    )
                    .method(MethodDecl::getter("mode", TypeRef::named("Mode")).default("SURVIVAL"))
                    .method(MethodDecl::getter("ops", TypeRef::list(TypeRef::String)))
                    .method(MethodDecl::getter("messages", TypeRef::named("Messages"))),
            )
            .reflect("Server")
            .unwrap()
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    struct Messages {
        welcome: String,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    struct Server {
        max_players: i64,
        mode: String,
        ops: Vec<String>,
        messages: Messages,
    }

    #[test]
    fn test_build_without_store_uses_defaults() {
        let spec = SpecFile::builder(server()).build().unwrap();
        assert_eq!(spec.store().name(), "memory");
        assert_eq!(spec.get(&"max-players".into()).unwrap(), Value::Int(20));
        assert_eq!(
            spec.get(&"messages.welcome".into()).unwrap(),
            Value::from("Hello")
        );
    }

    #[test]
    fn test_build_loads_store() {
        let store = MemoryStore::with_content("max-players: 50\nops: [alice]\n");
        let spec = SpecFile::builder(server())
            .with_store(Box::new(store))
            .build()
            .unwrap();
        assert_eq!(spec.get(&"max-players".into()).unwrap(), Value::Int(50));
        assert_eq!(spec.get(&"ops[0]".into()).unwrap(), Value::from("alice"));
        assert!(matches!(
            spec.get(&"ops[1]".into()),
            Err(SpecError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn test_build_rejects_bad_indent() {
        let result = SpecFile::builder(server()).with_indent(1).build();
        assert!(matches!(result, Err(SpecError::RenderError { .. })));
    }

    #[test]
    fn test_set_coerces_and_validates() {
        let mut spec = SpecFile::builder(server()).build().unwrap();

        spec.set(&"mode".into(), Value::from("creative")).unwrap();
        assert_eq!(spec.get(&"mode".into()).unwrap(), Value::from("CREATIVE"));

        assert!(matches!(
            spec.set(&"max-players".into(), Value::from(500)),
            Err(SpecError::ValidationError { .. })
        ));
        assert!(matches!(
            spec.set(&"max-players".into(), Value::from("many")),
            Err(SpecError::BindingError { .. })
        ));
        assert!(matches!(
            spec.set(&"unknown".into(), Value::from(1)),
            Err(SpecError::PropertyNotFound { .. })
        ));
        assert_eq!(spec.get(&"max-players".into()).unwrap(), Value::Int(20));
    }

    #[test]
    fn test_set_nested_and_null_restores_default() {
        let mut spec = SpecFile::builder(server()).build().unwrap();
        spec.set(&"messages.welcome".into(), Value::from("Hi")).unwrap();
        assert_eq!(
            spec.get(&"messages.welcome".into()).unwrap(),
            Value::from("Hi")
        );

        spec.set(&"messages.welcome".into(), Value::Null).unwrap();
        assert_eq!(
            spec.get(&"messages.welcome".into()).unwrap(),
            Value::from("Hello")
        );
    }

    #[test]
    fn test_save_and_reload() {
        let store = MemoryStore::new();
        let mut spec = SpecFile::builder(server())
            .with_store(Box::new(store.clone()))
            .build()
            .unwrap();

        spec.set(&"max-players".into(), Value::from(64)).unwrap();
        spec.save().unwrap();
        assert!(store.content().unwrap().contains("max-players: 64"));

        store.write("max-players: 8\n").unwrap();
        spec.reload().unwrap();
        assert_eq!(spec.get(&"max-players".into()).unwrap(), Value::Int(8));
    }

    #[test]
    fn test_failed_reload_keeps_values() {
        let store = MemoryStore::with_content("max-players: 30\n");
        let mut spec = SpecFile::builder(server())
            .with_store(Box::new(store.clone()))
            .build()
            .unwrap();

        store.write("max-players: [\n").unwrap();
        assert!(matches!(spec.reload(), Err(SpecError::ParseError { .. })));
        assert_eq!(spec.get(&"max-players".into()).unwrap(), Value::Int(30));
    }

    #[test]
    fn test_reset() {
        let mut spec = SpecFile::builder(server()).build().unwrap();
        spec.set(&"max-players".into(), Value::from(2)).unwrap();
        spec.reset();
        assert_eq!(spec.values(), &spec.schema().default_values());
    }

    #[test]
    fn test_get_as_and_set_from() {
        let mut spec = SpecFile::builder(server()).build().unwrap();
        let mut typed: Server = spec.get_as().unwrap();
        assert_eq!(
            typed,
            Server {
                max_players: 20,
                mode: "SURVIVAL".to_string(),
                ops: Vec::new(),
                messages: Messages {
                    welcome: "Hello".to_string()
                },
            }
        );

        typed.max_players = 40;
        typed.ops.push("bob".to_string());
        spec.set_from(&typed).unwrap();
        assert_eq!(spec.get(&"max-players".into()).unwrap(), Value::Int(40));
        assert_eq!(spec.get(&"ops[0]".into()).unwrap(), Value::from("bob"));

        typed.max_players = 0;
        assert!(matches!(
            spec.set_from(&typed),
            Err(SpecError::ValidationError { .. })
        ));
        assert_eq!(spec.get(&"max-players".into()).unwrap(), Value::Int(40));
    }

    #[test]
    fn test_set_from_rejects_non_objects() {
        let mut spec = SpecFile::builder(server()).build().unwrap();
        assert!(matches!(
            spec.set_from(&vec![1, 2]),
            Err(SpecError::BindingError { .. })
        ));
    }

    #[test]
    fn test_register_watcher() {
        struct NoopWatcher;

        impl SpecWatcher for NoopWatcher {
            fn watch(&mut self, _callback: ChangeCallback) -> Result<()> {
                Ok(())
            }

            fn stop(&mut self) -> Result<()> {
                Ok(())
            }
        }

        let mut spec = SpecFile::builder(server()).build().unwrap();
        spec.register_watcher(Box::new(NoopWatcher)).unwrap();
        assert_eq!(spec.watcher_count(), 1);
    }

    #[test]
    fn test_spec_file_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SpecFile>();
    }

    #[test]
    fn test_open_writes_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.yml");
        std::fs::write(&path, "max-players: 10\n").unwrap();

        let spec = SpecFile::open(server(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, spec.render().unwrap().text());
        assert!(text.starts_with("# Player limit\nmax-players: 10\n"));
        assert!(text.contains("welcome: Hello"));
    }
}
