// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declarations of spec interfaces.
//!
//! A spec is declared as a set of accessor methods, the way a configuration
//! interface lists its getters and setters. Declarations are plain data built with
//! constructors and chained setters; the [`Reflector`](crate::domain::Reflector)
//! turns them into a [`Schema`](crate::domain::Schema).
//!
//! # Examples
//!
//! ```
//! use yamlspec::domain::{MethodDecl, SpecDecl, TypeRef};
//!
//! let spec = SpecDecl::new("ServerConfig")
//!     .header("Server configuration")
//!     .method(
//!         MethodDecl::getter("getMaxPlayers", TypeRef::Int)
//!             .comment("Maximum number of players")
//!             .default(20),
//!     )
//!     .method(MethodDecl::setter("setMaxPlayers", TypeRef::Int))
//!     .property("motd", TypeRef::String);
//!
//! assert_eq!(spec.name(), "ServerConfig");
//! assert_eq!(spec.methods().len(), 3);
//! ```

use crate::domain::Value;
use crate::ports::PropertyValidator;
use std::fmt;
use std::sync::Arc;

/// A reference to the type of a property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A boolean
    Bool,
    /// A signed 64-bit integer
    Int,
    /// A 64-bit float
    Float,
    /// A string
    String,
    /// A list of elements of the inner type
    List(Box<TypeRef>),
    /// A map from the first type to the second
    Map(Box<TypeRef>, Box<TypeRef>),
    /// A registered enum or spec, by name
    Named(String),
}

impl TypeRef {
    /// Returns a list type.
    pub fn list(element: TypeRef) -> Self {
        TypeRef::List(Box::new(element))
    }

    /// Returns a map type.
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map(Box::new(key), Box::new(value))
    }

    /// Returns a reference to a registered enum or spec.
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Bool => write!(f, "bool"),
            TypeRef::Int => write!(f, "int"),
            TypeRef::Float => write!(f, "float"),
            TypeRef::String => write!(f, "string"),
            TypeRef::List(element) => write!(f, "list<{}>", element),
            TypeRef::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            TypeRef::Named(name) => write!(f, "{}", name),
        }
    }
}

/// One accessor method of a spec.
///
/// A method with no return type, or whose name reads as a setter (`setX`), is a
/// setter. Every other method is a getter. Getters and setters resolving to the
/// same property name are merged into one property.
#[derive(Clone)]
pub struct MethodDecl {
    pub(crate) name: String,
    pub(crate) returns: Option<TypeRef>,
    pub(crate) params: Vec<TypeRef>,
    pub(crate) key: Option<String>,
    pub(crate) comments: Option<Vec<String>>,
    pub(crate) order: Option<i32>,
    pub(crate) default: Option<Value>,
    pub(crate) validators: Vec<Arc<dyn PropertyValidator>>,
    pub(crate) ignored: bool,
}

impl MethodDecl {
    /// Creates a method with no return type and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        MethodDecl {
            name: name.into(),
            returns: None,
            params: Vec::new(),
            key: None,
            comments: None,
            order: None,
            default: None,
            validators: Vec::new(),
            ignored: false,
        }
    }

    /// Creates a getter returning `ty`.
    pub fn getter(name: impl Into<String>, ty: TypeRef) -> Self {
        MethodDecl::new(name).returns(ty)
    }

    /// Creates a setter taking a single `ty` parameter.
    pub fn setter(name: impl Into<String>, ty: TypeRef) -> Self {
        MethodDecl::new(name).param(ty)
    }

    /// Sets the return type.
    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.returns = Some(ty);
        self
    }

    /// Appends a parameter.
    pub fn param(mut self, ty: TypeRef) -> Self {
        self.params.push(ty);
        self
    }

    /// Sets an explicit key, used verbatim in the document.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Appends comment text, split on `\n` into lines.
    pub fn comment(mut self, text: impl AsRef<str>) -> Self {
        self.comments
            .get_or_insert_with(Vec::new)
            .extend(text.as_ref().split('\n').map(str::to_string));
        self
    }

    /// Appends several comment entries, each split on `\n`.
    pub fn comments<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines.into_iter().fold(self, |method, line| method.comment(line))
    }

    /// Sets the sort order. Methods without an order come first.
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the declared default value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attaches a validator.
    pub fn validator(mut self, validator: impl PropertyValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Excludes the method from the schema. Ignored methods must declare a default.
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Returns the method name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name)
            .field("returns", &self.returns)
            .field("params", &self.params)
            .field("key", &self.key)
            .field("comments", &self.comments)
            .field("order", &self.order)
            .field("default", &self.default)
            .field("validators", &self.validators.len())
            .field("ignored", &self.ignored)
            .finish()
    }
}

/// A declared spec interface.
#[derive(Clone, Debug)]
pub struct SpecDecl {
    pub(crate) name: String,
    pub(crate) header: Vec<String>,
    pub(crate) methods: Vec<MethodDecl>,
}

impl SpecDecl {
    /// Creates an empty spec.
    pub fn new(name: impl Into<String>) -> Self {
        SpecDecl {
            name: name.into(),
            header: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Appends header text, split on `\n` into lines.
    pub fn header(mut self, text: impl AsRef<str>) -> Self {
        self.header
            .extend(text.as_ref().split('\n').map(str::to_string));
        self
    }

    /// Appends a method.
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Appends a plain getter named after the property.
    pub fn property(self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.method(MethodDecl::getter(name, ty))
    }

    /// Returns the spec name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared methods.
    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }
}

/// A declared enum, rendered as a scalar holding one of its variant names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDecl {
    pub(crate) name: String,
    pub(crate) variants: Vec<String>,
}

impl EnumDecl {
    /// Creates an enum declaration.
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumDecl {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the enum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variant names.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}
