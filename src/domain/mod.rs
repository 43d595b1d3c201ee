// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core logic and types.
//!
//! This module contains the declarations, the schema they resolve to, the value
//! model and the pure pipeline stages (reflection, binding, document building,
//! rendering). It is independent of any storage or parsing concerns.

pub mod binder;
pub mod builder;
pub mod declaration;
pub mod document;
pub mod errors;
pub mod naming;
pub mod reflector;
pub mod schema;
pub mod serializer;
pub mod service;
pub mod spec_path;
pub mod value;

// Re-export commonly used types
pub use binder::{bind, Stage};
pub use builder::build_document;
pub use declaration::{EnumDecl, MethodDecl, SpecDecl, TypeRef};
pub use document::{DocEntry, DocNode, Document, RenderedDocument, Scalar};
pub use errors::{Result, SpecError};
pub use reflector::Reflector;
pub use schema::{NodeKind, Schema, SchemaNode};
pub use serializer::{ArrayCommentStyle, RenderOptions, Serializer};
pub use service::SpecService;
pub use spec_path::{PathSegment, SpecPath};
pub use value::{Value, ValueMap};
