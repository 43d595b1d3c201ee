// SPDX-License-Identifier: MIT OR Apache-2.0

//! Commented, type-safe YAML configuration generated from declared specs.
//!
//! A spec is declared as a set of getter and setter methods with comments,
//! defaults and validators. The crate turns that declaration into a schema,
//! renders a YAML document with every comment in place, and loads such
//! documents back with type checks and defaults for whatever is missing.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Declarations, the schema reflector, the document builder,
//!   the serializer, the binder, values and errors
//! - **Ports**: Trait definitions for the pluggable parts (`DocumentParser`,
//!   `DocumentStore`, `PropertyValidator`, `PostProcessor`, `SpecWatcher`)
//! - **Adapters**: The `serde_yaml` parser, file and memory stores, built-in
//!   validators and the file watcher
//! - **Service**: The `generate`/`load` pipelines and `SpecFile`, which ties a
//!   schema to a store
//!
//! # Feature Flags
//!
//! - `reload`: Enable the file watcher used for dynamic reloading
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use yamlspec::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let schema = Reflector::new()
//!     .with_spec(
//!         SpecDecl::new("Server")
//!             .header("Server settings")
//!             .method(
//!                 MethodDecl::getter("maxPlayers", TypeRef::Int)
//!                     .comment("How many players may join")
//!                     .default(20),
//!             ),
//!     )
//!     .reflect("Server")?;
//!
//! let text = generate(&schema, None, &RenderOptions::default())?.text();
//! assert_eq!(
//!     text,
//!     "# Server settings\n\n# How many players may join\nmax-players: 20\n"
//! );
//!
//! let values = load("max-players: 64\n", &schema)?;
//! assert_eq!(values.get("max-players"), Some(&Value::Int(64)));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ArrayCommentStyle, EnumDecl, MethodDecl, Reflector, RenderOptions, Result, Schema,
        SpecDecl, SpecError, SpecPath, SpecService, TypeRef, Value, ValueMap,
    };
    pub use crate::ports::{
        DocumentParser, DocumentStore, PostProcessor, PropertyValidator, SpecWatcher,
    };
    pub use crate::service::{generate, load, SpecFile, SpecFileBuilder};

    pub use crate::adapters::{FileStore, MemoryStore, NonBlankValidator, RangeValidator, YamlParser};
    #[cfg(feature = "reload")]
    pub use crate::adapters::FileWatcher;
}
