// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing concrete port implementations.
//!
//! This module contains the `serde_yaml` parser, the document stores, the
//! built-in validators and, with the `reload` feature, the file watcher.

pub mod file_store;
pub mod memory_store;
pub mod validators;
pub mod watchers;
pub mod yaml;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use validators::{NonBlankValidator, RangeValidator};
#[cfg(feature = "reload")]
pub use watchers::FileWatcher;
pub use yaml::{yaml_to_value, YamlParser};
