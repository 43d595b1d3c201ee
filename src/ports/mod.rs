// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! for the pluggable parts of the spec pipeline. These traits are implemented
//! by adapters in the adapters layer.

pub mod parser;
pub mod store;
pub mod validator;
pub mod watcher;

// Re-export commonly used types
pub use parser::DocumentParser;
pub use store::DocumentStore;
pub use validator::{PostProcessor, PropertyValidator};
pub use watcher::{ChangeCallback, SpecWatcher};
