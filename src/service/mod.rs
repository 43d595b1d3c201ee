// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the pipelines and the spec service implementation.
//!
//! [`generate`] and [`load`] are the pure entry points; [`SpecFile`] implements
//! the `SpecService` trait on top of them and a document store.

pub mod pipeline;
pub mod spec_file;

// Re-export commonly used types
pub use pipeline::{generate, load, Loader};
pub use spec_file::{SpecFile, SpecFileBuilder};
