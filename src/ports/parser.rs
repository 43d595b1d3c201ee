// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document parser trait definition.
//!
//! This module defines the `DocumentParser` trait, which turns the text of a spec
//! document into an untyped value tree. Binding that tree against a schema is the
//! job of the loader, not of the parser.

use crate::domain::{Result, ValueMap};

/// A trait for parsing spec documents.
///
/// Implementations return the top-level mapping of the document, keeping key
/// order as written. Empty documents parse to an empty map. Malformed text, or a
/// document whose root is not a mapping, is reported as
/// [`SpecError::ParseError`](crate::domain::SpecError::ParseError).
///
/// # Examples
///
/// ```rust
/// use yamlspec::ports::DocumentParser;
/// use yamlspec::domain::{Result, ValueMap};
///
/// struct KeyValueParser;
///
/// impl DocumentParser for KeyValueParser {
///     fn parse(&self, content: &str) -> Result<ValueMap> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.trim(), v.trim()))
///             .collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["properties"]
///     }
/// }
///
/// let map = KeyValueParser.parse("name = spec").unwrap();
/// assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("spec"));
/// ```
pub trait DocumentParser: Send + Sync {
    /// Parses document content into its top-level mapping.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw text of the document
    ///
    /// # Returns
    ///
    /// * `Ok(ValueMap)` - The parsed top-level mapping
    /// * `Err(SpecError)` - The text is malformed
    fn parse(&self, content: &str) -> Result<ValueMap>;

    /// Returns the file extensions supported by this parser, without the leading dot.
    fn supported_extensions(&self) -> &[&str];
}
