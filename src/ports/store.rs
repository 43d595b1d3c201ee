// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store trait definition.
//!
//! This module defines the `DocumentStore` trait, which abstracts over where the
//! text of a spec document lives (a file on disk, memory, ...).

use crate::domain::Result;

/// A trait for reading and writing the text of a spec document.
///
/// A store that has never been written may not have any content yet. This is
/// reported as `Ok(None)` rather than as an error, so that a missing document
/// simply loads as all defaults.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use yamlspec::ports::DocumentStore;
/// use yamlspec::domain::Result;
/// use std::sync::Mutex;
///
/// struct StringStore {
///     content: Mutex<Option<String>>,
/// }
///
/// impl DocumentStore for StringStore {
///     fn name(&self) -> &str {
///         "string"
///     }
///
///     fn read(&self) -> Result<Option<String>> {
///         Ok(self.content.lock().unwrap().clone())
///     }
///
///     fn write(&self, content: &str) -> Result<()> {
///         *self.content.lock().unwrap() = Some(content.to_string());
///         Ok(())
///     }
/// }
///
/// let store = StringStore { content: Mutex::new(None) };
/// assert_eq!(store.read().unwrap(), None);
/// store.write("name: spec\n").unwrap();
/// assert_eq!(store.read().unwrap().as_deref(), Some("name: spec\n"));
/// ```
pub trait DocumentStore: Send + Sync {
    /// Returns the name of this store, used in logs and error messages.
    fn name(&self) -> &str;

    /// Reads the current document text.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(text))` - The stored document
    /// * `Ok(None)` - Nothing has been stored yet
    /// * `Err(SpecError)` - The store could not be read
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored document text.
    ///
    /// # Arguments
    ///
    /// * `content` - The full text of the document
    fn write(&self, content: &str) -> Result<()>;
}
