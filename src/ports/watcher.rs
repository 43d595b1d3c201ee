// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spec watcher trait definition.
//!
//! This module defines the `SpecWatcher` trait, which provides an interface for
//! watching a spec document for changes and triggering callbacks when changes occur.

use crate::domain::Result;
use std::path::Path;
use std::sync::Arc;

/// Type alias for change notification callbacks.
///
/// This callback is invoked when a watched document changes. It receives the
/// path of the document that changed.
pub type ChangeCallback = Arc<dyn Fn(&Path) + Send + Sync>;

/// A trait for watching spec documents for changes.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow for use in multi-threaded contexts.
///
/// # Examples
///
/// ```rust
/// use yamlspec::ports::{ChangeCallback, SpecWatcher};
/// use yamlspec::domain::Result;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// struct MyWatcher;
///
/// impl SpecWatcher for MyWatcher {
///     fn watch(&mut self, callback: ChangeCallback) -> Result<()> {
///         Ok(())
///     }
///
///     fn stop(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let mut watcher = MyWatcher;
/// let callback = Arc::new(|path: &Path| {
///     println!("Spec changed: {}", path.display());
/// });
/// watcher.watch(callback).unwrap();
/// watcher.stop().unwrap();
/// ```
pub trait SpecWatcher: Send + Sync {
    /// Starts watching for changes.
    ///
    /// When a change is detected, the provided callback is invoked with the path
    /// of the changed document. The callback should be non-blocking to avoid
    /// delaying the watcher.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The watcher was successfully started
    /// * `Err(SpecError)` - An error occurred while starting the watcher
    fn watch(&mut self, callback: ChangeCallback) -> Result<()>;

    /// Stops watching for changes.
    ///
    /// After calling this method, no more change notifications will be sent.
    fn stop(&mut self) -> Result<()>;
}
