// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory document store adapter.

use crate::domain::{Result, SpecError};
use crate::ports::DocumentStore;
use std::sync::{Arc, RwLock};

/// Document store holding its text in memory.
///
/// Clones share the same content, so a clone kept by the caller observes what
/// a [`SpecFile`](crate::service::SpecFile) saves.
///
/// # Examples
///
/// ```rust
/// use yamlspec::adapters::MemoryStore;
/// use yamlspec::ports::DocumentStore;
///
/// let store = MemoryStore::with_content("port: 80\n");
/// let view = store.clone();
/// store.write("port: 8080\n").unwrap();
/// assert_eq!(view.content().as_deref(), Some("port: 8080\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    content: Arc<RwLock<Option<String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `content`.
    pub fn with_content(content: impl Into<String>) -> Self {
        MemoryStore {
            content: Arc::new(RwLock::new(Some(content.into()))),
        }
    }

    /// Returns a copy of the stored text.
    pub fn content(&self) -> Option<String> {
        self.content.read().ok().and_then(|guard| guard.clone())
    }

    fn poisoned() -> SpecError {
        SpecError::StoreError {
            store_name: "memory".to_string(),
            message: "Store lock poisoned".to_string(),
            source: None,
        }
    }
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self) -> Result<Option<String>> {
        let guard = self.content.read().map_err(|_| Self::poisoned())?;
        Ok(guard.clone())
    }

    fn write(&self, content: &str) -> Result<()> {
        let mut guard = self.content.write().map_err(|_| Self::poisoned())?;
        *guard = Some(content.to_string());
        Ok(())
    }
}
