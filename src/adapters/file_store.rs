// SPDX-License-Identifier: MIT OR Apache-2.0

//! File system document store adapter.
//!
//! This module provides a store that keeps a spec document in a file. A file
//! that does not exist yet reads as empty, and writing creates any missing
//! parent directories. Writes go to a temporary file next to the target,
//! which is then renamed over it, so a failed save leaves the previous
//! document intact.

use crate::domain::{Result, SpecError};
use crate::ports::DocumentStore;
use directories::ProjectDirs;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Maximum allowed size for a spec document on disk (10MB).
const MAX_DOCUMENT_SIZE: u64 = 10 * 1024 * 1024;

const STORE_NAME: &str = "file";

/// Document store backed by a single file.
///
/// # Examples
///
/// ```rust
/// use yamlspec::adapters::FileStore;
/// use yamlspec::ports::DocumentStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = FileStore::new(dir.path().join("nested/server.yml"));
///
/// assert_eq!(store.read().unwrap(), None);
/// store.write("port: 25565\n").unwrap();
/// assert_eq!(store.read().unwrap().as_deref(), Some("port: 25565\n"));
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the given file path. The file does not need to exist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a store for `filename` in the OS-appropriate configuration
    /// directory of the application.
    ///
    /// This method uses the `directories` crate to determine the configuration
    /// directory for the current operating system.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    /// * `filename` - The document file name (e.g., "server.yml")
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use yamlspec::adapters::FileStore;
    ///
    /// let store = FileStore::from_default_location("myapp", "com.example", "server.yml").unwrap();
    /// println!("{}", store.path().display());
    /// ```
    pub fn from_default_location(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| SpecError::StoreError {
                store_name: STORE_NAME.to_string(),
                message: "Failed to determine project directories".to_string(),
                source: None,
            })?;

        Ok(Self::new(proj_dirs.config_dir().join(filename)))
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("<unknown>")
            .to_string()
    }

    /// Hidden sibling that a write fills before it replaces the target.
    fn temp_path(&self) -> PathBuf {
        self.path.with_file_name(format!(".{}.tmp", self.file_name()))
    }

    fn error(&self, message: String, source: std::io::Error) -> SpecError {
        SpecError::StoreError {
            store_name: STORE_NAME.to_string(),
            message,
            source: Some(Box::new(source)),
        }
    }
}

impl DocumentStore for FileStore {
    fn name(&self) -> &str {
        STORE_NAME
    }

    fn read(&self) -> Result<Option<String>> {
        // Check file size before reading
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Spec file {} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(self.error(
                    format!("Failed to read file metadata: {}", self.file_name()),
                    e,
                ))
            }
        };

        if metadata.len() > MAX_DOCUMENT_SIZE {
            return Err(SpecError::StoreError {
                store_name: STORE_NAME.to_string(),
                message: format!(
                    "Spec file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_DOCUMENT_SIZE
                ),
                source: None,
            });
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.error(format!("Failed to read spec file: {}", self.file_name()), e))?;
        Ok(Some(content))
    }

    fn write(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                self.error(
                    format!("Failed to create directory for: {}", self.file_name()),
                    e,
                )
            })?;
        }

        let temp_path = self.temp_path();
        let written = File::create(&temp_path)
            .and_then(|mut file| {
                file.write_all(content.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(self.error(
                format!("Failed to write spec file: {}", self.file_name()),
                e,
            ));
        }
        tracing::debug!(
            "Wrote {} bytes to spec file {}",
            content.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing.yml"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_file_store_reads_existing_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "name: spec\n").unwrap();
        temp_file.flush().unwrap();

        let store = FileStore::new(temp_file.path());
        assert_eq!(store.read().unwrap().as_deref(), Some("name: spec\n"));
    }

    #[test]
    fn test_file_store_write_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/c/spec.yml");
        let store = FileStore::new(&path);

        store.write("x: 1\n").unwrap();
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "x: 1\n");
    }

    #[test]
    fn test_file_store_write_overwrites() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("spec.yml"));
        store.write("first: 1\n").unwrap();
        store.write("second: 2\n").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("second: 2\n"));
    }

    #[test]
    fn test_file_store_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("spec.yml"));
        store.write("first: 1\n").unwrap();
        store.write("second: 2\n").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, ["spec.yml"]);
    }

    #[test]
    fn test_file_store_failed_write_keeps_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.yml");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.yml"), "x: 1\n").unwrap();

        let store = FileStore::new(&path);
        let result = store.write("a: 1\n");
        assert!(matches!(result, Err(SpecError::StoreError { .. })));
        assert_eq!(fs::read_to_string(path.join("keep.yml")).unwrap(), "x: 1\n");
        assert!(!dir.path().join(".spec.yml.tmp").exists());
    }

    #[test]
    fn test_file_store_size_limit() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let chunk = vec![b'#'; 1024 * 1024];
        for _ in 0..11 {
            temp_file.write_all(&chunk).unwrap();
        }
        temp_file.flush().unwrap();

        let store = FileStore::new(temp_file.path());
        let result = store.read();
        assert!(matches!(result, Err(SpecError::StoreError { .. })));
        if let Err(e) = result {
            assert!(e.to_string().contains("too large"));
        }
    }

    #[test]
    fn test_file_store_name_and_path() {
        let store = FileStore::new("config/server.yml");
        assert_eq!(store.name(), "file");
        assert_eq!(store.path(), Path::new("config/server.yml"));
    }
}
