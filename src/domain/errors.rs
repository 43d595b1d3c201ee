// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the spec crate.
//!
//! This module defines the error types that can occur while declaring specs, building
//! documents, rendering them, and loading them back. All errors use `thiserror` for
//! proper error handling and conversion.

use thiserror::Error;

/// The main error type for spec operations.
///
/// Each pipeline stage reports its own variant: the reflector raises
/// [`SpecError::SchemaError`], the document builder [`SpecError::BindingError`], the
/// parser [`SpecError::ParseError`] and the binder [`SpecError::ValidationError`]. It is
/// marked as `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::errors::SpecError;
///
/// fn lookup() -> Result<i64, SpecError> {
///     Err(SpecError::PropertyNotFound {
///         path: "server.port".to_string(),
///     })
/// }
///
/// assert!(lookup().is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpecError {
    /// A spec declaration could not be turned into a schema.
    #[error("Invalid spec '{spec}': {message}")]
    SchemaError {
        /// The name of the spec being reflected
        spec: String,
        /// What is wrong with the declaration
        message: String,
    },

    /// A runtime value does not match the shape the schema expects.
    #[error("Cannot bind value at '{path}': expected {expected}, found {found}")]
    BindingError {
        /// Path of the offending value
        path: String,
        /// The expected node type
        expected: String,
        /// A description of the value that was provided
        found: String,
    },

    /// The document text is not well-formed.
    #[error("Failed to parse document: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// 1-based line of the error, when known
        line: Option<usize>,
        /// 1-based column of the error, when known
        column: Option<usize>,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A parsed or assigned value was rejected by the schema or a validator.
    #[error("Invalid value at '{path}': {message}")]
    ValidationError {
        /// Path of the offending value
        path: String,
        /// Why the value was rejected
        message: String,
    },

    /// No value or property exists at the requested path.
    #[error("Property not found: {path}")]
    PropertyNotFound {
        /// The path that was not found
        path: String,
    },

    /// A document could not be rendered to text.
    #[error("Failed to render document: {message}")]
    RenderError {
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred in a document store.
    #[error("Document store '{store_name}' error: {message}")]
    StoreError {
        /// The name of the store that encountered the error
        store_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error occurred in a spec watcher.
    #[error("Spec watcher error: {message}")]
    WatcherError {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading or writing a document.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SpecError {
    /// Creates a `SchemaError` for the given spec.
    pub fn schema(spec: impl Into<String>, message: impl Into<String>) -> Self {
        SpecError::SchemaError {
            spec: spec.into(),
            message: message.into(),
        }
    }

    /// Creates a `ValidationError` at the given path.
    pub fn validation(path: impl ToString, message: impl Into<String>) -> Self {
        SpecError::ValidationError {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Creates a `ParseError` from a `serde_yaml` error, keeping its location.
    pub fn from_yaml_error(err: serde_yaml::Error) -> Self {
        let location = err.location();
        SpecError::ParseError {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
            source: Some(Box::new(err)),
        }
    }
}

/// A specialized Result type for spec operations.
pub type Result<T> = std::result::Result<T, SpecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error() {
        let error = SpecError::schema("ServerConfig", "Found 2 getters for property 'name'");
        assert_eq!(
            error.to_string(),
            "Invalid spec 'ServerConfig': Found 2 getters for property 'name'"
        );
    }

    #[test]
    fn test_binding_error() {
        let error = SpecError::BindingError {
            path: "max-players".to_string(),
            expected: "integer".to_string(),
            found: "string \"many\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot bind value at 'max-players': expected integer, found string \"many\""
        );
    }

    #[test]
    fn test_parse_error() {
        let error = SpecError::ParseError {
            message: "unexpected end of stream".to_string(),
            line: Some(3),
            column: Some(1),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse document: unexpected end of stream"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = SpecError::validation("numbers.chunk-radius", "Value is too big");
        assert_eq!(
            error.to_string(),
            "Invalid value at 'numbers.chunk-radius': Value is too big"
        );
    }

    #[test]
    fn test_property_not_found() {
        let error = SpecError::PropertyNotFound {
            path: "missing".to_string(),
        };
        assert_eq!(error.to_string(), "Property not found: missing");
    }

    #[test]
    fn test_store_error() {
        let error = SpecError::StoreError {
            store_name: "file".to_string(),
            message: "Permission denied".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Document store 'file' error: Permission denied"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = SpecError::from(io_error);
        assert!(matches!(error, SpecError::IoError(_)));
    }

    #[test]
    fn test_from_yaml_error_keeps_location() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        let error = SpecError::from_yaml_error(yaml_error);
        match error {
            SpecError::ParseError { line, source, .. } => {
                assert!(line.is_some());
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
