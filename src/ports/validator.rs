// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property validation hooks.
//!
//! A `PropertyValidator` checks a single bound value. A `PostProcessor` is
//! consulted once per resolved schema node and may attach a validator to it,
//! which is how cross-cutting rules (ranges, non-blank strings, ...) get applied
//! to many properties at once.

use crate::domain::{SchemaNode, Value};
use std::sync::Arc;

/// Checks a value bound to a property.
///
/// Validators run on declared defaults while the schema is reflected, on every
/// provided value while a document is built, on every loaded value, and on
/// values assigned through [`SpecService::set`](crate::domain::SpecService::set).
/// `Null` values are never passed to a validator.
///
/// # Examples
///
/// ```rust
/// use yamlspec::ports::PropertyValidator;
/// use yamlspec::domain::Value;
///
/// struct EvenValidator;
///
/// impl PropertyValidator for EvenValidator {
///     fn validate(&self, value: &Value) -> Result<(), String> {
///         match value.as_i64() {
///             Some(n) if n % 2 != 0 => Err(format!("'{}' is not even", n)),
///             _ => Ok(()),
///         }
///     }
/// }
///
/// assert!(EvenValidator.validate(&Value::from(4)).is_ok());
/// assert!(EvenValidator.validate(&Value::from(3)).is_err());
/// ```
pub trait PropertyValidator: Send + Sync {
    /// Validates a value.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The value is acceptable
    /// * `Err(message)` - Why the value was rejected
    fn validate(&self, value: &Value) -> std::result::Result<(), String>;
}

impl<F> PropertyValidator for F
where
    F: Fn(&Value) -> std::result::Result<(), String> + Send + Sync,
{
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        self(value)
    }
}

/// Attaches validators to schema nodes as they are resolved.
///
/// # Examples
///
/// ```rust
/// use yamlspec::ports::{PostProcessor, PropertyValidator};
/// use yamlspec::domain::{NodeKind, SchemaNode};
/// use yamlspec::adapters::NonBlankValidator;
/// use std::sync::Arc;
///
/// struct NonBlankStrings;
///
/// impl PostProcessor for NonBlankStrings {
///     fn validator_for(&self, node: &SchemaNode) -> Option<Arc<dyn PropertyValidator>> {
///         match node.kind() {
///             NodeKind::String => Some(Arc::new(NonBlankValidator)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait PostProcessor: Send + Sync {
    /// Returns a validator to attach to `node`, if any.
    fn validator_for(&self, node: &SchemaNode) -> Option<Arc<dyn PropertyValidator>>;
}

impl<F> PostProcessor for F
where
    F: Fn(&SchemaNode) -> Option<Arc<dyn PropertyValidator>> + Send + Sync,
{
    fn validator_for(&self, node: &SchemaNode) -> Option<Arc<dyn PropertyValidator>> {
        self(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PositiveValidator;

    impl PropertyValidator for PositiveValidator {
        fn validate(&self, value: &Value) -> std::result::Result<(), String> {
            match value.as_f64() {
                Some(n) if n <= 0.0 => Err("must be positive".to_string()),
                _ => Ok(()),
            }
        }
    }

    #[test]
    fn test_validator_accepts_and_rejects() {
        assert!(PositiveValidator.validate(&Value::from(1)).is_ok());
        assert_eq!(
            PositiveValidator.validate(&Value::from(-1)),
            Err("must be positive".to_string())
        );
    }

    #[test]
    fn test_closure_validator() {
        let validator = |value: &Value| match value.as_str() {
            Some("") => Err("empty".to_string()),
            _ => Ok(()),
        };
        assert!(validator.validate(&Value::from("x")).is_ok());
        assert!(validator.validate(&Value::from("")).is_err());
    }

    #[test]
    fn test_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Arc<dyn PropertyValidator>>();
        assert_send_sync::<Arc<dyn PostProcessor>>();
    }
}
