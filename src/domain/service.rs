// SPDX-License-Identifier: MIT OR Apache-2.0

//! Spec service trait definition.
//!
//! This module defines the `SpecService` trait, the main interface for working
//! with a loaded spec: reading and assigning values, reloading from and saving
//! to a store, and reacting to changes.

use crate::domain::{Result, Schema, SpecPath, Value, ValueMap};
use crate::ports::SpecWatcher;

/// The main spec service trait.
///
/// A service owns one schema and the values currently bound to it. Values are
/// always complete: every declared key is present, with its default when nothing
/// else was provided.
///
/// # Examples
///
/// ```rust
/// use yamlspec::domain::{Result, Schema, SpecPath, SpecService, Value, ValueMap};
/// use yamlspec::ports::SpecWatcher;
///
/// struct Fixed {
///     schema: Schema,
///     values: ValueMap,
/// }
///
/// impl SpecService for Fixed {
///     fn schema(&self) -> &Schema { &self.schema }
///     fn values(&self) -> &ValueMap { &self.values }
///     fn get(&self, path: &SpecPath) -> Result<Value> {
///         self.values.lookup(path).cloned().ok_or_else(|| {
///             yamlspec::domain::SpecError::PropertyNotFound { path: path.to_string() }
///         })
///     }
///     fn set(&mut self, _path: &SpecPath, _value: Value) -> Result<()> { Ok(()) }
///     fn reload(&mut self) -> Result<()> { Ok(()) }
///     fn save(&self) -> Result<()> { Ok(()) }
///     fn reset(&mut self) {}
///     fn register_watcher(&mut self, _watcher: Box<dyn SpecWatcher>) -> Result<()> { Ok(()) }
/// }
/// ```
pub trait SpecService {
    /// Returns the schema the values are bound to.
    fn schema(&self) -> &Schema;

    /// Returns the current values, in document order.
    fn values(&self) -> &ValueMap;

    /// Retrieves the value at `path`.
    ///
    /// Paths walk nested objects, maps and lists: `messages.player-joined`,
    /// `servers[0].host`.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The value at the path
    /// * `Err(SpecError::PropertyNotFound)` - Nothing exists at the path
    fn get(&self, path: &SpecPath) -> Result<Value>;

    /// Retrieves the value at `path`, or `default` if nothing exists there.
    fn get_or_default(&self, path: &SpecPath, default: Value) -> Value {
        self.get(path).unwrap_or(default)
    }

    /// Returns `true` if a value exists at `path`.
    fn has(&self, path: &SpecPath) -> bool {
        self.get(path).is_ok()
    }

    /// Assigns a declared property.
    ///
    /// The value is coerced and validated the way the document builder does it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The value was assigned
    /// * `Err(SpecError::PropertyNotFound)` - `path` is not a declared property
    /// * `Err(SpecError::BindingError)` - The value has the wrong shape
    /// * `Err(SpecError::ValidationError)` - A validator rejected the value
    fn set(&mut self, path: &SpecPath, value: Value) -> Result<()>;

    /// Re-reads the values from the backing store.
    ///
    /// On error the current values are left untouched.
    fn reload(&mut self) -> Result<()>;

    /// Renders the current values and writes them to the backing store.
    fn save(&self) -> Result<()>;

    /// Restores every property to its default.
    fn reset(&mut self);

    /// Registers a watcher whose notifications the caller turns into reloads.
    fn register_watcher(&mut self, watcher: Box<dyn SpecWatcher>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Reflector, SpecDecl, SpecError, TypeRef};
    use crate::ports::ChangeCallback;

    struct TestService {
        schema: Schema,
        values: ValueMap,
        watchers: usize,
    }

    impl TestService {
        fn new() -> Self {
            let schema = Reflector::new()
                .with_spec(SpecDecl::new("Config").property("port", TypeRef::Int))
                .reflect("Config")
                .unwrap();
            let values = schema.default_values();
            TestService {
                schema: (*schema).clone(),
                values,
                watchers: 0,
            }
        }
    }

    impl SpecService for TestService {
        fn schema(&self) -> &Schema {
            &self.schema
        }

        fn values(&self) -> &ValueMap {
            &self.values
        }

        fn get(&self, path: &SpecPath) -> Result<Value> {
            self.values
                .lookup(path)
                .cloned()
                .ok_or_else(|| SpecError::PropertyNotFound {
                    path: path.to_string(),
                })
        }

        fn set(&mut self, path: &SpecPath, value: Value) -> Result<()> {
            let slot = self
                .values
                .lookup_mut(path)
                .ok_or_else(|| SpecError::PropertyNotFound {
                    path: path.to_string(),
                })?;
            *slot = value;
            Ok(())
        }

        fn reload(&mut self) -> Result<()> {
            Ok(())
        }

        fn save(&self) -> Result<()> {
            Ok(())
        }

        fn reset(&mut self) {
            self.values = self.schema.default_values();
        }

        fn register_watcher(&mut self, _watcher: Box<dyn SpecWatcher>) -> Result<()> {
            self.watchers += 1;
            Ok(())
        }
    }

    struct NoopWatcher;

    impl SpecWatcher for NoopWatcher {
        fn watch(&mut self, _callback: ChangeCallback) -> Result<()> {
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_service_get_and_has() {
        let service = TestService::new();
        assert_eq!(service.get(&SpecPath::from("port")).unwrap(), Value::Int(0));
        assert!(service.has(&SpecPath::from("port")));
        assert!(!service.has(&SpecPath::from("missing")));
    }

    #[test]
    fn test_service_get_or_default() {
        let service = TestService::new();
        assert_eq!(
            service.get_or_default(&SpecPath::from("missing"), Value::from("fallback")),
            Value::from("fallback")
        );
    }

    #[test]
    fn test_service_set_and_reset() {
        let mut service = TestService::new();
        service.set(&SpecPath::from("port"), Value::Int(80)).unwrap();
        assert_eq!(service.values().get("port"), Some(&Value::Int(80)));
        service.reset();
        assert_eq!(service.values().get("port"), Some(&Value::Int(0)));
    }

    #[test]
    fn test_service_register_watcher() {
        let mut service = TestService::new();
        service.register_watcher(Box::new(NoopWatcher)).unwrap();
        assert_eq!(service.watchers, 1);
    }
}
