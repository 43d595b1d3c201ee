// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in property validators.

use crate::domain::Value;
use crate::ports::PropertyValidator;

/// Rejects numbers outside an inclusive range. Non-numeric values pass.
///
/// # Examples
///
/// ```rust
/// use yamlspec::adapters::RangeValidator;
/// use yamlspec::domain::Value;
/// use yamlspec::ports::PropertyValidator;
///
/// let range = RangeValidator::new(1.0, 32.0);
/// assert!(range.validate(&Value::from(13)).is_ok());
/// assert_eq!(
///     range.validate(&Value::from(40)),
///     Err("Value is too big: '40' against '32' required!".to_string())
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeValidator {
    min: f64,
    max: f64,
}

impl RangeValidator {
    /// Creates a validator accepting `min..=max`.
    pub fn new(min: f64, max: f64) -> Self {
        RangeValidator { min, max }
    }

    /// Creates a validator with only a lower bound.
    pub fn at_least(min: f64) -> Self {
        Self::new(min, f64::INFINITY)
    }

    /// Creates a validator with only an upper bound.
    pub fn at_most(max: f64) -> Self {
        Self::new(f64::NEG_INFINITY, max)
    }
}

impl PropertyValidator for RangeValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        let Some(n) = value.as_f64() else {
            return Ok(());
        };
        if n < self.min {
            Err(format!(
                "Value is too small: '{}' against '{}' required!",
                n, self.min
            ))
        } else if n > self.max {
            Err(format!(
                "Value is too big: '{}' against '{}' required!",
                n, self.max
            ))
        } else {
            Ok(())
        }
    }
}

/// Rejects strings that are empty or only whitespace. Other values pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonBlankValidator;

impl PropertyValidator for NonBlankValidator {
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        match value.as_str() {
            Some(s) if s.trim().is_empty() => Err("Value cannot be blank".to_string()),
            _ => Ok(()),
        }
    }
}
