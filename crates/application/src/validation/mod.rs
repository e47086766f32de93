//! Validation Framework
//!
//! Collects field-level problems for use-case requests and turns them into a
//! single [`ApplicationError::ValidationFailed`].

mod datasource;

pub use datasource::*;

use crate::ApplicationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation result containing all errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Field-level errors, keyed by field name
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            field_errors: BTreeMap::new(),
        }
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }

        for (field, errors) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(errors);
        }
    }

    /// Convert to ApplicationError if invalid
    pub fn to_error(&self) -> Option<ApplicationError> {
        if self.valid {
            return None;
        }

        let messages: Vec<String> = self
            .field_errors
            .iter()
            .flat_map(|(field, errors)| errors.iter().map(move |e| format!("{}: {}", field, e)))
            .collect();

        Some(ApplicationError::ValidationFailed(messages.join("; ")))
    }

    /// Ensure validation passed, returning error if not
    pub fn ensure_valid(&self) -> Result<(), ApplicationError> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Trait for validatable types
pub trait Validatable {
    /// Validate the type and return a result
    fn validate_all(&self) -> ValidationResult;
}

/// Reusable validation rules
pub struct ValidationRules;

impl ValidationRules {
    /// Check that a string, once trimmed, is non-empty and at most `max` characters
    pub fn validate_required_text(value: &str, field: &str, max: usize) -> ValidationResult {
        let mut result = ValidationResult::success();
        let trimmed = value.trim();

        if trimmed.is_empty() {
            result.add_field_error(field, "must not be blank");
        } else if trimmed.chars().count() > max {
            result.add_field_error(field, format!("must be at most {} characters", max));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_has_no_error() {
        let result = ValidationResult::success();
        assert!(result.valid);
        assert!(result.to_error().is_none());
        assert!(result.ensure_valid().is_ok());
    }

    #[test]
    fn test_messages_are_sorted_by_field() {
        let mut result = ValidationResult::success();
        result.add_field_error("pluginSrc", "must not be blank");
        result.add_field_error("name", "must not be blank");

        let err = result.to_error().unwrap();
        assert_eq!(
            err,
            ApplicationError::ValidationFailed(
                "name: must not be blank; pluginSrc: must not be blank".to_string()
            )
        );
    }

    #[test]
    fn test_merge_propagates_failure() {
        let mut outer = ValidationResult::success();
        let mut inner = ValidationResult::success();
        inner.add_field_error("name", "too long");

        outer.merge(inner);
        assert!(!outer.valid);
        assert_eq!(outer.field_errors["name"], vec!["too long".to_string()]);
    }

    #[test]
    fn test_required_text_rule() {
        assert!(ValidationRules::validate_required_text("ok", "name", 10).valid);
        assert!(!ValidationRules::validate_required_text("  ", "name", 10).valid);
        assert!(!ValidationRules::validate_required_text("abcdefghijk", "name", 10).valid);
    }
}
