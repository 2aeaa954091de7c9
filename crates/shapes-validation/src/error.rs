//! Validation error types and handling

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// A single rule failure at a field path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    /// Path of the value that failed, e.g. `user.tags[2]`
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Additional context such as the violated bound
    pub context: Option<serde_json::Value>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: "validation_failed".to_string(),
            context: None,
        }
    }

    /// Create a validation error with a specific code
    pub fn with_code(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
            context: None,
        }
    }

    /// Set additional context
    pub fn context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every failure found for one value, grouped by field path
#[derive(Debug, Clone, Default, Serialize, Deserialize, Error)]
pub struct ValidationErrors {
    pub errors: HashMap<String, Vec<ValidationError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single validation error under its own field path
    pub fn add(&mut self, error: ValidationError) {
        self.errors
            .entry(error.field.clone())
            .or_default()
            .push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of field paths with at least one error
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Total number of errors across all paths
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|v| v.len()).sum()
    }

    pub fn get_field_errors(&self, field: &str) -> Option<&Vec<ValidationError>> {
        self.errors.get(field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.get(field).is_some_and(|errors| !errors.is_empty())
    }

    /// Error codes reported for a path, in the order the rules ran
    pub fn codes(&self, field: &str) -> Vec<&str> {
        self.errors
            .get(field)
            .map(|errors| errors.iter().map(|e| e.code.as_str()).collect())
            .unwrap_or_default()
    }

    /// True if any path reported the given code
    pub fn has_code(&self, code: &str) -> bool {
        self.errors
            .values()
            .flatten()
            .any(|error| error.code == code)
    }

    /// Merge another ValidationErrors into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, errors) in other.errors {
            self.errors.entry(field).or_default().extend(errors);
        }
    }

    pub fn from_error(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }

    /// Turn an accumulator into a result
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed for {} field(s):", self.errors.len())?;
            let mut fields: Vec<_> = self.errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            for (field, field_errors) in fields {
                for error in field_errors {
                    write!(f, "\n  {}: {}", field, error.message)?;
                }
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::from_error(error)
    }
}
