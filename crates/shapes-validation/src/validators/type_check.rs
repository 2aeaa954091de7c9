//! Strict JSON type checks

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// JSON value types a node can require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

impl ValueType {
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
            ValueType::Number => value.is_number(),
            ValueType::Boolean => value.is_boolean(),
            ValueType::Object => value.is_object(),
            ValueType::Array => value.is_array(),
        }
    }

    fn article(self) -> &'static str {
        match self {
            ValueType::Object | ValueType::Array => "an",
            _ => "a",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Object => "object",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

/// Validator that accepts exactly one JSON type, with no coercion.
/// `"true"` is not a boolean and `"1"` is not a number here.
#[derive(Debug, Clone)]
pub struct TypeValidator {
    pub expected: ValueType,
    pub message: Option<String>,
}

impl TypeValidator {
    pub fn new(expected: ValueType) -> Self {
        Self {
            expected,
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[async_trait]
impl ValidationRule for TypeValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        // Null handling belongs to the caller (nullable nodes)
        if value.is_null() || self.expected.matches(value) {
            return Ok(());
        }

        let message = self.message.clone().unwrap_or_else(|| {
            format!(
                "{} must be {} {}",
                field,
                self.expected.article(),
                self.expected
            )
        });
        Err(ValidationError::with_code(field, message, "invalid_type").into())
    }

    fn rule_name(&self) -> &'static str {
        "type"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "type": self.expected.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_boolean_is_strict() {
        let validator = TypeValidator::new(ValueType::Boolean);

        assert!(validator.validate(&json!(true), "active").await.is_ok());
        assert!(validator.validate(&json!(false), "active").await.is_ok());

        for coercible in [json!("true"), json!(1), json!(0), json!("no")] {
            let errors = validator.validate(&coercible, "active").await.unwrap_err();
            assert_eq!(errors.codes("active"), vec!["invalid_type"]);
        }
    }

    #[tokio::test]
    async fn test_type_messages() {
        let errors = TypeValidator::new(ValueType::Array)
            .validate(&json!("x"), "tags")
            .await
            .unwrap_err();
        assert_eq!(errors.errors["tags"][0].message, "tags must be an array");

        let errors = TypeValidator::new(ValueType::String)
            .message("need text")
            .validate(&json!(1), "name")
            .await
            .unwrap_err();
        assert_eq!(errors.errors["name"][0].message, "need text");
    }

    #[tokio::test]
    async fn test_null_is_left_to_caller() {
        let validator = TypeValidator::new(ValueType::Object);
        assert!(validator.validate(&Value::Null, "body").await.is_ok());
        assert!(validator.validate(&json!({}), "body").await.is_ok());
        assert!(validator.validate(&json!([]), "body").await.is_err());
        assert!(TypeValidator::new(ValueType::Number)
            .validate(&json!(1.5), "n")
            .await
            .is_ok());
    }
}
