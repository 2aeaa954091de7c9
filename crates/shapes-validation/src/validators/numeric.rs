//! Numeric value validators

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use serde_json::Value;

/// Validator for numeric values and their bounds.
///
/// Numeric strings such as `"42"` are accepted and checked by their parsed
/// value; anything else that is not a JSON number is an `invalid_type`.
#[derive(Debug, Clone, Default)]
pub struct NumericValidator {
    /// Minimum value (inclusive)
    pub min: Option<f64>,
    /// Maximum value (inclusive)
    pub max: Option<f64>,
    /// Allow only integers (no decimals)
    pub integer_only: bool,
    /// Custom error message
    pub message: Option<String>,
}

impl NumericValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set value range (min and max)
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Require integer values only (no decimals)
    pub fn integer_only(mut self, integer_only: bool) -> Self {
        self.integer_only = integer_only;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Extract numeric value from JSON Value
    pub fn numeric_value(value: &Value) -> Option<f64> {
        match value {
            Value::Number(num) => num.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    fn is_integer(num: f64) -> bool {
        num.fract() == 0.0
    }

    fn create_error_message(&self, field: &str, value: f64) -> String {
        if let Some(ref custom_message) = self.message {
            return custom_message.clone();
        }

        if self.integer_only && !Self::is_integer(value) {
            return format!("{} must be an integer", field);
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => format!("{} must equal {}", field, min),
            (Some(min), Some(max)) => format!("{} must be between {} and {}", field, min, max),
            (Some(min), None) => format!("{} must be at least {}", field, min),
            (None, Some(max)) => format!("{} must be at most {}", field, max),
            (None, None) => format!("{} has invalid numeric value: {}", field, value),
        }
    }
}

#[async_trait]
impl ValidationRule for NumericValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let num = match Self::numeric_value(value) {
            Some(n) => n,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a number", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if !num.is_finite() {
            return Err(ValidationError::with_code(
                field,
                format!("{} must be a finite number", field),
                "invalid_number",
            )
            .into());
        }

        if self.integer_only && !Self::is_integer(num) {
            return Err(ValidationError::with_code(
                field,
                self.create_error_message(field, num),
                "not_integer",
            )
            .into());
        }

        if let Some(min) = self.min {
            if num < min {
                return Err(ValidationError::with_code(
                    field,
                    self.create_error_message(field, num),
                    "below_minimum",
                )
                .into());
            }
        }

        if let Some(max) = self.max {
            if num > max {
                return Err(ValidationError::with_code(
                    field,
                    self.create_error_message(field, num),
                    "above_maximum",
                )
                .into());
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "numeric"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        params.insert("integer_only".to_string(), Value::Bool(self.integer_only));

        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        Some(Value::Object(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_numeric_validator_basic() {
        let validator = NumericValidator::new();

        assert!(validator.validate(&json!(42), "age").await.is_ok());
        assert!(validator.validate(&json!(-10), "temp").await.is_ok());
        assert!(validator.validate(&json!(3.25), "ratio").await.is_ok());

        // Numeric strings are checked by their parsed value
        assert!(validator.validate(&json!("42"), "age").await.is_ok());
        assert!(validator.validate(&json!("3.25"), "ratio").await.is_ok());

        assert!(validator.validate(&json!("not-a-number"), "age").await.is_err());
        assert!(validator.validate(&json!(true), "age").await.is_err());
        assert!(validator.validate(&json!([1]), "age").await.is_err());
    }

    #[tokio::test]
    async fn test_numeric_validator_min_max() {
        let validator = NumericValidator::new().range(0.0, 100.0);

        assert!(validator.validate(&json!(0), "score").await.is_ok());
        assert!(validator.validate(&json!(100), "score").await.is_ok());

        let errors = validator.validate(&json!(-1), "score").await.unwrap_err();
        assert_eq!(errors.codes("score"), vec!["below_minimum"]);
        let errors = validator.validate(&json!(101), "score").await.unwrap_err();
        assert_eq!(errors.codes("score"), vec!["above_maximum"]);
        assert_eq!(errors.errors["score"][0].message, "score must be between 0 and 100");
    }

    #[tokio::test]
    async fn test_numeric_validator_integer_only() {
        let validator = NumericValidator::new().integer_only(true);

        assert!(validator.validate(&json!(42), "count").await.is_ok());
        assert!(validator.validate(&json!(-10), "count").await.is_ok());

        let errors = validator.validate(&json!(2.5), "count").await.unwrap_err();
        assert_eq!(errors.codes("count"), vec!["not_integer"]);
        assert!(validator.validate(&json!("2.5"), "count").await.is_err());
    }

    #[tokio::test]
    async fn test_numeric_validator_infinity_nan() {
        let validator = NumericValidator::new();

        for text in ["inf", "infinity", "NaN"] {
            let errors = validator.validate(&json!(text), "value").await.unwrap_err();
            assert_eq!(errors.codes("value"), vec!["invalid_number"]);
        }
    }

    #[tokio::test]
    async fn test_numeric_validator_with_null() {
        let validator = NumericValidator::new().min(0.0);
        assert!(validator.validate(&Value::Null, "optional_number").await.is_ok());
    }
}
