//! Membership in a fixed set of allowed values

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use crate::validators::numeric::NumericValidator;
use async_trait::async_trait;
use serde_json::Value;

/// Validator that accepts only values from an allowed list.
///
/// Numbers compare by numeric value, so `2` matches an allowed `2.0`. With
/// [`OneOfValidator::numeric`] numeric strings are compared the same way.
#[derive(Debug, Clone)]
pub struct OneOfValidator {
    pub allowed: Vec<Value>,
    pub numeric: bool,
    pub message: Option<String>,
}

impl OneOfValidator {
    pub fn new(allowed: Vec<Value>) -> Self {
        Self {
            allowed,
            numeric: false,
            message: None,
        }
    }

    /// Compare candidates by parsed numeric value
    pub fn numeric(mut self, numeric: bool) -> Self {
        self.numeric = numeric;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn contains(&self, candidate: &Value) -> bool {
        let candidate_number = if self.numeric {
            NumericValidator::numeric_value(candidate)
        } else {
            candidate.as_f64()
        };

        self.allowed.iter().any(|allowed| match (candidate_number, allowed.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => allowed == candidate,
        })
    }

    fn listing(&self) -> String {
        self.allowed
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl ValidationRule for OneOfValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() || self.contains(value) {
            return Ok(());
        }

        let message = self
            .message
            .clone()
            .unwrap_or_else(|| format!("{} must be one of: {}", field, self.listing()));
        Err(ValidationError::with_code(field, message, "not_allowed")
            .context(serde_json::json!({ "allowed": self.allowed }))
            .into())
    }

    fn rule_name(&self) -> &'static str {
        "one_of"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({
            "allowed": self.allowed,
            "numeric": self.numeric,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_string_membership() {
        let validator = OneOfValidator::new(vec![json!("draft"), json!("published")]);

        assert!(validator.validate(&json!("draft"), "status").await.is_ok());
        assert!(validator.validate(&json!("published"), "status").await.is_ok());

        let errors = validator.validate(&json!("archived"), "status").await.unwrap_err();
        assert_eq!(errors.codes("status"), vec!["not_allowed"]);
        assert_eq!(
            errors.errors["status"][0].message,
            "status must be one of: \"draft\", \"published\""
        );
    }

    #[tokio::test]
    async fn test_single_value_set() {
        let validator = OneOfValidator::new(vec![json!("only")]);
        assert!(validator.validate(&json!("only"), "kind").await.is_ok());
        assert!(validator.validate(&json!("other"), "kind").await.is_err());
        assert!(validator.validate(&json!(""), "kind").await.is_err());
    }

    #[tokio::test]
    async fn test_numeric_membership() {
        let validator = OneOfValidator::new(vec![json!(1), json!(2.5)]);

        assert!(validator.validate(&json!(1.0), "level").await.is_ok());
        assert!(validator.validate(&json!(2.5), "level").await.is_ok());
        assert!(validator.validate(&json!(3), "level").await.is_err());
        // strings stay strings unless numeric comparison is enabled
        assert!(validator.validate(&json!("1"), "level").await.is_err());

        let numeric = validator.numeric(true);
        assert!(numeric.validate(&json!("1"), "level").await.is_ok());
        assert!(numeric.validate(&json!("2"), "level").await.is_err());
    }
}
