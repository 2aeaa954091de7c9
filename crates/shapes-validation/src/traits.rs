//! Core validation trait

use crate::error::ValidationResult;
use async_trait::async_trait;
use serde_json::Value;

/// Core validation trait that all validators must implement
#[async_trait]
pub trait ValidationRule: Send + Sync {
    /// Validate a single value found at `field`
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}
