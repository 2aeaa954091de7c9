//! Length-based validators for strings, binary payloads and arrays

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use base64::Engine as _;
use serde_json::Value;

/// How the length of a string value is measured. Arrays always count items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    /// Unicode scalar values
    #[default]
    Chars,
    /// UTF-8 bytes, for binary payloads carried as strings
    Bytes,
    /// Bytes of the decoded payload of a standard base64 string
    Base64Bytes,
}

enum Measured {
    Length(usize, &'static str),
    /// Not decodable; left to the format check
    Undecodable,
    WrongType,
}

/// Validator for string/array length constraints
#[derive(Debug, Clone, Default)]
pub struct LengthValidator {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    /// Exact length required
    pub exact: Option<usize>,
    pub unit: LengthUnit,
    /// Custom error message
    pub message: Option<String>,
}

impl LengthValidator {
    /// Create a new length validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn exact(mut self, exact: usize) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Set length range (min and max)
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn unit(mut self, unit: LengthUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Build from optional bounds; `None` when neither bound is set
    pub fn bounded(min: Option<usize>, max: Option<usize>) -> Option<Self> {
        if min.is_none() && max.is_none() {
            return None;
        }
        Some(Self {
            min,
            max,
            ..Self::default()
        })
    }

    fn measure(&self, value: &Value) -> Measured {
        match value {
            Value::String(s) => match self.unit {
                LengthUnit::Chars => Measured::Length(s.chars().count(), "characters"),
                LengthUnit::Bytes => Measured::Length(s.len(), "bytes"),
                LengthUnit::Base64Bytes => {
                    match base64::engine::general_purpose::STANDARD.decode(s) {
                        Ok(decoded) => Measured::Length(decoded.len(), "bytes"),
                        Err(_) => Measured::Undecodable,
                    }
                }
            },
            Value::Array(arr) => Measured::Length(arr.len(), "items"),
            _ => Measured::WrongType,
        }
    }

    fn create_error_message(&self, field: &str, actual: usize, noun: &str) -> String {
        if let Some(ref custom_message) = self.message {
            return custom_message.clone();
        }

        if let Some(exact) = self.exact {
            return format!("{} must be exactly {} {} long", field, exact, noun);
        }

        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => {
                format!("{} must be exactly {} {} long", field, min, noun)
            }
            (Some(min), Some(max)) => {
                format!("{} must be between {} and {} {} long", field, min, max, noun)
            }
            (Some(min), None) => format!("{} must be at least {} {} long", field, min, noun),
            (None, Some(max)) => format!("{} must be at most {} {} long", field, max, noun),
            (None, None) => format!("{} has invalid length: {}", field, actual),
        }
    }

    fn fail(&self, field: &str, actual: usize, noun: &str, code: &str) -> ValidationError {
        ValidationError::with_code(field, self.create_error_message(field, actual, noun), code)
            .context(serde_json::json!({ "length": actual }))
    }
}

#[async_trait]
impl ValidationRule for LengthValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let (length, noun) = match self.measure(value) {
            Measured::Length(length, noun) => (length, noun),
            Measured::Undecodable => return Ok(()),
            Measured::WrongType => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a string or array for length validation", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if let Some(exact) = self.exact {
            if length != exact {
                return Err(self.fail(field, length, noun, "length_exact").into());
            }
            return Ok(());
        }

        if let Some(min) = self.min {
            if length < min {
                return Err(self.fail(field, length, noun, "length_min").into());
            }
        }

        if let Some(max) = self.max {
            if length > max {
                return Err(self.fail(field, length, noun, "length_max").into());
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();

        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(exact) = self.exact {
            params.insert("exact".to_string(), Value::from(exact));
        }
        match self.unit {
            LengthUnit::Chars => {}
            LengthUnit::Bytes => {
                params.insert("unit".to_string(), Value::String("bytes".to_string()));
            }
            LengthUnit::Base64Bytes => {
                params.insert("unit".to_string(), Value::String("base64-bytes".to_string()));
            }
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}
