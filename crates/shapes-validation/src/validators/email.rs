//! Email format validator

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// ASCII local part and domain, no leading/trailing dots
static EMAIL_WITH_TLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$",
    )
    .expect("email regex should be valid")
});

static EMAIL_WITHOUT_TLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?$")
        .expect("email regex should be valid")
});

/// Validator for email address format
#[derive(Debug, Clone)]
pub struct EmailValidator {
    pub message: Option<String>,
    /// Require top-level domain (e.g., .com, .org)
    pub require_tld: bool,
}

impl EmailValidator {
    pub fn new() -> Self {
        Self {
            message: None,
            require_tld: true,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn require_tld(mut self, require: bool) -> Self {
        self.require_tld = require;
        self
    }

    /// Check an address against RFC 5321 size limits and the address pattern
    pub fn is_valid(&self, email: &str) -> bool {
        let Some((local_part, domain_part)) = email.split_once('@') else {
            return false;
        };

        if local_part.is_empty() || domain_part.is_empty() || domain_part.contains('@') {
            return false;
        }
        if local_part.len() > 64 || domain_part.len() > 255 {
            return false;
        }
        if local_part.contains("..") || domain_part.contains("..") {
            return false;
        }

        if self.require_tld {
            EMAIL_WITH_TLD.is_match(email)
        } else {
            EMAIL_WITHOUT_TLD.is_match(email)
        }
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ValidationRule for EmailValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let email = match value.as_str() {
            Some(email) => email,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a string for email validation", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if !self.is_valid(email) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} must be a valid email address", field));

            return Err(ValidationError::with_code(field, message, "invalid_email").into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "require_tld": self.require_tld }))
    }
}
