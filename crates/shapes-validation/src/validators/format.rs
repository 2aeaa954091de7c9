//! Well-known string formats: identifiers, addresses, dates and encodings

use crate::error::{ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use async_trait::async_trait;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

static HOSTNAME_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?$")
        .expect("hostname label regex should be valid")
});

// chrono accepts single-digit months and days; ISO 8601 does not
static ISO_DATE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}|$)").expect("ISO date regex should be valid")
});

/// A string format with a functional check behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// RFC 4122 version 4 UUID
    UuidV4,
    /// Absolute URI with a scheme
    Uri,
    /// RFC 1123 host name or IP address
    Hostname,
    Ipv4,
    Ipv6,
    /// ISO 8601 date or date-time
    IsoDate,
    /// Padded standard base64
    Base64,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::UuidV4 => "uuid-v4",
            Format::Uri => "uri",
            Format::Hostname => "hostname",
            Format::Ipv4 => "ipv4",
            Format::Ipv6 => "ipv6",
            Format::IsoDate => "iso-date",
            Format::Base64 => "base64",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Format::UuidV4 => "a valid UUID v4",
            Format::Uri => "a valid URI",
            Format::Hostname => "a valid hostname",
            Format::Ipv4 => "a valid IPv4 address",
            Format::Ipv6 => "a valid IPv6 address",
            Format::IsoDate => "a valid ISO 8601 date",
            Format::Base64 => "a valid base64 string",
        }
    }

    /// Check a string against this format
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Format::UuidV4 => uuid::Uuid::parse_str(text)
                .map(|id| {
                    id.get_version_num() == 4 && id.get_variant() == uuid::Variant::RFC4122
                })
                .unwrap_or(false),
            Format::Uri => url::Url::parse(text).is_ok(),
            Format::Hostname => is_hostname(text),
            Format::Ipv4 => text.parse::<Ipv4Addr>().is_ok(),
            Format::Ipv6 => text.parse::<Ipv6Addr>().is_ok(),
            Format::IsoDate => is_iso_date(text),
            Format::Base64 => base64::engine::general_purpose::STANDARD
                .decode(text)
                .is_ok(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_hostname(text: &str) -> bool {
    if text.parse::<IpAddr>().is_ok() {
        return true;
    }
    if text.is_empty() || text.len() > 253 {
        return false;
    }
    text.split('.').all(|label| HOSTNAME_LABEL.is_match(label))
}

fn is_iso_date(text: &str) -> bool {
    if !ISO_DATE_PREFIX.is_match(text) {
        return false;
    }

    DateTime::parse_from_rfc3339(text).is_ok()
        || NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M").is_ok()
        || DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%:z").is_ok()
}

/// Validator for a single [`Format`]
#[derive(Debug, Clone)]
pub struct FormatValidator {
    pub format: Format,
    pub message: Option<String>,
}

impl FormatValidator {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            message: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[async_trait]
impl ValidationRule for FormatValidator {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let text = match value.as_str() {
            Some(text) => text,
            None => {
                return Err(ValidationError::with_code(
                    field,
                    format!("{} must be a string for format validation", field),
                    "invalid_type",
                )
                .into());
            }
        };

        if !self.format.matches(text) {
            let message = self
                .message
                .clone()
                .unwrap_or_else(|| format!("{} must be {}", field, self.format.description()));
            return Err(ValidationError::with_code(field, message, "invalid_format")
                .context(serde_json::json!({ "format": self.format.as_str() }))
                .into());
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "format"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "format": self.format.as_str() }))
    }
}
