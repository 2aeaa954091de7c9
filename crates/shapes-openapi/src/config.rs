use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

/// Configuration for rendering schema nodes as OpenAPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target OpenAPI version, `3.0.x` or `3.1.x`
    pub openapi_version: String,

    /// Whether to include example values
    pub include_examples: bool,

    /// Whether to include default values
    pub include_defaults: bool,

    /// Output format for rendered text
    pub format: ExportFormat,

    /// Pretty print JSON output
    pub pretty_print: bool,
}

/// Available export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            openapi_version: "3.0.3".to_string(),
            include_examples: true,
            include_defaults: true,
            format: ExportFormat::Json,
            pretty_print: true,
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML, e.g. a `[schema-export]` file section
    pub fn from_toml_str(text: &str) -> SchemaResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject versions the renderer cannot target
    pub fn validate(&self) -> SchemaResult<()> {
        if self.openapi_version.starts_with("3.0.") || self.openapi_version.starts_with("3.1.") {
            Ok(())
        } else {
            Err(SchemaError::config_error(format!(
                "unsupported OpenAPI version: {}",
                self.openapi_version
            )))
        }
    }

    /// OpenAPI 3.1 expresses null acceptance with type lists
    pub fn uses_type_unions(&self) -> bool {
        self.openapi_version.starts_with("3.1.")
    }

    pub fn with_openapi_version(mut self, version: &str) -> Self {
        self.openapi_version = version.to_string();
        self
    }

    pub fn with_examples(mut self, include: bool) -> Self {
        self.include_examples = include;
        self
    }

    pub fn with_defaults(mut self, include: bool) -> Self {
        self.include_defaults = include;
        self
    }

    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}
