use thiserror::Error;

/// Result type for schema building and rendering
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building or rendering schema nodes.
///
/// The `Missing*` variants are contract violations by the caller: a
/// shape-defining field was not supplied.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An enum shape was built without allowed values
    #[error("{shape} requires a non-empty list of allowed values")]
    MissingEnumValues { shape: &'static str },

    /// A numeric enum was given NaN or an infinity
    #[error("{shape} allowed values must be finite numbers")]
    NonFiniteEnumValue { shape: &'static str },

    /// An object shape was built without a property map
    #[error("object requires a property map")]
    MissingProperties,

    /// An array shape was built without an element shape
    #[error("array requires an element type")]
    MissingArrayType,

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SchemaError {
    pub fn config_error<T: ToString>(msg: T) -> Self {
        Self::Config(msg.to_string())
    }

    /// True for errors caused by a malformed shape configuration
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingEnumValues { .. }
                | Self::NonFiniteEnumValue { .. }
                | Self::MissingProperties
                | Self::MissingArrayType
        )
    }
}
