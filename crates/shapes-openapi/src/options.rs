//! Option records accepted by the builders.
//!
//! `Default::default()` is the "no configuration" record for every shape.
//! Records for leaf shapes deserialize from camelCase keys (`minLength`,
//! `maxValue`, ...) so they can be read from JSON or YAML descriptors.

use crate::node::SchemaNode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Options shared by every shape
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonOptions {
    pub description: Option<String>,
    /// `Some(false)` marks the value optional, `None` keeps the default
    pub required: Option<bool>,
    pub nullable: Option<bool>,
}

/// Setters every option record has
macro_rules! common_setters {
    ($name:ident) => {
        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn with_description(mut self, description: impl Into<String>) -> Self {
                self.common.description = Some(description.into());
                self
            }

            pub fn with_required(mut self, required: bool) -> Self {
                self.common.required = Some(required);
                self
            }

            pub fn with_nullable(mut self, nullable: bool) -> Self {
                self.common.nullable = Some(nullable);
                self
            }

            pub fn with_default(mut self, default: impl Into<Value>) -> Self {
                self.default = Some(default.into());
                self
            }

            pub fn with_example(mut self, example: impl Into<Value>) -> Self {
                self.example = Some(example.into());
                self
            }
        }
    };
}

/// Options for text and binary shapes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    #[serde(flatten)]
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

common_setters!(TextOptions);

impl TextOptions {
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Options for numeric shapes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberOptions {
    #[serde(flatten)]
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

common_setters!(NumberOptions);

impl NumberOptions {
    pub fn with_min_value(mut self, min: f64) -> Self {
        self.min_value = Some(min);
        self
    }

    pub fn with_max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }
}

/// Options for enumerated shapes; `values` is mandatory and non-empty
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumOptions<T> {
    #[serde(flatten)]
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub values: Option<Vec<T>>,
}

impl<T> Default for EnumOptions<T> {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            default: None,
            example: None,
            values: None,
        }
    }
}

impl<T> EnumOptions<T> {
    /// Options allowing exactly `values`, in order
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        Self {
            values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.common.description = Some(description.into());
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.common.required = Some(required);
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.common.nullable = Some(nullable);
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanOptions {
    #[serde(flatten)]
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
}

common_setters!(BooleanOptions);

/// Options for object shapes; `properties` is mandatory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectOptions {
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub properties: Option<BTreeMap<String, SchemaNode>>,
}

common_setters!(ObjectOptions);

impl ObjectOptions {
    /// Options for an object with the given property map
    pub fn with_properties<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        Self {
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, node)| (name.into(), node))
                    .collect(),
            ),
            ..Self::default()
        }
    }
}

/// Options for array shapes; `array_type` is mandatory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayOptions {
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    /// Minimum number of elements
    pub min_length: Option<usize>,
    /// Maximum number of elements
    pub max_length: Option<usize>,
    pub array_type: Option<Box<SchemaNode>>,
}

common_setters!(ArrayOptions);

impl ArrayOptions {
    /// Options for an array whose elements match `item`
    pub fn of(item: SchemaNode) -> Self {
        Self {
            array_type: Some(Box::new(item)),
            ..Self::default()
        }
    }

    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_options_from_camel_case() {
        let options: TextOptions = serde_json::from_value(json!({
            "description": "Display name",
            "required": false,
            "minLength": 2,
            "maxLength": 40,
            "example": "Ada"
        }))
        .unwrap();

        assert_eq!(options.common.description.as_deref(), Some("Display name"));
        assert_eq!(options.common.required, Some(false));
        assert_eq!(options.common.nullable, None);
        assert_eq!(options.min_length, Some(2));
        assert_eq!(options.max_length, Some(40));
        assert_eq!(options.example, Some(json!("Ada")));
    }

    #[test]
    fn test_setters_match_deserialized_record() {
        let built = NumberOptions::new()
            .with_required(true)
            .with_min_value(0.0)
            .with_default(10);
        let parsed: NumberOptions =
            serde_json::from_value(json!({ "required": true, "minValue": 0.0, "default": 10 }))
                .unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_enum_options_of() {
        let options: EnumOptions<String> = EnumOptions::of(["a", "b"]).with_nullable(true);
        assert_eq!(options.values, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(options.common.nullable, Some(true));

        let empty: EnumOptions<i64> = EnumOptions::default();
        assert!(empty.values.is_none());
    }
}
