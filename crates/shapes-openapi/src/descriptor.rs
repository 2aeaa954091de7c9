//! Shape descriptions as data.
//!
//! A [`ShapeDescriptor`] is the record form of a builder call, tagged by
//! `shape` and read from JSON or YAML:
//!
//! ```yaml
//! shape: object
//! properties:
//!   id: { shape: uuid, required: true }
//!   tags: { shape: array, arrayType: { shape: string }, maxLength: 5 }
//! ```

use crate::builders;
use crate::error::SchemaResult;
use crate::node::SchemaNode;
use crate::options::{
    ArrayOptions, BooleanOptions, CommonOptions, EnumOptions, NumberOptions, ObjectOptions,
    TextOptions,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum ShapeDescriptor {
    String(TextOptions),
    StringEnum(EnumOptions<String>),
    Email(TextOptions),
    Password(TextOptions),
    Uuid(TextOptions),
    Uri(TextOptions),
    Hostname(TextOptions),
    Ipv4(TextOptions),
    Ipv6(TextOptions),
    Binary(TextOptions),
    Byte(TextOptions),
    DateTime(TextOptions),
    Date(TextOptions),
    Number(NumberOptions),
    NumberEnum(EnumOptions<f64>),
    Integer(NumberOptions),
    IntegerEnum(EnumOptions<i64>),
    Boolean(BooleanOptions),
    Object(ObjectDescriptor),
    Array(ArrayDescriptor),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDescriptor {
    #[serde(flatten)]
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub properties: Option<BTreeMap<String, ShapeDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayDescriptor {
    #[serde(flatten)]
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub array_type: Option<Box<ShapeDescriptor>>,
}

impl ShapeDescriptor {
    pub fn from_json_str(text: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> SchemaResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Build the node this descriptor describes
    pub fn build(self) -> SchemaResult<SchemaNode> {
        let node = match self {
            ShapeDescriptor::String(options) => builders::string(options),
            ShapeDescriptor::StringEnum(options) => builders::string_enum(options)?,
            ShapeDescriptor::Email(options) => builders::email(options),
            ShapeDescriptor::Password(options) => builders::password(options),
            ShapeDescriptor::Uuid(options) => builders::uuid(options),
            ShapeDescriptor::Uri(options) => builders::uri(options),
            ShapeDescriptor::Hostname(options) => builders::hostname(options),
            ShapeDescriptor::Ipv4(options) => builders::ipv4(options),
            ShapeDescriptor::Ipv6(options) => builders::ipv6(options),
            ShapeDescriptor::Binary(options) => builders::binary(options),
            ShapeDescriptor::Byte(options) => builders::byte(options),
            ShapeDescriptor::DateTime(options) => builders::date_time(options),
            ShapeDescriptor::Date(options) => builders::date(options),
            ShapeDescriptor::Number(options) => builders::number(options),
            ShapeDescriptor::NumberEnum(options) => builders::number_enum(options)?,
            ShapeDescriptor::Integer(options) => builders::integer(options),
            ShapeDescriptor::IntegerEnum(options) => builders::integer_enum(options)?,
            ShapeDescriptor::Boolean(options) => builders::boolean(options),
            ShapeDescriptor::Object(descriptor) => descriptor.build()?,
            ShapeDescriptor::Array(descriptor) => descriptor.build()?,
        };
        Ok(node)
    }
}

impl ObjectDescriptor {
    pub fn build(self) -> SchemaResult<SchemaNode> {
        let properties = self
            .properties
            .map(|properties| {
                properties
                    .into_iter()
                    .map(|(name, shape)| Ok((name, shape.build()?)))
                    .collect::<SchemaResult<BTreeMap<_, _>>>()
            })
            .transpose()?;

        builders::object(ObjectOptions {
            common: self.common,
            default: self.default,
            example: self.example,
            properties,
        })
    }
}

impl ArrayDescriptor {
    pub fn build(self) -> SchemaResult<SchemaNode> {
        let array_type = self
            .array_type
            .map(|shape| shape.build().map(Box::new))
            .transpose()?;

        builders::array(ArrayOptions {
            common: self.common,
            default: self.default,
            example: self.example,
            min_length: self.min_length,
            max_length: self.max_length,
            array_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::node::{Presence, SchemaKind};
    use serde_json::json;
    use shapes_validation::Format;

    #[test]
    fn test_leaf_descriptor_matches_builder() {
        let descriptor = ShapeDescriptor::from_json_str(
            r#"{ "shape": "uuid", "description": "Id", "required": true, "minLength": 3 }"#,
        )
        .unwrap();
        let expected = builders::uuid(
            TextOptions::new()
                .with_description("Id")
                .with_required(true)
                .with_min_length(3),
        );
        assert_eq!(descriptor.build().unwrap(), expected);
    }

    #[test]
    fn test_nested_yaml_descriptor() {
        let node = ShapeDescriptor::from_yaml_str(
            r#"
shape: object
properties:
  id: { shape: uuid, required: true }
  createdAt: { shape: dateTime, nullable: true }
  tags:
    shape: array
    maxLength: 5
    arrayType: { shape: stringEnum, values: [red, green] }
"#,
        )
        .unwrap()
        .build()
        .unwrap();

        assert_eq!(node.kind(), SchemaKind::Object);
        assert_eq!(node.property("id").unwrap().presence(), Presence::Required);
        assert_eq!(node.property("createdAt").unwrap().format(), Some(Format::IsoDate));
        let tags = node.property("tags").unwrap();
        assert_eq!(tags.length_bounds(), (None, Some(5)));
        assert_eq!(
            tags.items().unwrap().allowed_values(),
            &[json!("red"), json!("green")]
        );
    }

    #[test]
    fn test_numeric_enums() {
        let node = ShapeDescriptor::from_json_str(r#"{ "shape": "integerEnum", "values": [1, 2] }"#)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(node.kind(), SchemaKind::Integer);
        assert_eq!(node.allowed_values(), &[json!(1), json!(2)]);
    }

    #[test]
    fn test_contract_violations_surface_from_build() {
        let missing_values = ShapeDescriptor::from_json_str(r#"{ "shape": "stringEnum" }"#)
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(
            missing_values,
            SchemaError::MissingEnumValues { shape: "string_enum" }
        ));

        let nested = ShapeDescriptor::from_json_str(
            r#"{ "shape": "object", "properties": { "items": { "shape": "array" } } }"#,
        )
        .unwrap()
        .build()
        .unwrap_err();
        assert!(matches!(nested, SchemaError::MissingArrayType));
        assert!(nested.is_contract_violation());
    }

    #[test]
    fn test_unknown_shape_is_a_parse_error() {
        let err = ShapeDescriptor::from_json_str(r#"{ "shape": "money" }"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
        assert!(!err.is_contract_violation());
    }
}
