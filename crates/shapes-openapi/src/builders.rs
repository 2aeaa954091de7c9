//! One builder per supported shape.
//!
//! ```
//! use shapes_openapi::builders::{array, integer, object, uuid};
//! use shapes_openapi::{ArrayOptions, NumberOptions, ObjectOptions, TextOptions};
//!
//! let order = object(ObjectOptions::with_properties([
//!     ("id", uuid(TextOptions::new().with_required(true))),
//!     (
//!         "quantities",
//!         array(ArrayOptions::of(integer(NumberOptions::new())).with_min_length(1)).unwrap(),
//!     ),
//! ]))
//! .unwrap();
//! assert!(order.property("id").unwrap().is_required());
//! ```

use crate::configure::{build, force_length, ShapePolicy};
use crate::error::{SchemaError, SchemaResult};
use crate::node::{Encoding, SchemaKind, SchemaNode};
use crate::options::{
    ArrayOptions, BooleanOptions, EnumOptions, NumberOptions, ObjectOptions, TextOptions,
};
use serde_json::Value;
use shapes_validation::Format;

const DATE_TIME_MAX_LENGTH: usize = 24;

fn take_values<T>(values: &mut Option<Vec<T>>, shape: &'static str) -> SchemaResult<Vec<T>> {
    values
        .take()
        .filter(|values| !values.is_empty())
        .ok_or(SchemaError::MissingEnumValues { shape })
}

/// Plain text
pub fn string(options: TextOptions) -> SchemaNode {
    build("string", SchemaKind::String, options, ShapePolicy::STANDARD)
}

/// Text restricted to `values`
pub fn string_enum(mut options: EnumOptions<String>) -> SchemaResult<SchemaNode> {
    let values = take_values(&mut options.values, "string_enum")?;
    let mut node = build("string_enum", SchemaKind::String, options, ShapePolicy::STANDARD);
    node.allowed = values.into_iter().map(Value::String).collect();
    Ok(node)
}

pub fn email(options: TextOptions) -> SchemaNode {
    let mut node = string(options);
    node.email = true;
    node
}

/// Text tagged as a password; no extra checks
pub fn password(options: TextOptions) -> SchemaNode {
    let mut node = string(options);
    node.format_hint = Some("password");
    node
}

/// UUID v4, always exactly 36 characters
pub fn uuid(options: TextOptions) -> SchemaNode {
    let mut node = string(options);
    node.format = Some(Format::UuidV4);
    node.format_hint = Some("uuid");
    force_length("uuid", &mut node, 36, 36);
    node
}

pub fn uri(options: TextOptions) -> SchemaNode {
    let mut node = string(options);
    node.format = Some(Format::Uri);
    node.format_hint = Some("uri");
    node
}

pub fn hostname(options: TextOptions) -> SchemaNode {
    let mut node = string(options);
    node.format = Some(Format::Hostname);
    node.format_hint = Some("hostname");
    node
}

/// Dotted-quad IPv4 address, 7 to 15 characters
pub fn ipv4(options: TextOptions) -> SchemaNode {
    let mut node = string(options);
    node.format = Some(Format::Ipv4);
    node.format_hint = Some("ipv4");
    force_length("ipv4", &mut node, 7, 15);
    node
}

/// IPv6 address, 3 to 45 characters
pub fn ipv6(options: TextOptions) -> SchemaNode {
    let mut node = string(options);
    node.format = Some(Format::Ipv6);
    node.format_hint = Some("ipv6");
    force_length("ipv6", &mut node, 3, 45);
    node
}

/// Raw bytes; length bounds count bytes
pub fn binary(options: TextOptions) -> SchemaNode {
    build("binary", SchemaKind::Binary, options, ShapePolicy::STANDARD)
}

/// Base64-encoded bytes
pub fn byte(options: TextOptions) -> SchemaNode {
    let mut node = binary(options);
    node.encoding = Some(Encoding::Base64);
    node
}

/// ISO 8601 date-time of at most 24 characters.
///
/// Only description, required and nullable are honored; default, example
/// and length bounds in `options` are ignored.
pub fn date_time(options: TextOptions) -> SchemaNode {
    let mut node = build("date_time", SchemaKind::String, options, ShapePolicy::DESCRIPTIVE);
    node.format = Some(Format::IsoDate);
    node.max_length = Some(DATE_TIME_MAX_LENGTH);
    node
}

/// ISO 8601 calendar date, exactly 10 characters
pub fn date(options: TextOptions) -> SchemaNode {
    let mut node = date_time(options);
    node.format_hint = Some("date");
    force_length("date", &mut node, 10, 10);
    node
}

/// Any finite number. `required: false` is ignored.
pub fn number(options: NumberOptions) -> SchemaNode {
    build("number", SchemaKind::Number, options, ShapePolicy::NUMERIC)
}

pub fn number_enum(mut options: EnumOptions<f64>) -> SchemaResult<SchemaNode> {
    let values = take_values(&mut options.values, "number_enum")?;
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SchemaError::NonFiniteEnumValue {
            shape: "number_enum",
        });
    }
    let mut node = build("number_enum", SchemaKind::Number, options, ShapePolicy::NUMERIC);
    node.allowed = values.into_iter().map(Value::from).collect();
    Ok(node)
}

/// Whole numbers only
pub fn integer(options: NumberOptions) -> SchemaNode {
    let mut node = number(options);
    node.kind = SchemaKind::Integer;
    node
}

pub fn integer_enum(mut options: EnumOptions<i64>) -> SchemaResult<SchemaNode> {
    let values = take_values(&mut options.values, "integer_enum")?;
    let mut node = build("integer_enum", SchemaKind::Integer, options, ShapePolicy::NUMERIC);
    node.allowed = values.into_iter().map(Value::from).collect();
    Ok(node)
}

/// Strict boolean; `"true"` and `1` are rejected
pub fn boolean(options: BooleanOptions) -> SchemaNode {
    build("boolean", SchemaKind::Boolean, options, ShapePolicy::STANDARD)
}

/// Object with exactly the given properties
pub fn object(mut options: ObjectOptions) -> SchemaResult<SchemaNode> {
    let properties = options
        .properties
        .take()
        .ok_or(SchemaError::MissingProperties)?;
    let mut node = build("object", SchemaKind::Object, options, ShapePolicy::STANDARD);
    node.properties = properties;
    Ok(node)
}

/// Array whose elements all match `array_type`; length bounds count elements
pub fn array(mut options: ArrayOptions) -> SchemaResult<SchemaNode> {
    let items = options
        .array_type
        .take()
        .ok_or(SchemaError::MissingArrayType)?;
    let mut node = build("array", SchemaKind::Array, options, ShapePolicy::STANDARD);
    node.items = Some(items);
    Ok(node)
}
