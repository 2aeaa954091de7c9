//! Checking values against schema nodes

use crate::node::{Encoding, SchemaKind, SchemaNode};
use async_trait::async_trait;
use serde_json::{Map, Value};
use shapes_validation::{
    EmailValidator, Format, FormatValidator, LengthUnit, LengthValidator, NumericValidator,
    OneOfValidator, RuleChain, TypeValidator, ValidationError, ValidationErrors,
    ValidationResult, ValidationRule, ValueType,
};

/// Field label used for the value passed to [`SchemaNode::check`]
pub const ROOT_FIELD: &str = "value";

fn child_path(parent: &str, name: &str) -> String {
    format!("{}.{}", parent, name)
}

fn required_error(field: &str) -> ValidationError {
    ValidationError::with_code(field, format!("{} is required", field), "required")
}

impl SchemaNode {
    /// The engine rules for this node's own value, excluding nested nodes
    pub fn rules(&self) -> RuleChain {
        let length = LengthValidator::bounded(self.min_length, self.max_length);

        let chain = match self.kind {
            SchemaKind::String => RuleChain::new()
                .gate(TypeValidator::new(ValueType::String))
                .rule_opt(length)
                .rule_opt(self.format.map(FormatValidator::new))
                .rule_opt(self.email.then(EmailValidator::new)),
            SchemaKind::Binary => {
                // bounds count payload bytes, decoded first when encoded
                let unit = match self.encoding {
                    Some(Encoding::Base64) => LengthUnit::Base64Bytes,
                    None => LengthUnit::Bytes,
                };
                RuleChain::new()
                    .gate(TypeValidator::new(ValueType::String))
                    .rule_opt(length.map(|l| l.unit(unit)))
                    .rule_opt(
                        self.encoding
                            .map(|Encoding::Base64| FormatValidator::new(Format::Base64)),
                    )
            }
            SchemaKind::Number | SchemaKind::Integer => {
                let mut numeric =
                    NumericValidator::new().integer_only(self.kind == SchemaKind::Integer);
                numeric.min = self.minimum;
                numeric.max = self.maximum;
                RuleChain::new().gate(numeric)
            }
            SchemaKind::Boolean => RuleChain::new().gate(TypeValidator::new(ValueType::Boolean)),
            SchemaKind::Object => RuleChain::new().gate(TypeValidator::new(ValueType::Object)),
            SchemaKind::Array => RuleChain::new()
                .gate(TypeValidator::new(ValueType::Array))
                .rule_opt(length),
        };

        if self.allowed.is_empty() {
            chain
        } else {
            chain.rule(OneOfValidator::new(self.allowed.clone()).numeric(self.kind.is_numeric()))
        }
    }

    /// Check a possibly absent value and return it with defaults applied.
    ///
    /// An absent value yields the node's default (if any) unless the node is
    /// required. Present values come back with missing object properties
    /// filled from their defaults and numeric strings converted to numbers.
    pub async fn check(&self, value: Option<&Value>) -> ValidationResult<Option<Value>> {
        self.check_field(ROOT_FIELD, value).await
    }

    /// [`SchemaNode::check`] with a caller-chosen root label for error paths
    pub async fn check_field(
        &self,
        field: &str,
        value: Option<&Value>,
    ) -> ValidationResult<Option<Value>> {
        match value {
            None if self.is_required() => Err(required_error(field).into()),
            None => Ok(self.default.clone()),
            Some(value) => {
                self.validate(value, field).await?;
                Ok(Some(self.normalize(value.clone())))
            }
        }
    }

    /// True if `value` passes this node
    pub async fn accepts(&self, value: &Value) -> bool {
        self.validate(value, ROOT_FIELD).await.is_ok()
    }

    fn normalize(&self, value: Value) -> Value {
        match (self.kind, value) {
            (SchemaKind::Number | SchemaKind::Integer, Value::String(text)) => {
                match NumericValidator::numeric_value(&Value::String(text.clone())) {
                    Some(n) if self.kind == SchemaKind::Integer && n.abs() < i64::MAX as f64 => {
                        Value::from(n as i64)
                    }
                    Some(n) => Value::from(n),
                    None => Value::String(text),
                }
            }
            (SchemaKind::Object, Value::Object(map)) => {
                let mut normalized = Map::new();
                for (key, item) in map {
                    let item = match self.properties.get(&key) {
                        Some(property) => property.normalize(item),
                        None => item,
                    };
                    normalized.insert(key, item);
                }
                for (name, property) in &self.properties {
                    if let (false, Some(default)) =
                        (normalized.contains_key(name), property.default.as_ref())
                    {
                        normalized.insert(name.clone(), default.clone());
                    }
                }
                Value::Object(normalized)
            }
            (SchemaKind::Array, Value::Array(items)) => match self.items.as_deref() {
                Some(item_node) => {
                    Value::Array(items.into_iter().map(|i| item_node.normalize(i)).collect())
                }
                None => Value::Array(items),
            },
            (_, value) => value,
        }
    }

    async fn validate_object(&self, map: &Map<String, Value>, field: &str) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for (name, property) in &self.properties {
            let path = child_path(field, name);
            match map.get(name) {
                Some(value) => {
                    if let Err(property_errors) = property.validate(value, &path).await {
                        errors.merge(property_errors);
                    }
                }
                None if property.is_required() => errors.add(required_error(&path)),
                None => {}
            }
        }

        for key in map.keys().filter(|k| !self.properties.contains_key(*k)) {
            let path = child_path(field, key);
            errors.add(ValidationError::with_code(
                &path,
                format!("{} is not allowed", path),
                "unknown_property",
            ));
        }

        errors
    }

    async fn validate_items(&self, items: &[Value], field: &str) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if let Some(item_node) = self.items.as_deref() {
            for (index, item) in items.iter().enumerate() {
                let path = format!("{}[{}]", field, index);
                if let Err(item_errors) = item_node.validate(item, &path).await {
                    errors.merge(item_errors);
                }
            }
        }

        errors
    }
}

#[async_trait]
impl ValidationRule for SchemaNode {
    async fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            if self.nullable {
                return Ok(());
            }
            return Err(ValidationError::with_code(
                field,
                format!("{} must not be null", field),
                "null_not_allowed",
            )
            .into());
        }

        self.rules().validate(value, field).await?;

        let nested = match value {
            Value::Object(map) if self.kind == SchemaKind::Object => {
                self.validate_object(map, field).await
            }
            Value::Array(items) if self.kind == SchemaKind::Array => {
                self.validate_items(items, field).await
            }
            _ => ValidationErrors::new(),
        };

        nested.into_result()
    }

    fn rule_name(&self) -> &'static str {
        "schema"
    }

    fn parameters(&self) -> Option<Value> {
        self.rules().parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::*;
    use crate::options::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_rules_per_kind() {
        assert_eq!(
            uuid(TextOptions::default()).rules().rule_names(),
            vec!["type", "length", "format"]
        );
        assert_eq!(email(TextOptions::default()).rules().rule_names(), vec!["type", "email"]);
        assert_eq!(
            byte(TextOptions::new().with_max_length(8)).rules().rule_names(),
            vec!["type", "length", "format"]
        );
        assert_eq!(
            integer_enum(EnumOptions::of([1, 2])).unwrap().rules().rule_names(),
            vec!["numeric", "one_of"]
        );
        assert_eq!(string(TextOptions::default()).rules().rule_names(), vec!["type"]);
    }

    #[tokio::test]
    async fn test_check_absent_values() {
        let required = string(TextOptions::new().with_required(true));
        let errors = required.check(None).await.unwrap_err();
        assert_eq!(errors.codes("value"), vec!["required"]);

        let defaulted = string(TextOptions::new().with_default("guest"));
        assert_eq!(defaulted.check(None).await.unwrap(), Some(json!("guest")));

        let bare = string(TextOptions::default());
        assert_eq!(bare.check(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_null_handling() {
        let nullable = email(TextOptions::new().with_nullable(true));
        assert!(nullable.accepts(&Value::Null).await);

        for node in [
            email(TextOptions::new().with_nullable(false)),
            email(TextOptions::default()),
        ] {
            let errors = node.validate(&Value::Null, "contact").await.unwrap_err();
            assert_eq!(errors.codes("contact"), vec!["null_not_allowed"]);
        }
    }

    #[tokio::test]
    async fn test_object_paths_and_unknown_keys() {
        let node = object(ObjectOptions::with_properties([
            ("id", uuid(TextOptions::new().with_required(true))),
            ("name", string(TextOptions::new().with_max_length(3))),
        ]))
        .unwrap();

        let errors = node
            .check_field("user", Some(&json!({ "name": "too long", "extra": 1 })))
            .await
            .unwrap_err();
        assert_eq!(errors.codes("user.id"), vec!["required"]);
        assert_eq!(errors.codes("user.name"), vec!["length_max"]);
        assert_eq!(errors.codes("user.extra"), vec!["unknown_property"]);
    }

    #[tokio::test]
    async fn test_array_item_paths() {
        let node = array(ArrayOptions::of(boolean(BooleanOptions::default()))).unwrap();
        let errors = node
            .validate(&json!([true, "false", false, 0]), "flags")
            .await
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.has_field_errors("flags[1]"));
        assert!(errors.has_field_errors("flags[3]"));
    }

    #[tokio::test]
    async fn test_check_fills_defaults_and_converts_numbers() {
        let node = object(ObjectOptions::with_properties([
            ("page", integer(NumberOptions::new().with_default(1))),
            ("ratio", number(NumberOptions::default())),
            ("tags", array(ArrayOptions::of(integer(NumberOptions::default()))).unwrap()),
        ]))
        .unwrap();

        let checked = node
            .check(Some(&json!({ "ratio": "0.5", "tags": ["7", 8] })))
            .await
            .unwrap();
        assert_eq!(
            checked,
            Some(json!({ "page": 1, "ratio": 0.5, "tags": [7, 8] }))
        );
    }

    #[tokio::test]
    async fn test_byte_bounds_count_decoded_bytes() {
        // "AAEC" is four characters of base64 for three bytes
        let at_most_three = byte(TextOptions::new().with_max_length(3));
        assert!(at_most_three.accepts(&json!("AAEC")).await);
        assert!(!at_most_three.accepts(&json!("AAECAw==")).await);

        let at_least_four = byte(TextOptions::new().with_min_length(4));
        let errors = at_least_four.validate(&json!("AAEC"), "payload").await.unwrap_err();
        assert_eq!(errors.codes("payload"), vec!["length_min"]);

        let errors = at_most_three.validate(&json!("AAEC!"), "payload").await.unwrap_err();
        assert_eq!(errors.codes("payload"), vec!["invalid_format"]);

        let raw = binary(TextOptions::new().with_max_length(3));
        assert!(!raw.accepts(&json!("AAEC")).await);
        assert!(raw.accepts(&json!("abc")).await);
    }

    #[test]
    fn test_parameters_describe_rules() {
        let params = ipv4(TextOptions::default()).parameters().unwrap();
        assert_eq!(params[1]["parameters"], json!({ "min": 7, "max": 15 }));
        assert_eq!(params[2]["parameters"], json!({ "format": "ipv4" }));
    }
}
