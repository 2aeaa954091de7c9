use crate::{
    config::{ExportConfig, ExportFormat},
    error::{SchemaError, SchemaResult},
    node::{Encoding, SchemaKind, SchemaNode},
    specification::{Schema, SchemaType},
};
use serde_json::Value;
use shapes_validation::Format;
use tracing::debug;

/// Renders schema nodes as OpenAPI schema objects
#[derive(Debug, Clone, Default)]
pub struct SchemaRenderer {
    config: ExportConfig,
}

impl SchemaRenderer {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render a node and everything nested under it
    pub fn render(&self, node: &SchemaNode) -> Schema {
        render_node(node, &self.config)
    }

    /// Render to text in the configured format
    pub fn export(&self, node: &SchemaNode) -> SchemaResult<String> {
        match self.config.format {
            ExportFormat::Json => self.to_json(node),
            ExportFormat::Yaml => self.to_yaml(node),
        }
    }

    pub fn to_json(&self, node: &SchemaNode) -> SchemaResult<String> {
        let schema = self.render(node);
        if self.config.pretty_print {
            serde_json::to_string_pretty(&schema).map_err(SchemaError::from)
        } else {
            serde_json::to_string(&schema).map_err(SchemaError::from)
        }
    }

    pub fn to_yaml(&self, node: &SchemaNode) -> SchemaResult<String> {
        serde_yaml::to_string(&self.render(node)).map_err(SchemaError::from)
    }
}

impl SchemaNode {
    /// OpenAPI schema object for this node
    pub fn to_openapi(&self, config: &ExportConfig) -> Schema {
        render_node(self, config)
    }
}

/// The `format` keyword: the explicit hint, else one derived from the node
fn format_name(node: &SchemaNode) -> Option<&'static str> {
    if let Some(hint) = node.format_hint() {
        return Some(hint);
    }
    match node.kind() {
        SchemaKind::Binary => Some(match node.encoding() {
            Some(Encoding::Base64) => "byte",
            None => "binary",
        }),
        SchemaKind::String if node.is_email() => Some("email"),
        SchemaKind::String => match node.format() {
            Some(Format::IsoDate) => Some("date-time"),
            Some(other) => Some(other.as_str()),
            None => None,
        },
        _ => None,
    }
}

fn render_node(node: &SchemaNode, config: &ExportConfig) -> Schema {
    let type_name = node.kind().openapi_type().to_string();
    let nullable = node.is_nullable();
    let type_unions = config.uses_type_unions();

    let schema_type = if nullable && type_unions {
        SchemaType::Union(vec![type_name, "null".to_string()])
    } else {
        SchemaType::Single(type_name)
    };

    let mut enum_values = node.allowed_values().to_vec();
    if nullable && !enum_values.is_empty() {
        enum_values.push(Value::Null);
    }

    let (min, max) = node.length_bounds();
    let ((min_length, max_length), (min_items, max_items)) = match node.kind() {
        SchemaKind::Array => ((None, None), (min, max)),
        _ => ((min, max), (None, None)),
    };
    let (minimum, maximum) = node.value_bounds();

    let content_encoding = match node.encoding() {
        Some(Encoding::Base64) if type_unions => Some("base64".to_string()),
        _ => None,
    };

    let schema = Schema {
        schema_type: Some(schema_type),
        format: format_name(node).map(str::to_string),
        description: node.description().map(str::to_string),
        default: node.default_value().filter(|_| config.include_defaults).cloned(),
        example: node.example().filter(|_| config.include_examples).cloned(),
        nullable: (nullable && !type_unions).then_some(true),
        properties: node
            .properties()
            .iter()
            .map(|(name, property)| (name.clone(), render_node(property, config)))
            .collect(),
        required: node
            .properties()
            .iter()
            .filter(|(_, property)| property.is_required())
            .map(|(name, _)| name.clone())
            .collect(),
        additional_properties: (node.kind() == SchemaKind::Object).then_some(false),
        items: node.items().map(|item| Box::new(render_node(item, config))),
        enum_values,
        minimum,
        maximum,
        min_length,
        max_length,
        min_items,
        max_items,
        content_encoding,
    };

    debug!(kind = ?node.kind(), format = ?schema.format, "rendered schema");
    schema
}
