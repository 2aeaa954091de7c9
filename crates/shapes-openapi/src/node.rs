//! The schema node produced by every builder

use serde_json::Value;
use shapes_validation::Format;
use std::collections::BTreeMap;

/// Base primitive a node validates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    String,
    /// Raw bytes carried as a string
    Binary,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl SchemaKind {
    /// OpenAPI `type` keyword for this kind
    pub fn openapi_type(&self) -> &'static str {
        match self {
            SchemaKind::String | SchemaKind::Binary => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, SchemaKind::Number | SchemaKind::Integer)
    }
}

/// Whether a value must be supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// Nothing was said; the value may be absent
    #[default]
    Unspecified,
    Required,
    Optional,
}

/// Transfer encoding expected of binary payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Base64,
}

/// A configured validator and documentation unit.
///
/// Nodes are built by the functions in [`crate::builders`] and are not
/// modified afterwards; compose them into objects and arrays or hand them to
/// a validator or renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub(crate) kind: SchemaKind,
    pub(crate) description: Option<String>,
    pub(crate) presence: Presence,
    pub(crate) nullable: bool,
    pub(crate) default: Option<Value>,
    pub(crate) example: Option<Value>,
    pub(crate) format_hint: Option<&'static str>,
    pub(crate) format: Option<Format>,
    pub(crate) email: bool,
    pub(crate) encoding: Option<Encoding>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) minimum: Option<f64>,
    pub(crate) maximum: Option<f64>,
    pub(crate) allowed: Vec<Value>,
    pub(crate) properties: BTreeMap<String, SchemaNode>,
    pub(crate) items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// A bare node of the given kind with no constraints
    pub(crate) fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
            presence: Presence::Unspecified,
            nullable: false,
            default: None,
            example: None,
            format_hint: None,
            format: None,
            email: false,
            encoding: None,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            allowed: Vec::new(),
            properties: BTreeMap::new(),
            items: None,
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn example(&self) -> Option<&Value> {
        self.example.as_ref()
    }

    /// Documentation-only format tag such as `uuid` or `password`
    pub fn format_hint(&self) -> Option<&'static str> {
        self.format_hint
    }

    /// Functional string format check, if any
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn is_email(&self) -> bool {
        self.email
    }

    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    /// Length bounds; element counts for arrays
    pub fn length_bounds(&self) -> (Option<usize>, Option<usize>) {
        (self.min_length, self.max_length)
    }

    pub fn value_bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.minimum, self.maximum)
    }

    /// Allowed values, in the order supplied; empty when unrestricted
    pub fn allowed_values(&self) -> &[Value] {
        &self.allowed
    }

    pub fn properties(&self) -> &BTreeMap<String, SchemaNode> {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.get(name)
    }

    /// Element node of an array
    pub fn items(&self) -> Option<&SchemaNode> {
        self.items.as_deref()
    }
}
