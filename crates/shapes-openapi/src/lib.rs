/*!
# shapes-openapi

Schema builders for API payloads. Each builder turns a small option record
into a [`SchemaNode`] that both validates values and renders as an OpenAPI
schema object.

## Features

- One builder per shape: strings, emails, UUIDs, URIs, IP addresses,
  binary payloads, dates, numbers, enums, booleans, objects and arrays
- Validation through the `shapes-validation` rule engine
- OpenAPI 3.0 and 3.1 rendering, exported as JSON or YAML
- Shape descriptors read from JSON or YAML

## Usage

```rust
use shapes_openapi::builders::{email, object, uuid};
use shapes_openapi::{ExportConfig, ObjectOptions, TextOptions};

let user = object(ObjectOptions::with_properties([
    ("id", uuid(TextOptions::new().with_required(true))),
    ("email", email(TextOptions::new().with_nullable(true))),
]))
.unwrap();

let schema = user.to_openapi(&ExportConfig::default());
assert_eq!(schema.required, vec!["id".to_string()]);
```
*/

// Re-export main types
pub use crate::{
    config::{ExportConfig, ExportFormat},
    descriptor::{ArrayDescriptor, ObjectDescriptor, ShapeDescriptor},
    error::{SchemaError, SchemaResult},
    node::{Encoding, Presence, SchemaKind, SchemaNode},
    options::{
        ArrayOptions, BooleanOptions, CommonOptions, EnumOptions, NumberOptions, ObjectOptions,
        TextOptions,
    },
    schema::SchemaRenderer,
    specification::{Schema, SchemaType},
    validate::ROOT_FIELD,
};

pub use shapes_validation::{
    Format, ValidationError, ValidationErrors, ValidationResult, ValidationRule,
};

// Core modules
pub mod config;
pub mod error;
pub mod node;
pub mod options;
pub mod specification;

// Building
pub mod builders;
mod configure;
pub mod descriptor;

// Validation and rendering
pub mod schema;
pub mod validate;
