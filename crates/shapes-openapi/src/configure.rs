//! Shared option application for all builders.
//!
//! Each option record breaks down into [`Parts`]; [`configure`] applies them
//! to a bare node under a per-shape [`ShapePolicy`]. Shapes differ only in
//! their policy and in what they add after configuration.

use crate::node::{Presence, SchemaKind, SchemaNode};
use crate::options::{
    ArrayOptions, BooleanOptions, CommonOptions, EnumOptions, NumberOptions, ObjectOptions,
    TextOptions,
};
use serde_json::Value;
use tracing::{debug, trace};

/// How an explicit `required` flag is honored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequiredPolicy {
    /// `true` marks required, `false` marks optional
    BothWays,
    /// `true` marks required, `false` is ignored
    OnlyWhenTrue,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ShapePolicy {
    pub required: RequiredPolicy,
    /// Apply `default` and `example`
    pub values: bool,
    /// Apply length or value bounds
    pub bounds: bool,
}

impl ShapePolicy {
    pub(crate) const STANDARD: Self = Self {
        required: RequiredPolicy::BothWays,
        values: true,
        bounds: true,
    };

    /// Numbers and numeric enums never mark themselves optional
    pub(crate) const NUMERIC: Self = Self {
        required: RequiredPolicy::OnlyWhenTrue,
        values: true,
        bounds: true,
    };

    /// Date-times honor only description, required and nullable
    pub(crate) const DESCRIPTIVE: Self = Self {
        required: RequiredPolicy::BothWays,
        values: false,
        bounds: false,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Bounds {
    None,
    Length { min: Option<usize>, max: Option<usize> },
    Value { min: Option<f64>, max: Option<f64> },
}

impl Bounds {
    fn is_set(&self) -> bool {
        match self {
            Bounds::None => false,
            Bounds::Length { min, max } => min.is_some() || max.is_some(),
            Bounds::Value { min, max } => min.is_some() || max.is_some(),
        }
    }
}

/// The generic view of an option record
#[derive(Debug, Clone)]
pub(crate) struct Parts {
    pub common: CommonOptions,
    pub default: Option<Value>,
    pub example: Option<Value>,
    pub bounds: Bounds,
}

pub(crate) trait Configure {
    fn into_parts(self) -> Parts;
}

impl Configure for TextOptions {
    fn into_parts(self) -> Parts {
        Parts {
            common: self.common,
            default: self.default,
            example: self.example,
            bounds: Bounds::Length {
                min: self.min_length,
                max: self.max_length,
            },
        }
    }
}

impl Configure for NumberOptions {
    fn into_parts(self) -> Parts {
        Parts {
            common: self.common,
            default: self.default,
            example: self.example,
            bounds: Bounds::Value {
                min: self.min_value,
                max: self.max_value,
            },
        }
    }
}

impl<T> Configure for EnumOptions<T> {
    fn into_parts(self) -> Parts {
        Parts {
            common: self.common,
            default: self.default,
            example: self.example,
            bounds: Bounds::None,
        }
    }
}

impl Configure for BooleanOptions {
    fn into_parts(self) -> Parts {
        Parts {
            common: self.common,
            default: self.default,
            example: self.example,
            bounds: Bounds::None,
        }
    }
}

impl Configure for ObjectOptions {
    fn into_parts(self) -> Parts {
        Parts {
            common: self.common,
            default: self.default,
            example: self.example,
            bounds: Bounds::None,
        }
    }
}

impl Configure for ArrayOptions {
    fn into_parts(self) -> Parts {
        Parts {
            common: self.common,
            default: self.default,
            example: self.example,
            bounds: Bounds::Length {
                min: self.min_length,
                max: self.max_length,
            },
        }
    }
}

/// Build a node of `kind` from an option record under `policy`
pub(crate) fn build<O: Configure>(
    shape: &'static str,
    kind: SchemaKind,
    options: O,
    policy: ShapePolicy,
) -> SchemaNode {
    let node = configure(shape, SchemaNode::new(kind), options.into_parts(), policy);
    trace!(shape, ?kind, "built schema node");
    node
}

pub(crate) fn configure(
    shape: &'static str,
    mut node: SchemaNode,
    parts: Parts,
    policy: ShapePolicy,
) -> SchemaNode {
    let Parts {
        common,
        default,
        example,
        bounds,
    } = parts;

    if let Some(description) = common.description.filter(|d| !d.is_empty()) {
        node.description = Some(description);
    }

    match (common.required, policy.required) {
        (Some(true), _) => node.presence = Presence::Required,
        (Some(false), RequiredPolicy::BothWays) => node.presence = Presence::Optional,
        (Some(false), RequiredPolicy::OnlyWhenTrue) | (None, _) => {}
    }

    if common.nullable == Some(true) {
        node.nullable = true;
    }

    if policy.values {
        node.default = default;
        node.example = example;
    } else if default.is_some() || example.is_some() {
        debug!(shape, "default and example are not applied to this shape");
    }

    if policy.bounds {
        apply_bounds(&mut node, bounds);
    } else if bounds.is_set() {
        debug!(shape, "length bounds are not applied to this shape");
    }

    node
}

fn apply_bounds(node: &mut SchemaNode, bounds: Bounds) {
    match bounds {
        Bounds::None => {}
        // a zero length bound is no bound
        Bounds::Length { min, max } => {
            node.min_length = min.filter(|&n| n > 0);
            node.max_length = max.filter(|&n| n > 0);
        }
        Bounds::Value { min, max } => {
            node.minimum = min.filter(|n| n.is_finite());
            node.maximum = max.filter(|n| n.is_finite());
        }
    }
}

/// Pin length bounds, replacing whatever the caller asked for
pub(crate) fn force_length(shape: &'static str, node: &mut SchemaNode, min: usize, max: usize) {
    let requested = (node.min_length, node.max_length);
    if requested != (None, None) && requested != (Some(min), Some(max)) {
        debug!(
            shape,
            ?requested,
            min,
            max,
            "length bounds replaced by the shape's fixed bounds"
        );
    }
    node.min_length = Some(min);
    node.max_length = Some(max);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(options: TextOptions, policy: ShapePolicy) -> SchemaNode {
        build("test", SchemaKind::String, options, policy)
    }

    #[test]
    fn test_required_policies() {
        let both = |required| text(TextOptions::new().with_required(required), ShapePolicy::STANDARD);
        assert_eq!(both(true).presence(), Presence::Required);
        assert_eq!(both(false).presence(), Presence::Optional);

        let numeric = |required| {
            build(
                "test",
                SchemaKind::Number,
                NumberOptions::new().with_required(required),
                ShapePolicy::NUMERIC,
            )
        };
        assert_eq!(numeric(true).presence(), Presence::Required);
        assert_eq!(numeric(false).presence(), Presence::Unspecified);
    }

    #[test]
    fn test_empty_description_is_skipped() {
        let node = text(TextOptions::new().with_description(""), ShapePolicy::STANDARD);
        assert!(node.description().is_none());
    }

    #[test]
    fn test_zero_length_bounds_are_skipped() {
        let node = text(
            TextOptions::new().with_min_length(0).with_max_length(8),
            ShapePolicy::STANDARD,
        );
        assert_eq!(node.length_bounds(), (None, Some(8)));
    }

    #[test]
    fn test_numeric_bounds_keep_zero() {
        let node = build(
            "test",
            SchemaKind::Number,
            NumberOptions::new().with_min_value(0.0).with_max_value(f64::INFINITY),
            ShapePolicy::NUMERIC,
        );
        assert_eq!(node.value_bounds(), (Some(0.0), None));
    }

    #[test]
    fn test_descriptive_policy_ignores_values_and_bounds() {
        let node = text(
            TextOptions::new()
                .with_description("When")
                .with_nullable(true)
                .with_default("2024-01-01")
                .with_example("2024-01-01")
                .with_max_length(5),
            ShapePolicy::DESCRIPTIVE,
        );
        assert_eq!(node.description(), Some("When"));
        assert!(node.is_nullable());
        assert!(node.default_value().is_none());
        assert!(node.example().is_none());
        assert_eq!(node.length_bounds(), (None, None));
    }

    #[test]
    fn test_force_length_overrides() {
        let mut node = text(TextOptions::new().with_min_length(1), ShapePolicy::STANDARD);
        force_length("test", &mut node, 36, 36);
        assert_eq!(node.length_bounds(), (Some(36), Some(36)));
    }
}
