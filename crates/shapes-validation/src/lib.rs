//! # shapes-validation
//!
//! Value validation engine for the shapes schema builders.
//! Rules check a single JSON value at a field path and report every failure
//! they find as a [`ValidationError`] keyed by that path.

pub mod chain;
pub mod error;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use chain::RuleChain;
pub use error::{ValidationError, ValidationErrors, ValidationResult};
pub use traits::ValidationRule;

// Built-in validators
pub use validators::{
    email::EmailValidator,
    format::{Format, FormatValidator},
    length::{LengthUnit, LengthValidator},
    numeric::NumericValidator,
    one_of::OneOfValidator,
    type_check::{TypeValidator, ValueType},
};
