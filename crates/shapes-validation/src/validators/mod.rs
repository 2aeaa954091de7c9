//! Built-in validators for the rules a schema node can carry

pub mod email;
pub mod format;
pub mod length;
pub mod numeric;
pub mod one_of;
pub mod type_check;

pub use email::EmailValidator;
pub use format::{Format, FormatValidator};
pub use length::{LengthUnit, LengthValidator};
pub use numeric::NumericValidator;
pub use one_of::OneOfValidator;
pub use type_check::{TypeValidator, ValueType};
