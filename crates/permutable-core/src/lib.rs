//! Core contracts for Permutable.
//!
//! This crate defines the field value model, the range descriptors that
//! enumerate candidate values for a field, and the error type shared across
//! the generator and the CLI.

pub mod enums;
pub mod error;
pub mod range;
pub mod value;

pub use enums::PermutationEnum;
pub use error::{Error, Result};
pub use range::{
    BoolRange, EnumMembers, IntervalRange, LabelRange, RangeDescriptor, RangeValues, ValueList,
};
pub use value::{EnumValue, FieldValue, FromFieldValue};
