use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::enums::PermutationEnum;

/// Member of an enumeration, carried by name so that enumerations declared at
/// runtime and Rust enums share one representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub type_name: Arc<str>,
    pub label: Arc<str>,
    pub ordinal: usize,
}

impl EnumValue {
    pub fn new(type_name: impl Into<Arc<str>>, label: impl Into<Arc<str>>, ordinal: usize) -> Self {
        Self {
            type_name: type_name.into(),
            label: label.into(),
            ordinal,
        }
    }

    /// Build the value for `member`, or `None` if it is not listed in
    /// `E::members()`.
    pub fn of<E: PermutationEnum + PartialEq>(member: E) -> Option<Self> {
        member
            .ordinal()
            .map(|ordinal| Self::new(E::NAME, member.label(), ordinal))
    }
}

/// Candidate value for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawValue")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    Enum(EnumValue),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            FieldValue::Enum(value) => Some(&value.label),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            FieldValue::Enum(value) => Some(value),
            _ => None,
        }
    }

    /// Short description of the value's kind, used in mismatch errors.
    pub fn kind_name(&self) -> String {
        match self {
            FieldValue::Null => "null".to_string(),
            FieldValue::Bool(_) => "bool".to_string(),
            FieldValue::Int(_) => "int".to_string(),
            FieldValue::Text(_) => "text".to_string(),
            FieldValue::Enum(value) => format!("enum {}", value.type_name),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Enum(value) => f.write_str(&value.label),
        }
    }
}

// Enum members serialize as their label so generated records read naturally.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Bool(value) => serializer.serialize_bool(*value),
            FieldValue::Int(value) => serializer.serialize_i64(*value),
            FieldValue::Text(value) => serializer.serialize_str(value),
            FieldValue::Enum(value) => serializer.serialize_str(&value.label),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Null(()),
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<RawValue> for FieldValue {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Null(()) => FieldValue::Null,
            RawValue::Bool(value) => FieldValue::Bool(value),
            RawValue::Int(value) => FieldValue::Int(value),
            RawValue::Text(value) => FieldValue::Text(value),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Conversion from a [`FieldValue`] into the concrete type of a record field.
///
/// Returning `None` signals a type mismatch; the caller attaches the field
/// name and reports it as [`crate::Error::TypeMismatch`].
pub trait FromFieldValue: Sized {
    /// Human-readable name of the accepted kind.
    fn expected_kind() -> String;

    fn from_field_value(value: FieldValue) -> Option<Self>;
}

impl FromFieldValue for FieldValue {
    fn expected_kind() -> String {
        "any".to_string()
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        Some(value)
    }
}

impl FromFieldValue for bool {
    fn expected_kind() -> String {
        "bool".to_string()
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        value.as_bool()
    }
}

impl FromFieldValue for String {
    fn expected_kind() -> String {
        "text".to_string()
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

macro_rules! int_from_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromFieldValue for $ty {
                fn expected_kind() -> String {
                    stringify!($ty).to_string()
                }

                fn from_field_value(value: FieldValue) -> Option<Self> {
                    value.as_i64().and_then(|value| <$ty>::try_from(value).ok())
                }
            }
        )*
    };
}

int_from_field_value!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl<E: PermutationEnum> FromFieldValue for E {
    fn expected_kind() -> String {
        format!("enum {}", E::NAME)
    }

    fn from_field_value(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Enum(value) if &*value.type_name == E::NAME => {
                E::members().get(value.ordinal).copied()
            }
            _ => None,
        }
    }
}
