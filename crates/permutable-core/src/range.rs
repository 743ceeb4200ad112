use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::enums::PermutationEnum;
use crate::value::{EnumValue, FieldValue};

/// Owned iterator over the candidate values of one range.
pub type RangeValues = Box<dyn Iterator<Item = FieldValue> + Send>;

/// Source of candidate values for a single field.
///
/// `get_range` must be a pure function of the descriptor's configuration: it
/// can be called any number of times and always yields the same finite
/// sequence in the same order.
pub trait RangeDescriptor: fmt::Debug + Send + Sync {
    /// Stable identifier for logs and error messages.
    fn kind(&self) -> &'static str;

    fn get_range(&self) -> RangeValues;

    /// Number of values produced by [`RangeDescriptor::get_range`].
    fn len(&self) -> usize {
        self.get_range().count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `count` consecutive integers starting at `start`.
///
/// A non-positive `count` yields nothing; no other bounds are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalRange {
    pub start: i64,
    pub count: i64,
}

impl IntervalRange {
    pub const fn new(start: i64, count: i64) -> Self {
        Self { start, count }
    }
}

impl RangeDescriptor for IntervalRange {
    fn kind(&self) -> &'static str {
        "interval"
    }

    fn get_range(&self) -> RangeValues {
        let start = self.start;
        Box::new((0..self.count.max(0)).map(move |offset| FieldValue::Int(start.wrapping_add(offset))))
    }

    fn len(&self) -> usize {
        usize::try_from(self.count.max(0)).unwrap_or(usize::MAX)
    }
}

/// Every member of the Rust enumeration `E`, in declaration order.
pub struct EnumMembers<E> {
    marker: PhantomData<fn() -> E>,
}

impl<E: PermutationEnum> EnumMembers<E> {
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<E: PermutationEnum> Default for EnumMembers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PermutationEnum> fmt::Debug for EnumMembers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumMembers").field("enum", &E::NAME).finish()
    }
}

impl<E: PermutationEnum> RangeDescriptor for EnumMembers<E> {
    fn kind(&self) -> &'static str {
        "enum"
    }

    fn get_range(&self) -> RangeValues {
        Box::new(E::members().iter().enumerate().map(|(ordinal, member)| {
            FieldValue::Enum(EnumValue::new(E::NAME, member.label(), ordinal))
        }))
    }

    fn len(&self) -> usize {
        E::members().len()
    }
}

/// Members of an enumeration declared at runtime by name and labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRange {
    type_name: Arc<str>,
    labels: Arc<[Arc<str>]>,
}

impl LabelRange {
    pub fn new<I, S>(type_name: impl Into<Arc<str>>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            type_name: type_name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl RangeDescriptor for LabelRange {
    fn kind(&self) -> &'static str {
        "enum"
    }

    fn get_range(&self) -> RangeValues {
        let type_name = Arc::clone(&self.type_name);
        let labels = Arc::clone(&self.labels);
        Box::new((0..labels.len()).map(move |ordinal| {
            FieldValue::Enum(EnumValue {
                type_name: Arc::clone(&type_name),
                label: Arc::clone(&labels[ordinal]),
                ordinal,
            })
        }))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Explicit list of values, yielded as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueList {
    values: Arc<[FieldValue]>,
}

impl ValueList {
    pub fn new(values: impl IntoIterator<Item = FieldValue>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RangeDescriptor for ValueList {
    fn kind(&self) -> &'static str {
        "values"
    }

    fn get_range(&self) -> RangeValues {
        let values = Arc::clone(&self.values);
        Box::new((0..values.len()).map(move |index| values[index].clone()))
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

/// `false` then `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolRange;

impl RangeDescriptor for BoolRange {
    fn kind(&self) -> &'static str {
        "bool"
    }

    fn get_range(&self) -> RangeValues {
        Box::new([false, true].into_iter().map(FieldValue::Bool))
    }

    fn len(&self) -> usize {
        2
    }
}
