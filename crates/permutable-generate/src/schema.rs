use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use permutable_core::{Error, FieldValue, FromFieldValue, RangeDescriptor, Result};

use crate::assignment::PartialAssignment;
use crate::generator::Permutations;

/// Untyped assignment of a value into one field of `T`.
pub type Setter<T> = Box<dyn Fn(&mut T, FieldValue) -> Result<()> + Send + Sync>;
type Constructor<T> = Box<dyn Fn() -> Result<T> + Send + Sync>;

/// Types that declare which of their fields take part in permutation.
pub trait Permutable: Sized + 'static {
    fn schema() -> Result<RecordSchema<Self>>;
}

/// One ranged field of a record type.
pub struct FieldSpec<T> {
    name: String,
    range: Arc<dyn RangeDescriptor>,
    setter: Setter<T>,
}

impl<T> FieldSpec<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> &dyn RangeDescriptor {
        self.range.as_ref()
    }

    /// Store `value` into this field of `record`.
    pub fn assign(&self, record: &mut T, value: FieldValue) -> Result<()> {
        (self.setter)(record, value)
    }
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("range", &self.range)
            .finish()
    }
}

/// Ordered field specifications plus the constructor for a record type.
pub struct RecordSchema<T> {
    name: String,
    fields: Vec<FieldSpec<T>>,
    unranged: Vec<String>,
    constructor: Constructor<T>,
}

impl<T: Default + 'static> RecordSchema<T> {
    /// Builder whose records start from `T::default()`.
    pub fn builder(name: impl Into<String>) -> RecordSchemaBuilder<T> {
        RecordSchemaBuilder::with_constructor(name, || Ok(T::default()))
    }
}

impl<T> RecordSchema<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ranged fields in declaration order.
    pub fn fields(&self) -> &[FieldSpec<T>] {
        &self.fields
    }

    /// Fields left at their constructed value in every record.
    pub fn unranged_fields(&self) -> &[String] {
        &self.unranged
    }

    /// Size of the full product, or `None` when it does not fit in a `u64`.
    pub fn expected_count(&self) -> Option<u64> {
        self.fields.iter().try_fold(1_u64, |total, field| {
            let len = u64::try_from(field.range().len()).ok()?;
            total.checked_mul(len)
        })
    }

    pub fn construct(&self) -> Result<T> {
        (self.constructor)()
    }

    /// Build one record from a complete assignment.
    pub fn materialize(&self, assignment: &PartialAssignment) -> Result<T> {
        let mut record = self.construct()?;
        for (index, value) in assignment.entries() {
            let field = self.fields.get(index).ok_or_else(|| {
                Error::InvalidSchema(format!(
                    "assignment refers to field #{index} but '{}' has {} ranged fields",
                    self.name,
                    self.fields.len()
                ))
            })?;
            field.assign(&mut record, value.clone())?;
        }
        Ok(record)
    }

    /// Start a fresh traversal over every combination.
    pub fn permutations(self: &Arc<Self>) -> Permutations<T> {
        Permutations::new(Arc::clone(self))
    }
}

impl<T> fmt::Debug for RecordSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordSchema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("unranged", &self.unranged)
            .finish_non_exhaustive()
    }
}

/// Declarative registration of a record type's fields.
///
/// Fields are recorded in call order; [`RecordSchemaBuilder::build`] rejects a
/// name registered twice.
pub struct RecordSchemaBuilder<T> {
    name: String,
    fields: Vec<FieldSpec<T>>,
    unranged: Vec<String>,
    constructor: Constructor<T>,
}

impl<T: 'static> RecordSchemaBuilder<T> {
    pub fn with_constructor<F>(name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fields: Vec::new(),
            unranged: Vec::new(),
            constructor: Box::new(constructor),
        }
    }

    /// Register a ranged field with a typed setter.
    ///
    /// Values are converted with [`FromFieldValue`] when a record is
    /// materialized; a failed conversion is reported as
    /// [`Error::TypeMismatch`] at that point.
    pub fn field<V, R, F>(self, name: &str, range: R, set: F) -> Self
    where
        V: FromFieldValue + 'static,
        R: RangeDescriptor + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let field = name.to_string();
        let setter: Setter<T> = Box::new(move |record: &mut T, value: FieldValue| {
            let found = value.kind_name();
            match V::from_field_value(value) {
                Some(value) => {
                    set(record, value);
                    Ok(())
                }
                None => Err(Error::TypeMismatch {
                    field: field.clone(),
                    expected: V::expected_kind(),
                    found,
                }),
            }
        });
        self.raw_field(name, Arc::new(range), setter)
    }

    /// Register a ranged field with an untyped setter.
    pub fn raw_field(
        mut self,
        name: &str,
        range: Arc<dyn RangeDescriptor>,
        setter: Setter<T>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            range,
            setter,
        });
        self
    }

    /// Record a field that keeps its constructed value.
    pub fn unranged(mut self, name: &str) -> Self {
        self.unranged.push(name.to_string());
        self
    }

    pub fn build(self) -> Result<RecordSchema<T>> {
        let mut ranged = HashSet::new();
        for field in &self.fields {
            if !ranged.insert(field.name.as_str()) {
                return Err(Error::MultipleRanges {
                    field: field.name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for name in &self.unranged {
            if ranged.contains(name.as_str()) || !seen.insert(name.as_str()) {
                return Err(Error::DuplicateField {
                    field: name.clone(),
                });
            }
        }

        Ok(RecordSchema {
            name: self.name,
            fields: self.fields,
            unranged: self.unranged,
            constructor: self.constructor,
        })
    }
}
