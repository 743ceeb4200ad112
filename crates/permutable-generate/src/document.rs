use std::path::Path;
use std::sync::Arc;

use jsonschema::JSONSchema;
use schemars::JsonSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use permutable_core::{
    BoolRange, EnumValue, Error, FieldValue, IntervalRange, LabelRange, RangeDescriptor, ValueList,
};

use crate::errors::{DocumentError, ValidationIssue, ValidationReport};
use crate::record::DynamicRecord;
use crate::schema::{RecordSchema, RecordSchemaBuilder, Setter};

/// Record type declared as data (`*.json` or `*.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SchemaDocument {
    /// Record type name, used when rendering records.
    pub name: String,
    /// Fields in declaration order; ranged fields vary in this order.
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

/// One field of a schema document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldDecl {
    pub name: String,
    /// Accepted value kind; untyped fields accept any value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldKind>,
    /// Value held by the field before any range value is assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(with = "Option<serde_json::Value>")]
    pub default: Option<FieldValue>,
    /// Range of candidate values. At most one range per field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ranges: Vec<RangeSpec>,
}

/// Value kinds a document field can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Int,
    Bool,
    Text,
    Enum,
}

impl FieldKind {
    pub fn accepts(self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Int, FieldValue::Int(_))
                | (FieldKind::Bool, FieldValue::Bool(_))
                | (FieldKind::Text, FieldValue::Text(_))
                | (FieldKind::Enum, FieldValue::Enum(_))
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::Bool => "bool",
            FieldKind::Text => "text",
            FieldKind::Enum => "enum",
        }
    }
}

/// Range declaration for a document field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RangeSpec {
    /// `count` consecutive integers from `start`.
    Interval { start: i64, count: i64 },
    /// Every label of an enumeration, in the order given.
    Enum { name: String, labels: Vec<String> },
    /// Explicit list of values.
    Values {
        #[schemars(with = "Vec<serde_json::Value>")]
        values: Vec<FieldValue>,
    },
    /// `false` then `true`.
    Bool,
}

impl RangeSpec {
    pub fn to_descriptor(&self) -> Arc<dyn RangeDescriptor> {
        match self {
            RangeSpec::Interval { start, count } => Arc::new(IntervalRange::new(*start, *count)),
            RangeSpec::Enum { name, labels } => {
                Arc::new(LabelRange::new(name.as_str(), labels.iter().map(String::as_str)))
            }
            RangeSpec::Values { values } => Arc::new(ValueList::new(values.iter().cloned())),
            RangeSpec::Bool => Arc::new(BoolRange),
        }
    }
}

/// Enumeration backing an `enum`-kinded document field.
///
/// Taken from the field's `enum` range when it has one; otherwise named after
/// the field, with the text entries of its `values` range and then its
/// default as labels.
struct DocumentEnum {
    type_name: Arc<str>,
    labels: Vec<String>,
}

impl DocumentEnum {
    fn for_field(field: &FieldDecl) -> Option<Self> {
        if field.kind != Some(FieldKind::Enum) {
            return None;
        }

        let mut type_name: Arc<str> = Arc::from(field.name.as_str());
        let mut labels: Vec<String> = Vec::new();
        for range in &field.ranges {
            match range {
                RangeSpec::Enum { name, labels: declared } => {
                    type_name = Arc::from(name.as_str());
                    labels = declared.clone();
                }
                RangeSpec::Values { values } => labels.extend(
                    values
                        .iter()
                        .filter_map(|value| value.as_str().map(str::to_string)),
                ),
                RangeSpec::Interval { .. } | RangeSpec::Bool => {}
            }
        }
        if let Some(label) = field.default.as_ref().and_then(FieldValue::as_str)
            && !labels.iter().any(|known| known == label)
        {
            labels.push(label.to_string());
        }

        Some(Self { type_name, labels })
    }

    /// Text labels become members; every other value passes through.
    fn coerce(&self, value: FieldValue) -> FieldValue {
        match value {
            FieldValue::Text(label) => match self.labels.iter().position(|known| *known == label) {
                Some(ordinal) => {
                    FieldValue::Enum(EnumValue::new(Arc::clone(&self.type_name), label, ordinal))
                }
                None => FieldValue::Text(label),
            },
            other => other,
        }
    }
}

struct FieldSeed {
    name: String,
    kind: Option<FieldKind>,
    value: FieldValue,
}

impl SchemaDocument {
    /// Load a document, choosing the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let contents = std::fs::read_to_string(path)?;
        let value: Value = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents)?,
            _ => serde_json::from_str(&contents)?,
        };
        debug!(path = %path.display(), "schema document loaded");
        Self::from_json_value(value)
    }

    /// Validate `value` against the document JSON Schema and parse it.
    pub fn from_json_value(value: Value) -> Result<Self, DocumentError> {
        let schema = serde_json::to_value(document_json_schema())?;
        let report = validate_document_json(&value, &schema)?;
        if !report.is_ok() {
            return Err(DocumentError::Invalid(report));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Build the record schema described by this document.
    ///
    /// Fields without a range keep their default in every record. A field
    /// with more than one range is rejected.
    pub fn to_schema(&self) -> Result<RecordSchema<DynamicRecord>, Error> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidSchema("record name must not be empty".to_string()));
        }
        if let Some(index) = self.fields.iter().position(|field| field.name.trim().is_empty()) {
            return Err(Error::InvalidSchema(format!(
                "field #{index} of record '{}' has an empty name",
                self.name
            )));
        }

        let seeds: Vec<FieldSeed> = self
            .fields
            .iter()
            .map(|field| {
                let value = field.default.clone().unwrap_or(FieldValue::Null);
                FieldSeed {
                    name: field.name.clone(),
                    kind: field.kind,
                    value: match DocumentEnum::for_field(field) {
                        Some(members) => members.coerce(value),
                        None => value,
                    },
                }
            })
            .collect();
        let type_name: Arc<str> = Arc::from(self.name.as_str());

        let mut builder = RecordSchemaBuilder::with_constructor(self.name.clone(), move || {
            let mut record = DynamicRecord::new(Arc::clone(&type_name));
            for seed in &seeds {
                if let Some(kind) = seed.kind
                    && !seed.value.is_null()
                    && !kind.accepts(&seed.value)
                {
                    return Err(Error::Construction(format!(
                        "default of field '{}' is {}, expected {}",
                        seed.name,
                        seed.value.kind_name(),
                        kind.as_str()
                    )));
                }
                record.set(seed.name.clone(), seed.value.clone());
            }
            Ok(record)
        });

        for field in &self.fields {
            builder = match field.ranges.as_slice() {
                [] => builder.unranged(&field.name),
                [range] => builder.raw_field(
                    &field.name,
                    field_descriptor(field, range),
                    dynamic_setter(field.name.clone(), field.kind),
                ),
                _ => {
                    return Err(Error::MultipleRanges {
                        field: field.name.clone(),
                    });
                }
            };
        }

        builder.build()
    }
}

fn field_descriptor(field: &FieldDecl, range: &RangeSpec) -> Arc<dyn RangeDescriptor> {
    match (range, DocumentEnum::for_field(field)) {
        (RangeSpec::Values { values }, Some(members)) => Arc::new(ValueList::new(
            values.iter().cloned().map(|value| members.coerce(value)),
        )),
        _ => range.to_descriptor(),
    }
}

fn dynamic_setter(field: String, kind: Option<FieldKind>) -> Setter<DynamicRecord> {
    Box::new(move |record: &mut DynamicRecord, value: FieldValue| {
        if let Some(kind) = kind
            && !kind.accepts(&value)
        {
            return Err(Error::TypeMismatch {
                field: field.clone(),
                expected: kind.as_str().to_string(),
                found: value.kind_name(),
            });
        }
        record.set(field.clone(), value);
        Ok(())
    })
}

/// Emit the JSON Schema for schema documents.
pub fn document_json_schema() -> RootSchema {
    schema_for!(SchemaDocument)
}

/// Validate a document against the schema-document JSON Schema.
pub fn validate_document_json(
    document: &Value,
    document_schema: &Value,
) -> Result<ValidationReport, DocumentError> {
    let compiled = JSONSchema::compile(document_schema)
        .map_err(|err| DocumentError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(document) {
        for error in errors {
            let path = error.instance_path.to_string();
            let path = if path.is_empty() { "/".to_string() } else { path };
            report.push(ValidationIssue::new(
                "schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    Ok(report)
}
