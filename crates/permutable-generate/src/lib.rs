//! Cartesian-product generation engine for Permutable.
//!
//! A [`RecordSchema`] lists the ranged fields of a record type in declaration
//! order; [`Permutations`] walks every combination of their values lazily, in
//! odometer order, materializing one record per step.

pub mod assignment;
pub mod document;
pub mod errors;
pub mod generator;
pub mod model;
pub mod record;
pub mod schema;

pub use assignment::PartialAssignment;
pub use document::{
    FieldDecl, FieldKind, RangeSpec, SchemaDocument, document_json_schema, validate_document_json,
};
pub use errors::{DocumentError, ValidationIssue, ValidationReport};
pub use generator::Permutations;
pub use model::GenerateOptions;
pub use record::DynamicRecord;
pub use schema::{FieldSpec, Permutable, RecordSchema, RecordSchemaBuilder};

use std::sync::Arc;

/// Discover the ranged fields of `T` and start a fresh traversal over them.
pub fn generate_permutations_for_type<T: Permutable>()
-> permutable_core::Result<Permutations<T>> {
    let schema = Arc::new(T::schema()?);
    Ok(Permutations::new(schema))
}
