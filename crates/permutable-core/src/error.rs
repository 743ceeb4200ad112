use thiserror::Error;

/// Core error type shared across Permutable crates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The same field name was declared twice on a record schema.
    #[error("field '{field}' is declared more than once")]
    DuplicateField { field: String },
    /// A field carries more than one range descriptor.
    #[error("field '{field}' declares more than one range")]
    MultipleRanges { field: String },
    /// The record constructor failed before any field was assigned.
    #[error("failed to construct record: {0}")]
    Construction(String),
    /// A range produced a value the field cannot hold.
    #[error("type mismatch on field '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: String,
        found: String,
    },
    /// The schema description is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// Convenience alias for results returned by Permutable crates.
pub type Result<T> = std::result::Result<T, Error>;
