//! Error types for the record layer.

use chinook_registry::ConfigurationError;

/// Errors that can occur while reading or writing records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A keyed lookup or a to-one traversal matched no row.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity that was looked up.
        entity: String,
        /// The key values, comma separated.
        key: String,
    },

    /// The request names something the registry does not declare.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A database operation failed.
    #[error("record database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value does not have the shape a typed model expects.
    #[error("column '{column}' of {entity} {reason}")]
    Decode {
        /// Entity being decoded.
        entity: String,
        /// Offending column.
        column: String,
        /// What was wrong with the value.
        reason: &'static str,
    },

    /// The relation exists but does not support the requested operation.
    #[error("relation '{entity}.{relation}' is not {expected}")]
    InvalidRelation {
        /// Owning entity.
        entity: String,
        /// Relation name.
        relation: String,
        /// The kind the operation needs.
        expected: &'static str,
    },

    /// The number of key values does not match the entity's primary key.
    #[error("{entity} is keyed by {expected} column(s), got {got}")]
    KeyArity {
        /// Entity being addressed.
        entity: String,
        /// Primary key width.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}

impl RecordError {
    /// Returns whether this is an absence-of-data condition rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
