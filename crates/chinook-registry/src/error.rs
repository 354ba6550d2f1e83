//! Error types for the relationship registry.

use thiserror::Error;

/// A declaration does not match itself or the backing schema.
///
/// Every variant is a configuration mistake: it is reported once at startup
/// (or on first use) and never retried.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Two declarations share one entity name.
    #[error("entity '{0}' is registered more than once")]
    DuplicateEntity(String),

    /// Two entities bind tables whose names differ only in case.
    #[error("entities '{first}' and '{second}' both bind table '{table}'")]
    TableCollision {
        /// Entity registered first.
        first: String,
        /// Entity registered second.
        second: String,
        /// The table name as declared by the second entity.
        table: String,
    },

    /// An entity declares no primary key column.
    #[error("entity '{0}' declares no primary key")]
    MissingPrimaryKey(String),

    /// A relation name repeats within one entity.
    #[error("entity '{entity}' declares relation '{relation}' more than once")]
    DuplicateRelation {
        /// Owning entity.
        entity: String,
        /// Repeated relation name.
        relation: String,
    },

    /// An entity name that the registry does not hold.
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    /// A relation points at an entity that is not registered.
    #[error("relation '{entity}.{relation}' targets unknown entity '{target}'")]
    UnknownTarget {
        /// Owning entity.
        entity: String,
        /// Relation name.
        relation: String,
        /// The missing entity.
        target: String,
    },

    /// A relation name that the entity does not declare.
    #[error("entity '{entity}' has no relation '{relation}'")]
    UnknownRelation {
        /// Owning entity.
        entity: String,
        /// Requested relation name.
        relation: String,
    },

    /// A key or attribute column is not among the entity's declared columns.
    #[error("column '{column}' is not declared on entity '{entity}'")]
    UnknownColumn {
        /// Entity expected to carry the column.
        entity: String,
        /// Column name.
        column: String,
    },

    /// The declared table does not exist in the backing schema.
    #[error("table '{table}' for entity '{entity}' does not exist")]
    MissingTable {
        /// Entity binding the table.
        entity: String,
        /// Declared table name.
        table: String,
    },

    /// The table exists, but under a name with different case.
    #[error("entity '{entity}' declares table '{declared}' but the schema names it '{actual}'")]
    TableCaseMismatch {
        /// Entity binding the table.
        entity: String,
        /// Declared table name.
        declared: String,
        /// Table name as stored in the schema.
        actual: String,
    },

    /// A declared column does not exist on the physical table.
    #[error("column '{column}' does not exist on table '{table}'")]
    MissingColumn {
        /// Physical table name.
        table: String,
        /// Declared column name.
        column: String,
    },

    /// Reading the schema failed.
    #[error("schema inspection failed: {0}")]
    Database(#[from] rusqlite::Error),
}
