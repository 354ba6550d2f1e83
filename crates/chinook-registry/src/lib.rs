//! Relationship registry for the Chinook schemas.
//!
//! A static table of entity definitions: each names its backing table, its
//! identifier and attribute columns, and its relationships to other
//! entities with the exact join keys. The registry has no runtime behavior
//! of its own. It is built once at process start, checked for internal
//! consistency, optionally validated against a live schema, and then shared
//! read-only with the record layer.
//!
//! # Relation kinds
//!
//! | Kind | Join condition |
//! |------|----------------|
//! | `HasMany` | `target.foreign_key = owner.owner_key` |
//! | `BelongsTo` | `owner.foreign_key = target.target_key` |
//! | `ManyToMany` | `owner.owner_key = join.left_key AND join.right_key = target.target_key` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use chinook_registry::Registry;
//! use chinook_types::Variant;
//!
//! let registry = Registry::for_variant(Variant::Chinook)?;
//! registry.validate_schema(&conn)?;
//! let albums = registry.relation("Artist", "albums")?;
//! ```

pub mod declarations;
mod entity;
mod error;
mod registry;

pub use entity::{EntityDef, JoinSpec, Relation, RelationKind};
pub use error::ConfigurationError;
pub use registry::{Registry, RegistryBuilder, SchemaDescription};

#[cfg(test)]
mod tests;
