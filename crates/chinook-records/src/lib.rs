//! Record access and relationship traversal over a [`Registry`].
//!
//! [`Store`] reads and writes untyped [`Record`]s using only what the
//! registry declares: table names, key columns and join specifications.
//! The typed modules ([`chinook`], [`blog`], [`google_artist`]) wrap it with
//! one struct per entity and one accessor per declared relation.
//!
//! To-one traversals that find nothing fail with [`RecordError::NotFound`].
//! To-many traversals that find nothing return an empty `Vec`.
//!
//! [`Registry`]: chinook_registry::Registry

pub mod blog;
pub mod chinook;
mod error;
pub mod google_artist;
mod model;
mod record;
pub mod sql;
mod store;

pub use error::RecordError;
pub use model::{many, one, Model};
pub use record::{Attributes, Record};
pub use rusqlite::types::Value;
pub use store::{Related, Store};
