//! Database layer for the Chinook relationship registry.
//!
//! Provides SQLite connection pooling (via `r2d2`), the embedded schema
//! bootstrap for each [`Variant`](chinook_types::Variant), and read-only
//! inspection of the physical schema that the registry validates against.
//!
//! The bootstrap only applies fixed DDL files compiled into the binary with
//! `include_str!`. Each variant gets its own list, since some variants bind
//! the same entity to tables whose names differ only in case and SQLite
//! table names cannot coexist that way in one database.

mod inspect;
mod migrations;
mod pool;

pub use inspect::{find_table, table_columns, table_names};
pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
