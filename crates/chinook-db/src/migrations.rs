//! Embedded schema bootstrap.
//!
//! Each variant has an ordered list of DDL files embedded at compile time.
//! They run sequentially, tracked by the `_chinook_migrations` table, and
//! each one runs exactly once per database.

use chinook_types::Variant;
use rusqlite::Connection;
use thiserror::Error;

/// A single embedded migration.
struct Migration {
    name: &'static str,
    sql: &'static str,
}

const CHINOOK_CATALOG: Migration = Migration {
    name: "001_chinook_catalog",
    sql: include_str!("migrations/001_chinook_catalog.sql"),
};

const CHINOOK: &[Migration] = &[
    CHINOOK_CATALOG,
    Migration {
        name: "002_chinook_playlists",
        sql: include_str!("migrations/002_chinook_playlists.sql"),
    },
];

const CHINOOK_LEGACY_JOIN: &[Migration] = &[
    CHINOOK_CATALOG,
    Migration {
        name: "002_chinook_playlists_legacy_join",
        sql: include_str!("migrations/002_chinook_playlists_legacy_join.sql"),
    },
];

const ARTIST_BY_GOOGLE_ID: &[Migration] = &[Migration {
    name: "001_google_artists",
    sql: include_str!("migrations/001_google_artists.sql"),
}];

const BLOG: &[Migration] = &[Migration {
    name: "001_blog",
    sql: include_str!("migrations/001_blog.sql"),
}];

fn migrations_for(variant: Variant) -> &'static [Migration] {
    match variant {
        Variant::Chinook => CHINOOK,
        Variant::ChinookLegacyJoin => CHINOOK_LEGACY_JOIN,
        Variant::ArtistByGoogleId => ARTIST_BY_GOOGLE_ID,
        Variant::Blog => BLOG,
    }
}

/// Errors that can occur during migration execution.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A SQL statement within a migration failed.
    #[error("migration '{name}' failed: {source}")]
    ExecutionFailed {
        /// The name of the migration that failed.
        name: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to query migration state.
    #[error("failed to check migration state: {0}")]
    StateQuery(rusqlite::Error),
}

/// Applies the pending bootstrap migrations of `variant`.
///
/// Returns the number of migrations applied by this call. Running a second
/// variant against a database that already holds another variant's tables
/// is not supported and usually fails with `ExecutionFailed`.
///
/// # Errors
///
/// Returns `MigrationError` if any migration fails to execute or if the
/// tracking table cannot be queried.
pub fn run_migrations(conn: &Connection, variant: Variant) -> Result<usize, MigrationError> {
    run_migrations_from_list(conn, migrations_for(variant))
}

fn run_migrations_from_list(
    conn: &Connection,
    migrations: &[Migration],
) -> Result<usize, MigrationError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _chinook_migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(|e| MigrationError::ExecutionFailed {
        name: "_chinook_migrations_bootstrap".to_string(),
        source: e,
    })?;

    let mut applied = 0;

    for migration in migrations {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _chinook_migrations WHERE name = ?1",
                [migration.name],
                |row| row.get(0),
            )
            .map_err(MigrationError::StateQuery)?;

        if already_applied {
            tracing::debug!(
                migration = migration.name,
                "migration already applied, skipping"
            );
            continue;
        }

        tracing::info!(migration = migration.name, "applying migration");

        let failed = |e: rusqlite::Error| MigrationError::ExecutionFailed {
            name: migration.name.to_string(),
            source: e,
        };

        let tx = conn.unchecked_transaction().map_err(failed)?;
        tx.execute_batch(migration.sql).map_err(failed)?;
        tx.execute(
            "INSERT INTO _chinook_migrations (name) VALUES (?1)",
            [migration.name],
        )
        .map_err(failed)?;
        tx.commit().map_err(failed)?;

        applied += 1;
    }

    Ok(applied)
}
