//! Read-only inspection of the physical schema.

use rusqlite::{Connection, OptionalExtension};

/// Lists user tables in the order SQLite created them, excluding SQLite's
/// internal tables and the migration tracking table.
pub fn table_names(conn: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_chinook_migrations'
         ORDER BY rowid ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut tables = Vec::new();
    for row in rows {
        tables.push(row?);
    }
    Ok(tables)
}

/// Looks up a table by name, ignoring case the way SQLite resolves it.
///
/// Returns the name exactly as stored in the schema, so callers can detect a
/// declared name that only matches case-insensitively.
pub fn find_table(conn: &Connection, table: &str) -> Result<Option<String>, rusqlite::Error> {
    conn.query_row(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
        [table],
        |row| row.get(0),
    )
    .optional()
}

/// Returns the column names of `table` in declaration order.
///
/// An unknown table yields an empty list.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid ASC")?;
    let rows = stmt.query_map([table], |row| row.get(0))?;

    let mut columns = Vec::new();
    for row in rows {
        columns.push(row?);
    }
    Ok(columns)
}
