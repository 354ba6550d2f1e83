//! SQL statements built from registry metadata.
//!
//! Every identifier is double-quoted, so statements address exactly the
//! declared table and column names. Parameters are positional (`?1`, `?2`, ...)
//! and never interpolated.

use chinook_registry::{EntityDef, JoinSpec};

/// Quotes an identifier for SQLite.
pub fn quote(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn column_list(entity: &EntityDef, alias: Option<&str>) -> String {
    entity
        .columns
        .iter()
        .map(|column| qualified(alias, column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn qualified(alias: Option<&str>, column: &str) -> String {
    match alias {
        Some(alias) => format!("{alias}.{}", quote(column)),
        None => quote(column),
    }
}

fn order_by_key(entity: &EntityDef, alias: Option<&str>) -> String {
    entity
        .primary_key
        .iter()
        .map(|column| format!("{} ASC", qualified(alias, column)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `col1 = ?n AND col2 = ?n+1 ...`, numbering from `first`.
fn key_predicate(entity: &EntityDef, first: usize) -> String {
    entity
        .primary_key
        .iter()
        .enumerate()
        .map(|(offset, column)| format!("{} = ?{}", quote(column), first + offset))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Every row, ordered by primary key.
pub fn select_all(entity: &EntityDef) -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        column_list(entity, None),
        quote(entity.table),
        order_by_key(entity, None)
    )
}

/// One row by primary key.
pub fn select_by_key(entity: &EntityDef) -> String {
    format!(
        "SELECT {} FROM {} WHERE {}",
        column_list(entity, None),
        quote(entity.table),
        key_predicate(entity, 1)
    )
}

/// Rows whose `column` equals `?1`, ordered by primary key.
pub fn select_where(entity: &EntityDef, column: &str) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = ?1 ORDER BY {}",
        column_list(entity, None),
        quote(entity.table),
        quote(column),
        order_by_key(entity, None)
    )
}

/// Whether any row has `column` equal to `?1`.
pub fn exists_where(entity: &EntityDef, column: &str) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ?1)",
        quote(entity.table),
        quote(column)
    )
}

/// Target rows linked to owner value `?1` through a join table.
pub fn select_through(target: &EntityDef, join: &EntityDef, spec: &JoinSpec) -> String {
    format!(
        "SELECT {} FROM {} AS t JOIN {} AS j ON j.{} = t.{} WHERE j.{} = ?1 ORDER BY {}",
        column_list(target, Some("t")),
        quote(target.table),
        quote(join.table),
        quote(spec.right_key),
        quote(spec.target_key),
        quote(spec.left_key),
        order_by_key(target, Some("t"))
    )
}

/// Inserts `columns` and returns the stored row.
pub fn insert(entity: &EntityDef, columns: &[&str]) -> String {
    let returning = column_list(entity, None);
    if columns.is_empty() {
        return format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {returning}",
            quote(entity.table)
        );
    }

    let names = columns.iter().map(|c| quote(c)).collect::<Vec<_>>().join(", ");
    let params = (1..=columns.len())
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({names}) VALUES ({params}) RETURNING {returning}",
        quote(entity.table)
    )
}

/// Sets `columns` on the row keyed by the trailing parameters.
pub fn update(entity: &EntityDef, columns: &[&str]) -> String {
    let assignments = columns
        .iter()
        .enumerate()
        .map(|(offset, column)| format!("{} = ?{}", quote(column), offset + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {assignments} WHERE {} RETURNING {}",
        quote(entity.table),
        key_predicate(entity, columns.len() + 1),
        column_list(entity, None)
    )
}

/// Deletes the row keyed by the parameters.
pub fn delete(entity: &EntityDef) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        quote(entity.table),
        key_predicate(entity, 1)
    )
}

/// Stores a join pair unless it already exists.
pub fn insert_link(join: &EntityDef, spec: &JoinSpec) -> String {
    format!(
        "INSERT OR IGNORE INTO {} ({}, {}) VALUES (?1, ?2)",
        quote(join.table),
        quote(spec.left_key),
        quote(spec.right_key)
    )
}

/// Removes a join pair.
pub fn delete_link(join: &EntityDef, spec: &JoinSpec) -> String {
    format!(
        "DELETE FROM {} WHERE {} = ?1 AND {} = ?2",
        quote(join.table),
        quote(spec.left_key),
        quote(spec.right_key)
    )
}
