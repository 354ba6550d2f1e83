//! Reads, writes and relation traversal driven by registry metadata.
//!
//! A [`Store`] borrows one connection and one [`Registry`]. It holds no
//! state of its own: every call resolves the entity or relation in the
//! registry, builds its statement with [`crate::sql`], and runs it.

use chinook_registry::{ConfigurationError, EntityDef, JoinSpec, Registry, Relation, RelationKind};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use serde::Serialize;

use crate::error::RecordError;
use crate::record::{describe_key, Attributes, Record};
use crate::sql;

/// The result of traversing one relation.
///
/// Serializes as the bare record (a map) or as an array of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Related {
    /// A to-one traversal that found its row.
    One(Record),
    /// A to-many traversal, possibly empty, ordered by the target's key.
    Many(Vec<Record>),
}

/// Registry-driven access to the backing store.
#[derive(Debug, Clone, Copy)]
pub struct Store<'a> {
    conn: &'a Connection,
    registry: &'a Registry,
}

impl<'a> Store<'a> {
    /// Wraps `conn`, resolving every entity and relation through `registry`.
    pub fn new(conn: &'a Connection, registry: &'a Registry) -> Self {
        Self { conn, registry }
    }

    /// The registry this store resolves names against.
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Fetches one record by primary key.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no row has that key.
    pub fn find(&self, entity: &str, key: &[Value]) -> Result<Record, RecordError> {
        let def = self.registry.entity(entity)?;
        check_key(def, key)?;

        tracing::debug!(table = def.table, "find by key");
        self.conn
            .query_row(&sql::select_by_key(def), params_from_iter(key), |row| {
                Record::from_row(def, row)
            })
            .optional()?
            .ok_or_else(|| not_found(def, key))
    }

    /// Fetches every record of `entity`, ordered by primary key.
    pub fn all(&self, entity: &str) -> Result<Vec<Record>, RecordError> {
        let def = self.registry.entity(entity)?;
        tracing::debug!(table = def.table, "select all");
        self.query(def, &sql::select_all(def), &[])
    }

    /// Inserts a row with the given column values and returns it as stored.
    ///
    /// Omitted columns take their schema defaults, so an omitted integer
    /// primary key is assigned by SQLite.
    pub fn insert(&self, entity: &str, values: &[(&str, Value)]) -> Result<Record, RecordError> {
        let def = self.registry.entity(entity)?;
        let columns = checked_columns(def, values)?;

        tracing::debug!(table = def.table, columns = columns.len(), "insert");
        let record = self.conn.query_row(
            &sql::insert(def, &columns),
            params_from_iter(values.iter().map(|(_, value)| value)),
            |row| Record::from_row(def, row),
        )?;
        Ok(record)
    }

    /// Updates the given columns of the row keyed by `key`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no row has that key.
    pub fn update(
        &self,
        entity: &str,
        key: &[Value],
        values: &[(&str, Value)],
    ) -> Result<Record, RecordError> {
        let def = self.registry.entity(entity)?;
        check_key(def, key)?;
        if values.is_empty() {
            return self.find(entity, key);
        }
        let columns = checked_columns(def, values)?;

        tracing::debug!(table = def.table, columns = columns.len(), "update");
        let params = values.iter().map(|(_, value)| value).chain(key.iter());
        self.conn
            .query_row(&sql::update(def, &columns), params_from_iter(params), |row| {
                Record::from_row(def, row)
            })
            .optional()?
            .ok_or_else(|| not_found(def, key))
    }

    /// Deletes the row keyed by `key`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotFound` if no row has that key.
    pub fn delete(&self, entity: &str, key: &[Value]) -> Result<(), RecordError> {
        let def = self.registry.entity(entity)?;
        check_key(def, key)?;

        tracing::debug!(table = def.table, "delete");
        let changed = self
            .conn
            .execute(&sql::delete(def), params_from_iter(key))?;
        if changed == 0 {
            return Err(not_found(def, key));
        }
        Ok(())
    }

    /// Traverses `relation` starting from `owner`.
    ///
    /// To-one relations yield [`Related::One`] or fail with `NotFound` when
    /// no row matches (a null foreign key included). To-many relations yield
    /// [`Related::Many`], empty when nothing is related.
    pub fn traverse(
        &self,
        owner: &impl Attributes,
        relation: &str,
    ) -> Result<Related, RecordError> {
        let (def, relation) = self.resolve(owner, relation)?;
        let owner_value = owner_value(owner, def, relation)?;
        let target = self.registry.entity(relation.target)?;

        tracing::debug!(
            table = def.table,
            relation = relation.name,
            target = target.table,
            "traverse relation"
        );

        match relation.kind {
            RelationKind::BelongsTo { target_key, .. } => {
                if owner_value == Value::Null {
                    return Err(not_found(target, &[owner_value]));
                }
                let mut rows =
                    self.query(target, &sql::select_where(target, target_key), &[owner_value.clone()])?;
                if rows.is_empty() {
                    return Err(not_found(target, &[owner_value]));
                }
                Ok(Related::One(rows.swap_remove(0)))
            }
            RelationKind::HasMany { foreign_key, .. } => Ok(Related::Many(self.query(
                target,
                &sql::select_where(target, foreign_key),
                &[owner_value],
            )?)),
            RelationKind::ManyToMany(spec) => {
                let join = self.registry.entity(spec.join)?;
                Ok(Related::Many(self.query(
                    target,
                    &sql::select_through(target, join, &spec),
                    &[owner_value],
                )?))
            }
        }
    }

    /// Traverses a to-one relation.
    pub fn to_one(&self, owner: &impl Attributes, relation: &str) -> Result<Record, RecordError> {
        match self.traverse(owner, relation)? {
            Related::One(record) => Ok(record),
            Related::Many(_) => Err(invalid(owner, relation, "to-one")),
        }
    }

    /// Traverses a to-many relation.
    pub fn to_many(
        &self,
        owner: &impl Attributes,
        relation: &str,
    ) -> Result<Vec<Record>, RecordError> {
        match self.traverse(owner, relation)? {
            Related::Many(records) => Ok(records),
            Related::One(_) => Err(invalid(owner, relation, "to-many")),
        }
    }

    /// Stores the pair (`owner`, target identified by `target_value`) in the
    /// join table of a many-to-many relation.
    ///
    /// Returns `false` if the pair was already present.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no target row has `target_value` in the
    /// relation's target key, and `InvalidRelation` for other relation kinds.
    pub fn link(
        &self,
        owner: &impl Attributes,
        relation: &str,
        target_value: &Value,
    ) -> Result<bool, RecordError> {
        let (def, relation, spec) = self.resolve_join(owner, relation)?;
        let owner_value = owner_value(owner, def, relation)?;
        let target = self.registry.entity(relation.target)?;

        let exists: bool = self.conn.query_row(
            &sql::exists_where(target, spec.target_key),
            [target_value],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(not_found(target, std::slice::from_ref(target_value)));
        }

        let join = self.registry.entity(spec.join)?;
        tracing::debug!(table = join.table, relation = relation.name, "link pair");
        let changed = self.conn.execute(
            &sql::insert_link(join, &spec),
            params_from_iter([&owner_value, target_value]),
        )?;
        Ok(changed > 0)
    }

    /// Removes the pair from the join table. Returns `false` if it was absent.
    pub fn unlink(
        &self,
        owner: &impl Attributes,
        relation: &str,
        target_value: &Value,
    ) -> Result<bool, RecordError> {
        let (def, relation, spec) = self.resolve_join(owner, relation)?;
        let owner_value = owner_value(owner, def, relation)?;
        let join = self.registry.entity(spec.join)?;

        tracing::debug!(table = join.table, relation = relation.name, "unlink pair");
        let changed = self.conn.execute(
            &sql::delete_link(join, &spec),
            params_from_iter([&owner_value, target_value]),
        )?;
        Ok(changed > 0)
    }

    fn resolve(
        &self,
        owner: &impl Attributes,
        relation: &str,
    ) -> Result<(&'a EntityDef, &'a Relation), RecordError> {
        let def = self.registry.entity(owner.entity_name())?;
        let relation = self.registry.relation(def.name, relation)?;
        Ok((def, relation))
    }

    fn resolve_join(
        &self,
        owner: &impl Attributes,
        relation: &str,
    ) -> Result<(&'a EntityDef, &'a Relation, JoinSpec), RecordError> {
        let (def, resolved) = self.resolve(owner, relation)?;
        match resolved.kind {
            RelationKind::ManyToMany(spec) => Ok((def, resolved, spec)),
            _ => Err(invalid(owner, relation, "many-to-many")),
        }
    }

    fn query(
        &self,
        def: &EntityDef,
        statement: &str,
        params: &[Value],
    ) -> Result<Vec<Record>, RecordError> {
        let mut stmt = self.conn.prepare(statement)?;
        let rows = stmt.query_map(params_from_iter(params), |row| Record::from_row(def, row))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}

fn owner_value(
    owner: &impl Attributes,
    def: &EntityDef,
    relation: &Relation,
) -> Result<Value, RecordError> {
    let column = relation.owner_column();
    owner.attribute(column).ok_or_else(|| {
        ConfigurationError::UnknownColumn {
            entity: def.name.to_string(),
            column: column.to_string(),
        }
        .into()
    })
}

fn check_key(def: &EntityDef, key: &[Value]) -> Result<(), RecordError> {
    if key.len() != def.primary_key.len() {
        return Err(RecordError::KeyArity {
            entity: def.name.to_string(),
            expected: def.primary_key.len(),
            got: key.len(),
        });
    }
    Ok(())
}

fn checked_columns<'v>(
    def: &EntityDef,
    values: &[(&'v str, Value)],
) -> Result<Vec<&'v str>, ConfigurationError> {
    values
        .iter()
        .map(|(column, _)| {
            if def.has_column(column) {
                Ok(*column)
            } else {
                Err(ConfigurationError::UnknownColumn {
                    entity: def.name.to_string(),
                    column: column.to_string(),
                })
            }
        })
        .collect()
}

fn not_found(def: &EntityDef, key: &[Value]) -> RecordError {
    RecordError::NotFound {
        entity: def.name.to_string(),
        key: describe_key(key),
    }
}

fn invalid(owner: &impl Attributes, relation: &str, expected: &'static str) -> RecordError {
    RecordError::InvalidRelation {
        entity: owner.entity_name().to_string(),
        relation: relation.to_string(),
        expected,
    }
}
