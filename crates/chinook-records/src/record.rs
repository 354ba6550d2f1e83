//! Untyped rows read through the registry.

use chinook_registry::EntityDef;
use rusqlite::types::Value;
use rusqlite::Row;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::RecordError;

/// Read access to an entity's direct attributes by column name.
///
/// Implemented by [`Record`] and by every typed model, so relation
/// traversal can start from either.
pub trait Attributes {
    /// Name of the entity this value belongs to.
    fn entity_name(&self) -> &str;

    /// Value of `column`, or `None` if the entity has no such column.
    fn attribute(&self, column: &str) -> Option<Value>;
}

/// One row of one entity, in the entity's declared column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entity: &'static str,
    columns: &'static [&'static str],
    values: Vec<Value>,
}

impl Record {
    pub(crate) fn from_row(entity: &EntityDef, row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        let mut values = Vec::with_capacity(entity.columns.len());
        for index in 0..entity.columns.len() {
            values.push(row.get::<_, Value>(index)?);
        }
        Ok(Self {
            entity: entity.name,
            columns: entity.columns,
            values,
        })
    }

    /// Entity name.
    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Value of `column`, if declared.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| *c == column)
            .map(|index| &self.values[index])
    }

    /// Column/value pairs in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.columns.iter().copied().zip(self.values.iter())
    }

    /// Reads an integer column.
    pub fn integer(&self, column: &str) -> Result<i64, RecordError> {
        match self.require(column)? {
            Value::Integer(value) => Ok(*value),
            Value::Null => Err(self.decode(column, "is null")),
            _ => Err(self.decode(column, "is not an integer")),
        }
    }

    /// Reads a non-null text column.
    pub fn text(&self, column: &str) -> Result<String, RecordError> {
        self.optional_text(column)?
            .ok_or_else(|| self.decode(column, "is null"))
    }

    /// Reads a nullable text column.
    pub fn optional_text(&self, column: &str) -> Result<Option<String>, RecordError> {
        match self.require(column)? {
            Value::Text(value) => Ok(Some(value.clone())),
            Value::Null => Ok(None),
            _ => Err(self.decode(column, "is not text")),
        }
    }

    /// Values of `columns`, in the given order.
    pub(crate) fn project(&self, columns: &[&str]) -> Option<Vec<Value>> {
        columns.iter().map(|c| self.get(c).cloned()).collect()
    }

    fn require(&self, column: &str) -> Result<&Value, RecordError> {
        self.get(column)
            .ok_or_else(|| self.decode(column, "is not declared"))
    }

    fn decode(&self, column: &str, reason: &'static str) -> RecordError {
        RecordError::Decode {
            entity: self.entity.to_string(),
            column: column.to_string(),
            reason,
        }
    }
}

impl Attributes for Record {
    fn entity_name(&self) -> &str {
        self.entity
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        self.get(column).cloned()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, &SqlValue(value))?;
        }
        map.end()
    }
}

/// Serializes a SQLite value as its natural JSON counterpart.
struct SqlValue<'a>(&'a Value);

impl Serialize for SqlValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Null => serializer.serialize_none(),
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Real(value) => serializer.serialize_f64(*value),
            Value::Text(value) => serializer.serialize_str(value),
            Value::Blob(value) => serializer.serialize_bytes(value),
        }
    }
}

/// Formats key values for error messages.
pub(crate) fn describe_key(values: &[Value]) -> String {
    values
        .iter()
        .map(|value| match value {
            Value::Null => "NULL".to_string(),
            Value::Integer(v) => v.to_string(),
            Value::Real(v) => v.to_string(),
            Value::Text(v) => v.clone(),
            Value::Blob(v) => format!("<{} bytes>", v.len()),
        })
        .collect::<Vec<_>>()
        .join(",")
}
