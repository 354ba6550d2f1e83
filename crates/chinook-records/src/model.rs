//! Typed entities on top of [`Store`].

use rusqlite::types::Value;

use crate::error::RecordError;
use crate::record::{Attributes, Record};
use crate::store::Store;

/// A typed view of one registered entity.
pub trait Model: Attributes + Sized {
    /// Registered entity name.
    const ENTITY: &'static str;

    /// Decodes a record of [`Model::ENTITY`].
    fn from_record(record: &Record) -> Result<Self, RecordError>;

    /// Primary key values, in declared order.
    fn key(&self) -> Vec<Value>;

    /// Fetches one instance by primary key.
    fn find(store: &Store<'_>, key: &[Value]) -> Result<Self, RecordError> {
        Self::from_record(&store.find(Self::ENTITY, key)?)
    }

    /// Fetches every instance, ordered by primary key.
    fn all(store: &Store<'_>) -> Result<Vec<Self>, RecordError> {
        decode_all(&store.all(Self::ENTITY)?)
    }

    /// Deletes this instance.
    fn delete(&self, store: &Store<'_>) -> Result<(), RecordError> {
        store.delete(Self::ENTITY, &self.key())
    }
}

/// Traverses a to-one relation into a typed model.
pub fn one<T: Model>(
    store: &Store<'_>,
    owner: &impl Attributes,
    relation: &str,
) -> Result<T, RecordError> {
    T::from_record(&store.to_one(owner, relation)?)
}

/// Traverses a to-many relation into typed models.
pub fn many<T: Model>(
    store: &Store<'_>,
    owner: &impl Attributes,
    relation: &str,
) -> Result<Vec<T>, RecordError> {
    decode_all(&store.to_many(owner, relation)?)
}

fn decode_all<T: Model>(records: &[Record]) -> Result<Vec<T>, RecordError> {
    records.iter().map(T::from_record).collect()
}

pub(crate) fn text_value(value: &Option<String>) -> Value {
    value.clone().map_or(Value::Null, Value::Text)
}
