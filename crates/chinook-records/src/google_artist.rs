//! Typed entities of the `artist-by-google-id` variant.
//!
//! Albums reference their artist through `artist_id`, which holds the
//! artist's `google_user_id` rather than its primary key.

use rusqlite::types::Value;
use serde::Serialize;

use crate::error::RecordError;
use crate::model::{many, one, text_value, Model};
use crate::record::{Attributes, Record};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub google_user_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist_id: String,
}

impl Artist {
    pub fn create(
        store: &Store<'_>,
        google_user_id: &str,
        name: Option<&str>,
    ) -> Result<Self, RecordError> {
        let record = store.insert(
            Self::ENTITY,
            &[
                ("google_user_id", Value::Text(google_user_id.into())),
                ("name", name.map_or(Value::Null, |n| Value::Text(n.into()))),
            ],
        )?;
        Self::from_record(&record)
    }

    pub fn albums(&self, store: &Store<'_>) -> Result<Vec<Album>, RecordError> {
        many(store, self, "albums")
    }
}

impl Attributes for Artist {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(Value::Integer(self.id)),
            "google_user_id" => Some(Value::Text(self.google_user_id.clone())),
            "name" => Some(text_value(&self.name)),
            _ => None,
        }
    }
}

impl Model for Artist {
    const ENTITY: &'static str = "Artist";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("id")?,
            google_user_id: record.text("google_user_id")?,
            name: record.optional_text("name")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}

impl Album {
    pub fn create(
        store: &Store<'_>,
        artist_google_id: &str,
        title: &str,
    ) -> Result<Self, RecordError> {
        let record = store.insert(
            Self::ENTITY,
            &[
                ("title", Value::Text(title.into())),
                ("artist_id", Value::Text(artist_google_id.into())),
            ],
        )?;
        Self::from_record(&record)
    }

    pub fn artist(&self, store: &Store<'_>) -> Result<Artist, RecordError> {
        one(store, self, "artist")
    }
}

impl Attributes for Album {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(Value::Integer(self.id)),
            "title" => Some(Value::Text(self.title.clone())),
            "artist_id" => Some(Value::Text(self.artist_id.clone())),
            _ => None,
        }
    }
}

impl Model for Album {
    const ENTITY: &'static str = "Album";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("id")?,
            title: record.text("title")?,
            artist_id: record.text("artist_id")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}
