//! Typed entities of the `blog` variant: Post and Tag related through PostTag.

use rusqlite::types::Value;
use serde::Serialize;

use crate::error::RecordError;
use crate::model::{many, one, text_value, Model};
use crate::record::{Attributes, Record};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostTag {
    pub post_id: i64,
    pub tag_id: i64,
}

impl Post {
    pub fn create(store: &Store<'_>, title: &str, body: Option<&str>) -> Result<Self, RecordError> {
        let record = store.insert(
            Self::ENTITY,
            &[
                ("title", Value::Text(title.into())),
                ("body", body.map_or(Value::Null, |b| Value::Text(b.into()))),
            ],
        )?;
        Self::from_record(&record)
    }

    pub fn tags(&self, store: &Store<'_>) -> Result<Vec<Tag>, RecordError> {
        many(store, self, "tags")
    }

    pub fn post_tags(&self, store: &Store<'_>) -> Result<Vec<PostTag>, RecordError> {
        many(store, self, "post_tags")
    }

    pub fn add_tag(&self, store: &Store<'_>, tag: &Tag) -> Result<bool, RecordError> {
        store.link(self, "tags", &Value::Integer(tag.id))
    }

    pub fn remove_tag(&self, store: &Store<'_>, tag: &Tag) -> Result<bool, RecordError> {
        store.unlink(self, "tags", &Value::Integer(tag.id))
    }
}

impl Attributes for Post {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(Value::Integer(self.id)),
            "title" => Some(Value::Text(self.title.clone())),
            "body" => Some(text_value(&self.body)),
            _ => None,
        }
    }
}

impl Model for Post {
    const ENTITY: &'static str = "Post";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("id")?,
            title: record.text("title")?,
            body: record.optional_text("body")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}

impl Tag {
    pub fn create(store: &Store<'_>, name: &str) -> Result<Self, RecordError> {
        Self::from_record(&store.insert(Self::ENTITY, &[("name", Value::Text(name.into()))])?)
    }

    pub fn posts(&self, store: &Store<'_>) -> Result<Vec<Post>, RecordError> {
        many(store, self, "posts")
    }

    pub fn post_tags(&self, store: &Store<'_>) -> Result<Vec<PostTag>, RecordError> {
        many(store, self, "post_tags")
    }
}

impl Attributes for Tag {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "id" => Some(Value::Integer(self.id)),
            "name" => Some(Value::Text(self.name.clone())),
            _ => None,
        }
    }
}

impl Model for Tag {
    const ENTITY: &'static str = "Tag";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("id")?,
            name: record.text("name")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}

impl PostTag {
    pub fn post(&self, store: &Store<'_>) -> Result<Post, RecordError> {
        one(store, self, "post")
    }

    pub fn tag(&self, store: &Store<'_>) -> Result<Tag, RecordError> {
        one(store, self, "tag")
    }
}

impl Attributes for PostTag {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "post_id" => Some(Value::Integer(self.post_id)),
            "tag_id" => Some(Value::Integer(self.tag_id)),
            _ => None,
        }
    }
}

impl Model for PostTag {
    const ENTITY: &'static str = "PostTag";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            post_id: record.integer("post_id")?,
            tag_id: record.integer("tag_id")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.post_id), Value::Integer(self.tag_id)]
    }
}
