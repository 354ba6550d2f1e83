//! Typed Chinook entities.
//!
//! These work against both the `chinook` and `chinook-legacy-join`
//! registries: the two declare the same entity names and columns and only
//! disagree on the join table's name, which the registry resolves.

use rusqlite::types::Value;
use serde::Serialize;

use crate::error::RecordError;
use crate::model::{many, one, text_value, Model};
use crate::record::{Attributes, Record};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: i64,
    pub name: String,
    pub composer: Option<String>,
    pub milliseconds: i64,
}

/// One Playlist/Track pair. Identified by the pair alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaylistTrack {
    pub playlist_id: i64,
    pub track_id: i64,
}

// ── Artist ───────────────────────────────────────────────────────────

impl Artist {
    pub fn create(store: &Store<'_>, name: &str) -> Result<Self, RecordError> {
        Self::from_record(&store.insert(Self::ENTITY, &[("Name", Value::Text(name.into()))])?)
    }

    /// Albums whose `ArtistId` references this artist.
    pub fn albums(&self, store: &Store<'_>) -> Result<Vec<Album>, RecordError> {
        many(store, self, "albums")
    }

    pub fn rename(&self, store: &Store<'_>, name: &str) -> Result<Self, RecordError> {
        let record = store.update(
            Self::ENTITY,
            &self.key(),
            &[("Name", Value::Text(name.into()))],
        )?;
        Self::from_record(&record)
    }
}

impl Attributes for Artist {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "ArtistId" => Some(Value::Integer(self.id)),
            "Name" => Some(text_value(&self.name)),
            _ => None,
        }
    }
}

impl Model for Artist {
    const ENTITY: &'static str = "Artist";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("ArtistId")?,
            name: record.optional_text("Name")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}

// ── Album ────────────────────────────────────────────────────────────

impl Album {
    pub fn create(store: &Store<'_>, artist_id: i64, title: &str) -> Result<Self, RecordError> {
        let record = store.insert(
            Self::ENTITY,
            &[
                ("Title", Value::Text(title.into())),
                ("ArtistId", Value::Integer(artist_id)),
            ],
        )?;
        Self::from_record(&record)
    }

    /// The owning artist. Fails with `NotFound` if `ArtistId` is dangling.
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
            "AlbumId" => Some(Value::Integer(self.id)),
            "Title" => Some(Value::Text(self.title.clone())),
            "ArtistId" => Some(Value::Integer(self.artist_id)),
            _ => None,
        }
    }
}

impl Model for Album {
    const ENTITY: &'static str = "Album";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("AlbumId")?,
            title: record.text("Title")?,
            artist_id: record.integer("ArtistId")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}

// ── Playlist ─────────────────────────────────────────────────────────

impl Playlist {
    pub fn create(store: &Store<'_>, name: &str) -> Result<Self, RecordError> {
        Self::from_record(&store.insert(Self::ENTITY, &[("Name", Value::Text(name.into()))])?)
    }

    pub fn tracks(&self, store: &Store<'_>) -> Result<Vec<Track>, RecordError> {
        many(store, self, "tracks")
    }

    pub fn playlist_tracks(&self, store: &Store<'_>) -> Result<Vec<PlaylistTrack>, RecordError> {
        many(store, self, "playlist_tracks")
    }

    /// Links `track` to this playlist. Returns `false` if already linked.
    pub fn add_track(&self, store: &Store<'_>, track: &Track) -> Result<bool, RecordError> {
        store.link(self, "tracks", &Value::Integer(track.id))
    }

    pub fn remove_track(&self, store: &Store<'_>, track: &Track) -> Result<bool, RecordError> {
        store.unlink(self, "tracks", &Value::Integer(track.id))
    }
}

impl Attributes for Playlist {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "PlaylistId" => Some(Value::Integer(self.id)),
            "Name" => Some(text_value(&self.name)),
            _ => None,
        }
    }
}

impl Model for Playlist {
    const ENTITY: &'static str = "Playlist";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("PlaylistId")?,
            name: record.optional_text("Name")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}

// ── Track ────────────────────────────────────────────────────────────

impl Track {
    pub fn create(
        store: &Store<'_>,
        name: &str,
        composer: Option<&str>,
        milliseconds: i64,
    ) -> Result<Self, RecordError> {
        let record = store.insert(
            Self::ENTITY,
            &[
                ("Name", Value::Text(name.into())),
                ("Composer", composer.map_or(Value::Null, |c| Value::Text(c.into()))),
                ("Milliseconds", Value::Integer(milliseconds)),
            ],
        )?;
        Self::from_record(&record)
    }

    pub fn playlists(&self, store: &Store<'_>) -> Result<Vec<Playlist>, RecordError> {
        many(store, self, "playlists")
    }

    pub fn playlist_tracks(&self, store: &Store<'_>) -> Result<Vec<PlaylistTrack>, RecordError> {
        many(store, self, "playlist_tracks")
    }
}

impl Attributes for Track {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "TrackId" => Some(Value::Integer(self.id)),
            "Name" => Some(Value::Text(self.name.clone())),
            "Composer" => Some(text_value(&self.composer)),
            "Milliseconds" => Some(Value::Integer(self.milliseconds)),
            _ => None,
        }
    }
}

impl Model for Track {
    const ENTITY: &'static str = "Track";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: record.integer("TrackId")?,
            name: record.text("Name")?,
            composer: record.optional_text("Composer")?,
            milliseconds: record.integer("Milliseconds")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![Value::Integer(self.id)]
    }
}

// ── PlaylistTrack ────────────────────────────────────────────────────

impl PlaylistTrack {
    pub fn playlist(&self, store: &Store<'_>) -> Result<Playlist, RecordError> {
        one(store, self, "playlist")
    }

    pub fn track(&self, store: &Store<'_>) -> Result<Track, RecordError> {
        one(store, self, "track")
    }
}

impl Attributes for PlaylistTrack {
    fn entity_name(&self) -> &str {
        Self::ENTITY
    }

    fn attribute(&self, column: &str) -> Option<Value> {
        match column {
            "PlaylistId" => Some(Value::Integer(self.playlist_id)),
            "TrackId" => Some(Value::Integer(self.track_id)),
            _ => None,
        }
    }
}

impl Model for PlaylistTrack {
    const ENTITY: &'static str = "PlaylistTrack";

    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            playlist_id: record.integer("PlaylistId")?,
            track_id: record.integer("TrackId")?,
        })
    }

    fn key(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.playlist_id),
            Value::Integer(self.track_id),
        ]
    }
}
