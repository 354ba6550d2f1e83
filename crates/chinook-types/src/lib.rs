//! Shared types for the Chinook relationship registry workspace.
//!
//! The only cross-cutting concept is the schema [`Variant`]: each variant is
//! one self-consistent set of entity declarations together with the physical
//! schema it binds to. Variants are alternatives and are never merged, since
//! several of them declare the same entity names against different tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A selectable schema configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Artist, Album, Playlist, Track and PlaylistTrack, bound to
    /// capitalized singular table names.
    #[default]
    Chinook,
    /// Same entities as [`Variant::Chinook`], but the join table is named
    /// `PlayListTrack`.
    ChinookLegacyJoin,
    /// Artist and Album on conventional `artists`/`albums` tables, joined on
    /// `artists.google_user_id` instead of the primary key.
    ArtistByGoogleId,
    /// Post, Tag and PostTag.
    Blog,
}

impl Variant {
    /// Every variant, in declaration order.
    pub const ALL: [Variant; 4] = [
        Variant::Chinook,
        Variant::ChinookLegacyJoin,
        Variant::ArtistByGoogleId,
        Variant::Blog,
    ];

    /// Returns the canonical configuration label for this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chinook => "chinook",
            Self::ChinookLegacyJoin => "chinook-legacy-join",
            Self::ArtistByGoogleId => "artist-by-google-id",
            Self::Blog => "blog",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| ParseVariantError(s.to_string()))
    }
}

/// Error returned when parsing an unknown variant label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown schema variant: {0}")]
pub struct ParseVariantError(pub String);
