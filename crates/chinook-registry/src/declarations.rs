//! Static entity declarations, one set per [`Variant`].
//!
//! The declarations mirror the physical tables created by `chinook-db`.
//! Entities that appear in more than one variant reuse the same constant
//! unless the variant binds them differently.

use chinook_types::Variant;

use crate::entity::{EntityDef, JoinSpec, Relation};

/// Playlist/Track join as seen from the Playlist side.
const PLAYLIST_TRACKS_JOIN: JoinSpec = JoinSpec {
    join: "PlaylistTrack",
    left_key: "PlaylistId",
    right_key: "TrackId",
    owner_key: "PlaylistId",
    target_key: "TrackId",
};

/// Playlist/Track join as seen from the Track side.
const TRACK_PLAYLISTS_JOIN: JoinSpec = JoinSpec {
    join: "PlaylistTrack",
    left_key: "TrackId",
    right_key: "PlaylistId",
    owner_key: "TrackId",
    target_key: "PlaylistId",
};

pub const ARTIST: EntityDef = EntityDef {
    name: "Artist",
    table: "Artist",
    primary_key: &["ArtistId"],
    columns: &["ArtistId", "Name"],
    relations: &[Relation::has_many("albums", "Album", "ArtistId", "ArtistId")],
};

pub const ALBUM: EntityDef = EntityDef {
    name: "Album",
    table: "Album",
    primary_key: &["AlbumId"],
    columns: &["AlbumId", "Title", "ArtistId"],
    relations: &[Relation::belongs_to("artist", "Artist", "ArtistId", "ArtistId")],
};

pub const PLAYLIST: EntityDef = EntityDef {
    name: "Playlist",
    table: "Playlist",
    primary_key: &["PlaylistId"],
    columns: &["PlaylistId", "Name"],
    relations: &[
        Relation::has_many("playlist_tracks", "PlaylistTrack", "PlaylistId", "PlaylistId"),
        Relation::many_to_many("tracks", "Track", PLAYLIST_TRACKS_JOIN),
    ],
};

pub const TRACK: EntityDef = EntityDef {
    name: "Track",
    table: "Track",
    primary_key: &["TrackId"],
    columns: &["TrackId", "Name", "Composer", "Milliseconds"],
    relations: &[
        Relation::has_many("playlist_tracks", "PlaylistTrack", "TrackId", "TrackId"),
        Relation::many_to_many("playlists", "Playlist", TRACK_PLAYLISTS_JOIN),
    ],
};

const PLAYLIST_TRACK_RELATIONS: &[Relation] = &[
    Relation::belongs_to("playlist", "Playlist", "PlaylistId", "PlaylistId"),
    Relation::belongs_to("track", "Track", "TrackId", "TrackId"),
];

pub const PLAYLIST_TRACK: EntityDef = EntityDef {
    name: "PlaylistTrack",
    table: "PlaylistTrack",
    primary_key: &["PlaylistId", "TrackId"],
    columns: &["PlaylistId", "TrackId"],
    relations: PLAYLIST_TRACK_RELATIONS,
};

/// The split-file declaration of the join entity, bound to `PlayListTrack`.
pub const PLAYLIST_TRACK_LEGACY: EntityDef = EntityDef {
    table: "PlayListTrack",
    ..PLAYLIST_TRACK
};

pub const GOOGLE_ARTIST: EntityDef = EntityDef {
    name: "Artist",
    table: "artists",
    primary_key: &["id"],
    columns: &["id", "google_user_id", "name"],
    relations: &[Relation::has_many("albums", "Album", "artist_id", "google_user_id")],
};

pub const GOOGLE_ALBUM: EntityDef = EntityDef {
    name: "Album",
    table: "albums",
    primary_key: &["id"],
    columns: &["id", "title", "artist_id"],
    relations: &[Relation::belongs_to("artist", "Artist", "artist_id", "google_user_id")],
};

pub const POST: EntityDef = EntityDef {
    name: "Post",
    table: "Post",
    primary_key: &["id"],
    columns: &["id", "title", "body"],
    relations: &[
        Relation::has_many("post_tags", "PostTag", "post_id", "id"),
        Relation::many_to_many(
            "tags",
            "Tag",
            JoinSpec {
                join: "PostTag",
                left_key: "post_id",
                right_key: "tag_id",
                owner_key: "id",
                target_key: "id",
            },
        ),
    ],
};

pub const TAG: EntityDef = EntityDef {
    name: "Tag",
    table: "Tag",
    primary_key: &["id"],
    columns: &["id", "name"],
    relations: &[
        Relation::has_many("post_tags", "PostTag", "tag_id", "id"),
        Relation::many_to_many(
            "posts",
            "Post",
            JoinSpec {
                join: "PostTag",
                left_key: "tag_id",
                right_key: "post_id",
                owner_key: "id",
                target_key: "id",
            },
        ),
    ],
};

pub const POST_TAG: EntityDef = EntityDef {
    name: "PostTag",
    table: "PostTag",
    primary_key: &["post_id", "tag_id"],
    columns: &["post_id", "tag_id"],
    relations: &[
        Relation::belongs_to("post", "Post", "post_id", "id"),
        Relation::belongs_to("tag", "Tag", "tag_id", "id"),
    ],
};

const CHINOOK: &[EntityDef] = &[ARTIST, ALBUM, PLAYLIST, TRACK, PLAYLIST_TRACK];
const CHINOOK_LEGACY_JOIN: &[EntityDef] = &[ARTIST, ALBUM, PLAYLIST, TRACK, PLAYLIST_TRACK_LEGACY];
const ARTIST_BY_GOOGLE_ID: &[EntityDef] = &[GOOGLE_ARTIST, GOOGLE_ALBUM];
const BLOG: &[EntityDef] = &[POST, TAG, POST_TAG];

/// Returns the declarations that make up `variant`.
pub fn declarations(variant: Variant) -> &'static [EntityDef] {
    match variant {
        Variant::Chinook => CHINOOK,
        Variant::ChinookLegacyJoin => CHINOOK_LEGACY_JOIN,
        Variant::ArtistByGoogleId => ARTIST_BY_GOOGLE_ID,
        Variant::Blog => BLOG,
    }
}
