//! Unit tests for registry construction and schema validation.

use chinook_types::Variant;
use rusqlite::Connection;

use crate::declarations::{ALBUM, ARTIST, PLAYLIST_TRACK};
use crate::{ConfigurationError, EntityDef, Registry, Relation, RelationKind};

fn bootstrapped(variant: Variant) -> Connection {
    let conn = Connection::open_in_memory().expect("should open in-memory db");
    chinook_db::run_migrations(&conn, variant).expect("migrations should succeed");
    conn
}

// ── Declaration consistency ──────────────────────────────────────────

#[test]
fn every_variant_builds() {
    for variant in Variant::ALL {
        let registry = Registry::for_variant(variant).expect("declarations should be consistent");
        assert_eq!(registry.variant(), variant);
        assert!(!registry.entities().is_empty());
    }
}

#[test]
fn duplicate_entity_is_rejected() {
    let err = Registry::builder(Variant::Chinook)
        .register(ARTIST)
        .register(ARTIST)
        .build()
        .expect_err("same entity twice");
    assert!(matches!(err, ConfigurationError::DuplicateEntity(name) if name == "Artist"));
}

#[test]
fn tables_differing_only_in_case_collide() {
    let shadow = EntityDef {
        name: "ArtistShadow",
        table: "ARTIST",
        relations: &[],
        ..ARTIST
    };

    let err = Registry::builder(Variant::Chinook)
        .register(ARTIST)
        .register(shadow)
        .build()
        .expect_err("Artist and ARTIST are the same SQLite table");
    match err {
        ConfigurationError::TableCollision { first, second, .. } => {
            assert_eq!(first, "Artist");
            assert_eq!(second, "ArtistShadow");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_ascii_case_difference_is_not_a_collision() {
    let upper = EntityDef {
        name: "UpperAlbum",
        table: "Ébum",
        relations: &[],
        ..ALBUM
    };
    let lower = EntityDef {
        name: "LowerAlbum",
        table: "ébum",
        relations: &[],
        ..ALBUM
    };

    // SQLite keeps both tables apart.
    let conn = Connection::open_in_memory().expect("should open in-memory db");
    conn.execute_batch(
        r#"CREATE TABLE "Ébum" ("AlbumId" INTEGER PRIMARY KEY);
           CREATE TABLE "ébum" ("AlbumId" INTEGER PRIMARY KEY);"#,
    )
    .expect("tables differing in a non-ASCII letter are distinct");

    let registry = Registry::builder(Variant::Chinook)
        .register(upper)
        .register(lower)
        .build()
        .expect("no collision");
    assert_eq!(registry.entities().len(), 2);
}

#[test]
fn relation_to_unregistered_entity_is_rejected() {
    let err = Registry::builder(Variant::Chinook)
        .register(ARTIST)
        .build()
        .expect_err("Album is not registered");
    match err {
        ConfigurationError::UnknownTarget {
            entity,
            relation,
            target,
        } => {
            assert_eq!(entity, "Artist");
            assert_eq!(relation, "albums");
            assert_eq!(target, "Album");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn undeclared_foreign_key_is_rejected() {
    const RELATIONS: &[Relation] =
        &[Relation::belongs_to("artist", "Artist", "artist_id", "ArtistId")];
    let album = EntityDef {
        relations: RELATIONS,
        ..ALBUM
    };

    let err = Registry::builder(Variant::Chinook)
        .register(ARTIST)
        .register(album)
        .build()
        .expect_err("artist_id is not an Album column");
    assert!(matches!(
        err,
        ConfigurationError::UnknownColumn { entity, column } if entity == "Album" && column == "artist_id"
    ));
}

#[test]
fn duplicate_relation_name_is_rejected() {
    const RELATIONS: &[Relation] = &[
        Relation::has_many("albums", "Album", "ArtistId", "ArtistId"),
        Relation::has_many("albums", "Album", "ArtistId", "ArtistId"),
    ];
    let artist = EntityDef {
        relations: RELATIONS,
        ..ARTIST
    };

    let err = Registry::builder(Variant::Chinook)
        .register(artist)
        .register(ALBUM)
        .build()
        .expect_err("albums declared twice");
    assert!(matches!(err, ConfigurationError::DuplicateRelation { .. }));
}

#[test]
fn join_entity_must_be_registered() {
    let err = Registry::builder(Variant::Chinook)
        .register_all(&[
            crate::declarations::PLAYLIST,
            crate::declarations::TRACK,
        ])
        .build()
        .expect_err("PlaylistTrack missing");
    assert!(matches!(
        err,
        ConfigurationError::UnknownTarget { target, .. } if target == "PlaylistTrack"
    ));
}

#[test]
fn empty_primary_key_is_rejected() {
    let keyless = EntityDef {
        primary_key: &[],
        ..PLAYLIST_TRACK
    };
    let err = Registry::builder(Variant::Chinook)
        .register(keyless)
        .build()
        .expect_err("no identifier");
    // The key check runs before relation checks, so the missing targets do
    // not mask it.
    assert!(matches!(err, ConfigurationError::MissingPrimaryKey(name) if name == "PlaylistTrack"));
}

// ── Lookups ──────────────────────────────────────────────────────────

#[test]
fn lookups_resolve_declared_relations() {
    let registry = Registry::for_variant(Variant::Chinook).expect("should build");

    let albums = registry.relation("Artist", "albums").expect("Artist.albums declared");
    assert_eq!(albums.target, "Album");
    assert!(!albums.is_to_one());

    let artist = registry.relation("Album", "artist").expect("Album.artist declared");
    assert!(artist.is_to_one());

    let tracks = registry.relation("Playlist", "tracks").expect("Playlist.tracks declared");
    match tracks.kind {
        RelationKind::ManyToMany(spec) => {
            assert_eq!(spec.join, "PlaylistTrack");
            assert_eq!(spec.left_key, "PlaylistId");
            assert_eq!(spec.right_key, "TrackId");
        }
        other => panic!("unexpected relation kind: {other:?}"),
    }
}

#[test]
fn unknown_lookups_are_configuration_errors() {
    let registry = Registry::for_variant(Variant::Blog).expect("should build");

    assert!(matches!(
        registry.entity("Artist"),
        Err(ConfigurationError::UnknownEntity(name)) if name == "Artist"
    ));
    assert!(matches!(
        registry.relation("Post", "comments"),
        Err(ConfigurationError::UnknownRelation { .. })
    ));
}

#[test]
fn google_variant_joins_on_non_primary_key() {
    let registry = Registry::for_variant(Variant::ArtistByGoogleId).expect("should build");
    let artist = registry.entity("Artist").expect("Artist registered");
    assert_eq!(artist.table, "artists");

    let albums = artist.relation("albums").expect("albums declared");
    assert_eq!(albums.owner_column(), "google_user_id");
}

#[test]
fn describe_serializes_relation_kinds() {
    let registry = Registry::for_variant(Variant::Blog).expect("should build");
    let json = serde_json::to_value(registry.describe()).expect("should serialize");

    assert_eq!(json["variant"], "blog");
    let post = &json["entities"][0];
    assert_eq!(post["name"], "Post");
    assert_eq!(post["relations"][1]["name"], "tags");
    assert_eq!(post["relations"][1]["kind"], "many_to_many");
    assert_eq!(post["relations"][1]["join"], "PostTag");
}

// ── Schema validation ────────────────────────────────────────────────

#[test]
fn every_variant_matches_its_bootstrapped_schema() {
    for variant in Variant::ALL {
        let conn = bootstrapped(variant);
        let registry = Registry::for_variant(variant).expect("should build");
        registry
            .validate_schema(&conn)
            .unwrap_or_else(|e| panic!("{variant} should validate: {e}"));
    }
}

#[test]
fn pluralized_default_table_name_is_missing() {
    let conn = bootstrapped(Variant::Chinook);
    let artists = EntityDef {
        table: "artists",
        relations: &[],
        ..ARTIST
    };
    let registry = Registry::builder(Variant::Chinook)
        .register(artists)
        .build()
        .expect("should build");

    let err = registry.validate_schema(&conn).expect_err("no artists table");
    assert!(matches!(
        err,
        ConfigurationError::MissingTable { table, .. } if table == "artists"
    ));
}

#[test]
fn join_table_case_must_match_exactly() {
    // The legacy schema names the join table PlayListTrack.
    let conn = bootstrapped(Variant::ChinookLegacyJoin);
    let registry = Registry::for_variant(Variant::Chinook).expect("should build");

    let err = registry
        .validate_schema(&conn)
        .expect_err("PlaylistTrack only matches case-insensitively");
    match err {
        ConfigurationError::TableCaseMismatch {
            entity,
            declared,
            actual,
        } => {
            assert_eq!(entity, "PlaylistTrack");
            assert_eq!(declared, "PlaylistTrack");
            assert_eq!(actual, "PlayListTrack");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn undeclared_physical_column_is_missing() {
    let conn = bootstrapped(Variant::Chinook);
    let album = EntityDef {
        columns: &["AlbumId", "Title", "ArtistId", "ReleaseYear"],
        ..ALBUM
    };
    let registry = Registry::builder(Variant::Chinook)
        .register(ARTIST)
        .register(album)
        .build()
        .expect("should build");

    let err = registry.validate_schema(&conn).expect_err("ReleaseYear does not exist");
    assert!(matches!(
        err,
        ConfigurationError::MissingColumn { table, column } if table == "Album" && column == "ReleaseYear"
    ));
}
