use chinook_records::chinook::{Album, Artist, Playlist, PlaylistTrack, Track};
use chinook_records::{Model, RecordError, Store, Value};
use chinook_registry::Registry;
use chinook_types::Variant;
use rusqlite::Connection;

fn setup(variant: Variant) -> (Connection, Registry) {
    let conn = Connection::open_in_memory().expect("failed to open in-memory db");
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .expect("failed to enable foreign keys");
    chinook_db::run_migrations(&conn, variant).expect("migrations failed");
    let registry = Registry::for_variant(variant).expect("registry failed to build");
    registry
        .validate_schema(&conn)
        .expect("registry does not match schema");
    (conn, registry)
}

/// Three artists with 2, 1 and 0 albums.
fn seed_catalog(store: &Store<'_>) -> Vec<Artist> {
    let artists: Vec<Artist> = ["AC/DC", "Accept", "Aerosmith"]
        .into_iter()
        .map(|name| Artist::create(store, name).expect("failed to create artist"))
        .collect();

    Album::create(store, artists[0].id, "For Those About To Rock We Salute You")
        .expect("failed to create album");
    Album::create(store, artists[0].id, "Let There Be Rock").expect("failed to create album");
    Album::create(store, artists[1].id, "Balls to the Wall").expect("failed to create album");

    artists
}

#[test]
fn every_album_appears_under_its_artist() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);
    seed_catalog(&store);

    let albums = Album::all(&store).expect("failed to list albums");
    assert_eq!(albums.len(), 3);

    for album in albums {
        let artist = album.artist(&store).expect("album should have an artist");
        assert_eq!(artist.id, album.artist_id);
        let siblings = artist.albums(&store).expect("failed to list artist albums");
        assert!(
            siblings.contains(&album),
            "{album:?} missing from {artist:?}'s albums"
        );
    }
}

#[test]
fn artist_without_albums_yields_empty_sequence() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);
    let artists = seed_catalog(&store);

    let albums = artists[2]
        .albums(&store)
        .expect("to-many traversal with no rows is not an error");
    assert!(albums.is_empty());
}

#[test]
fn albums_come_back_in_key_order() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);
    let artists = seed_catalog(&store);

    let titles: Vec<String> = artists[0]
        .albums(&store)
        .expect("failed to list albums")
        .into_iter()
        .map(|album| album.title)
        .collect();
    assert_eq!(
        titles,
        vec!["For Those About To Rock We Salute You", "Let There Be Rock"]
    );
}

#[test]
fn dangling_artist_id_is_not_found() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);

    // Never persisted: the store would reject the dangling foreign key.
    let orphan = Album {
        id: 1,
        title: "Orphan".to_string(),
        artist_id: 404,
    };

    let err = orphan.artist(&store).expect_err("no artist 404");
    match err {
        RecordError::NotFound { entity, key } => {
            assert_eq!(entity, "Artist");
            assert_eq!(key, "404");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn store_rejects_album_with_unknown_artist() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);

    let err = Album::create(&store, 404, "Orphan").expect_err("foreign key should reject it");
    assert!(matches!(err, RecordError::Database(_)));
}

#[test]
fn rename_updates_the_stored_artist() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);
    let artists = seed_catalog(&store);

    let renamed = artists[1].rename(&store, "Accept (DE)").expect("rename failed");
    assert_eq!(renamed.name.as_deref(), Some("Accept (DE)"));

    let reloaded = Artist::find(&store, &artists[1].key()).expect("artist should exist");
    assert_eq!(reloaded, renamed);
}

fn seed_playlists(store: &Store<'_>) -> (Vec<Playlist>, Vec<Track>) {
    let playlists: Vec<Playlist> = ["Music", "Movies", "Audiobooks"]
        .into_iter()
        .map(|name| Playlist::create(store, name).expect("failed to create playlist"))
        .collect();
    let tracks: Vec<Track> = [
        ("For Those About To Rock (We Salute You)", Some("Angus Young")),
        ("Balls to the Wall", None),
        ("Fast As a Shark", Some("F. Baltes")),
    ]
    .into_iter()
    .map(|(name, composer)| {
        Track::create(store, name, composer, 240_000).expect("failed to create track")
    })
    .collect();

    for (playlist, track) in [(0, 0), (0, 1), (1, 1), (1, 2)] {
        assert!(playlists[playlist]
            .add_track(store, &tracks[track])
            .expect("failed to link"));
    }

    (playlists, tracks)
}

fn assert_playlist_round_trip(variant: Variant) {
    let (conn, registry) = setup(variant);
    let store = Store::new(&conn, &registry);
    let (playlists, _) = seed_playlists(&store);

    for playlist in &playlists {
        for track in playlist.tracks(&store).expect("failed to list tracks") {
            let back = track.playlists(&store).expect("failed to list playlists");
            assert!(
                back.contains(playlist),
                "{playlist:?} missing from {track:?}'s playlists"
            );
        }
    }
}

#[test]
fn every_playlist_appears_under_its_tracks() {
    assert_playlist_round_trip(Variant::Chinook);
}

#[test]
fn legacy_join_table_supports_the_same_traversals() {
    assert_playlist_round_trip(Variant::ChinookLegacyJoin);
}

#[test]
fn adding_a_pair_is_visible_from_both_sides() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);
    let (playlists, tracks) = seed_playlists(&store);

    let audiobooks = &playlists[2];
    let shark = &tracks[2];
    assert!(audiobooks.tracks(&store).expect("tracks").is_empty());
    assert!(!shark.playlists(&store).expect("playlists").contains(audiobooks));

    assert!(audiobooks.add_track(&store, shark).expect("link failed"));
    assert!(
        !audiobooks.add_track(&store, shark).expect("relink failed"),
        "pair is stored once"
    );

    assert_eq!(audiobooks.tracks(&store).expect("tracks"), vec![shark.clone()]);
    assert!(shark.playlists(&store).expect("playlists").contains(audiobooks));

    assert!(audiobooks.remove_track(&store, shark).expect("unlink failed"));
    assert!(audiobooks.tracks(&store).expect("tracks").is_empty());
    assert!(!shark.playlists(&store).expect("playlists").contains(audiobooks));
}

#[test]
fn join_rows_resolve_both_parents() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);
    let (playlists, tracks) = seed_playlists(&store);

    let pairs = playlists[1]
        .playlist_tracks(&store)
        .expect("failed to list join rows");
    assert_eq!(
        pairs,
        vec![
            PlaylistTrack {
                playlist_id: playlists[1].id,
                track_id: tracks[1].id,
            },
            PlaylistTrack {
                playlist_id: playlists[1].id,
                track_id: tracks[2].id,
            },
        ]
    );

    let pair = pairs[0];
    assert_eq!(pair.playlist(&store).expect("playlist"), playlists[1]);
    assert_eq!(pair.track(&store).expect("track"), tracks[1]);

    let from_track = tracks[1]
        .playlist_tracks(&store)
        .expect("failed to list join rows");
    assert_eq!(from_track.len(), 2);
}

#[test]
fn deleting_a_track_removes_its_pairs() {
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);
    let (playlists, tracks) = seed_playlists(&store);

    tracks[1].delete(&store).expect("delete failed");

    let remaining: Vec<i64> = playlists[0]
        .tracks(&store)
        .expect("tracks")
        .into_iter()
        .map(|track| track.id)
        .collect();
    assert_eq!(remaining, vec![tracks[0].id]);
    assert!(Track::find(&store, &[Value::Integer(tracks[1].id)])
        .expect_err("track is gone")
        .is_not_found());
}
