use chinook_records::blog::{Post, PostTag, Tag};
use chinook_records::google_artist::{Album, Artist};
use chinook_records::{Model, RecordError, Store};
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

// ── artist-by-google-id ──────────────────────────────────────────────

#[test]
fn albums_join_on_google_user_id() {
    let (conn, registry) = setup(Variant::ArtistByGoogleId);
    let store = Store::new(&conn, &registry);

    let first = Artist::create(&store, "g-100", Some("First")).expect("create artist");
    let second = Artist::create(&store, "g-200", None).expect("create artist");
    let album = Album::create(&store, "g-200", "Second's Debut").expect("create album");

    // Primary keys and google ids differ, so a primary-key join would miss.
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);

    assert!(first.albums(&store).expect("albums").is_empty());
    assert_eq!(second.albums(&store).expect("albums"), vec![album.clone()]);
    assert_eq!(album.artist(&store).expect("artist"), second);
}

#[test]
fn unknown_google_id_is_not_found() {
    let (conn, registry) = setup(Variant::ArtistByGoogleId);
    let store = Store::new(&conn, &registry);

    let orphan = Album {
        id: 7,
        title: "Nobody's".to_string(),
        artist_id: "g-missing".to_string(),
    };
    let err = orphan.artist(&store).expect_err("no such artist");
    assert!(matches!(
        err,
        RecordError::NotFound { ref entity, ref key } if entity == "Artist" && key == "g-missing"
    ));
}

// ── blog ─────────────────────────────────────────────────────────────

#[test]
fn post_tag_relation_is_symmetric() {
    let (conn, registry) = setup(Variant::Blog);
    let store = Store::new(&conn, &registry);

    let hello = Post::create(&store, "Hello", Some("First post")).expect("create post");
    let again = Post::create(&store, "Again", None).expect("create post");
    let rust = Tag::create(&store, "rust").expect("create tag");
    let sql = Tag::create(&store, "sql").expect("create tag");

    assert!(hello.add_tag(&store, &rust).expect("link"));
    assert!(hello.add_tag(&store, &sql).expect("link"));
    assert!(again.add_tag(&store, &rust).expect("link"));

    assert_eq!(hello.tags(&store).expect("tags"), vec![rust.clone(), sql.clone()]);
    assert_eq!(rust.posts(&store).expect("posts"), vec![hello.clone(), again.clone()]);
    assert_eq!(sql.posts(&store).expect("posts"), vec![hello.clone()]);

    for post in Post::all(&store).expect("posts") {
        for tag in post.tags(&store).expect("tags") {
            assert!(tag.posts(&store).expect("posts").contains(&post));
        }
    }
}

#[test]
fn post_tag_rows_resolve_both_sides() {
    let (conn, registry) = setup(Variant::Blog);
    let store = Store::new(&conn, &registry);

    let post = Post::create(&store, "Hello", None).expect("create post");
    let tag = Tag::create(&store, "intro").expect("create tag");
    post.add_tag(&store, &tag).expect("link");

    let rows = post.post_tags(&store).expect("join rows");
    assert_eq!(
        rows,
        vec![PostTag {
            post_id: post.id,
            tag_id: tag.id,
        }]
    );
    assert_eq!(rows[0].post(&store).expect("post"), post);
    assert_eq!(rows[0].tag(&store).expect("tag"), tag);
    assert_eq!(tag.post_tags(&store).expect("join rows"), rows);

    let found = PostTag::find(&store, &rows[0].key()).expect("find by pair");
    assert_eq!(found, rows[0]);
}

#[test]
fn untagged_post_has_no_tags() {
    let (conn, registry) = setup(Variant::Blog);
    let store = Store::new(&conn, &registry);

    let post = Post::create(&store, "Lonely", None).expect("create post");
    assert!(post.tags(&store).expect("tags").is_empty());
    assert!(post.post_tags(&store).expect("join rows").is_empty());
}

#[test]
fn removing_a_tag_updates_both_sides() {
    let (conn, registry) = setup(Variant::Blog);
    let store = Store::new(&conn, &registry);

    let post = Post::create(&store, "Hello", None).expect("create post");
    let tag = Tag::create(&store, "intro").expect("create tag");
    post.add_tag(&store, &tag).expect("link");

    assert!(post.remove_tag(&store, &tag).expect("unlink"));
    assert!(post.tags(&store).expect("tags").is_empty());
    assert!(tag.posts(&store).expect("posts").is_empty());
}

#[test]
fn typed_models_follow_the_registry_they_are_given() {
    // Blog models against a Chinook registry: the entity is not registered.
    let (conn, registry) = setup(Variant::Chinook);
    let store = Store::new(&conn, &registry);

    let err = Post::all(&store).expect_err("Post is not a Chinook entity");
    assert!(matches!(err, RecordError::Configuration(_)));
}
