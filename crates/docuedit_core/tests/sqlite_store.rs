use docuedit_core::store::latest_version;
use docuedit_core::{
    BufferSurface, EditorSession, PersistenceStore, SqliteStore, PAGES_KEY, TITLE_KEY,
};
use std::time::Instant;

#[test]
fn read_missing_key_returns_none() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.read("absent").unwrap(), None);
}

#[test]
fn write_then_read_roundtrips_and_overwrites() {
    let mut store = SqliteStore::open_in_memory().unwrap();

    store.write(TITLE_KEY, "Report").unwrap();
    assert_eq!(store.read(TITLE_KEY).unwrap().as_deref(), Some("Report"));

    store.write(TITLE_KEY, "Report v2").unwrap();
    assert_eq!(store.read(TITLE_KEY).unwrap().as_deref(), Some("Report v2"));
}

#[test]
fn values_survive_reopening_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("docuedit.sqlite3");

    {
        let mut store = SqliteStore::open(&db_path).unwrap();
        store.write(PAGES_KEY, r#"["<p>persisted</p>"]"#).unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    assert_eq!(
        store.read(PAGES_KEY).unwrap().as_deref(),
        Some(r#"["<p>persisted</p>"]"#)
    );
}

#[test]
fn reopening_applies_no_further_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("docuedit.sqlite3");

    // Two opens in a row must both land on the latest schema version.
    drop(SqliteStore::open(&db_path).unwrap());
    drop(SqliteStore::open(&db_path).unwrap());

    assert!(latest_version() >= 1);
}

#[test]
fn session_over_sqlite_round_trips_a_document() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("docuedit.sqlite3");
    let t0 = Instant::now();

    {
        let store = SqliteStore::open(&db_path).unwrap();
        let mut session = EditorSession::open(store, BufferSurface::new(), t0);
        session.set_title("Durable", t0);
        session.input("<p>kept across restarts</p>", t0);
        session.add_page(t0).unwrap();
        session.save(t0).unwrap();
    }

    let store = SqliteStore::open(&db_path).unwrap();
    let mut session = EditorSession::open(store, BufferSurface::new(), t0);

    assert_eq!(session.title(), "Durable");
    assert_eq!(session.pages().len(), 2);
    assert_eq!(
        session.pages().get(0).unwrap().content,
        "<p>kept across restarts</p>"
    );
}
