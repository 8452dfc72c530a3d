use notegarden_core::db::migrations::latest_version;
use notegarden_core::db::{open_db, open_db_in_memory, DbError};
use notegarden_core::{
    parse_published_date, GardenConfig, LocationProvider, ManualClock, MemoryClipboard,
    MemoryLocation, NoteRecord, NoteStore, NoteValidationError, NotesPage, SqliteNoteStore,
    StoreError, FEATURED_PREVIEW_LIMIT,
};
use rusqlite::Connection;

fn dated(slug: &str, date: &str) -> NoteRecord {
    NoteRecord::new(slug, slug.to_uppercase())
        .with_published_date(parse_published_date(date).unwrap())
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'notes');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn reopening_database_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garden.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteNoteStore::new(&conn)
            .insert_note(&NoteRecord::new("kept", "Kept"))
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let records = SqliteNoteStore::new(&conn).fetch_all_notes().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].slug, "kept");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn insert_and_fetch_preserves_every_field() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::new(&conn);
    let record = dated("prompt-chains", "2024-02-03")
        .with_summary("How prompts compose")
        .with_short_description("Prompt chains")
        .with_category("AI")
        .with_content("<p>Body</p>")
        .pinned(true)
        .featured(true);

    let id = store.insert_note(&record).unwrap();
    assert_eq!(id, record.id);

    let fetched = store.fetch_all_notes().unwrap();
    assert_eq!(fetched, vec![record]);
}

#[test]
fn fetch_all_orders_newest_first_with_undated_last() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::new(&conn);
    store.insert_note(&NoteRecord::new("undated", "Undated")).unwrap();
    store.insert_note(&dated("older", "2021-06-01")).unwrap();
    store.insert_note(&dated("newer", "2023-06-01")).unwrap();

    let slugs = store
        .fetch_all_notes()
        .unwrap()
        .into_iter()
        .map(|record| record.slug)
        .collect::<Vec<_>>();
    assert_eq!(slugs, vec!["newer", "older", "undated"]);
}

#[test]
fn featured_fetch_filters_and_limits() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::new(&conn);
    store.insert_note(&dated("a", "2020-01-01").featured(true)).unwrap();
    store.insert_note(&dated("b", "2022-01-01").featured(true)).unwrap();
    store.insert_note(&dated("c", "2023-01-01")).unwrap();
    store.insert_note(&dated("d", "2021-01-01").featured(true)).unwrap();

    let featured = store.fetch_featured_notes(FEATURED_PREVIEW_LIMIT).unwrap();
    let slugs = featured.iter().map(|r| r.slug.as_str()).collect::<Vec<_>>();
    assert_eq!(slugs, vec!["b", "d"]);
    assert!(store.fetch_featured_notes(0).unwrap().is_empty());
}

#[test]
fn insert_rejects_invalid_slug_and_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::new(&conn);

    let err = store
        .insert_note(&NoteRecord::new("Not Safe", "Title"))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(NoteValidationError::InvalidSlug(_))
    ));

    store.insert_note(&NoteRecord::new("twin", "One")).unwrap();
    let err = store
        .insert_note(&NoteRecord::new("twin", "Two"))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateSlug(slug) if slug == "twin"));
}

#[test]
fn malformed_rows_are_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO notes (id, slug, title) VALUES ('not-a-uuid', 'bad', 'Bad');",
        [],
    )
    .unwrap();

    let err = SqliteNoteStore::new(&conn).fetch_all_notes().unwrap_err();
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn page_loads_deep_link_from_sqlite_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::new(&conn);
    store.insert_note(&dated("first", "2022-01-01")).unwrap();
    store.insert_note(&dated("second", "2023-01-01")).unwrap();

    let mut page = NotesPage::new(
        &GardenConfig::default(),
        MemoryLocation::new("https://garden.dev", "/notes/first"),
        MemoryClipboard::new(),
        ManualClock::new(0),
    );
    page.load_from(&store);

    assert_eq!(
        page.active_note().map(|record| record.title.as_str()),
        Some("FIRST")
    );
    assert_eq!(page.view().latest_slug, Some("second"));
    assert_eq!(page.location().path(), "/notes/first");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn batch_insert_rolls_back_when_any_record_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::new(&conn);
    let batch = vec![
        NoteRecord::new("fine", "Fine"),
        NoteRecord::new("Bad Slug", "Bad"),
    ];

    let err = store.insert_notes(&batch).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(NoteValidationError::InvalidSlug(_))
    ));
    assert!(store.fetch_all_notes().unwrap().is_empty());

    let dup_batch = vec![NoteRecord::new("one", "One"), NoteRecord::new("one", "Again")];
    assert!(matches!(
        store.insert_notes(&dup_batch).unwrap_err(),
        StoreError::DuplicateSlug(slug) if slug == "one"
    ));
    assert!(store.fetch_all_notes().unwrap().is_empty());

    let good = vec![NoteRecord::new("a", "A"), NoteRecord::new("b", "B")];
    assert_eq!(store.insert_notes(&good).unwrap(), 2);
    assert_eq!(store.fetch_all_notes().unwrap().len(), 2);
}

#[test]
fn reused_id_is_reported_as_duplicate_id_not_slug() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteNoteStore::new(&conn);
    let first = NoteRecord::new("a", "A");
    store.insert_note(&first).unwrap();

    let mut clash = NoteRecord::new("b", "B");
    clash.id = first.id;
    match store.insert_note(&clash).unwrap_err() {
        StoreError::DuplicateId(id) => assert_eq!(id, first.id),
        other => panic!("unexpected error: {other}"),
    }
}
