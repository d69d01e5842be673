use fieldbook_core::db::{open_db, open_db_in_memory};
use fieldbook_core::{
    Action, AppState, Book, RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository,
    Store,
};
use rusqlite::params;

/// Repository double whose save path always fails.
struct FailingSaveRepo;

impl SnapshotRepository for FailingSaveRepo {
    fn load(&self) -> RepoResult<Option<AppState>> {
        Ok(None)
    }

    fn save(&mut self, _state: &AppState) -> RepoResult<()> {
        Err(RepoError::MissingRequiredTable("snapshots"))
    }
}

/// Repository double whose load path always fails.
struct FailingLoadRepo;

impl SnapshotRepository for FailingLoadRepo {
    fn load(&self) -> RepoResult<Option<AppState>> {
        Err(RepoError::MissingRequiredTable("snapshots"))
    }

    fn save(&mut self, _state: &AppState) -> RepoResult<()> {
        Ok(())
    }
}

#[test]
fn open_starts_empty_without_a_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let store = Store::open(repo);
    assert_eq!(store.state(), &AppState::default());
}

#[test]
fn dispatch_persists_and_a_new_store_sees_the_result() {
    let conn = open_db_in_memory().unwrap();
    let book = Book::new();
    let book_id = book.id;

    {
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        let mut store = Store::open(repo);
        store.dispatch(&Action::NewBook { book }).unwrap();
        store
            .dispatch(&Action::RenameBook {
                book_id,
                name: "Trips".to_string(),
            })
            .unwrap();
    }

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let reopened = Store::open(repo);
    assert_eq!(reopened.state().all_book_ids, vec![book_id]);
    assert_eq!(reopened.state().book(book_id).unwrap().name, "Trips");
}

#[test]
fn corrupt_snapshot_falls_back_to_the_default_state() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO snapshots (slot, body) VALUES ('state', ?1);",
        params!["][ definitely not json"],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let store = Store::open(repo);
    assert_eq!(store.state(), &AppState::default());
}

#[test]
fn load_failure_falls_back_to_the_default_state() {
    let store = Store::open(FailingLoadRepo);
    assert_eq!(store.state(), &AppState::default());
}

#[test]
fn save_failure_keeps_the_in_memory_transition() {
    let mut store = Store::open(FailingSaveRepo);
    let book = Book::new();
    let book_id = book.id;

    store.dispatch(&Action::NewBook { book }).unwrap();
    assert_eq!(store.state().all_book_ids, vec![book_id]);
}

#[test]
fn rejected_action_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let mut store = Store::open(repo);

    let missing = uuid::Uuid::new_v4();
    assert!(store
        .dispatch(&Action::DeleteBook { book_id: missing })
        .is_err());

    let snapshot_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM snapshots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(snapshot_count, 0);
}

#[test]
fn file_backed_store_survives_a_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fieldbook.db");
    let book = Book::new();
    let book_id = book.id;

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        let mut store = Store::open(repo);
        store.dispatch(&Action::NewBook { book }).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let store = Store::open(repo);
    assert_eq!(store.state().current_book_id, Some(book_id));
}
