//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fieldbook_core` linkage.
//! - Exercise one dispatch round trip against an in-memory snapshot store.

use fieldbook_core::db::open_db_in_memory;
use fieldbook_core::{Action, Book, SqliteSnapshotRepository, Store};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("fieldbook_core version={}", fieldbook_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory snapshot db: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteSnapshotRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("failed to create snapshot repository: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = Store::open(repo);
    if let Err(err) = store.dispatch(&Action::NewBook { book: Book::new() }) {
        eprintln!("smoke dispatch failed: {err}");
        return ExitCode::FAILURE;
    }

    println!("books={}", store.state().all_book_ids.len());
    ExitCode::SUCCESS
}
