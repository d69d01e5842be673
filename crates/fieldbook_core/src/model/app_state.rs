//! Application root state.
//!
//! # Responsibility
//! - Hold every book plus the cross-book navigation pointers.
//! - Keep `all_book_ids` and `books_by_id` in lockstep through the
//!   insert/remove helpers.
//!
//! # Invariants
//! - `all_book_ids` and the keys of `books_by_id` always describe the same
//!   id set.
//! - `current_book_id` never dangles: removing the current book clears it.

use crate::model::book::{Book, BookId};
use crate::model::page::Page;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Book lookup map, paired with the `all_book_ids` ordering list.
pub type BooksById = BTreeMap<BookId, Book>;

/// Top-level screen the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewing {
    Books,
    Settings,
}

/// Root aggregate, the unit of snapshot persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Active top-level screen.
    pub viewing: Viewing,
    /// Book open in the workspace, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_book_id: Option<BookId>,
    /// All books keyed by id.
    pub books_by_id: BooksById,
    /// Book ordering paired with `books_by_id`.
    pub all_book_ids: Vec<BookId>,
}

impl AppState {
    /// Returns the currently open book, if the pointer is set and resolves.
    pub fn current_book(&self) -> Option<&Book> {
        self.current_book_id
            .and_then(|book_id| self.books_by_id.get(&book_id))
    }

    /// Returns the currently open page of the currently open book.
    pub fn current_page(&self) -> Option<&Page> {
        let book = self.current_book()?;
        book.current_page_id.and_then(|page_id| book.page(page_id))
    }

    pub fn book(&self, book_id: BookId) -> Option<&Book> {
        self.books_by_id.get(&book_id)
    }

    pub fn book_mut(&mut self, book_id: BookId) -> Option<&mut Book> {
        self.books_by_id.get_mut(&book_id)
    }

    /// Appends a book to the ordering list and the lookup map together, and
    /// makes it the current book.
    pub fn insert_book(&mut self, book: Book) {
        let book_id = book.id;
        self.books_by_id.insert(book_id, book);
        self.all_book_ids.push(book_id);
        self.current_book_id = Some(book_id);
    }

    /// Removes a book from the ordering list and the lookup map together,
    /// clearing the current-book pointer when it referenced the removed book.
    pub fn remove_book(&mut self, book_id: BookId) -> bool {
        if self.books_by_id.remove(&book_id).is_none() {
            return false;
        }
        self.all_book_ids.retain(|id| *id != book_id);
        if self.current_book_id == Some(book_id) {
            self.current_book_id = None;
        }
        true
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            viewing: Viewing::Books,
            current_book_id: None,
            books_by_id: BTreeMap::new(),
            all_book_ids: Vec::new(),
        }
    }
}
