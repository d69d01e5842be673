//! Mutation commands accepted by the reducer.
//!
//! # Responsibility
//! - Enumerate every sanctioned state transition as a plain value.
//! - Keep action payloads self-contained so callers (UI, tests) construct
//!   them without touching state internals.
//!
//! # Invariants
//! - Actions carry ids generated by the caller; the reducer never invents
//!   identity on its own.

use crate::model::book::{Book, BookId};
use crate::model::field::{FieldId, FieldType};
use crate::model::page::{Page, PageId, ValueData};
use crate::model::tag::Tag;
use crate::model::view::{PageView, TableView, ViewId};

/// Boolean field settings toggled from the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFlag {
    Collapsed,
    ReadOnly,
}

/// One state transition command.
///
/// Variants are the action-constructor surface: build a value, hand it to
/// [`crate::store::Store::dispatch`] or [`crate::store::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Inserts a book and makes it current.
    NewBook { book: Book },
    /// Renames a book.
    RenameBook { book_id: BookId, name: String },
    /// Removes a book, clearing the current-book pointer when needed.
    DeleteBook { book_id: BookId },
    /// Switches the current book.
    SetCurrentBook { book_id: BookId },

    /// Inserts or replaces a page under its own id.
    SetBookPage { book_id: BookId, page: Page },
    /// Removes a page, clearing the current-page pointer when needed.
    DeleteBookPage { book_id: BookId, page_id: PageId },
    /// Switches the page open in the detail panel.
    SetCurrentPage { book_id: BookId, page_id: PageId },

    /// Appends a new field and marks it visible in the current views.
    AddBookField {
        book_id: BookId,
        field_id: FieldId,
        field_type: FieldType,
        label: String,
    },
    /// Removes a field. Page values and view field lists keep any stale
    /// references; projections filter them.
    DeleteBookField { book_id: BookId, field_id: FieldId },
    /// Renames a field.
    UpdateFieldLabel {
        book_id: BookId,
        field_id: FieldId,
        label: String,
    },
    /// Toggles a boolean field setting.
    UpdateFieldFlag {
        book_id: BookId,
        field_id: FieldId,
        flag: FieldFlag,
        value: bool,
    },
    /// Replaces a field's free-text body.
    UpdateFieldText {
        book_id: BookId,
        field_id: FieldId,
        text: String,
    },
    /// Stores an explicit table column width for a field.
    UpdateFieldColumnWidth {
        book_id: BookId,
        field_id: FieldId,
        width: u32,
    },
    /// Replaces the book field ordering with a permutation of the current
    /// ids.
    SetBookFieldOrder {
        book_id: BookId,
        field_ids: Vec<FieldId>,
    },

    /// Stores (or, with `None`, clears) a single field value on a page.
    SetPageFieldValue {
        book_id: BookId,
        page_id: PageId,
        field_id: FieldId,
        value: Option<ValueData>,
    },
    /// Replaces the tag selection for a field on a page.
    ///
    /// Each supplied tag is a caller proposal: resolved against the field
    /// catalogue by id, then by case-insensitive label, and adopted into the
    /// catalogue only when neither matches.
    SetPageValueTags {
        book_id: BookId,
        page_id: PageId,
        field_id: FieldId,
        tags: Vec<Tag>,
    },

    /// Updates one catalogue tag's label/color in place, matched by id.
    UpdateFieldTag {
        book_id: BookId,
        field_id: FieldId,
        tag: Tag,
    },

    /// Replaces an existing table view, or inserts it and makes it current.
    UpsertTableView { book_id: BookId, view: TableView },
    /// Switches the current table view.
    SetCurrentTableView { book_id: BookId, view_id: ViewId },
    /// Replaces an existing page view, or inserts it and makes it current.
    UpsertPageView { book_id: BookId, view: PageView },
    /// Switches the current page view.
    SetCurrentPageView { book_id: BookId, view_id: ViewId },
}

impl Action {
    /// Stable action name used in dispatch log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewBook { .. } => "new_book",
            Self::RenameBook { .. } => "rename_book",
            Self::DeleteBook { .. } => "delete_book",
            Self::SetCurrentBook { .. } => "set_current_book",
            Self::SetBookPage { .. } => "set_book_page",
            Self::DeleteBookPage { .. } => "delete_book_page",
            Self::SetCurrentPage { .. } => "set_current_page",
            Self::AddBookField { .. } => "add_book_field",
            Self::DeleteBookField { .. } => "delete_book_field",
            Self::UpdateFieldLabel { .. } => "update_field_label",
            Self::UpdateFieldFlag { .. } => "update_field_flag",
            Self::UpdateFieldText { .. } => "update_field_text",
            Self::UpdateFieldColumnWidth { .. } => "update_field_column_width",
            Self::SetBookFieldOrder { .. } => "set_book_field_order",
            Self::SetPageFieldValue { .. } => "set_page_field_value",
            Self::SetPageValueTags { .. } => "set_page_value_tags",
            Self::UpdateFieldTag { .. } => "update_field_tag",
            Self::UpsertTableView { .. } => "upsert_table_view",
            Self::SetCurrentTableView { .. } => "set_current_table_view",
            Self::UpsertPageView { .. } => "upsert_page_view",
            Self::SetCurrentPageView { .. } => "set_current_page_view",
        }
    }
}
