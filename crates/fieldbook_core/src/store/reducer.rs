//! Pure state transition function.
//!
//! # Responsibility
//! - Map `(state, action)` to a new state, the only sanctioned mutation
//!   path.
//! - Enforce the id-list/map lockstep, visibility bootstrap and tag
//!   catalogue invariants on every transition.
//!
//! # Invariants
//! - The input state is never mutated; callers keep a valid, unchanged
//!   reference to it regardless of the outcome.
//! - A reference to a nonexistent book/page/field/view id is rejected with a
//!   typed error, never a panic and never silent corruption.

use crate::model::app_state::AppState;
use crate::model::book::{Book, BookId};
use crate::model::field::{Field, FieldId};
use crate::model::page::{PageId, ValueData};
use crate::model::tag::{Tag, TagId};
use crate::model::view::ViewId;
use crate::store::action::{Action, FieldFlag};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reducer error for references the state cannot resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    BookNotFound(BookId),
    PageNotFound { book_id: BookId, page_id: PageId },
    FieldNotFound { book_id: BookId, field_id: FieldId },
    ViewNotFound { book_id: BookId, view_id: ViewId },
    /// The supplied field ordering is not a permutation of the book's
    /// current field ids.
    InvalidFieldOrder { book_id: BookId },
}

impl Display for ApplyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookNotFound(book_id) => write!(f, "book not found: {book_id}"),
            Self::PageNotFound { book_id, page_id } => {
                write!(f, "page not found: {page_id} in book {book_id}")
            }
            Self::FieldNotFound { book_id, field_id } => {
                write!(f, "field not found: {field_id} in book {book_id}")
            }
            Self::ViewNotFound { book_id, view_id } => {
                write!(f, "view not found: {view_id} in book {book_id}")
            }
            Self::InvalidFieldOrder { book_id } => write!(
                f,
                "field order for book {book_id} is not a permutation of its current fields"
            ),
        }
    }
}

impl Error for ApplyError {}

/// Applies one action to the state and returns the resulting state.
///
/// Works on a private clone; the caller's state stays untouched even when
/// the action is rejected.
pub fn apply(state: &AppState, action: &Action) -> Result<AppState, ApplyError> {
    let mut next = state.clone();

    match action {
        Action::NewBook { book } => {
            next.insert_book(book.clone());
        }

        Action::RenameBook { book_id, name } => {
            book_mut(&mut next, *book_id)?.name = name.clone();
        }

        Action::DeleteBook { book_id } => {
            if !next.remove_book(*book_id) {
                return Err(ApplyError::BookNotFound(*book_id));
            }
        }

        Action::SetCurrentBook { book_id } => {
            if next.book(*book_id).is_none() {
                return Err(ApplyError::BookNotFound(*book_id));
            }
            next.current_book_id = Some(*book_id);
        }

        Action::SetBookPage { book_id, page } => {
            book_mut(&mut next, *book_id)?.upsert_page(page.clone());
        }

        Action::DeleteBookPage { book_id, page_id } => {
            let book = book_mut(&mut next, *book_id)?;
            if !book.remove_page(*page_id) {
                return Err(ApplyError::PageNotFound {
                    book_id: *book_id,
                    page_id: *page_id,
                });
            }
        }

        Action::SetCurrentPage { book_id, page_id } => {
            let book = book_mut(&mut next, *book_id)?;
            if book.page(*page_id).is_none() {
                return Err(ApplyError::PageNotFound {
                    book_id: *book_id,
                    page_id: *page_id,
                });
            }
            book.current_page_id = Some(*page_id);
        }

        Action::AddBookField {
            book_id,
            field_id,
            field_type,
            label,
        } => {
            let book = book_mut(&mut next, *book_id)?;
            book.insert_field(Field::with_id(*field_id, *field_type, label.clone()));

            // New fields default to visible: views tracking an explicit
            // visibility map would otherwise hide them.
            let table_view_id = book.current_table_view_id;
            if let Some(view) = book.table_views_by_id.get_mut(&table_view_id) {
                view.mark_visible(*field_id);
            }
            let page_view_id = book.current_page_view_id;
            if let Some(view) = book.page_views_by_id.get_mut(&page_view_id) {
                view.mark_visible(*field_id);
            }
        }

        Action::DeleteBookField { book_id, field_id } => {
            let book = book_mut(&mut next, *book_id)?;
            if !book.remove_field(*field_id) {
                return Err(ApplyError::FieldNotFound {
                    book_id: *book_id,
                    field_id: *field_id,
                });
            }
        }

        Action::UpdateFieldLabel {
            book_id,
            field_id,
            label,
        } => {
            field_mut(&mut next, *book_id, *field_id)?.label = label.clone();
        }

        Action::UpdateFieldFlag {
            book_id,
            field_id,
            flag,
            value,
        } => {
            let field = field_mut(&mut next, *book_id, *field_id)?;
            match flag {
                FieldFlag::Collapsed => field.collapsed = *value,
                FieldFlag::ReadOnly => field.read_only = *value,
            }
        }

        Action::UpdateFieldText {
            book_id,
            field_id,
            text,
        } => {
            field_mut(&mut next, *book_id, *field_id)?.text = text.clone();
        }

        Action::UpdateFieldColumnWidth {
            book_id,
            field_id,
            width,
        } => {
            field_mut(&mut next, *book_id, *field_id)?.table_column_width = Some(*width);
        }

        Action::SetBookFieldOrder { book_id, field_ids } => {
            let book = book_mut(&mut next, *book_id)?;
            if !book.apply_field_order(field_ids) {
                return Err(ApplyError::InvalidFieldOrder { book_id: *book_id });
            }
        }

        Action::SetPageFieldValue {
            book_id,
            page_id,
            field_id,
            value,
        } => {
            // The field id is only a value-map key here; values for deleted
            // fields are tolerated state, so no field lookup.
            let book = book_mut(&mut next, *book_id)?;
            let page = book.page_mut(*page_id).ok_or(ApplyError::PageNotFound {
                book_id: *book_id,
                page_id: *page_id,
            })?;
            page.set_value(*field_id, value.clone());
        }

        Action::SetPageValueTags {
            book_id,
            page_id,
            field_id,
            tags,
        } => {
            let book = book_mut(&mut next, *book_id)?;
            if book.page(*page_id).is_none() {
                return Err(ApplyError::PageNotFound {
                    book_id: *book_id,
                    page_id: *page_id,
                });
            }
            let field = book.field_mut(*field_id).ok_or(ApplyError::FieldNotFound {
                book_id: *book_id,
                field_id: *field_id,
            })?;

            let resolved_ids = resolve_tag_selection(field, tags);

            let page = book.page_mut(*page_id).ok_or(ApplyError::PageNotFound {
                book_id: *book_id,
                page_id: *page_id,
            })?;
            page.set_value(*field_id, Some(ValueData::TagIds(resolved_ids)));
        }

        Action::UpdateFieldTag {
            book_id,
            field_id,
            tag,
        } => {
            let field = field_mut(&mut next, *book_id, *field_id)?;
            // Matched by id; a selection that no longer resolves passes
            // through unchanged.
            for existing in field.tags.iter_mut() {
                if existing.id == tag.id {
                    *existing = tag.clone();
                }
            }
        }

        Action::UpsertTableView { book_id, view } => {
            book_mut(&mut next, *book_id)?.upsert_table_view(view.clone());
        }

        Action::SetCurrentTableView { book_id, view_id } => {
            let book = book_mut(&mut next, *book_id)?;
            if book.table_view(*view_id).is_none() {
                return Err(ApplyError::ViewNotFound {
                    book_id: *book_id,
                    view_id: *view_id,
                });
            }
            book.current_table_view_id = *view_id;
        }

        Action::UpsertPageView { book_id, view } => {
            book_mut(&mut next, *book_id)?.upsert_page_view(view.clone());
        }

        Action::SetCurrentPageView { book_id, view_id } => {
            let book = book_mut(&mut next, *book_id)?;
            if book.page_view(*view_id).is_none() {
                return Err(ApplyError::ViewNotFound {
                    book_id: *book_id,
                    view_id: *view_id,
                });
            }
            book.current_page_view_id = *view_id;
        }
    }

    Ok(next)
}

/// Resolves caller-proposed tags against the field catalogue and returns the
/// deduplicated selection in input order.
///
/// Resolution per proposal: existing tag by id, else existing tag by
/// case-insensitive label, else the proposal itself is adopted into the
/// catalogue. The catalogue only ever grows.
fn resolve_tag_selection(field: &mut Field, proposals: &[Tag]) -> Vec<TagId> {
    let mut selection: Vec<TagId> = Vec::with_capacity(proposals.len());

    for proposal in proposals {
        let resolved_id = if let Some(existing) = field.tag_by_id(proposal.id) {
            existing.id
        } else if let Some(existing) = field.tag_by_label(&proposal.label) {
            existing.id
        } else {
            field.tags.push(proposal.clone());
            proposal.id
        };

        if !selection.contains(&resolved_id) {
            selection.push(resolved_id);
        }
    }

    selection
}

fn book_mut(state: &mut AppState, book_id: BookId) -> Result<&mut Book, ApplyError> {
    state
        .book_mut(book_id)
        .ok_or(ApplyError::BookNotFound(book_id))
}

fn field_mut(
    state: &mut AppState,
    book_id: BookId,
    field_id: FieldId,
) -> Result<&mut Field, ApplyError> {
    book_mut(state, book_id)?
        .field_mut(field_id)
        .ok_or(ApplyError::FieldNotFound { book_id, field_id })
}
