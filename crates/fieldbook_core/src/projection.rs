//! View projection: field ordering, visibility and row filtering.
//!
//! # Responsibility
//! - Derive the field list a view renders from the view's own ordering and
//!   the book's field list.
//! - Decide which pages match a table view's search term.
//!
//! # Invariants
//! - All functions are pure reads; the same inputs yield the same outputs.
//! - Stale field references (deleted fields still listed by a view or still
//!   holding values on a page) are filtered, never an error.

use crate::model::book::Book;
use crate::model::field::{Field, FieldId, FieldType};
use crate::model::page::{Page, ValueData};
use crate::model::view::{TableView, ViewFields, VisibleFields};
use std::collections::BTreeSet;

/// Returns the field ordering to render for `view`.
///
/// The view's explicit `field_ids` win; book fields the view does not list
/// yet (added after the view was configured) are appended in book order.
/// The union is deduplicated by id and filtered to fields that still exist.
pub fn fields_for_view<V: ViewFields>(book: &Book, view: &V) -> Vec<FieldId> {
    let mut seen = BTreeSet::new();
    view.field_ids()
        .iter()
        .chain(book.all_fields.iter())
        .copied()
        .filter(|field_id| seen.insert(*field_id))
        .filter(|field_id| book.fields_by_id.contains_key(field_id))
        .collect()
}

/// Returns the field ordering filtered by the view's visibility map.
///
/// A field with no map entry, or a view with no map at all, is visible.
pub fn visible_fields_for_view<V: ViewFields>(book: &Book, view: &V) -> Vec<FieldId> {
    fields_for_view(book, view)
        .into_iter()
        .filter(|field_id| match view.visible_fields() {
            // Only an explicit `false` hides a field; fields the map has
            // never seen stay visible.
            Some(visible) => visible.get(field_id).copied().unwrap_or(true),
            None => true,
        })
        .collect()
}

/// Returns the visible field set reshaped as an id→true map.
///
/// Used to seed per-field visibility toggles in view settings UIs.
pub fn visible_fields_by_id_for_view<V: ViewFields>(book: &Book, view: &V) -> VisibleFields {
    visible_fields_for_view(book, view)
        .into_iter()
        .map(|field_id| (field_id, true))
        .collect()
}

/// Returns whether `page` matches a free-text search over `fields`.
///
/// An empty search term matches every page. Text-like fields match on a
/// case-insensitive substring of the stored string; tag-backed fields match
/// when any selected tag resolves to a label containing the term. Other
/// field types never match and never error.
pub fn page_matches_search(fields: &[&Field], page: &Page, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();

    fields.iter().any(|field| match field.field_type {
        FieldType::Text | FieldType::Textarea => match page.value(field.id) {
            Some(ValueData::Text(text)) => text.to_lowercase().contains(&needle),
            _ => false,
        },
        FieldType::Tags | FieldType::Select => match page.value(field.id) {
            Some(ValueData::TagIds(tag_ids)) => tag_ids.iter().any(|tag_id| {
                field
                    .tag_by_id(*tag_id)
                    .is_some_and(|tag| tag.label.to_lowercase().contains(&needle))
            }),
            _ => false,
        },
        _ => false,
    })
}

/// Returns the pages of `book` matching `view`'s search term, in stable id
/// order.
///
/// The search inspects every field the view orders, not only the visible
/// ones, mirroring the table widget's row derivation.
pub fn pages_for_view<'book>(book: &'book Book, view: &TableView) -> Vec<&'book Page> {
    let fields: Vec<&Field> = fields_for_view(book, view)
        .into_iter()
        .filter_map(|field_id| book.field(field_id))
        .collect();

    book.pages_by_id
        .values()
        .filter(|page| page_matches_search(&fields, page, &view.search))
        .collect()
}
