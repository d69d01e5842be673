//! Book aggregate root.
//!
//! # Responsibility
//! - Own all fields, pages and views of one record schema.
//! - Keep every ordered id list and its paired id map in lockstep through
//!   the insert/remove/upsert helpers below.
//!
//! # Invariants
//! - `all_fields`/`fields_by_id`, `all_table_views`/`table_views_by_id` and
//!   `all_page_views`/`page_views_by_id` always describe the same id sets.
//!   Mutation goes through the helpers; the raw collections are never edited
//!   field-by-field outside this module and the reducer.
//! - `current_table_view_id`/`current_page_view_id` always reference an
//!   existing view; a fresh book starts with one default view of each kind.

use crate::model::field::{Field, FieldId};
use crate::model::page::{Page, PageId};
use crate::model::view::{PageView, TableView, ViewId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Stable identifier for a book.
pub type BookId = Uuid;

/// Field lookup map, paired with the `all_fields` ordering list.
pub type FieldsById = BTreeMap<FieldId, Field>;

/// Page lookup map.
pub type PagesById = BTreeMap<PageId, Page>;

/// Table view lookup map, paired with the `all_table_views` ordering list.
pub type TableViewsById = BTreeMap<ViewId, TableView>;

/// Page view lookup map, paired with the `all_page_views` ordering list.
pub type PageViewsById = BTreeMap<ViewId, PageView>;

/// One user-defined record schema plus its records and views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Stable book id.
    pub id: BookId,
    /// User-facing book name.
    pub name: String,
    /// Page open in the detail panel, cleared when that page is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page_id: Option<PageId>,
    /// All pages keyed by id.
    pub pages_by_id: PagesById,
    /// Field ordering used when a view has no override of its own.
    pub all_fields: Vec<FieldId>,
    /// Field lookup paired with `all_fields`.
    pub fields_by_id: FieldsById,
    /// Table view ordering.
    pub all_table_views: Vec<ViewId>,
    /// Table view lookup paired with `all_table_views`.
    pub table_views_by_id: TableViewsById,
    /// Table view currently rendered.
    pub current_table_view_id: ViewId,
    /// Page view ordering.
    pub all_page_views: Vec<ViewId>,
    /// Page view lookup paired with `all_page_views`.
    pub page_views_by_id: PageViewsById,
    /// Page view currently rendered.
    pub current_page_view_id: ViewId,
}

impl Book {
    /// Creates a book with one empty page (set current) and one default view
    /// of each kind.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a book with a caller-provided stable id.
    pub fn with_id(id: BookId) -> Self {
        let page = Page::new();
        let mut table_view = TableView::new();
        table_view.is_default = true;
        let mut page_view = PageView::new();
        page_view.is_default = true;

        Self {
            id,
            name: "New book".to_string(),
            current_page_id: Some(page.id),
            pages_by_id: BTreeMap::from([(page.id, page)]),
            all_fields: Vec::new(),
            fields_by_id: BTreeMap::new(),
            all_table_views: vec![table_view.id],
            current_table_view_id: table_view.id,
            table_views_by_id: BTreeMap::from([(table_view.id, table_view)]),
            all_page_views: vec![page_view.id],
            current_page_view_id: page_view.id,
            page_views_by_id: BTreeMap::from([(page_view.id, page_view)]),
        }
    }

    /// Finds the id of the first field whose label matches exactly.
    pub fn field_id_by_label(&self, label: &str) -> Option<FieldId> {
        self.all_fields
            .iter()
            .copied()
            .find(|field_id| {
                self.fields_by_id
                    .get(field_id)
                    .is_some_and(|field| field.label == label)
            })
    }

    pub fn field(&self, field_id: FieldId) -> Option<&Field> {
        self.fields_by_id.get(&field_id)
    }

    pub fn field_mut(&mut self, field_id: FieldId) -> Option<&mut Field> {
        self.fields_by_id.get_mut(&field_id)
    }

    pub fn page(&self, page_id: PageId) -> Option<&Page> {
        self.pages_by_id.get(&page_id)
    }

    pub fn page_mut(&mut self, page_id: PageId) -> Option<&mut Page> {
        self.pages_by_id.get_mut(&page_id)
    }

    pub fn table_view(&self, view_id: ViewId) -> Option<&TableView> {
        self.table_views_by_id.get(&view_id)
    }

    pub fn page_view(&self, view_id: ViewId) -> Option<&PageView> {
        self.page_views_by_id.get(&view_id)
    }

    /// Appends a field to the ordering list and the lookup map together.
    pub fn insert_field(&mut self, field: Field) {
        self.all_fields.push(field.id);
        self.fields_by_id.insert(field.id, field);
    }

    /// Removes a field from the ordering list and the lookup map together.
    ///
    /// Page values and view field lists referencing the id are left alone;
    /// projections filter them lazily.
    pub fn remove_field(&mut self, field_id: FieldId) -> bool {
        if self.fields_by_id.remove(&field_id).is_none() {
            return false;
        }
        self.all_fields.retain(|id| *id != field_id);
        true
    }

    /// Replaces the field ordering with a caller-supplied permutation.
    ///
    /// Rejects the input (returning `false`, state untouched) unless it is a
    /// true permutation of the current field ids.
    pub fn apply_field_order(&mut self, field_ids: &[FieldId]) -> bool {
        if field_ids.len() != self.all_fields.len() {
            return false;
        }
        let incoming: BTreeSet<FieldId> = field_ids.iter().copied().collect();
        if incoming.len() != field_ids.len() {
            return false;
        }
        let current: BTreeSet<FieldId> = self.all_fields.iter().copied().collect();
        if incoming != current {
            return false;
        }
        self.all_fields = field_ids.to_vec();
        true
    }

    /// Inserts or replaces a page under its own id.
    pub fn upsert_page(&mut self, page: Page) {
        self.pages_by_id.insert(page.id, page);
    }

    /// Removes a page, clearing the current-page pointer when it referenced
    /// the removed page.
    pub fn remove_page(&mut self, page_id: PageId) -> bool {
        if self.pages_by_id.remove(&page_id).is_none() {
            return false;
        }
        if self.current_page_id == Some(page_id) {
            self.current_page_id = None;
        }
        true
    }

    /// Replaces an existing table view, or inserts a new one at the end of
    /// the ordering and makes it current.
    pub fn upsert_table_view(&mut self, view: TableView) {
        let view_id = view.id;
        let existed = self.table_views_by_id.insert(view_id, view).is_some();
        if !existed {
            self.all_table_views.push(view_id);
            self.current_table_view_id = view_id;
        }
    }

    /// Replaces an existing page view, or inserts a new one at the end of
    /// the ordering and makes it current.
    pub fn upsert_page_view(&mut self, view: PageView) {
        let view_id = view.id;
        let existed = self.page_views_by_id.insert(view_id, view).is_some();
        if !existed {
            self.all_page_views.push(view_id);
            self.current_page_view_id = view_id;
        }
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}
