//! Table/page view models.
//!
//! # Responsibility
//! - Define the projection settings a book stores per view: explicit field
//!   ordering, optional visibility map, search/filter state.
//! - Expose the shared ordering/visibility surface through [`ViewFields`].
//!
//! # Invariants
//! - `field_ids` may reference fields no longer present in the book; stale
//!   ids are filtered lazily at projection time, never eagerly pruned.
//! - An absent `visible_fields` map means "all fields visible".

use crate::model::field::FieldId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for a table or page view.
pub type ViewId = Uuid;

/// Per-field visibility toggles. A missing entry means visible.
pub type VisibleFields = BTreeMap<FieldId, bool>;

/// One selected filter value in a table view's column filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

/// Per-column filter selections, keyed by field id. `None` clears a column's
/// filter while keeping the key around, matching the table widget contract.
pub type ViewFilters = BTreeMap<FieldId, Option<Vec<FilterValue>>>;

/// Common ordering/visibility surface shared by table and page views.
///
/// Projection functions accept any implementor so the same derivation serves
/// both view kinds.
pub trait ViewFields {
    /// Explicit field ordering stored on the view. May contain stale ids.
    fn field_ids(&self) -> &[FieldId];
    /// Optional visibility map. `None` means all fields visible.
    fn visible_fields(&self) -> Option<&VisibleFields>;
}

/// Spreadsheet-style projection over a book's pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// Stable view id.
    pub id: ViewId,
    /// Whether this is the view a fresh book starts with.
    #[serde(rename = "default")]
    pub is_default: bool,
    /// User-facing view name.
    pub name: String,
    /// Free-text search term applied to the row set.
    pub search: String,
    /// Per-column filter selections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ViewFilters>,
    /// Explicit field ordering; unioned with the book's field list at
    /// projection time.
    pub field_ids: Vec<FieldId>,
    /// Optional per-field visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_fields: Option<VisibleFields>,
}

impl TableView {
    /// Creates a table view with a generated id and default settings.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a table view with a caller-provided stable id.
    pub fn with_id(id: ViewId) -> Self {
        Self {
            id,
            is_default: false,
            name: "Table view".to_string(),
            search: String::new(),
            filters: None,
            field_ids: Vec::new(),
            visible_fields: None,
        }
    }

    /// Marks `field_id` visible when this view carries an explicit
    /// visibility map. Views without a map already show every field.
    pub fn mark_visible(&mut self, field_id: FieldId) {
        if let Some(visible) = self.visible_fields.as_mut() {
            visible.insert(field_id, true);
        }
    }
}

impl Default for TableView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFields for TableView {
    fn field_ids(&self) -> &[FieldId] {
        &self.field_ids
    }

    fn visible_fields(&self) -> Option<&VisibleFields> {
        self.visible_fields.as_ref()
    }
}

/// Detail-panel projection over a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    /// Stable view id.
    pub id: ViewId,
    /// Whether this is the view a fresh book starts with.
    #[serde(rename = "default")]
    pub is_default: bool,
    /// User-facing view name.
    pub name: String,
    /// Explicit field ordering; unioned with the book's field list at
    /// projection time.
    pub field_ids: Vec<FieldId>,
    /// Optional per-field visibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_fields: Option<VisibleFields>,
}

impl PageView {
    /// Creates a page view with a generated id and default settings.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a page view with a caller-provided stable id.
    pub fn with_id(id: ViewId) -> Self {
        Self {
            id,
            is_default: false,
            name: "Page view".to_string(),
            field_ids: Vec::new(),
            visible_fields: None,
        }
    }

    /// Marks `field_id` visible when this view carries an explicit
    /// visibility map.
    pub fn mark_visible(&mut self, field_id: FieldId) {
        if let Some(visible) = self.visible_fields.as_mut() {
            visible.insert(field_id, true);
        }
    }
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFields for PageView {
    fn field_ids(&self) -> &[FieldId] {
        &self.field_ids
    }

    fn visible_fields(&self) -> Option<&VisibleFields> {
        self.visible_fields.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::{PageView, TableView};
    use std::collections::BTreeMap;
    use uuid::Uuid;

    #[test]
    fn new_views_default_to_all_visible() {
        let table = TableView::new();
        assert!(table.visible_fields.is_none());
        assert!(!table.is_default);
        assert!(table.search.is_empty());

        let page = PageView::new();
        assert!(page.visible_fields.is_none());
        assert!(page.field_ids.is_empty());
    }

    #[test]
    fn mark_visible_is_a_no_op_without_a_map() {
        let mut view = TableView::new();
        view.mark_visible(Uuid::new_v4());
        assert!(view.visible_fields.is_none());
    }

    #[test]
    fn mark_visible_inserts_into_an_existing_map() {
        let mut view = PageView::new();
        view.visible_fields = Some(BTreeMap::new());
        let field_id = Uuid::new_v4();
        view.mark_visible(field_id);
        assert_eq!(
            view.visible_fields.as_ref().and_then(|v| v.get(&field_id)),
            Some(&true)
        );
    }
}
