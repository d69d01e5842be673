//! Page (record) model and per-field values.
//!
//! # Responsibility
//! - Define the sparse value map a page holds per field.
//! - Keep the "no value set" vs "explicit empty value" distinction intact.
//!
//! # Invariants
//! - `values` never stores an entry for "unset"; unset means the key is
//!   absent.
//! - Values for tag-backed fields are ordered lists of tag ids.

use crate::model::field::FieldId;
use crate::model::tag::TagId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier for a page within a book.
pub type PageId = Uuid;

/// A single stored field value.
///
/// Serialized untagged so the persisted blob keeps the plain JSON shapes the
/// original state layout uses (string, string list, number, number list,
/// bool).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueData {
    /// Checkbox state.
    Bool(bool),
    /// Numeric value, e.g. a star rating.
    Int(i64),
    /// Text-like value (text, textarea, url, datetime, code bodies).
    Text(String),
    /// Ordered tag-id list for tag-backed fields.
    TagIds(Vec<TagId>),
    /// Numeric list.
    IntList(Vec<i64>),
}

/// Sparse map from field id to stored value.
pub type ValuesByFieldId = BTreeMap<FieldId, ValueData>;

/// One record of a book.
///
/// A page may hold values for fields that were later deleted from the book;
/// projections filter those lazily instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Stable page id.
    pub id: PageId,
    /// Per-field values, sparse. An absent key means "no value set".
    pub values: ValuesByFieldId,
}

impl Page {
    /// Creates an empty page with a generated id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an empty page with a caller-provided stable id.
    pub fn with_id(id: PageId) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
        }
    }

    /// Returns the stored value for `field_id`, if any.
    pub fn value(&self, field_id: FieldId) -> Option<&ValueData> {
        self.values.get(&field_id)
    }

    /// Stores or clears the value for `field_id`.
    ///
    /// `None` removes the key entirely, keeping the sparse-map invariant: an
    /// unset value is an absent entry, never a stored placeholder.
    pub fn set_value(&mut self, field_id: FieldId, value: Option<ValueData>) {
        match value {
            Some(value) => {
                self.values.insert(field_id, value);
            }
            None => {
                self.values.remove(&field_id);
            }
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
