//! Tag catalogue entries for tag/select fields.
//!
//! # Responsibility
//! - Define the tag shape shared by field catalogues and page values.
//! - Provide the label-matching rule used to deduplicate user input.
//!
//! # Invariants
//! - `id` is stable and never reused for another tag.
//! - Label comparison for dedup purposes is case-insensitive.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a tag within a field's catalogue.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TagId = Uuid;

/// Fixed palette for freshly created tags. Colors come from the hue set the
/// table UI renders; the pick is derived from the tag id so a given tag keeps
/// its color across sessions.
const TAG_PALETTE: &[&str] = &[
    "#f5222d", "#fa8c16", "#fadb14", "#52c41a", "#13c2c2", "#1890ff", "#2f54eb", "#722ed1",
    "#eb2f96", "#8c8c8c",
];

/// One entry in a field's tag catalogue.
///
/// A tag is owned by exactly one field. Pages reference tags by id only;
/// label and color live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Stable id referenced from page values.
    pub id: TagId,
    /// Display label. Not unique; catalogue lookups by label are
    /// case-insensitive.
    pub label: String,
    /// Display color as a CSS hex string.
    pub color: String,
}

impl Tag {
    /// Creates a tag with a generated id and a palette color derived from it.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), label)
    }

    /// Creates a tag with a caller-provided stable id.
    ///
    /// Used when identity is decided at the input boundary, before the
    /// catalogue has seen the tag.
    pub fn with_id(id: TagId, label: impl Into<String>) -> Self {
        Self {
            color: palette_color(&id).to_string(),
            id,
            label: label.into(),
        }
    }

    /// Returns whether this tag's label matches `label`, ignoring case.
    pub fn matches_label(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.to_lowercase()
    }
}

fn palette_color(id: &TagId) -> &'static str {
    let index = id.as_bytes()[0] as usize % TAG_PALETTE.len();
    TAG_PALETTE[index]
}
