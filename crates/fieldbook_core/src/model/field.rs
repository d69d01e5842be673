//! Field schema model.
//!
//! # Responsibility
//! - Define the typed column/field shape owned by a book.
//! - Provide catalogue lookups used by tag resolution and projections.
//!
//! # Invariants
//! - `tags` never contains two entries with the same id.
//! - Lookup helpers are total: missing entries return `None`, never panic.

use crate::model::tag::{Tag, TagId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a field within a book.
pub type FieldId = Uuid;

/// Input kind for a field. Decides how values are entered, rendered and
/// searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text input.
    Text,
    /// Multi-line markdown text.
    Textarea,
    /// Multiple tag selection backed by the field's tag catalogue.
    Tags,
    /// Single tag selection backed by the field's tag catalogue.
    Select,
    /// Five-star rating.
    Rate,
    /// URL text input.
    Url,
    /// Single checkbox.
    Checkbox,
    /// Date input.
    Datetime,
    /// User script source, executed outside this crate.
    Code,
    /// User script source that runs continually, executed outside this crate.
    Livecode,
}

impl FieldType {
    /// Returns whether values of this field type are tag-id lists.
    pub fn is_tag_backed(self) -> bool {
        matches!(self, Self::Tags | Self::Select)
    }
}

/// One typed column of a book schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Stable id referenced by views and page values.
    pub id: FieldId,
    /// Display label shown as the column/row header.
    pub label: String,
    /// Serialized as `type` to match the persisted state layout.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Tag catalogue. Meaningful only for tag-backed field types; kept empty
    /// otherwise.
    pub tags: Vec<Tag>,
    /// Free-text body. Holds user script source for code-type fields.
    pub text: String,
    /// Whether the detail panel renders this field collapsed.
    pub collapsed: bool,
    /// Whether inputs for this field are disabled.
    pub read_only: bool,
    /// Explicit table column width in pixels, when the user resized it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_column_width: Option<u32>,
}

impl Field {
    /// Creates a field with a generated id and well-formed defaults.
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), field_type, label)
    }

    /// Creates a field with a caller-provided stable id.
    pub fn with_id(id: FieldId, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            field_type,
            tags: Vec::new(),
            text: String::new(),
            collapsed: false,
            read_only: false,
            table_column_width: None,
        }
    }

    /// Looks up a catalogue tag by id.
    pub fn tag_by_id(&self, tag_id: TagId) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == tag_id)
    }

    /// Looks up a catalogue tag by label, ignoring case.
    ///
    /// Used to fold differently-cased user input onto one logical tag.
    pub fn tag_by_label(&self, label: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.matches_label(label))
    }
}
