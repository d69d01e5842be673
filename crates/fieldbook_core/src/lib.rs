//! Core domain logic for Fieldbook.
//! This crate is the single source of truth for the normalized document
//! store: model, reducer, projections and snapshot persistence. UI layers
//! consume it through [`store::Store`] and the projection functions.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::app_state::{AppState, Viewing};
pub use model::book::{Book, BookId};
pub use model::field::{Field, FieldId, FieldType};
pub use model::page::{Page, PageId, ValueData, ValuesByFieldId};
pub use model::tag::{Tag, TagId};
pub use model::view::{PageView, TableView, ViewFields, ViewId, VisibleFields};
pub use projection::{
    fields_for_view, page_matches_search, pages_for_view, visible_fields_by_id_for_view,
    visible_fields_for_view,
};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository,
};
pub use store::{apply, Action, ApplyError, FieldFlag, Store};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
