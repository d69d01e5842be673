//! Normalized document model for books, fields, pages, tags and views.
//!
//! # Responsibility
//! - Define the canonical entity shapes shared by the reducer and the
//!   projection layer.
//! - Provide pure constructors with well-formed defaults and total lookup
//!   helpers.
//!
//! # Invariants
//! - Every ordered id list (`all_*`) matches the key set of its paired
//!   `*_by_id` map after every mutation.
//! - Entity ids are stable and never reused.

pub mod app_state;
pub mod book;
pub mod field;
pub mod page;
pub mod tag;
pub mod view;
