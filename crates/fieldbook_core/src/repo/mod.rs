//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot load/save contract the store depends on.
//! - Isolate SQLite and blob-encoding details from the mutation engine.
//!
//! # Invariants
//! - A malformed persisted snapshot is reported as absent, never as an
//!   error; the caller falls back to a fresh default state.

pub mod snapshot_repo;
