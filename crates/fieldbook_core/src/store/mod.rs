//! Mutation engine: actions, reducer and the dispatching state owner.
//!
//! # Responsibility
//! - Define every sanctioned state transition and the pure function that
//!   applies it.
//! - Provide the injected `Store` handle UI roots and test harnesses own.
//!
//! # Invariants
//! - All mutation flows through [`reducer::apply`]; nothing else writes the
//!   state tree.

pub mod action;
pub mod reducer;
#[allow(clippy::module_inception)]
pub mod store;

pub use action::{Action, FieldFlag};
pub use reducer::{apply, ApplyError};
pub use store::Store;
