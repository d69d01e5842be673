//! State owner and dispatch entry point.
//!
//! # Responsibility
//! - Hold the single authoritative `AppState` and feed actions through the
//!   reducer.
//! - Write a full-state snapshot after every committed mutation.
//!
//! # Invariants
//! - Exactly one owner and one writer; no global instance exists — callers
//!   construct and inject the store themselves.
//! - A snapshot write failure never rolls back the in-memory transition.
//! - A rejected action leaves both memory and snapshot untouched.

use crate::model::app_state::AppState;
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::store::action::Action;
use crate::store::reducer::{apply, ApplyError};
use log::{debug, warn};

/// Reducer-backed state container with snapshot persistence.
///
/// Each dispatch is synchronous and runs to completion on the calling
/// thread: reduce, commit, persist. The snapshot write is a whole-state
/// serialization, O(total state size) per mutation — acceptable for a
/// single-user local tool, and kept deliberately instead of an incremental
/// scheme.
pub struct Store<R: SnapshotRepository> {
    state: AppState,
    repo: R,
}

impl<R: SnapshotRepository> Store<R> {
    /// Opens a store over the repository's persisted snapshot.
    ///
    /// Falls back to the empty default state when no snapshot exists or the
    /// stored blob cannot be read; the fallback never fails.
    pub fn open(repo: R) -> Self {
        let state = match repo.load() {
            Ok(Some(state)) => state,
            Ok(None) => AppState::default(),
            Err(err) => {
                warn!("event=state_load module=store status=fallback error={err}");
                AppState::default()
            }
        };

        Self { state, repo }
    }

    /// Creates a store over an explicit starting state, skipping the load.
    pub fn with_state(state: AppState, repo: R) -> Self {
        Self { state, repo }
    }

    /// Read access for projection callers.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs one action through the reducer and persists the result.
    ///
    /// On a reducer error the state is unchanged and nothing is written. On
    /// a persistence error the new in-memory state is kept and the failure
    /// is logged and swallowed.
    pub fn dispatch(&mut self, action: &Action) -> Result<(), ApplyError> {
        let next = match apply(&self.state, action) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    "event=dispatch module=store status=rejected action={} error={err}",
                    action.kind()
                );
                return Err(err);
            }
        };

        self.state = next;
        debug!(
            "event=dispatch module=store status=ok action={}",
            action.kind()
        );

        if let Err(err) = self.repo.save(&self.state) {
            warn!("event=state_save module=store status=error error={err}");
        }

        Ok(())
    }
}
