//! # In-Flight Exit Registry
//!
//! Owns the open exits through an injected [`ExitStore`]. Writes go through
//! compare-and-swap so a commit based on a stale read never lands.

use std::sync::Arc;
use tracing::warn;

use crate::domain::{
    invariant_monotone_transition, ChallengeError, ExitId, InFlightExit, InFlightExitView,
};
use crate::ports::outbound::ExitStore;

/// Registry of open in-flight exits.
pub struct InFlightExitRegistry<S: ExitStore> {
    store: Arc<S>,
}

impl<S: ExitStore> InFlightExitRegistry<S> {
    /// Create a registry over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a fresh exit. Fails if an exit with the same id exists.
    pub fn open(&self, exit: InFlightExit) -> Result<ExitId, ChallengeError> {
        let exit_id = exit.id();
        if !self.store.compare_and_swap(exit_id, None, exit) {
            return Err(ChallengeError::ExitAlreadyStarted(exit_id));
        }
        Ok(exit_id)
    }

    /// Load an exit.
    pub fn get(&self, exit_id: &ExitId) -> Result<InFlightExit, ChallengeError> {
        self.store
            .get_exit(exit_id)
            .ok_or(ChallengeError::UnknownExit(*exit_id))
    }

    /// Read-only projection of an exit.
    pub fn view(&self, exit_id: &ExitId) -> Option<InFlightExitView> {
        self.store.get_exit(exit_id).map(|exit| exit.view())
    }

    /// Replace `prev` by `next`.
    ///
    /// Fails with [`ChallengeError::StaleExitState`] when `next` is not a
    /// monotone successor of `prev`, or when the stored exit is no longer
    /// `prev`. Nothing is written in either case.
    pub fn commit(&self, prev: &InFlightExit, next: InFlightExit) -> Result<(), ChallengeError> {
        let exit_id = prev.id();
        if let Err(e) = invariant_monotone_transition(prev, &next) {
            warn!(exit_id = %exit_id, error = %e, "[pe-01] Refusing non-monotone exit update");
            return Err(e);
        }
        if !self.store.compare_and_swap(exit_id, Some(prev), next) {
            return Err(ChallengeError::StaleExitState(format!(
                "exit {} changed during the update",
                exit_id
            )));
        }
        Ok(())
    }

    /// Number of registered exits.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether no exit is registered.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
