//! In-memory exit store.
//!
//! Reads take the shared lock; `compare_and_swap` runs its comparison and
//! write under one exclusive lock, which is what serializes concurrent
//! challenges against the same exit.

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::{ExitId, InFlightExit};
use crate::ports::outbound::ExitStore;

/// `ExitStore` backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryExitStore {
    exits: RwLock<HashMap<ExitId, InFlightExit>>,
}

impl InMemoryExitStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ExitStore for InMemoryExitStore {
    fn get_exit(&self, exit_id: &ExitId) -> Option<InFlightExit> {
        self.exits.read().get(exit_id).cloned()
    }

    fn put_exit(&self, exit_id: ExitId, exit: InFlightExit) {
        self.exits.write().insert(exit_id, exit);
    }

    fn compare_and_swap(
        &self,
        exit_id: ExitId,
        expected: Option<&InFlightExit>,
        next: InFlightExit,
    ) -> bool {
        let mut exits = self.exits.write();
        if exits.get(&exit_id) != expected {
            return false;
        }
        exits.insert(exit_id, next);
        true
    }

    fn len(&self) -> usize {
        self.exits.read().len()
    }
}
