//! # Inbound Ports
//!
//! API trait defining what the canonicity challenge engine offers.

use shared_types::{Address, Transaction};

use crate::domain::{ChallengeError, ChallengeRequest, ChallengeResult, ExitId, InFlightExitView};

/// Canonicity challenge API - inbound port.
///
/// All operations are synchronous and never block on I/O.
pub trait CanonicityChallengeApi: Send + Sync {
    /// Register a new in-flight exit of `exiting_tx`.
    fn start_in_flight_exit(
        &self,
        exiting_tx: Transaction,
        initiator: Address,
    ) -> Result<ExitId, ChallengeError>;

    /// Challenge the canonicity of an exit with an older competing spend.
    ///
    /// The only mutating entry point of the challenge state machine.
    ///
    /// If the exit keeps changing underneath the request, the request is
    /// evaluated again against each new state. After a bounded number of lost
    /// commits it fails with [`ChallengeError::StaleExitState`] and writes
    /// nothing. The same request may then be resubmitted.
    fn challenge_not_canonical(&self, request: ChallengeRequest) -> ChallengeResult;

    /// Read-only projection of an exit.
    fn get_in_flight_exit(&self, exit_id: &ExitId) -> Option<InFlightExitView>;

    /// Period the exit is in right now.
    fn current_period(&self, exit_id: &ExitId) -> Result<u64, ChallengeError>;
}
