//! # Challenge Processor
//!
//! Orchestrates a non-canonicity challenge against an in-flight exit.
//!
//! ## Checks (in order)
//!
//! | # | Check | Rejection |
//! |---|-------|-----------|
//! | 1 | Exit exists | `UnknownExit` |
//! | 2 | Exit still in its first period | `ChallengePeriodClosed` |
//! | 3 | Competitor differs from the exiting tx | `SelfChallenge` |
//! | 4 | Competitor not used before | `CompetitorAlreadyUsed` |
//! | 5 | Both spend the same output of the input tx, at the claimed input | `UnrelatedTransaction` |
//! | 6 | Competitor included at its position | `InvalidInclusionProof` |
//! | 7 | Shared input signed by the output owner | `InvalidSignature` |
//! | 8 | Competitor older than the recorded one | `NotOlderThanCurrentCompetitor` |
//!
//! The accepted update is built by [`next_exit_state`] and written with a
//! single compare-and-swap. If another challenge lands between the read and
//! the write, the request is evaluated again against the new state.

use std::sync::Arc;
use tracing::{debug, info};

use shared_types::{Address, Transaction, TxInput};

use crate::algorithms::next_exit_state;
use crate::config::ChallengeConfig;
use crate::domain::{
    invariant_competitor_unused, invariant_not_self_challenge, invariant_position_matches_input,
    invariant_shares_input, invariant_strictly_older, ChallengeAccepted, ChallengeError, ChallengeRequest,
    ChallengeResult, ExitId, InFlightExit, InFlightExitView,
};
use crate::metrics;
use crate::ports::inbound::CanonicityChallengeApi;
use crate::ports::outbound::{ChildChainLedger, Clock, ExitStore, PhaseGate, ProofVerifier};

use super::registry::InFlightExitRegistry;

/// Attempts at committing a challenge before giving up on contention.
const MAX_COMMIT_ATTEMPTS: usize = 8;

/// Non-canonicity challenge processor.
pub struct ChallengeProcessor<S, L, V, G, C>
where
    S: ExitStore,
    L: ChildChainLedger,
    V: ProofVerifier,
    G: PhaseGate,
    C: Clock,
{
    config: ChallengeConfig,
    registry: InFlightExitRegistry<S>,
    ledger: Arc<L>,
    verifier: Arc<V>,
    gate: Arc<G>,
    clock: Arc<C>,
}

impl<S, L, V, G, C> ChallengeProcessor<S, L, V, G, C>
where
    S: ExitStore,
    L: ChildChainLedger,
    V: ProofVerifier,
    G: PhaseGate,
    C: Clock,
{
    /// Create a processor over the given collaborators.
    pub fn new(
        config: ChallengeConfig,
        store: Arc<S>,
        ledger: Arc<L>,
        verifier: Arc<V>,
        gate: Arc<G>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            config,
            registry: InFlightExitRegistry::new(store),
            ledger,
            verifier,
            gate,
            clock,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    /// The exit registry.
    pub fn registry(&self) -> &InFlightExitRegistry<S> {
        &self.registry
    }

    /// Run checks 2 to 8 against `exit` and build its successor.
    fn evaluate(
        &self,
        exit: &InFlightExit,
        request: &ChallengeRequest,
    ) -> Result<InFlightExit, ChallengeError> {
        let now = self.clock.now();
        if !self.gate.challenge_period_open(exit, now) {
            return Err(ChallengeError::ChallengePeriodClosed {
                period: self.gate.current_period(exit, now),
            });
        }

        let competitor_id = request.competing_tx.id();
        invariant_not_self_challenge(exit, &competitor_id)?;
        invariant_competitor_unused(exit, &competitor_id)?;

        let spent_output = invariant_shares_input(
            &exit.exiting_tx,
            &request.competing_tx,
            request.competing_tx_input_index,
            &request.input_tx,
            request.input_tx_output_index,
        )?;
        self.check_input_on_ledger(&request.input_tx, request.input_tx_output_index)?;

        let position = request.competing_tx_position;
        invariant_position_matches_input(&position, request.competing_tx_input_index)?;
        let root = self
            .ledger
            .block_root(position.block_index)
            .ok_or(ChallengeError::InvalidInclusionProof)?;
        if !self
            .verifier
            .verify_inclusion(&request.competing_tx, &position, &request.proof, &root)
        {
            return Err(ChallengeError::InvalidInclusionProof);
        }

        if !self.verifier.verify_signature(
            &request.competing_tx,
            request.competing_tx_input_index,
            &request.signature,
            &spent_output.owner,
        ) {
            return Err(ChallengeError::InvalidSignature);
        }

        invariant_strictly_older(&position, exit.oldest_competitor.as_ref())?;

        next_exit_state(exit, competitor_id, position, request.challenger)
    }

    /// The ledger must know `input_tx` as the creator of the shared output.
    fn check_input_on_ledger(
        &self,
        input_tx: &Transaction,
        output_index: u16,
    ) -> Result<(), ChallengeError> {
        let shared = TxInput::new(input_tx.id(), output_index);
        match self.ledger.resolve_transaction(&shared) {
            Some(resolved) if resolved.id() == shared.tx_id => Ok(()),
            _ => Err(ChallengeError::UnrelatedTransaction {
                reason: "input transaction not found on the ledger",
            }),
        }
    }

    fn apply(&self, request: &ChallengeRequest) -> ChallengeResult {
        for _ in 0..MAX_COMMIT_ATTEMPTS {
            let exit = self.registry.get(&request.exit_id)?;
            let next = self.evaluate(&exit, request)?;
            let view = next.view();

            match self.registry.commit(&exit, next) {
                Ok(()) => {
                    return Ok(ChallengeAccepted {
                        exit_id: request.exit_id,
                        previous_bond_owner: exit.bond_owner,
                        exit: view,
                    })
                }
                Err(ChallengeError::StaleExitState(reason)) => {
                    debug!(exit_id = %request.exit_id, %reason, "[pe-01] Exit moved, re-evaluating challenge");
                }
                Err(e) => return Err(e),
            }
        }
        Err(ChallengeError::StaleExitState(format!(
            "exit {} kept changing after {} attempts",
            request.exit_id, MAX_COMMIT_ATTEMPTS
        )))
    }
}

impl<S, L, V, G, C> CanonicityChallengeApi for ChallengeProcessor<S, L, V, G, C>
where
    S: ExitStore,
    L: ChildChainLedger,
    V: ProofVerifier,
    G: PhaseGate,
    C: Clock,
{
    fn start_in_flight_exit(
        &self,
        exiting_tx: Transaction,
        initiator: Address,
    ) -> Result<ExitId, ChallengeError> {
        let started_at = self.clock.now();
        let exit_id = self
            .registry
            .open(InFlightExit::start(exiting_tx, initiator, started_at))?;

        metrics::record_exit_started();
        info!(
            exit_id = %exit_id,
            initiator = %hex::encode(initiator),
            started_at,
            "[pe-01] In-flight exit started"
        );
        Ok(exit_id)
    }

    fn challenge_not_canonical(&self, request: ChallengeRequest) -> ChallengeResult {
        match self.apply(&request) {
            Ok(accepted) => {
                metrics::record_challenge_accepted();
                info!(
                    exit_id = %accepted.exit_id,
                    challenger = %hex::encode(request.challenger),
                    position = %request.competing_tx_position,
                    previous_bond_owner = %hex::encode(accepted.previous_bond_owner),
                    "[pe-01] Non-canonicity challenge accepted"
                );
                Ok(accepted)
            }
            Err(e) => {
                metrics::record_challenge_rejected(e.reason());
                debug!(
                    exit_id = %request.exit_id,
                    reason = e.reason(),
                    error = %e,
                    "[pe-01] Non-canonicity challenge rejected"
                );
                Err(e)
            }
        }
    }

    fn get_in_flight_exit(&self, exit_id: &ExitId) -> Option<InFlightExitView> {
        self.registry.view(exit_id)
    }

    fn current_period(&self, exit_id: &ExitId) -> Result<u64, ChallengeError> {
        let exit = self.registry.get(exit_id)?;
        Ok(self.gate.current_period(&exit, self.clock.now()))
    }
}
