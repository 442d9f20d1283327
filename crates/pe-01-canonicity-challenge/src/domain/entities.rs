//! # Domain Entities
//!
//! The in-flight exit record, its read-only projection, and the challenge
//! request/outcome types.

use serde::{Deserialize, Serialize};
use shared_types::{Address, EcdsaSignature, Hash, Transaction};
use std::collections::BTreeSet;

use super::errors::ChallengeError;
use super::value_objects::{CanonicityState, ExitId, Position};

/// A single in-progress exit of a transaction not yet proven included.
///
/// Mutated only through [`crate::algorithms::next_exit_state`], which builds
/// the whole successor value at once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFlightExit {
    /// Transaction being exited.
    pub exiting_tx: Transaction,
    /// Account that started the exit.
    pub initiator: Address,
    /// Protocol time (seconds) at which the exit started.
    pub started_at: u64,
    /// True until a challenge is accepted, never true again afterwards.
    pub is_canonical: bool,
    /// Position of the most recently accepted competitor.
    pub oldest_competitor: Option<Position>,
    /// Account entitled to the non-canonicity bond.
    pub bond_owner: Address,
    /// Ids of competitors already accepted against this exit.
    pub used_competitors: BTreeSet<Hash>,
}

impl InFlightExit {
    /// A fresh, canonical exit with the initiator holding the bond.
    pub fn start(exiting_tx: Transaction, initiator: Address, started_at: u64) -> Self {
        Self {
            exiting_tx,
            initiator,
            started_at,
            is_canonical: true,
            oldest_competitor: None,
            bond_owner: initiator,
            used_competitors: BTreeSet::new(),
        }
    }

    /// Identifier of this exit.
    pub fn id(&self) -> ExitId {
        ExitId::from_tx(&self.exiting_tx)
    }

    /// Canonicity as a state.
    pub fn canonicity(&self) -> CanonicityState {
        if self.is_canonical {
            CanonicityState::Canonical
        } else {
            CanonicityState::NonCanonical
        }
    }

    /// Whether `competitor_id` was already accepted.
    pub fn has_used(&self, competitor_id: &Hash) -> bool {
        self.used_competitors.contains(competitor_id)
    }

    /// Read-only projection.
    pub fn view(&self) -> InFlightExitView {
        InFlightExitView {
            exit_id: self.id(),
            is_canonical: self.is_canonical,
            oldest_competitor_position: self.oldest_competitor,
            bond_owner: self.bond_owner,
            started_at: self.started_at,
        }
    }
}

/// Read-only projection of an exit for monitoring collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InFlightExitView {
    /// Exit identifier
    pub exit_id: ExitId,
    /// Canonicity flag
    pub is_canonical: bool,
    /// Oldest accepted competitor, if any
    pub oldest_competitor_position: Option<Position>,
    /// Current bond owner
    pub bond_owner: Address,
    /// Exit start time
    pub started_at: u64,
}

/// Evidence submitted with a non-canonicity challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeRequest {
    /// Exit under challenge.
    pub exit_id: ExitId,
    /// Transaction spending the same input as the exiting transaction.
    pub competing_tx: Transaction,
    /// Index of the shared input inside `competing_tx`.
    pub competing_tx_input_index: u16,
    /// Where `competing_tx` was included.
    pub competing_tx_position: Position,
    /// Merkle proof of `competing_tx` under its block root.
    pub proof: Vec<u8>,
    /// Signature of the spent output's owner over `competing_tx`.
    pub signature: EcdsaSignature,
    /// Transaction that created the shared input.
    pub input_tx: Transaction,
    /// Output of `input_tx` that both transactions spend.
    pub input_tx_output_index: u16,
    /// Account submitting the challenge.
    pub challenger: Address,
}

/// Outcome of an accepted challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeAccepted {
    /// Exit that was challenged
    pub exit_id: ExitId,
    /// Bond owner before this challenge, whose claim is released
    pub previous_bond_owner: Address,
    /// Exit state after the challenge
    pub exit: InFlightExitView,
}

/// Result of a challenge.
pub type ChallengeResult = Result<ChallengeAccepted, ChallengeError>;
