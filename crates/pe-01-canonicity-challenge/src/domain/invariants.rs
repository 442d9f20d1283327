//! # Domain Invariants
//!
//! Rules every accepted challenge must satisfy. Each check returns the
//! rejection it stands for, so the processor can chain them with `?`.

use shared_types::{Hash, Transaction, TxInput, TxOutput};

use super::entities::InFlightExit;
use super::errors::ChallengeError;
use super::value_objects::Position;

/// Invariant: a transaction cannot compete with itself.
pub fn invariant_not_self_challenge(
    exit: &InFlightExit,
    competitor_id: &Hash,
) -> Result<(), ChallengeError> {
    if exit.exiting_tx.id() == *competitor_id {
        return Err(ChallengeError::SelfChallenge);
    }
    Ok(())
}

/// Invariant: each competitor is accepted at most once per exit.
pub fn invariant_competitor_unused(
    exit: &InFlightExit,
    competitor_id: &Hash,
) -> Result<(), ChallengeError> {
    if exit.has_used(competitor_id) {
        return Err(ChallengeError::CompetitorAlreadyUsed(*competitor_id));
    }
    Ok(())
}

/// Invariant: both transactions spend the same output of `input_tx`.
///
/// Returns the shared output so the caller can check its owner's signature.
pub fn invariant_shares_input<'a>(
    exiting_tx: &Transaction,
    competing_tx: &Transaction,
    competing_input_index: u16,
    input_tx: &'a Transaction,
    input_output_index: u16,
) -> Result<&'a TxOutput, ChallengeError> {
    let shared = TxInput::new(input_tx.id(), input_output_index);

    let competing_input = competing_tx
        .input(usize::from(competing_input_index))
        .ok_or(ChallengeError::UnrelatedTransaction {
            reason: "competing input index out of range",
        })?;
    if *competing_input != shared {
        return Err(ChallengeError::UnrelatedTransaction {
            reason: "competing input does not spend the given output",
        });
    }
    if !exiting_tx.spends(&shared) {
        return Err(ChallengeError::UnrelatedTransaction {
            reason: "exiting transaction does not spend the given output",
        });
    }

    input_tx
        .output(usize::from(input_output_index))
        .ok_or(ChallengeError::UnrelatedTransaction {
            reason: "input transaction has no such output",
        })
}

/// Invariant: the claimed position names the competing input being proven.
pub fn invariant_position_matches_input(
    position: &Position,
    competing_input_index: u16,
) -> Result<(), ChallengeError> {
    if position.input_index != competing_input_index {
        return Err(ChallengeError::UnrelatedTransaction {
            reason: "position does not point at the competing input",
        });
    }
    Ok(())
}

/// Invariant: a new competitor must be strictly older than the recorded one.
///
/// No recorded competitor is beaten by any position.
pub fn invariant_strictly_older(
    candidate: &Position,
    current: Option<&Position>,
) -> Result<(), ChallengeError> {
    match current {
        Some(current) if !candidate.is_older_than(current) => {
            Err(ChallengeError::NotOlderThanCurrentCompetitor {
                candidate: *candidate,
                current: *current,
            })
        }
        _ => Ok(()),
    }
}

/// Invariant: a committed exit may only move along the monotone lattice.
///
/// Canonicity never returns, the competitor only gets older, the used set
/// only grows, and the exiting transaction and start time never change.
pub fn invariant_monotone_transition(
    prev: &InFlightExit,
    next: &InFlightExit,
) -> Result<(), ChallengeError> {
    if prev.exiting_tx != next.exiting_tx
        || prev.started_at != next.started_at
        || prev.initiator != next.initiator
    {
        return Err(ChallengeError::StaleExitState(
            "exit identity changed".to_string(),
        ));
    }
    if !prev.canonicity().can_transition_to(next.canonicity()) {
        return Err(ChallengeError::StaleExitState(
            "exit returned to canonical".to_string(),
        ));
    }
    match (&prev.oldest_competitor, &next.oldest_competitor) {
        (Some(_), None) => {
            return Err(ChallengeError::StaleExitState(
                "competitor position cleared".to_string(),
            ));
        }
        (Some(p), Some(n)) if !n.is_older_than(p) && n != p => {
            return Err(ChallengeError::StaleExitState(format!(
                "competitor position moved younger: {} -> {}",
                p, n
            )));
        }
        _ => {}
    }
    if !prev.used_competitors.is_subset(&next.used_competitors) {
        return Err(ChallengeError::StaleExitState(
            "used competitors shrank".to_string(),
        ));
    }
    Ok(())
}
