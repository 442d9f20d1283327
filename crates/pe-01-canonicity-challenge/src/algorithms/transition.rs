//! # Exit Transition
//!
//! The accepted-challenge update as a single function from the current exit
//! to its successor. Either every field moves together or the rejection is
//! returned and the input is left as it was.

use shared_types::{Address, Hash};

use crate::domain::{
    invariant_competitor_unused, invariant_strictly_older, ChallengeError, InFlightExit,
    Position,
};

/// Successor of `exit` after accepting `competitor_id` at `position`.
///
/// Re-checks the replay and ranking rules so the function is safe to call on
/// its own. Verification of proofs and signatures is the caller's job.
pub fn next_exit_state(
    exit: &InFlightExit,
    competitor_id: Hash,
    position: Position,
    challenger: Address,
) -> Result<InFlightExit, ChallengeError> {
    invariant_competitor_unused(exit, &competitor_id)?;
    invariant_strictly_older(&position, exit.oldest_competitor.as_ref())?;

    let mut used_competitors = exit.used_competitors.clone();
    used_competitors.insert(competitor_id);

    Ok(InFlightExit {
        exiting_tx: exit.exiting_tx.clone(),
        initiator: exit.initiator,
        started_at: exit.started_at,
        is_canonical: false,
        oldest_competitor: Some(position),
        bond_owner: challenger,
        used_competitors,
    })
}
