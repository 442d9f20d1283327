//! # Competitor Ranking
//!
//! Competing spends of one input are ranked by their ledger position; the
//! oldest one is the canonical spend.

use crate::domain::Position;

/// True iff `a` sorts strictly before `b`.
pub fn is_older(a: &Position, b: &Position) -> bool {
    a.is_older_than(b)
}

/// Whether `candidate` outranks the recorded competitor.
///
/// An exit with no recorded competitor is beaten by any position.
pub fn beats_current(candidate: &Position, current: Option<&Position>) -> bool {
    match current {
        Some(current) => is_older(candidate, current),
        None => true,
    }
}
