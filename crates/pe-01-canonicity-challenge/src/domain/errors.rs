//! # Domain Errors
//!
//! Rejection reasons for in-flight exit challenges and registry operations.
//!
//! Every rejection leaves the exit record untouched. Callers that need to
//! branch on the kind of failure use [`ChallengeError::class`]; metrics and
//! logs use the stable [`ChallengeError::reason`] label.

use shared_types::{short_hex, Hash};
use thiserror::Error;

use super::value_objects::{ExitId, Position};

/// Coarse grouping of rejection reasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The request is malformed or unrelated to the exit.
    Input,
    /// A proof or signature did not verify.
    Verification,
    /// The request arrived outside the allowed phase.
    Temporal,
    /// The exit registry refused the operation.
    Registry,
}

/// Challenge and registry errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChallengeError {
    /// No in-flight exit is registered under this id.
    #[error("Unknown in-flight exit: {0}")]
    UnknownExit(ExitId),

    /// The exit is past its first period.
    #[error("Challenge period closed (exit is in period {period})")]
    ChallengePeriodClosed {
        /// Period the exit is currently in
        period: u64,
    },

    /// The competing transaction is the exiting transaction.
    #[error("Competing transaction is the exiting transaction")]
    SelfChallenge,

    /// This competitor was already accepted for this exit.
    #[error("Competitor already used: 0x{}", short_hex(.0))]
    CompetitorAlreadyUsed(Hash),

    /// The competing transaction does not spend an input of the exit.
    #[error("Transactions are unrelated: {reason}")]
    UnrelatedTransaction {
        /// Which relation check failed
        reason: &'static str,
    },

    /// The competitor is not included at the claimed position.
    #[error("Invalid inclusion proof")]
    InvalidInclusionProof,

    /// The competitor's input is not signed by the owner of the spent output.
    #[error("Invalid signature on competing input")]
    InvalidSignature,

    /// An older (or equally old) competitor is already recorded.
    #[error("Competitor at {candidate} is not older than current competitor at {current}")]
    NotOlderThanCurrentCompetitor {
        /// Position offered by the challenger
        candidate: Position,
        /// Position already recorded on the exit
        current: Position,
    },

    /// An in-flight exit for this transaction already exists.
    #[error("In-flight exit already started: {0}")]
    ExitAlreadyStarted(ExitId),

    /// The stored exit changed between read and write, or the proposed
    /// transition breaks the exit state machine.
    #[error("Stale exit state: {0}")]
    StaleExitState(String),

    /// A position cannot be packed into the integer UTXO form.
    #[error("Position out of range: {0}")]
    PositionOutOfRange(Position),
}

impl ChallengeError {
    /// Coarse class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::SelfChallenge
            | Self::CompetitorAlreadyUsed(_)
            | Self::UnrelatedTransaction { .. }
            | Self::NotOlderThanCurrentCompetitor { .. }
            | Self::PositionOutOfRange(_) => ErrorClass::Input,
            Self::InvalidInclusionProof | Self::InvalidSignature => ErrorClass::Verification,
            Self::ChallengePeriodClosed { .. } => ErrorClass::Temporal,
            Self::UnknownExit(_) | Self::ExitAlreadyStarted(_) | Self::StaleExitState(_) => {
                ErrorClass::Registry
            }
        }
    }

    /// Stable label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::UnknownExit(_) => "unknown_exit",
            Self::ChallengePeriodClosed { .. } => "period_closed",
            Self::SelfChallenge => "self_challenge",
            Self::CompetitorAlreadyUsed(_) => "competitor_used",
            Self::UnrelatedTransaction { .. } => "unrelated",
            Self::InvalidInclusionProof => "invalid_inclusion_proof",
            Self::InvalidSignature => "invalid_signature",
            Self::NotOlderThanCurrentCompetitor { .. } => "not_older",
            Self::ExitAlreadyStarted(_) => "exit_already_started",
            Self::StaleExitState(_) => "stale_state",
            Self::PositionOutOfRange(_) => "position_out_of_range",
        }
    }
}
