//! Period-based phase gate adapter.

use crate::algorithms::{challenge_period_open, current_period};
use crate::config::ChallengeConfig;
use crate::domain::InFlightExit;
use crate::ports::outbound::PhaseGate;

/// `PhaseGate` that opens challenges for the first period after exit start.
#[derive(Clone, Copy, Debug)]
pub struct PeriodPhaseGate {
    period_length_secs: u64,
}

impl PeriodPhaseGate {
    /// Gate with periods of `period_length_secs`.
    pub fn new(period_length_secs: u64) -> Self {
        Self { period_length_secs }
    }

    /// Gate matching `config`.
    pub fn from_config(config: &ChallengeConfig) -> Self {
        Self::new(config.period_length_secs)
    }
}

impl PhaseGate for PeriodPhaseGate {
    fn current_period(&self, exit: &InFlightExit, now: u64) -> u64 {
        current_period(exit.started_at, now, self.period_length_secs)
    }

    fn challenge_period_open(&self, exit: &InFlightExit, now: u64) -> bool {
        challenge_period_open(exit.started_at, now, self.period_length_secs)
    }
}
