//! # Challenge Engine Configuration

use serde::{Deserialize, Serialize};
use shared_crypto::DEFAULT_DEPTH;
use std::env;

/// Half of the one-week minimum exit period, in seconds.
pub const DEFAULT_PERIOD_LENGTH_SECS: u64 = 302_400;

/// Challenge engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    /// Length of one exit period in seconds. Non-canonicity challenges are
    /// admitted during the first period only.
    pub period_length_secs: u64,

    /// Depth of the child chain's block merkle trees; inclusion proofs must
    /// carry exactly this many siblings.
    pub merkle_depth: usize,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            period_length_secs: DEFAULT_PERIOD_LENGTH_SECS,
            merkle_depth: DEFAULT_DEPTH,
        }
    }
}

impl ChallengeConfig {
    /// Create a config for testing (short periods).
    pub fn for_testing() -> Self {
        Self {
            period_length_secs: 100,
            merkle_depth: DEFAULT_DEPTH,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PE_PERIOD_LENGTH_SECS`: period length (default: 302400)
    /// - `PE_MERKLE_DEPTH`: block tree depth (default: 16)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            period_length_secs: env::var("PE_PERIOD_LENGTH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.period_length_secs),
            merkle_depth: env::var("PE_MERKLE_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.merkle_depth),
        }
    }
}
