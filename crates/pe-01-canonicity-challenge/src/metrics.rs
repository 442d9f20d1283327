//! # Challenge Metrics
//!
//! Prometheus counters for the challenge engine.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! pe-01-canonicity-challenge = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `pe_challenges_accepted_total` - Counter of accepted non-canonicity challenges
//! - `pe_challenges_rejected_total` - Counter of rejected challenges (by reason)
//! - `pe_in_flight_exits_started_total` - Counter of in-flight exits started

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total accepted challenges
    pub static ref CHALLENGES_ACCEPTED: IntCounter = register_int_counter!(
        "pe_challenges_accepted_total",
        "Total number of accepted non-canonicity challenges"
    )
    .expect("Failed to create CHALLENGES_ACCEPTED metric");

    /// Total rejected challenges, labeled by reason
    pub static ref CHALLENGES_REJECTED: IntCounterVec = register_int_counter_vec!(
        "pe_challenges_rejected_total",
        "Total number of rejected non-canonicity challenges",
        &["reason"]
    )
    .expect("Failed to create CHALLENGES_REJECTED metric");

    /// Total in-flight exits started
    pub static ref EXITS_STARTED: IntCounter = register_int_counter!(
        "pe_in_flight_exits_started_total",
        "Total number of in-flight exits started"
    )
    .expect("Failed to create EXITS_STARTED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an accepted challenge
#[cfg(feature = "metrics")]
pub fn record_challenge_accepted() {
    CHALLENGES_ACCEPTED.inc();
}

/// Record a rejected challenge with reason
#[cfg(feature = "metrics")]
pub fn record_challenge_rejected(reason: &str) {
    CHALLENGES_REJECTED.with_label_values(&[reason]).inc();
}

/// Record an in-flight exit start
#[cfg(feature = "metrics")]
pub fn record_exit_started() {
    EXITS_STARTED.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// Record an accepted challenge (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_challenge_accepted() {}

/// Record a rejected challenge (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_challenge_rejected(_reason: &str) {}

/// Record an in-flight exit start (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_exit_started() {}
