//! # PE-01 Canonicity Challenge
//!
//! Non-canonicity challenges against in-flight exits.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! An in-flight exit claims that its transaction is the canonical spend of
//! its inputs. Anyone holding an older, included transaction spending one of
//! the same inputs can prove otherwise. This crate validates that evidence
//! and records the outcome:
//! - the exit becomes non-canonical (and never canonical again)
//! - the oldest proven competitor is remembered, and only ever gets older
//! - the non-canonicity bond moves to the latest successful challenger
//!
//! ## Components
//!
//! | Component | Where | Kind |
//! |-----------|-------|------|
//! | ProofVerifier | `ports::ProofVerifier`, `adapters::MerkleProofVerifier` | stateless |
//! | PositionComparator | `domain::Position`, `algorithms::position` | stateless |
//! | PhaseGate | `ports::PhaseGate`, `adapters::PeriodPhaseGate` | stateless |
//! | InFlightExitRegistry | `application::registry` | stateful (injected store) |
//! | ChallengeProcessor | `application::processor` | orchestrator |
//!
//! ## Module Structure
//!
//! ```text
//! pe-01-canonicity-challenge/
//! ├── domain/          # InFlightExit, Position, ExitId, errors, invariants
//! ├── algorithms/      # Ranking, periods, inclusion/signature checks, transition
//! ├── ports/           # API trait (inbound) + collaborator traits (outbound)
//! ├── adapters/        # In-memory store, merkle verifier, period gate, clocks
//! ├── application/     # InFlightExitRegistry, ChallengeProcessor
//! ├── config.rs        # ChallengeConfig
//! └── metrics.rs       # Prometheus counters (feature = "metrics")
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

// Re-exports
pub use adapters::{InMemoryExitStore, ManualClock, MerkleProofVerifier, PeriodPhaseGate, SystemClock};
pub use algorithms::{
    beats_current, challenge_period_open, current_period, is_older, next_exit_state,
    verify_inclusion, verify_signature, FIRST_PERIOD,
};
pub use application::{ChallengeProcessor, InFlightExitRegistry};
pub use config::{ChallengeConfig, DEFAULT_PERIOD_LENGTH_SECS};
pub use domain::{
    CanonicityState, ChallengeAccepted, ChallengeError, ChallengeRequest, ChallengeResult,
    ErrorClass, ExitId, InFlightExit, InFlightExitView, Position,
};
pub use ports::{
    CanonicityChallengeApi, ChildChainLedger, Clock, ExitStore, MockLedger, MockPhaseGate,
    MockProofVerifier, PhaseGate, ProofVerifier,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
