//! # Adapters
//!
//! Concrete implementations of the outbound ports.

pub mod clock;
pub mod memory_store;
pub mod merkle_verifier;
pub mod period_gate;

pub use clock::{ManualClock, SystemClock};
pub use memory_store::InMemoryExitStore;
pub use merkle_verifier::MerkleProofVerifier;
pub use period_gate::PeriodPhaseGate;
