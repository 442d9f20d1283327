//! # Algorithms Module
//!
//! Pure functions behind the challenge state machine: competitor ranking,
//! period arithmetic, proof/signature checks and the exit transition.

pub mod inclusion;
pub mod phase;
pub mod position;
pub mod transition;

pub use inclusion::{verify_inclusion, verify_signature};
pub use phase::{challenge_period_open, current_period, FIRST_PERIOD};
pub use position::{beats_current, is_older};
pub use transition::next_exit_state;
