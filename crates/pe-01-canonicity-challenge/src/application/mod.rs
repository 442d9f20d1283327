//! # Application Module
//!
//! The exit registry and the challenge processor orchestrating the domain
//! and outbound ports.

pub mod processor;
pub mod registry;

pub use processor::ChallengeProcessor;
pub use registry::InFlightExitRegistry;
