//! # Shared Types Crate
//!
//! This crate contains the child-chain transaction model consumed by the
//! exit game subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: transaction identity (`Transaction::id`) is
//!   computed here and nowhere else.
//! - **Opaque Wire Format**: the encoded payload is owned by this crate;
//!   consumers only read decoded fields.
//! - **Signatures Outside Identity**: the content hash covers inputs, outputs
//!   and metadata, never the signatures, so a transaction keeps its identity
//!   once it is signed.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
