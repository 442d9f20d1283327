//! # Integration Scenarios
//!
//! Challenge flows driven through [`crate::TestLang`] against real merkle
//! proofs and secp256k1 signatures.

pub mod concurrency;
pub mod non_canonical_challenge;
