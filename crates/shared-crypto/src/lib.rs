//! # Shared Crypto - Exit Game Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | keccak-256 | Transaction ids, merkle nodes, addresses |
//! | `ecdsa` | secp256k1 | Input authorization, signer recovery |
//! | `merkle` | keccak binary tree | Block roots, inclusion proofs |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic signing, low-S normalization (EIP-2),
//!   recovery rejects high-S signatures
//! - **Merkle proofs**: fixed depth, empty proofs never verify

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod merkle;

// Re-exports
pub use ecdsa::{address_from_pubkey, recover_address, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{hash_pair, keccak256};
pub use merkle::{verify_merkle_proof, zero_hashes, MerkleTree, DEFAULT_DEPTH, EMPTY_LEAF};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
