//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Signature has high S value (EIP-2 malleability protection)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// Invalid recovery ID (v must be 0, 1, 27, or 28)
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Failed to recover public key from signature
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing failed
    #[error("Signing failed")]
    SigningFailed,

    /// Merkle depth outside the supported range
    #[error("Invalid merkle depth: {0}")]
    InvalidDepth(usize),

    /// More leaves than the tree can hold
    #[error("Too many leaves: {got} > {capacity}")]
    TooManyLeaves {
        /// Leaves supplied
        got: usize,
        /// Tree capacity
        capacity: usize,
    },

    /// Leaf index outside the tree
    #[error("Leaf index out of range: {0}")]
    LeafOutOfRange(usize),
}
