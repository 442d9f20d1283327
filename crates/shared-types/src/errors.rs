//! # Error Types
//!
//! Defines errors raised while encoding, decoding or shape-checking
//! child-chain transactions.

use thiserror::Error;

/// Errors that can occur when handling the transaction wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Payload could not be decoded.
    #[error("Malformed transaction payload: {0}")]
    Malformed(String),

    /// Payload exceeds the maximum encoded size.
    #[error("Transaction payload too large: {size} bytes, limit {limit}")]
    TooLarge { size: usize, limit: u64 },

    /// Transaction declares more inputs than the protocol allows.
    #[error("Too many inputs: {got} > {max}")]
    TooManyInputs { got: usize, max: usize },

    /// Transaction declares more outputs than the protocol allows.
    #[error("Too many outputs: {got} > {max}")]
    TooManyOutputs { got: usize, max: usize },

    /// Transaction spends the same output twice.
    #[error("Duplicate input at index {index}")]
    DuplicateInput { index: usize },
}
