//! # Keccak-256 Hashing
//!
//! Ethereum-compatible hashing used for transaction ids, merkle nodes and
//! address derivation.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Hash data with keccak-256 (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash two nodes together: keccak256(left || right).
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}
