//! # Inclusion and Authorization Checks
//!
//! Stateless verification of the evidence attached to a challenge. Both
//! checks fail closed: malformed input is a failed check, never an error.

use shared_crypto::{recover_address, verify_merkle_proof};
use shared_types::{Address, EcdsaSignature, Hash, Transaction};

use crate::domain::Position;

/// Verify that `tx` is the leaf at `position.tx_index` under `block_root`.
///
/// The proof must carry exactly `depth` siblings. An empty proof never
/// verifies, even for a single-leaf tree.
pub fn verify_inclusion(
    tx: &Transaction,
    position: &Position,
    proof: &[u8],
    block_root: &Hash,
    depth: usize,
) -> bool {
    if proof.is_empty() || proof.len() != depth.saturating_mul(32) {
        return false;
    }
    verify_merkle_proof(&tx.id(), u64::from(position.tx_index), proof, block_root)
}

/// Verify that `signature` over `tx` was made by `expected_signer`.
///
/// `input_index` must address an input of `tx`; recovery errors and
/// out-of-range indexes count as failures.
pub fn verify_signature(
    tx: &Transaction,
    input_index: u16,
    signature: &EcdsaSignature,
    expected_signer: &Address,
) -> bool {
    if tx.input(usize::from(input_index)).is_none() {
        return false;
    }
    match recover_address(&tx.signing_hash(), signature) {
        Ok(signer) => signer == *expected_signer,
        Err(_) => false,
    }
}
