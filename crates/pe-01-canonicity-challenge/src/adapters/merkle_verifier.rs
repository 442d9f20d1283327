//! Merkle/secp256k1 proof verifier adapter.

use shared_types::{Address, EcdsaSignature, Hash, Transaction};

use crate::algorithms::{verify_inclusion, verify_signature};
use crate::config::ChallengeConfig;
use crate::domain::Position;
use crate::ports::outbound::ProofVerifier;

/// `ProofVerifier` over the child chain's keccak trees and secp256k1
/// signatures.
#[derive(Clone, Copy, Debug)]
pub struct MerkleProofVerifier {
    depth: usize,
}

impl MerkleProofVerifier {
    /// Verifier for trees of `depth` levels.
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Verifier matching `config`.
    pub fn from_config(config: &ChallengeConfig) -> Self {
        Self::new(config.merkle_depth)
    }

    /// Tree depth this verifier expects.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl ProofVerifier for MerkleProofVerifier {
    fn verify_inclusion(
        &self,
        tx: &Transaction,
        position: &Position,
        proof: &[u8],
        block_root: &Hash,
    ) -> bool {
        verify_inclusion(tx, position, proof, block_root, self.depth)
    }

    fn verify_signature(
        &self,
        tx: &Transaction,
        input_index: u16,
        signature: &EcdsaSignature,
        expected_signer: &Address,
    ) -> bool {
        verify_signature(tx, input_index, signature, expected_signer)
    }
}
