//! # Merkle Tree
//!
//! Fixed-depth binary keccak tree over transaction ids, as committed by the
//! child chain for every block.
//!
//! ## Layout
//!
//! - Leaves are transaction ids, placed at their transaction index.
//! - Missing leaves are [`EMPTY_LEAF`]; missing subtrees use the matching
//!   entry of [`zero_hashes`].
//! - Node = keccak256(left || right).
//! - A proof is the concatenation of `depth` 32-byte siblings, leaf level
//!   first. The bit `i` of the leaf index says whether the running hash is
//!   the right (1) or left (0) child at level `i`.

use crate::hashing::hash_pair;
use crate::CryptoError;
use shared_types::Hash;

/// Depth used by the child chain (65 536 transactions per block).
pub const DEFAULT_DEPTH: usize = 16;

/// Largest depth accepted when building a tree.
pub const MAX_DEPTH: usize = 32;

/// Value of an unused leaf slot.
pub const EMPTY_LEAF: Hash = [0u8; 32];

/// Roots of empty subtrees: `zero_hashes(d)[i]` is the root of an empty
/// subtree of height `i`, for `i` in `0..=d`.
pub fn zero_hashes(depth: usize) -> Vec<Hash> {
    let mut zeros = Vec::with_capacity(depth + 1);
    zeros.push(EMPTY_LEAF);
    for level in 0..depth {
        let below = zeros[level];
        zeros.push(hash_pair(&below, &below));
    }
    zeros
}

/// A fully materialized merkle tree.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    depth: usize,
    /// `levels[0]` holds the leaves, `levels[depth]` the root (if non-empty).
    levels: Vec<Vec<Hash>>,
    zeros: Vec<Hash>,
}

impl MerkleTree {
    /// Build a tree of `depth` levels over `leaves`.
    pub fn new(leaves: Vec<Hash>, depth: usize) -> Result<Self, CryptoError> {
        if depth == 0 || depth > MAX_DEPTH {
            return Err(CryptoError::InvalidDepth(depth));
        }
        let capacity = 1usize << depth;
        if leaves.len() > capacity {
            return Err(CryptoError::TooManyLeaves {
                got: leaves.len(),
                capacity,
            });
        }

        let zeros = zero_hashes(depth);
        let mut levels = Vec::with_capacity(depth + 1);
        levels.push(leaves);

        for level in 0..depth {
            let next: Vec<Hash> = levels[level]
                .chunks(2)
                .map(|pair| {
                    let right = pair.get(1).unwrap_or(&zeros[level]);
                    hash_pair(&pair[0], right)
                })
                .collect();
            levels.push(next);
        }

        Ok(Self {
            depth,
            levels,
            zeros,
        })
    }

    /// Tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of populated leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Merkle root.
    pub fn root(&self) -> Hash {
        self.levels[self.depth]
            .first()
            .copied()
            .unwrap_or(self.zeros[self.depth])
    }

    /// Inclusion proof for the leaf at `index`, as concatenated siblings.
    pub fn proof(&self, index: usize) -> Result<Vec<u8>, CryptoError> {
        if index >= self.leaf_count() {
            return Err(CryptoError::LeafOutOfRange(index));
        }

        let mut proof = Vec::with_capacity(self.depth * 32);
        let mut position = index;
        for level in 0..self.depth {
            let sibling = self.levels[level]
                .get(position ^ 1)
                .copied()
                .unwrap_or(self.zeros[level]);
            proof.extend_from_slice(&sibling);
            position >>= 1;
        }
        Ok(proof)
    }
}

/// Verify that `leaf` sits at `index` under `root`.
///
/// The proof depth is implied by its length. Empty proofs, proofs whose
/// length is not a multiple of 32, and indexes that do not fit in the implied
/// depth are rejected without hashing.
pub fn verify_merkle_proof(leaf: &Hash, index: u64, proof: &[u8], root: &Hash) -> bool {
    if proof.is_empty() || proof.len() % 32 != 0 {
        return false;
    }
    let depth = proof.len() / 32;
    if depth > 64 || (depth < 64 && index >> depth != 0) {
        return false;
    }

    let mut current = *leaf;
    let mut position = index;
    for chunk in proof.chunks_exact(32) {
        let mut sibling = [0u8; 32];
        sibling.copy_from_slice(chunk);
        current = if position & 1 == 0 {
            hash_pair(&current, &sibling)
        } else {
            hash_pair(&sibling, &current)
        };
        position >>= 1;
    }

    current == *root
}
