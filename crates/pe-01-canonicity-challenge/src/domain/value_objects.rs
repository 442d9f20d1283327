//! # Value Objects
//!
//! Immutable value types: competitor positions, exit identifiers and the
//! canonicity state.

use serde::{Deserialize, Serialize};
use shared_types::{short_hex, Hash, Transaction};
use std::cmp::Ordering;
use std::fmt;

use super::errors::ChallengeError;

/// Multiplier of the block number in a packed UTXO position.
pub const BLOCK_OFFSET: u64 = 1_000_000_000;

/// Multiplier of the transaction index in a packed UTXO position.
pub const TX_OFFSET: u64 = 10_000;

/// Ledger address of a transaction's input: where it sits in block order.
///
/// Ordered by block index, then transaction index, then input index.
/// Smaller means older.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Child-chain block number.
    pub block_index: u64,
    /// Index of the transaction inside the block.
    pub tx_index: u32,
    /// Index of the input inside the transaction.
    pub input_index: u16,
}

impl Position {
    /// Create a position.
    pub fn new(block_index: u64, tx_index: u32, input_index: u16) -> Self {
        Self {
            block_index,
            tx_index,
            input_index,
        }
    }

    /// Whether `self` sorts strictly before `other`.
    pub fn is_older_than(&self, other: &Position) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// Pack into the child chain's integer form:
    /// `block * 1_000_000_000 + tx * 10_000 + input`.
    pub fn to_utxo_pos(&self) -> Result<u64, ChallengeError> {
        let tx_index = u64::from(self.tx_index);
        let input_index = u64::from(self.input_index);
        if tx_index >= BLOCK_OFFSET / TX_OFFSET || input_index >= TX_OFFSET {
            return Err(ChallengeError::PositionOutOfRange(*self));
        }
        self.block_index
            .checked_mul(BLOCK_OFFSET)
            .and_then(|blk| blk.checked_add(tx_index * TX_OFFSET + input_index))
            .ok_or(ChallengeError::PositionOutOfRange(*self))
    }

    /// Unpack the child chain's integer form.
    pub fn from_utxo_pos(utxo_pos: u64) -> Self {
        Self {
            block_index: utxo_pos / BLOCK_OFFSET,
            tx_index: ((utxo_pos % BLOCK_OFFSET) / TX_OFFSET) as u32,
            input_index: (utxo_pos % TX_OFFSET) as u16,
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.block_index
            .cmp(&other.block_index)
            .then_with(|| self.tx_index.cmp(&other.tx_index))
            .then_with(|| self.input_index.cmp(&other.input_index))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.block_index, self.tx_index, self.input_index
        )
    }
}

/// Identifier of an in-flight exit, derived from the exiting transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExitId(pub Hash);

impl ExitId {
    /// Exit id for an exit of `tx`.
    pub fn from_tx(tx: &Transaction) -> Self {
        Self(tx.id())
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }
}

impl fmt::Display for ExitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", short_hex(&self.0))
    }
}

/// Canonicity of an exit. `NonCanonical` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicityState {
    /// No challenge accepted yet.
    Canonical,
    /// At least one older competitor was proven.
    NonCanonical,
}

impl CanonicityState {
    /// Whether the state machine may move from `self` to `next`.
    pub fn can_transition_to(&self, next: CanonicityState) -> bool {
        !matches!(
            (self, next),
            (CanonicityState::NonCanonical, CanonicityState::Canonical)
        )
    }
}
