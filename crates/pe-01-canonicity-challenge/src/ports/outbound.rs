//! # Outbound Ports
//!
//! Traits for collaborators: exit persistence, the child-chain ledger, the
//! protocol clock, and the stateless verifier and phase gate.

use shared_types::{Address, EcdsaSignature, Hash, Transaction, TxInput};
use std::collections::HashMap;

use crate::domain::{ExitId, InFlightExit, Position};

/// Exit persistence - outbound port.
pub trait ExitStore: Send + Sync {
    /// Load an exit.
    fn get_exit(&self, exit_id: &ExitId) -> Option<InFlightExit>;

    /// Store an exit unconditionally.
    fn put_exit(&self, exit_id: ExitId, exit: InFlightExit);

    /// Store `next` only if the stored value still equals `expected`
    /// (`None` meaning "absent"). Returns whether the write happened.
    fn compare_and_swap(
        &self,
        exit_id: ExitId,
        expected: Option<&InFlightExit>,
        next: InFlightExit,
    ) -> bool;

    /// Number of stored exits.
    fn len(&self) -> usize;

    /// Whether no exit is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Child-chain ledger - outbound port.
pub trait ChildChainLedger: Send + Sync {
    /// Committed merkle root of block `block_index`, if the block exists.
    fn block_root(&self, block_index: u64) -> Option<Hash>;

    /// Transaction that created the output `input` refers to.
    fn resolve_transaction(&self, input: &TxInput) -> Option<Transaction>;
}

/// Protocol clock - outbound port.
pub trait Clock: Send + Sync {
    /// Current protocol time in seconds.
    fn now(&self) -> u64;
}

/// Stateless evidence verifier - outbound port.
pub trait ProofVerifier: Send + Sync {
    /// Whether `tx` is included at `position` under `block_root`.
    fn verify_inclusion(
        &self,
        tx: &Transaction,
        position: &Position,
        proof: &[u8],
        block_root: &Hash,
    ) -> bool;

    /// Whether `signature` over `tx` for input `input_index` is by
    /// `expected_signer`.
    fn verify_signature(
        &self,
        tx: &Transaction,
        input_index: u16,
        signature: &EcdsaSignature,
        expected_signer: &Address,
    ) -> bool;
}

/// Challenge window - outbound port.
pub trait PhaseGate: Send + Sync {
    /// Period `exit` is in at time `now`.
    fn current_period(&self, exit: &InFlightExit, now: u64) -> u64;

    /// Whether non-canonicity challenges are admitted at time `now`.
    fn challenge_period_open(&self, exit: &InFlightExit, now: u64) -> bool;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock verifier returning fixed answers.
#[derive(Clone, Debug)]
pub struct MockProofVerifier {
    /// Answer for inclusion checks.
    pub inclusion_ok: bool,
    /// Answer for signature checks.
    pub signature_ok: bool,
}

impl Default for MockProofVerifier {
    fn default() -> Self {
        Self {
            inclusion_ok: true,
            signature_ok: true,
        }
    }
}

impl ProofVerifier for MockProofVerifier {
    fn verify_inclusion(&self, _: &Transaction, _: &Position, _: &[u8], _: &Hash) -> bool {
        self.inclusion_ok
    }

    fn verify_signature(&self, _: &Transaction, _: u16, _: &EcdsaSignature, _: &Address) -> bool {
        self.signature_ok
    }
}

/// Mock gate that is either always open or always closed.
#[derive(Clone, Debug)]
pub struct MockPhaseGate {
    /// Whether challenges are admitted.
    pub open: bool,
}

impl Default for MockPhaseGate {
    fn default() -> Self {
        Self { open: true }
    }
}

impl PhaseGate for MockPhaseGate {
    fn current_period(&self, _: &InFlightExit, _: u64) -> u64 {
        if self.open {
            1
        } else {
            2
        }
    }

    fn challenge_period_open(&self, _: &InFlightExit, _: u64) -> bool {
        self.open
    }
}

/// Mock ledger backed by fixed maps.
#[derive(Clone, Debug, Default)]
pub struct MockLedger {
    /// Roots by block index.
    pub roots: HashMap<u64, Hash>,
    /// Transactions by id.
    pub transactions: HashMap<Hash, Transaction>,
}

impl MockLedger {
    /// Register a transaction so it can be resolved.
    pub fn with_transaction(mut self, tx: Transaction) -> Self {
        self.transactions.insert(tx.id(), tx);
        self
    }

    /// Register a block root.
    pub fn with_root(mut self, block_index: u64, root: Hash) -> Self {
        self.roots.insert(block_index, root);
        self
    }
}

impl ChildChainLedger for MockLedger {
    fn block_root(&self, block_index: u64) -> Option<Hash> {
        self.roots.get(&block_index).copied()
    }

    fn resolve_transaction(&self, input: &TxInput) -> Option<Transaction> {
        self.transactions.get(&input.tx_id).cloned()
    }
}
