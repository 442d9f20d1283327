//! # Core Domain Entities
//!
//! Defines the child-chain transaction model: inputs reference outputs of
//! earlier transactions, outputs assign value to owners, and signatures
//! authorize each input.
//!
//! ## Identity
//!
//! A transaction is identified by the keccak-256 hash of its unsigned
//! encoding (inputs, outputs, metadata). Signatures commit to that same
//! digest, see [`Transaction::signing_hash`].

use bincode::Options;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::errors::CodecError;

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Address denoting "nobody" / the native token.
pub const NULL_ADDRESS: Address = [0u8; 20];

/// Maximum number of inputs per transaction.
pub const MAX_INPUTS: usize = 4;

/// Maximum number of outputs per transaction.
pub const MAX_OUTPUTS: usize = 4;

/// Upper bound on an encoded transaction, signatures included.
pub const MAX_ENCODED_LEN: u64 = 4096;

/// ECDSA signature on the secp256k1 curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EcdsaSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

// =============================================================================
// TRANSACTION
// =============================================================================

/// Reference to an output created by an earlier transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TxInput {
    /// Content hash of the transaction that created the output.
    pub tx_id: Hash,
    /// Index of the output inside that transaction.
    pub output_index: u16,
}

impl TxInput {
    /// Create a reference to `output_index` of transaction `tx_id`.
    pub fn new(tx_id: Hash, output_index: u16) -> Self {
        Self {
            tx_id,
            output_index,
        }
    }
}

/// Value assigned to an owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Address allowed to spend this output.
    pub owner: Address,
    /// Token contract; [`NULL_ADDRESS`] for the native asset.
    pub token: Address,
    /// Amount in base units.
    pub amount: u64,
}

impl TxOutput {
    /// Create an output.
    pub fn new(owner: Address, token: Address, amount: u64) -> Self {
        Self {
            owner,
            token,
            amount,
        }
    }
}

/// A child-chain transaction.
///
/// Immutable by convention: every constructor returns a complete value and
/// identity is derived from content, so a mutated copy is simply a different
/// transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Outputs being spent, in order.
    pub inputs: Vec<TxInput>,
    /// Outputs being created, in order.
    pub outputs: Vec<TxOutput>,
    /// Free-form metadata; distinguishes otherwise identical transactions.
    pub metadata: Hash,
    /// One signature per input, aligned by index.
    pub signatures: Vec<EcdsaSignature>,
}

impl Transaction {
    /// Create an unsigned transaction.
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>, metadata: Hash) -> Self {
        Self {
            inputs,
            outputs,
            metadata,
            signatures: Vec::new(),
        }
    }

    /// Create a deposit: no inputs, a single output.
    ///
    /// `nonce` keeps repeated deposits of the same amount distinct.
    pub fn deposit(owner: Address, token: Address, amount: u64, nonce: u64) -> Self {
        let mut metadata = [0u8; 32];
        metadata[24..].copy_from_slice(&nonce.to_be_bytes());
        Self::new(vec![], vec![TxOutput::new(owner, token, amount)], metadata)
    }

    /// Return a copy carrying the given signatures.
    pub fn with_signatures(mut self, signatures: Vec<EcdsaSignature>) -> Self {
        self.signatures = signatures;
        self
    }

    /// Content hash of the unsigned transaction.
    pub fn id(&self) -> Hash {
        let mut hasher = Keccak256::new();
        hasher.update(self.unsigned_bytes());
        hasher.finalize().into()
    }

    /// Digest that input owners sign.
    ///
    /// Signatures commit to the unsigned payload, so this is the content hash.
    pub fn signing_hash(&self) -> Hash {
        self.id()
    }

    /// Input at `index`, if any.
    pub fn input(&self, index: usize) -> Option<&TxInput> {
        self.inputs.get(index)
    }

    /// Output at `index`, if any.
    pub fn output(&self, index: usize) -> Option<&TxOutput> {
        self.outputs.get(index)
    }

    /// Signature for input `index`, if any.
    pub fn signature(&self, index: usize) -> Option<&EcdsaSignature> {
        self.signatures.get(index)
    }

    /// Whether this transaction spends `input`.
    pub fn spends(&self, input: &TxInput) -> bool {
        self.inputs.contains(input)
    }

    /// Check protocol limits on inputs and outputs.
    pub fn validate_shape(&self) -> Result<(), CodecError> {
        if self.inputs.len() > MAX_INPUTS {
            return Err(CodecError::TooManyInputs {
                got: self.inputs.len(),
                max: MAX_INPUTS,
            });
        }
        if self.outputs.len() > MAX_OUTPUTS {
            return Err(CodecError::TooManyOutputs {
                got: self.outputs.len(),
                max: MAX_OUTPUTS,
            });
        }
        for (index, input) in self.inputs.iter().enumerate() {
            if self.inputs[..index].contains(input) {
                return Err(CodecError::DuplicateInput { index });
            }
        }
        Ok(())
    }

    /// Encode the full (signed) transaction into its wire format.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        self.validate_shape()?;
        codec()
            .serialize(self)
            .map_err(|e| CodecError::Malformed(e.to_string()))
    }

    /// Decode a transaction from its wire format.
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() as u64 > MAX_ENCODED_LEN {
            return Err(CodecError::TooLarge {
                size: bytes.len(),
                limit: MAX_ENCODED_LEN,
            });
        }
        let tx: Transaction = codec()
            .deserialize(bytes)
            .map_err(|e| CodecError::Malformed(e.to_string()))?;
        tx.validate_shape()?;
        Ok(tx)
    }

    /// Canonical unsigned encoding used for the content hash.
    ///
    /// Fixed-width big-endian fields with u32 length prefixes; independent
    /// of the serde wire format so identity never changes with the codec.
    fn unsigned_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            8 + self.inputs.len() * 34 + self.outputs.len() * 48 + 32,
        );
        out.extend_from_slice(&(self.inputs.len() as u32).to_be_bytes());
        for input in &self.inputs {
            out.extend_from_slice(&input.tx_id);
            out.extend_from_slice(&input.output_index.to_be_bytes());
        }
        out.extend_from_slice(&(self.outputs.len() as u32).to_be_bytes());
        for output in &self.outputs {
            out.extend_from_slice(&output.owner);
            out.extend_from_slice(&output.token);
            out.extend_from_slice(&output.amount.to_be_bytes());
        }
        out.extend_from_slice(&self.metadata);
        out
    }
}

/// Bincode configuration for the wire format.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_ENCODED_LEN)
        .reject_trailing_bytes()
}

/// Lower-case hex rendering of a hash, for logs.
pub fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..8])
}
