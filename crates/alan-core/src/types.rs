//! Core protocol types: transactions, blocks, headers.
//!
//! All monetary values are in base units (1 ALN = 10^8 units) carried as
//! signed 64-bit integers per wire convention. Transactions use the legacy
//! time-carrying layout: `version || time || inputs || outputs || lock_time`.
//!
//! Hashing always goes through the explicit consensus byte layout so that
//! digests match every other node bit-for-bit; bincode/serde encodings of
//! these types are for storage and RPC only and never feed a hasher.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::encode::{write_bytes, write_compact_size};
use crate::error::HexError;
use crate::merkle;
use crate::script::Script;

/// Monetary value in base units.
pub type Amount = i64;

/// A 32-byte hash value.
///
/// Stored in digest output order (little-endian as a 256-bit number).
/// `Display` and [`from_hex`](Self::from_hex) use the reversed byte order
/// that explorers and RPC interfaces print, so hardcoded chain constants
/// read the same here as everywhere else.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes). Used for null previous-block and
    /// coinbase outpoint references.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create a Hash256 from digest-order bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The underlying digest-order bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Double SHA-256 of `data`.
    pub fn double_sha256(data: &[u8]) -> Self {
        let first = Sha256::digest(data);
        Self(Sha256::digest(first).into())
    }

    /// Parse a 64-character hex string in display (reversed) byte order.
    /// A leading `0x` is accepted.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(s)?;
        let mut bytes: [u8; 32] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| HexError::InvalidLength(v.len()))?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Hash256 {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Reference to a specific output of a previous transaction.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash,
    bincode::Encode, bincode::Decode,
)]
pub struct OutPoint {
    /// Transaction ID containing the referenced output.
    pub txid: Hash256,
    /// Index of the output within the transaction.
    pub vout: u32,
}

impl OutPoint {
    /// The null outpoint, used for coinbase transaction inputs.
    pub fn null() -> Self {
        Self {
            txid: Hash256::ZERO,
            vout: u32::MAX,
        }
    }

    /// Check if this is the null outpoint (coinbase marker).
    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.txid, self.vout)
    }
}

/// A transaction input, spending a previous output.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct TxInput {
    /// The outpoint being spent. Null outpoint for coinbase.
    pub previous_output: OutPoint,
    /// Unlocking script. For the genesis coinbase this carries the
    /// embedded timestamp text instead of a real signature.
    pub script_sig: Script,
    /// Sequence number.
    pub sequence: u32,
}

/// A transaction output, creating new value.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct TxOutput {
    /// Value in base units.
    pub value: Amount,
    /// Locking script.
    pub script_pubkey: Script,
}

/// A transaction in the legacy time-carrying layout.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct Transaction {
    /// Transaction format version.
    pub version: i32,
    /// Creation time, Unix seconds. Part of the consensus encoding.
    pub time: u32,
    /// Inputs consuming previous outputs.
    pub inputs: Vec<TxInput>,
    /// New outputs created by this transaction.
    pub outputs: Vec<TxOutput>,
    /// Block height or timestamp before which this tx is invalid.
    pub lock_time: u32,
}

impl Transaction {
    /// Serialize into the consensus byte layout.
    pub fn consensus_encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(&self.time.to_le_bytes());
        write_compact_size(buf, self.inputs.len() as u64);
        for input in &self.inputs {
            buf.extend_from_slice(input.previous_output.txid.as_bytes());
            buf.extend_from_slice(&input.previous_output.vout.to_le_bytes());
            write_bytes(buf, input.script_sig.as_bytes());
            buf.extend_from_slice(&input.sequence.to_le_bytes());
        }
        write_compact_size(buf, self.outputs.len() as u64);
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.to_le_bytes());
            write_bytes(buf, output.script_pubkey.as_bytes());
        }
        buf.extend_from_slice(&self.lock_time.to_le_bytes());
    }

    /// The consensus serialization as a fresh buffer.
    pub fn consensus_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.consensus_encode(&mut buf);
        buf
    }

    /// Compute the transaction ID (double SHA-256 of the consensus encoding).
    pub fn txid(&self) -> Hash256 {
        Hash256::double_sha256(&self.consensus_bytes())
    }

    /// Check if this is a coinbase transaction (single input with null outpoint).
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }
}

/// Block header containing the proof-of-work puzzle.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct BlockHeader {
    /// Block format version.
    pub version: i32,
    /// Hash of the previous block header. Zero for genesis.
    pub prev_hash: Hash256,
    /// Merkle root over the block's transaction IDs.
    pub merkle_root: Hash256,
    /// Block time, Unix seconds.
    pub time: u32,
    /// Compact difficulty target.
    pub bits: u32,
    /// Proof-of-work nonce.
    pub nonce: u32,
}

impl BlockHeader {
    /// Serialized header size: version, two hashes, time, bits, nonce.
    pub const SERIALIZED_SIZE: usize = 4 + 32 + 32 + 4 + 4 + 4;

    /// Serialize into the fixed 80-byte consensus layout.
    pub fn consensus_encode(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(self.prev_hash.as_bytes());
        buf.extend_from_slice(self.merkle_root.as_bytes());
        buf.extend_from_slice(&self.time.to_le_bytes());
        buf.extend_from_slice(&self.bits.to_le_bytes());
        buf.extend_from_slice(&self.nonce.to_le_bytes());
    }

    /// Compute the block header hash (double SHA-256 of the 80-byte layout).
    pub fn hash(&self) -> Hash256 {
        let mut buf = Vec::with_capacity(Self::SERIALIZED_SIZE);
        self.consensus_encode(&mut buf);
        Hash256::double_sha256(&buf)
    }
}

/// A complete block: header plus transactions.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq,
    bincode::Encode, bincode::Decode,
)]
pub struct Block {
    /// Block header with proof-of-work.
    pub header: BlockHeader,
    /// Ordered list of transactions. First transaction must be coinbase.
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Get the coinbase transaction, if the block is non-empty.
    pub fn coinbase(&self) -> Option<&Transaction> {
        self.transactions.first()
    }

    /// Merkle root over the transaction IDs via the general construction.
    ///
    /// `header.merkle_root` must always be recomputed from the transaction
    /// list with this function before hashing, never set independently.
    pub fn compute_merkle_root(&self) -> Hash256 {
        let txids: Vec<Hash256> = self.transactions.iter().map(Transaction::txid).collect();
        merkle::merkle_root(&txids)
    }
}
