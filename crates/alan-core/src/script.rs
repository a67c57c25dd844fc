//! Write-only script assembly.
//!
//! Scripts in this crate are opaque byte strings that get serialized into
//! transactions; nothing here executes or interprets them. [`Builder`]
//! appends the handful of push forms the protocol needs: minimal integer
//! pushes, raw data pushes, and single opcodes.
//!
//! Integer pushes follow the legacy serializer: `0` and `1..=16` become the
//! dedicated small-integer opcodes, everything else a minimally-encoded
//! little-endian number push. [`Builder::push_scriptnum`] bypasses the
//! small-integer shortcut and always emits a data push, which is how the
//! coinbase tag in the genesis input is encoded on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Push an empty byte vector (numeric zero).
pub const OP_0: u8 = 0x00;
/// The next byte holds the length of the data push.
pub const OP_PUSHDATA1: u8 = 0x4c;
/// The next two bytes (LE) hold the length of the data push.
pub const OP_PUSHDATA2: u8 = 0x4d;
/// Push the number -1.
pub const OP_1NEGATE: u8 = 0x4f;
/// Push the number 1. `OP_1 + n - 1` pushes `n` for `n` in 1..=16.
pub const OP_1: u8 = 0x51;
/// Push the number 16.
pub const OP_16: u8 = 0x60;
/// Verify a signature against the preceding public key.
pub const OP_CHECKSIG: u8 = 0xac;

/// A serialized script.
#[derive(
    Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Script(Vec<u8>);

impl Script {
    /// The empty script.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// The raw script bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Serialized length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Incremental script assembler.
#[derive(Clone, Debug, Default)]
pub struct Builder(Vec<u8>);

impl Builder {
    /// Start an empty script.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Push an integer using the shortest form: dedicated opcodes for
    /// `-1` and `0..=16`, a minimal number push otherwise.
    pub fn push_int(self, n: i64) -> Self {
        if n == 0 {
            self.push_opcode(OP_0)
        } else if n == -1 {
            self.push_opcode(OP_1NEGATE)
        } else if (1..=16).contains(&n) {
            self.push_opcode(OP_1 + (n as u8) - 1)
        } else {
            self.push_scriptnum(n)
        }
    }

    /// Push an integer as a data push of its minimal serialization,
    /// without the small-integer opcode shortcut.
    pub fn push_scriptnum(self, n: i64) -> Self {
        self.push_slice(&scriptnum_bytes(n))
    }

    /// Push a byte slice with the appropriate push opcode.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        match data.len() {
            0..=0x4b => self.0.push(data.len() as u8),
            0x4c..=0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(data.len() as u8);
            }
            _ => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(data.len() as u16).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Append a single opcode.
    pub fn push_opcode(mut self, opcode: u8) -> Self {
        self.0.push(opcode);
        self
    }

    /// Finish assembly.
    pub fn into_script(self) -> Script {
        Script(self.0)
    }
}

/// Minimal little-endian number serialization: magnitude bytes with the
/// sign carried in the top bit of the final byte.
fn scriptnum_bytes(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }
    let negative = n < 0;
    let mut magnitude = n.unsigned_abs();
    let mut out = Vec::new();
    while magnitude > 0 {
        out.push((magnitude & 0xff) as u8);
        magnitude >>= 8;
    }
    let last = *out.last().expect("nonzero magnitude has bytes");
    if last & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        *out.last_mut().expect("nonzero magnitude has bytes") |= 0x80;
    }
    out
}
