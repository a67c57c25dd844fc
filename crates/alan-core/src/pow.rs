//! Compact proof-of-work targets.
//!
//! Difficulty rides in block headers as a 32-bit "compact" encoding: the
//! high byte is a base-256 exponent, the low 23 bits are the mantissa, and
//! bit `0x00800000` is a sign bit. The encoded value is
//! `mantissa * 256^(exponent - 3)`.
//!
//! [`decode_compact`] reports `negative` and `overflow` out of band and
//! stays bit-compatible with the reference decoder, including its quirks:
//! for exponents of three or less the mantissa is shifted down *before*
//! the flags are computed, and an overflowing value truncates instead of
//! saturating. Consensus-facing callers reject both conditions through
//! [`decode_compact_checked`]: a negative target makes the search loop
//! vacuous and an overflowing one makes it unbounded.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HexError, TargetError};
use crate::types::Hash256;

/// A 256-bit unsigned integer stored big-endian. Comparison is numeric.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
    bincode::Encode, bincode::Decode,
)]
pub struct Uint256([u8; 32]);

impl Uint256 {
    /// Zero.
    pub const ZERO: Self = Self([0u8; 32]);
    /// The largest representable value.
    pub const MAX: Self = Self([0xFF; 32]);

    /// Construct from big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Construct from little-endian bytes (e.g. a hash digest).
    pub fn from_le_bytes(mut bytes: [u8; 32]) -> Self {
        bytes.reverse();
        Self(bytes)
    }

    /// Widen a u64.
    pub fn from_u64(value: u64) -> Self {
        let mut out = [0u8; 32];
        out[24..].copy_from_slice(&value.to_be_bytes());
        Self(out)
    }

    /// Parse a 64-character big-endian hex string. A leading `0x` is accepted.
    pub fn from_be_hex(s: &str) -> Result<Self, HexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(s)?;
        let bytes: [u8; 32] = decoded
            .try_into()
            .map_err(|v: Vec<u8>| HexError::InvalidLength(v.len()))?;
        Ok(Self(bytes))
    }

    /// The big-endian byte representation.
    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Check for zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Result of decoding a compact target: the 256-bit value plus the
/// conditions that make it unusable for consensus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactDecoded {
    /// The decoded target, truncated to 256 bits on overflow.
    pub target: Uint256,
    /// The sign bit was set on a nonzero mantissa.
    pub negative: bool,
    /// The mantissa would shift beyond 256 bits.
    pub overflow: bool,
}

/// Decode a compact difficulty encoding. Pure; never fails.
pub fn decode_compact(bits: u32) -> CompactDecoded {
    let exponent = bits >> 24;
    let mut word = bits & 0x007f_ffff;

    let target = if exponent <= 3 {
        word >>= 8 * (3 - exponent);
        Uint256::from_u64(u64::from(word))
    } else {
        shifted_mantissa(word, exponent)
    };

    // Flags look at the (possibly down-shifted) word, not the raw mantissa.
    let negative = word != 0 && (bits & 0x0080_0000) != 0;
    let overflow = word != 0
        && (exponent > 34
            || (word > 0xff && exponent > 33)
            || (word > 0xffff && exponent > 32));

    CompactDecoded {
        target,
        negative,
        overflow,
    }
}

/// Decode a compact target, rejecting encodings unusable for consensus.
pub fn decode_compact_checked(bits: u32) -> Result<Uint256, TargetError> {
    let decoded = decode_compact(bits);
    if decoded.negative {
        return Err(TargetError::Negative { bits });
    }
    if decoded.overflow {
        return Err(TargetError::Overflow { bits });
    }
    Ok(decoded.target)
}

/// Place the three mantissa bytes at their base-256 positions, dropping
/// bytes that shift past either end of the 256-bit range.
fn shifted_mantissa(word: u32, exponent: u32) -> Uint256 {
    let mut out = [0u8; 32];
    let bytes = [(word >> 16) as u8, (word >> 8) as u8, word as u8];
    for (i, &byte) in bytes.iter().enumerate() {
        // Byte i (most significant first) has weight 256^(exponent - 1 - i).
        let weight = i64::from(exponent) - 1 - i as i64;
        if (0..32).contains(&weight) {
            out[31 - weight as usize] = byte;
        }
    }
    Uint256(out)
}

/// Check whether a block hash satisfies a target, comparing the hash as an
/// unsigned 256-bit little-endian integer.
pub fn hash_meets_target(hash: &Hash256, target: &Uint256) -> bool {
    Uint256::from_le_bytes(*hash.as_bytes()) <= *target
}
