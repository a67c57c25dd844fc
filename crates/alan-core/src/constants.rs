//! Protocol constants. All monetary values in base units (1 ALN = 10^8 units).

use crate::types::Amount;

/// One whole coin in base units.
pub const COIN: Amount = 100_000_000;

/// Sequence number marking a finalized transaction input.
pub const SEQUENCE_FINAL: u32 = 0xFFFF_FFFF;
