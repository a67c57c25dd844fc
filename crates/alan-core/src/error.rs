//! Error types for the Alancoin consensus primitives.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("compact target {bits:#010x} is negative")] Negative { bits: u32 },
    #[error("compact target {bits:#010x} overflows 256 bits")] Overflow { bits: u32 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("invalid hex: {0}")] Hex(#[from] hex::FromHexError),
    #[error("expected 32 bytes, got {0}")] InvalidLength(usize),
}
