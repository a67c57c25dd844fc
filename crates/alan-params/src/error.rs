//! Error types for network parameter construction and selection.
//!
//! Everything here is a startup-time, fail-fast condition: a mismatched
//! genesis means the binary disagrees with the rest of the network, and
//! nothing below is ever retried automatically.

use alan_core::error::HexError;
use alan_core::types::Hash256;
use thiserror::Error;

use crate::params::Network;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("unimplemented network: {0}")]
    UnimplementedNetwork(Network),

    #[error("{network} genesis hash mismatch: computed {computed}, expected {expected}")]
    GenesisHashMismatch {
        network: Network,
        computed: Hash256,
        expected: Hash256,
    },

    #[error("{network} genesis merkle root mismatch: computed {computed}, expected {expected}")]
    GenesisMerkleMismatch {
        network: Network,
        computed: Hash256,
        expected: Hash256,
    },

    #[error(
        "genesis bits {bits:#010x} do not decode to a usable target \
         (negative: {negative}, overflow: {overflow})"
    )]
    InvalidGenesisBits {
        bits: u32,
        negative: bool,
        overflow: bool,
    },

    #[error("invalid hardcoded constant: {0}")]
    BadConstant(#[from] HexError),

    #[error("network parameters already installed")]
    AlreadyInstalled,
}

impl From<hex::FromHexError> for ParamsError {
    fn from(err: hex::FromHexError) -> Self {
        Self::BadConstant(HexError::from(err))
    }
}
