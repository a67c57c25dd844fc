//! # alan-params
//! Per-network consensus parameters for Alancoin.
//!
//! Each supported network carries an immutable bundle of constants (magic
//! bytes, ports, address version bytes, difficulty limits, seeds, and the
//! genesis block), built once and verified against hardcoded genesis
//! constants before use. The [`registry`] module tracks which network a
//! process runs on.

pub mod error;
pub mod params;
pub mod registry;
pub mod seeds;

pub use error::ParamsError;
pub use params::{ChainParams, Network};
pub use registry::Registry;
