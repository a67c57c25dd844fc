//! # alan-core
//! Consensus primitives for the Alancoin protocol: block and transaction
//! types, consensus encoding, script assembly, Merkle roots, compact
//! difficulty targets, and genesis block construction.

pub mod constants;
pub mod encode;
pub mod error;
pub mod genesis;
pub mod merkle;
pub mod pow;
pub mod script;
pub mod types;
