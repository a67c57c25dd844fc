//! Cross-crate integration tests for Alancoin.
//!
//! The tests in `tests/` exercise the parameter sets, registry, and
//! genesis machinery together, the way a node startup sequence would.
