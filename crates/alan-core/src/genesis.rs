//! Genesis block construction and proof-of-work search.
//!
//! [`build_genesis_block`] assembles the one-coinbase block every network
//! hardcodes: the input script embeds the block time, a legacy tag, and a
//! timestamp text; the output pays the genesis reward to a fixed script.
//! Identical inputs always yield a byte-identical block.
//!
//! [`search_proof_of_work`] is the nonce grinder used to *discover* a new
//! genesis. It is deliberately kept out of normal startup: parameter-set
//! construction only ever verifies a precomputed hash, and the search is
//! reachable from the `alan-genesis` tool. The loop runs until a hash
//! satisfies the target or the caller's cancellation flag is raised; on
//! nonce wraparound the header time advances by one second and the search
//! continues over the fresh payload.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::constants::SEQUENCE_FINAL;
use crate::pow::{self, Uint256};
use crate::script::{Builder, Script};
use crate::types::{Amount, Block, BlockHeader, Hash256, OutPoint, Transaction, TxInput, TxOutput};

/// Build the deterministic genesis block for a network.
///
/// The coinbase input script is `push(time) push(4) push(timestamp_text)`,
/// with the `4` encoded as a data push. The Merkle root is recomputed from
/// the transaction list through the general construction.
pub fn build_genesis_block(
    timestamp_text: &str,
    reward_script: Script,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: Amount,
) -> Block {
    let script_sig = Builder::new()
        .push_int(i64::from(time))
        .push_scriptnum(4)
        .push_slice(timestamp_text.as_bytes())
        .into_script();

    let coinbase = Transaction {
        version: 1,
        time,
        inputs: vec![TxInput {
            previous_output: OutPoint::null(),
            script_sig,
            sequence: SEQUENCE_FINAL,
        }],
        outputs: vec![TxOutput {
            value: reward,
            script_pubkey: reward_script,
        }],
        lock_time: 0,
    };

    let mut block = Block {
        header: BlockHeader {
            version,
            prev_hash: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            time,
            bits,
            nonce,
        },
        transactions: vec![coinbase],
    };
    block.header.merkle_root = block.compute_merkle_root();
    block
}

/// Grind nonces until the block hash satisfies `target`.
///
/// Returns `true` when a satisfying nonce is in place, immediately so if
/// the caller-supplied nonce already qualifies. The nonce only ever grows
/// until it wraps; each wrap bumps `header.time` by exactly one second
/// (the coinbase keeps its embedded time). The search is unbounded and
/// returns `false` only when `cancel` is raised.
pub fn search_proof_of_work(block: &mut Block, target: &Uint256, cancel: &AtomicBool) -> bool {
    loop {
        if cancel.load(Ordering::Relaxed) {
            return false;
        }
        let hash = block.header.hash();
        if pow::hash_meets_target(&hash, target) {
            return true;
        }
        if block.header.nonce & 0xFFF == 0 {
            debug!(nonce = block.header.nonce, %hash, %target, "searching");
        }
        block.header.nonce = block.header.nonce.wrapping_add(1);
        if block.header.nonce == 0 {
            block.header.time += 1;
            info!(time = block.header.time, "nonce wrapped, advancing block time");
        }
    }
}
