//! Genesis discovery tool.
//!
//! Builds a candidate genesis block from command-line literals (defaulting
//! to the mainnet values) and grinds nonces until the block hash satisfies
//! the compact target. This is the only binary path to the search loop:
//! node startup verifies precomputed genesis constants and never searches.
//!
//! When the supplied nonce already satisfies the target the tool reports
//! it without searching, so re-running against known-good constants is a
//! cheap consistency check. Ctrl-C cancels an in-flight search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

use alan_core::genesis::{build_genesis_block, search_proof_of_work};
use alan_core::pow::{decode_compact, hash_meets_target};
use alan_core::script::{Builder, OP_CHECKSIG};
use alan_core::types::Block;
use alan_params::params::main_spec;

/// CLI arguments. Omitted values fall back to the mainnet genesis literals.
#[derive(Debug, Parser)]
#[command(name = "alan-genesis")]
#[command(about = "Alancoin genesis block discovery tool", long_about = None)]
struct Args {
    /// Timestamp text embedded in the coinbase input script.
    #[arg(long)]
    timestamp_text: Option<String>,

    /// Hex of the raw public key paid by the coinbase output.
    #[arg(long)]
    reward_pubkey: Option<String>,

    /// Block time, Unix seconds.
    #[arg(long)]
    time: Option<u32>,

    /// Starting nonce.
    #[arg(long, default_value = "0")]
    nonce: u32,

    /// Compact difficulty target, hex (e.g. 1e00ffff).
    #[arg(long)]
    bits: Option<String>,

    /// Block version.
    #[arg(long)]
    block_version: Option<i32>,

    /// Coinbase reward in base units.
    #[arg(long)]
    reward: Option<i64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Machine-readable result printed on success.
#[derive(Debug, Serialize)]
struct GenesisSummary {
    time: u32,
    nonce: u32,
    bits: String,
    hash: String,
    merkle_root: String,
}

fn summary(block: &Block) -> GenesisSummary {
    GenesisSummary {
        time: block.header.time,
        nonce: block.header.nonce,
        bits: format!("{:#010x}", block.header.bits),
        hash: block.header.hash().to_string(),
        merkle_root: block.header.merkle_root.to_string(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("alan-genesis v{}", env!("CARGO_PKG_VERSION"));

    let defaults = main_spec().genesis;
    let timestamp_text = args
        .timestamp_text
        .unwrap_or_else(|| defaults.timestamp_text.to_string());
    let reward_pubkey = args
        .reward_pubkey
        .unwrap_or_else(|| defaults.reward_pubkey.to_string());
    let time = args.time.unwrap_or(defaults.time);
    let version = args.block_version.unwrap_or(defaults.version);
    let reward = args.reward.unwrap_or(defaults.reward);
    let bits = match &args.bits {
        Some(s) => u32::from_str_radix(s.trim_start_matches("0x"), 16)
            .context("invalid --bits hex")?,
        None => defaults.bits,
    };

    let decoded = decode_compact(bits);
    if decoded.negative || decoded.overflow {
        bail!(
            "bits {bits:#010x} decode to an unusable target (negative: {}, overflow: {})",
            decoded.negative,
            decoded.overflow
        );
    }
    let target = decoded.target;

    let pubkey = hex::decode(&reward_pubkey).context("invalid --reward-pubkey hex")?;
    let reward_script = Builder::new()
        .push_slice(&pubkey)
        .push_opcode(OP_CHECKSIG)
        .into_script();

    let mut block = build_genesis_block(
        &timestamp_text,
        reward_script,
        time,
        args.nonce,
        bits,
        version,
        reward,
    );
    info!(%target, time, nonce = args.nonce, "candidate genesis built");

    if hash_meets_target(&block.header.hash(), &target) {
        info!("supplied nonce already satisfies the target, nothing to search");
        println!("{}", serde_json::to_string_pretty(&summary(&block))?);
        return Ok(());
    }

    let cancel = Arc::new(AtomicBool::new(false));

    // Set up signal handler for graceful cancellation.
    let cancel_signal = Arc::clone(&cancel);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        warn!("received SIGINT, cancelling search...");
        cancel_signal.store(true, Ordering::Relaxed);
    });

    info!("searching for genesis block...");
    let cancel_search = Arc::clone(&cancel);
    let (found, block) = tokio::task::spawn_blocking(move || {
        let found = search_proof_of_work(&mut block, &target, &cancel_search);
        (found, block)
    })
    .await
    .context("search task panicked")?;

    if !found {
        warn!(
            nonce = block.header.nonce,
            time = block.header.time,
            "search cancelled before a satisfying nonce was found"
        );
        return Ok(());
    }

    info!(
        nonce = block.header.nonce,
        time = block.header.time,
        hash = %block.header.hash(),
        "found genesis block"
    );
    println!("{}", serde_json::to_string_pretty(&summary(&block))?);
    Ok(())
}
