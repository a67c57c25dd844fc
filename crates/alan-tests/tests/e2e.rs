//! End-to-end tests for network parameter construction and selection.
//!
//! Each test walks the path a node takes at startup: build the parameter
//! sets from their literal constants, verify the genesis block they carry,
//! select a network, and read the active set.

use std::sync::atomic::AtomicBool;

use alan_core::constants::COIN;
use alan_core::genesis::{build_genesis_block, search_proof_of_work};
use alan_core::pow::{self, decode_compact};
use alan_core::script::{Builder, OP_CHECKSIG};
use alan_core::types::Hash256;
use alan_params::params::{main_spec, ChainParams, Network};
use alan_params::seeds::ONE_WEEK;
use alan_params::{ParamsError, Registry};
use chrono::Utc;

const EXPECTED_GENESIS_HASH: &str =
    "0000008611f28458e1820fff70b6235aa36f239ec7128bb6d0326e7f0fd7ef46";
const EXPECTED_MERKLE_ROOT: &str =
    "80fd5268da55d7e7da3abf5f9f366bc17e9cda0b8d0f0eb4fb1943a69d174928";

#[test]
fn mainnet_startup_end_to_end() {
    let params = ChainParams::main().expect("mainnet constants are consistent");

    // The documented genesis literals...
    let genesis = params.genesis_block();
    assert_eq!(genesis.header.time, 1_500_559_762);
    assert_eq!(genesis.header.nonce, 15_178_930);
    assert_eq!(genesis.header.bits, 0x1e00ffff);
    assert_eq!(genesis.header.version, 1);
    assert_eq!(genesis.transactions[0].outputs[0].value, COIN);

    // ...produce the documented digests.
    assert_eq!(
        params.genesis_hash(),
        Hash256::from_hex(EXPECTED_GENESIS_HASH).unwrap()
    );
    assert_eq!(
        genesis.header.merkle_root,
        Hash256::from_hex(EXPECTED_MERKLE_ROOT).unwrap()
    );

    // The stored hash is the block's own hash, and it clears the network's
    // difficulty floor.
    assert_eq!(params.genesis_hash(), genesis.header.hash());
    let target = decode_compact(genesis.header.bits).target;
    assert!(pow::hash_meets_target(&params.genesis_hash(), &target));
    assert!(target <= params.pow_limit);
}

#[test]
fn fixed_seeds_are_stamped_one_to_two_weeks_ago() {
    let params = ChainParams::main().unwrap();

    let before = Utc::now().timestamp();
    let seeds = params.fixed_seeds();
    let after = Utc::now().timestamp();

    assert!(!seeds.is_empty());
    for seed in &seeds {
        assert!(
            seed.time >= before - 2 * ONE_WEEK,
            "seed {seed:?} older than two weeks"
        );
        assert!(
            seed.time <= after - ONE_WEEK,
            "seed {seed:?} newer than one week"
        );
    }

    // Conversion happens per call: counts match, stamps are fresh draws.
    assert_eq!(params.fixed_seeds().len(), seeds.len());
}

#[test]
fn registry_selection_round_trip() {
    let mut registry = Registry::bootstrap().expect("all networks verify");
    assert_eq!(registry.active().network, Network::Main);

    registry.select(Network::Testnet).unwrap();
    assert_eq!(registry.active().network, Network::Testnet);
    assert_eq!(registry.active().rpc_port, 10087);

    registry.select(Network::Main).unwrap();
    assert_eq!(registry.active().network, Network::Main);
    assert_eq!(registry.active().rpc_port, 10086);
}

#[test]
fn registry_rejects_unimplemented_network() {
    let mut registry = Registry::bootstrap().unwrap();
    assert_eq!(
        registry.select(Network::Regtest).unwrap_err(),
        ParamsError::UnimplementedNetwork(Network::Regtest)
    );
}

#[test]
fn external_flag_is_the_only_configuration_input() {
    let mut registry = Registry::bootstrap().unwrap();

    registry.select_from_flag(true);
    assert_eq!(registry.active().network, Network::Testnet);

    registry.select_from_flag(false);
    assert_eq!(registry.active().network, Network::Main);
}

#[test]
fn testnet_is_mainnet_with_overrides() {
    let main = ChainParams::main().unwrap();
    let testnet = ChainParams::testnet().unwrap();

    // Overridden.
    assert_ne!(main.magic, testnet.magic);
    assert_ne!(main.rpc_port, testnet.rpc_port);
    assert_ne!(
        main.base58_prefixes.pubkey,
        testnet.base58_prefixes.pubkey
    );
    assert!(testnet.dns_seeds.is_empty());
    assert!(testnet.fixed_seeds().is_empty());

    // Shared.
    assert_eq!(main.genesis_hash(), testnet.genesis_hash());
    assert_eq!(main.pow_limit, testnet.pow_limit);
    assert_eq!(main.default_port, testnet.default_port);
    assert_eq!(main.last_pow_block, testnet.last_pow_block);
}

#[test]
fn tampered_constants_refuse_to_construct() {
    let mut spec = main_spec();
    spec.genesis.expected_hash =
        "00000000000000000000000000000000000000000000000000000000deadbeef";
    assert!(matches!(
        ChainParams::from_spec(spec),
        Err(ParamsError::GenesisHashMismatch { .. })
    ));
}

#[test]
fn discovering_a_genesis_for_fresh_constants() {
    // The developer-tool path: new chain text, easy difficulty, search
    // from zero, then feed the found nonce back through verification.
    let bits = 0x1f00ffff;
    let spec = main_spec().genesis;
    let reward_script = Builder::new()
        .push_slice(&hex::decode(spec.reward_pubkey).unwrap())
        .push_opcode(OP_CHECKSIG)
        .into_script();

    let mut candidate = build_genesis_block(
        "A fresh chain deserves a fresh headline",
        reward_script.clone(),
        1_700_000_000,
        0,
        bits,
        1,
        50 * COIN,
    );
    let target = decode_compact(bits).target;
    assert!(search_proof_of_work(
        &mut candidate,
        &target,
        &AtomicBool::new(false)
    ));

    // Rebuilding with the discovered nonce reproduces the block exactly.
    let rebuilt = build_genesis_block(
        "A fresh chain deserves a fresh headline",
        reward_script,
        candidate.header.time,
        candidate.header.nonce,
        bits,
        1,
        50 * COIN,
    );
    assert_eq!(rebuilt, candidate);
    assert!(pow::hash_meets_target(&rebuilt.header.hash(), &target));
}
