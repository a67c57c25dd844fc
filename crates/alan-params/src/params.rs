//! Per-network consensus parameters.
//!
//! Every constant a node needs to agree with its network lives in one
//! [`ChainParams`] value: message magic, ports, difficulty limits, address
//! version bytes, seeds, and the genesis block. The literal constants sit
//! in a plain [`ChainSpec`] record; testnet is expressed as an explicit
//! field-override of the mainnet record rather than anything inherited, so
//! each network's effective constants are enumerable at a glance.
//!
//! [`ChainParams::from_spec`] is fallible on purpose: it rebuilds the
//! genesis block from the record's literals and refuses to produce a
//! parameter set whose computed genesis hash or merkle root disagrees with
//! the hardcoded expectations. Construction never searches for a genesis;
//! discovery is the `alan-genesis` tool's job.

use std::fmt;

use alan_core::constants::COIN;
use alan_core::genesis::build_genesis_block;
use alan_core::pow::{self, Uint256};
use alan_core::script::{Builder, Script, OP_CHECKSIG};
use alan_core::types::{Amount, Block, Hash256};
use tracing::debug;

use crate::error::ParamsError;
use crate::seeds::{convert_seed_table, DnsSeed, SeedAddress, SeedSpec, MAIN_SEED_TABLE};

/// Logical network identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Network {
    /// Production network.
    #[default]
    Main,
    /// Public test network.
    Testnet,
    /// Local regression-test network. Declared but not yet implemented.
    Regtest,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Main => "main",
            Self::Testnet => "testnet",
            Self::Regtest => "regtest",
        })
    }
}

/// Base58 address version bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Base58Prefixes {
    /// Pay-to-pubkey-hash addresses.
    pub pubkey: u8,
    /// Pay-to-script-hash addresses.
    pub script: u8,
    /// WIF private keys.
    pub secret: u8,
    /// Stealth addresses.
    pub stealth: u8,
    /// Extended public keys (4-byte version).
    pub ext_public: [u8; 4],
    /// Extended private keys (4-byte version).
    pub ext_secret: [u8; 4],
}

/// Genesis block literals plus the expected digests they must reproduce.
#[derive(Clone, Copy, Debug)]
pub struct GenesisSpec {
    /// Text embedded in the coinbase input script.
    pub timestamp_text: &'static str,
    /// Hex of the raw public key paid by the coinbase output.
    pub reward_pubkey: &'static str,
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: Amount,
    /// Expected block hash, display byte order.
    pub expected_hash: &'static str,
    /// Expected merkle root, display byte order.
    pub expected_merkle: &'static str,
}

/// The literal constants defining one network.
///
/// Plain data: building a [`ChainParams`] from it does the parsing,
/// genesis construction, and verification.
#[derive(Clone, Copy, Debug)]
pub struct ChainSpec {
    pub network: Network,
    /// Message start bytes; rarely-used upper ASCII, invalid as UTF-8.
    pub magic: [u8; 4],
    pub default_port: u16,
    pub rpc_port: u16,
    /// Data directory suffix; empty for mainnet.
    pub data_dir: &'static str,
    /// Hex of the alert-system public key; empty when alerts are unkeyed.
    pub alert_pubkey: &'static str,
    /// Easiest allowed proof-of-work target, big-endian hex.
    pub pow_limit: &'static str,
    /// Easiest allowed proof-of-stake target, big-endian hex.
    pub pos_limit: &'static str,
    pub base58_prefixes: Base58Prefixes,
    pub dns_seeds: &'static [DnsSeed],
    pub fixed_seeds: &'static [SeedSpec],
    pub genesis: GenesisSpec,
    /// Maximum transactions mixed per pool session.
    pub pool_max_transactions: u32,
    /// Collateral address used by the mixing pool.
    pub darksend_pool_dummy_address: &'static str,
    /// Height of the last proof-of-work block.
    pub last_pow_block: u32,
}

const MAIN_GENESIS: GenesisSpec = GenesisSpec {
    timestamp_text: "Alancoin",
    reward_pubkey: "2017add6b5f2ee8a8432c72508b439e34c0b5429a6cf92e75d1838cf7d66a862db322ffd2535f576fc40c4720d9256b98aa94fab575d486600e9fa4056358b3c76",
    time: 1_500_559_762,
    nonce: 15_178_930,
    bits: 0x1e00ffff,
    version: 1,
    reward: COIN,
    expected_hash: "0000008611f28458e1820fff70b6235aa36f239ec7128bb6d0326e7f0fd7ef46",
    expected_merkle: "80fd5268da55d7e7da3abf5f9f366bc17e9cda0b8d0f0eb4fb1943a69d174928",
};

/// Mainnet constants.
pub fn main_spec() -> ChainSpec {
    ChainSpec {
        network: Network::Main,
        magic: [0xb2, 0xc3, 0xd5, 0xec],
        default_port: 19683,
        rpc_port: 10086,
        data_dir: "",
        alert_pubkey: MAIN_GENESIS.reward_pubkey,
        pow_limit: "000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        pos_limit: "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        base58_prefixes: Base58Prefixes {
            pubkey: 23,
            script: 5,
            secret: 178,
            stealth: 40,
            ext_public: [0x04, 0x88, 0xB2, 0x1E],
            ext_secret: [0x04, 0x88, 0xAD, 0xE4],
        },
        dns_seeds: &[
            DnsSeed {
                name: "www.superskynet.org",
                host: "www.superskynet.org",
            },
            DnsSeed {
                name: "47.52.45.101",
                host: "47.52.45.101",
            },
        ],
        fixed_seeds: MAIN_SEED_TABLE,
        genesis: MAIN_GENESIS,
        pool_max_transactions: 3,
        darksend_pool_dummy_address: "MWfMjRGyVkV2A8JDN7JrxAhkScNDjVRArP",
        last_pow_block: 0x7fff_ffff,
    }
}

/// Testnet constants: an explicit override of the mainnet record.
///
/// Shares mainnet's genesis block, difficulty limits, and pool tunables;
/// everything that must differ is set here, and the seed lists are
/// cleared.
pub fn testnet_spec() -> ChainSpec {
    ChainSpec {
        network: Network::Testnet,
        magic: [0x2f, 0xca, 0x4e, 0x3e],
        rpc_port: 10087,
        data_dir: "testnet",
        alert_pubkey: "",
        base58_prefixes: Base58Prefixes {
            pubkey: 97,
            script: 196,
            secret: 239,
            stealth: 40,
            ext_public: [0x04, 0x35, 0x87, 0xCF],
            ext_secret: [0x04, 0x35, 0x83, 0x94],
        },
        dns_seeds: &[],
        fixed_seeds: &[],
        ..main_spec()
    }
}

/// An immutable bundle of consensus and networking constants for one
/// network, with its genesis block built and verified.
#[derive(Clone, Debug)]
pub struct ChainParams {
    pub network: Network,
    pub magic: [u8; 4],
    pub default_port: u16,
    pub rpc_port: u16,
    pub data_dir: &'static str,
    pub alert_pubkey: Vec<u8>,
    pub pow_limit: Uint256,
    pub pos_limit: Uint256,
    pub base58_prefixes: Base58Prefixes,
    pub dns_seeds: &'static [DnsSeed],
    fixed_seed_table: &'static [SeedSpec],
    genesis: Block,
    genesis_hash: Hash256,
    pub pool_max_transactions: u32,
    pub darksend_pool_dummy_address: &'static str,
    pub last_pow_block: u32,
}

impl ChainParams {
    /// Build and verify the mainnet parameter set.
    pub fn main() -> Result<Self, ParamsError> {
        Self::from_spec(main_spec())
    }

    /// Build and verify the testnet parameter set.
    pub fn testnet() -> Result<Self, ParamsError> {
        Self::from_spec(testnet_spec())
    }

    /// Build a parameter set from its literal constants.
    ///
    /// Rejects genesis bits that decode negative or overflowing (either
    /// would make a genesis search vacuous or unbounded), rebuilds the
    /// genesis block, and fails unless its hash and merkle root equal the
    /// spec's expected constants. A mismatch means the binary's consensus
    /// rules disagree with the network the constants describe.
    pub fn from_spec(spec: ChainSpec) -> Result<Self, ParamsError> {
        let decoded = pow::decode_compact(spec.genesis.bits);
        if decoded.negative || decoded.overflow {
            return Err(ParamsError::InvalidGenesisBits {
                bits: spec.genesis.bits,
                negative: decoded.negative,
                overflow: decoded.overflow,
            });
        }

        let reward_script = reward_script(spec.genesis.reward_pubkey)?;
        let genesis = genesis_from_spec(&spec.genesis, reward_script);
        let genesis_hash = genesis.header.hash();

        let expected_hash = Hash256::from_hex(spec.genesis.expected_hash)?;
        if genesis_hash != expected_hash {
            return Err(ParamsError::GenesisHashMismatch {
                network: spec.network,
                computed: genesis_hash,
                expected: expected_hash,
            });
        }

        let expected_merkle = Hash256::from_hex(spec.genesis.expected_merkle)?;
        if genesis.header.merkle_root != expected_merkle {
            return Err(ParamsError::GenesisMerkleMismatch {
                network: spec.network,
                computed: genesis.header.merkle_root,
                expected: expected_merkle,
            });
        }

        debug!(network = %spec.network, hash = %genesis_hash, "verified genesis block");

        Ok(Self {
            network: spec.network,
            magic: spec.magic,
            default_port: spec.default_port,
            rpc_port: spec.rpc_port,
            data_dir: spec.data_dir,
            alert_pubkey: hex::decode(spec.alert_pubkey)?,
            pow_limit: Uint256::from_be_hex(spec.pow_limit)?,
            pos_limit: Uint256::from_be_hex(spec.pos_limit)?,
            base58_prefixes: spec.base58_prefixes,
            dns_seeds: spec.dns_seeds,
            fixed_seed_table: spec.fixed_seeds,
            genesis,
            genesis_hash,
            pool_max_transactions: spec.pool_max_transactions,
            darksend_pool_dummy_address: spec.darksend_pool_dummy_address,
            last_pow_block: spec.last_pow_block,
        })
    }

    /// The verified genesis block.
    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    /// The genesis block hash.
    pub fn genesis_hash(&self) -> Hash256 {
        self.genesis_hash
    }

    /// Fixed seeds as address-book entries, stamped with a fresh random
    /// last-seen time of one to two weeks ago on every call.
    pub fn fixed_seeds(&self) -> Vec<SeedAddress> {
        convert_seed_table(self.fixed_seed_table)
    }
}

fn reward_script(pubkey_hex: &str) -> Result<Script, ParamsError> {
    let pubkey = hex::decode(pubkey_hex)?;
    Ok(Builder::new()
        .push_slice(&pubkey)
        .push_opcode(OP_CHECKSIG)
        .into_script())
}

fn genesis_from_spec(genesis: &GenesisSpec, reward_script: Script) -> Block {
    build_genesis_block(
        genesis.timestamp_text,
        reward_script,
        genesis.time,
        genesis.nonce,
        genesis.bits,
        genesis.version,
        genesis.reward,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- construction ---

    #[test]
    fn main_params_construct() {
        let params = ChainParams::main().unwrap();
        assert_eq!(params.network, Network::Main);
        assert_eq!(
            format!("{}", params.genesis_hash()),
            MAIN_GENESIS.expected_hash
        );
        assert_eq!(
            format!("{}", params.genesis_block().header.merkle_root),
            MAIN_GENESIS.expected_merkle
        );
    }

    #[test]
    fn testnet_params_construct() {
        let params = ChainParams::testnet().unwrap();
        assert_eq!(params.network, Network::Testnet);
        // Testnet shares mainnet's genesis.
        assert_eq!(params.genesis_hash(), ChainParams::main().unwrap().genesis_hash());
    }

    #[test]
    fn genesis_hash_matches_block() {
        let params = ChainParams::main().unwrap();
        assert_eq!(params.genesis_hash(), params.genesis_block().header.hash());
    }

    // --- identity constants ---

    #[test]
    fn magic_bytes_differ_between_networks() {
        let main = ChainParams::main().unwrap();
        let testnet = ChainParams::testnet().unwrap();
        assert_eq!(main.magic, [0xb2, 0xc3, 0xd5, 0xec]);
        assert_eq!(testnet.magic, [0x2f, 0xca, 0x4e, 0x3e]);
        assert_ne!(main.magic, testnet.magic);
    }

    #[test]
    fn ports() {
        let main = ChainParams::main().unwrap();
        let testnet = ChainParams::testnet().unwrap();
        assert_eq!(main.default_port, 19683);
        assert_eq!(main.rpc_port, 10086);
        assert_eq!(testnet.default_port, 19683);
        assert_eq!(testnet.rpc_port, 10087);
    }

    #[test]
    fn difficulty_limits() {
        let params = ChainParams::main().unwrap();
        assert_eq!(
            format!("{}", params.pow_limit),
            "000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );
        assert_eq!(
            format!("{}", params.pos_limit),
            "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );
        assert!(params.pow_limit < params.pos_limit);
    }

    #[test]
    fn genesis_target_is_within_pow_limit() {
        let params = ChainParams::main().unwrap();
        let target = pow::decode_compact(MAIN_GENESIS.bits).target;
        assert!(target <= params.pow_limit);
    }

    #[test]
    fn base58_prefix_tables() {
        let main = ChainParams::main().unwrap().base58_prefixes;
        assert_eq!(main.pubkey, 23);
        assert_eq!(main.script, 5);
        assert_eq!(main.secret, 178);
        assert_eq!(main.stealth, 40);
        assert_eq!(main.ext_public, [0x04, 0x88, 0xB2, 0x1E]);
        assert_eq!(main.ext_secret, [0x04, 0x88, 0xAD, 0xE4]);

        let testnet = ChainParams::testnet().unwrap().base58_prefixes;
        assert_eq!(testnet.pubkey, 97);
        assert_eq!(testnet.script, 196);
        assert_eq!(testnet.secret, 239);
        assert_eq!(testnet.stealth, 40);
        assert_eq!(testnet.ext_public, [0x04, 0x35, 0x87, 0xCF]);
        assert_eq!(testnet.ext_secret, [0x04, 0x35, 0x83, 0x94]);
    }

    #[test]
    fn testnet_clears_seeds_and_alert_key() {
        let testnet = ChainParams::testnet().unwrap();
        assert!(testnet.dns_seeds.is_empty());
        assert!(testnet.fixed_seeds().is_empty());
        assert!(testnet.alert_pubkey.is_empty());
        assert_eq!(testnet.data_dir, "testnet");
    }

    #[test]
    fn main_has_seeds_and_alert_key() {
        let main = ChainParams::main().unwrap();
        assert_eq!(main.dns_seeds.len(), 2);
        assert!(!main.fixed_seeds().is_empty());
        assert_eq!(main.alert_pubkey.len(), 65);
    }

    #[test]
    fn pool_tunables() {
        let main = ChainParams::main().unwrap();
        assert_eq!(main.pool_max_transactions, 3);
        assert_eq!(
            main.darksend_pool_dummy_address,
            "MWfMjRGyVkV2A8JDN7JrxAhkScNDjVRArP"
        );
        assert_eq!(main.last_pow_block, 0x7fff_ffff);
    }

    // --- failure paths ---

    #[test]
    fn corrupted_expected_hash_fails_construction() {
        let mut spec = main_spec();
        spec.genesis.expected_hash =
            "0000000000000000000000000000000000000000000000000000000000000001";
        match ChainParams::from_spec(spec) {
            Err(ParamsError::GenesisHashMismatch {
                network, computed, ..
            }) => {
                assert_eq!(network, Network::Main);
                assert_eq!(
                    format!("{computed}"),
                    MAIN_GENESIS.expected_hash
                );
            }
            other => panic!("expected hash mismatch, got {other:?}"),
        }
    }

    #[test]
    fn corrupted_expected_merkle_fails_construction() {
        let mut spec = main_spec();
        spec.genesis.expected_merkle =
            "0000000000000000000000000000000000000000000000000000000000000002";
        assert!(matches!(
            ChainParams::from_spec(spec),
            Err(ParamsError::GenesisMerkleMismatch { .. })
        ));
    }

    #[test]
    fn altered_genesis_literal_fails_construction() {
        // Changing any genesis input shifts the computed hash away from
        // the expected constant.
        let mut spec = main_spec();
        spec.genesis.nonce += 1;
        assert!(matches!(
            ChainParams::from_spec(spec),
            Err(ParamsError::GenesisHashMismatch { .. })
        ));
    }

    #[test]
    fn negative_genesis_bits_rejected() {
        let mut spec = main_spec();
        spec.genesis.bits = 0x1e80ffff; // sign bit set
        assert_eq!(
            ChainParams::from_spec(spec).unwrap_err(),
            ParamsError::InvalidGenesisBits {
                bits: 0x1e80ffff,
                negative: true,
                overflow: false,
            }
        );
    }

    #[test]
    fn overflowing_genesis_bits_rejected() {
        let mut spec = main_spec();
        spec.genesis.bits = 0xff00ffff;
        assert!(matches!(
            ChainParams::from_spec(spec),
            Err(ParamsError::InvalidGenesisBits { overflow: true, .. })
        ));
    }
}
