//! Active-network selection.
//!
//! A [`Registry`] is a plain value holding the verified parameter sets and
//! an active-network tag. Components that need chain constants should be
//! handed a registry (or the [`ChainParams`] it selects) at construction
//! time.
//!
//! For binaries that want the classic process-wide lookup, a bootstrapped
//! and selected registry can be [`install`]ed exactly once, early in
//! startup; [`params`] then serves the active set for the rest of the
//! process lifetime. There is no way to reselect after installation, so
//! concurrent readers never observe a change.

use std::sync::OnceLock;

use tracing::info;

use crate::error::ParamsError;
use crate::params::{ChainParams, Network};

/// The constructed parameter sets and the active selection.
#[derive(Clone, Debug)]
pub struct Registry {
    main: ChainParams,
    testnet: ChainParams,
    active: Network,
}

impl Registry {
    /// Build and verify every implemented network's parameter set.
    ///
    /// The active network starts as [`Network::Main`].
    pub fn bootstrap() -> Result<Self, ParamsError> {
        Ok(Self {
            main: ChainParams::main()?,
            testnet: ChainParams::testnet()?,
            active: Network::Main,
        })
    }

    /// Switch the active network.
    ///
    /// Fails with [`ParamsError::UnimplementedNetwork`] when no parameter
    /// set exists for `network`.
    pub fn select(&mut self, network: Network) -> Result<(), ParamsError> {
        match network {
            Network::Main | Network::Testnet => {
                self.active = network;
                Ok(())
            }
            Network::Regtest => Err(ParamsError::UnimplementedNetwork(network)),
        }
    }

    /// Map the external `-testnet` style flag onto a selection. This is
    /// the only place external configuration reaches network choice.
    pub fn select_from_flag(&mut self, testnet: bool) {
        self.active = if testnet {
            Network::Testnet
        } else {
            Network::Main
        };
    }

    /// The active network's identity.
    pub fn network(&self) -> Network {
        self.active
    }

    /// The active parameter set.
    pub fn active(&self) -> &ChainParams {
        match self.active {
            Network::Main => &self.main,
            Network::Testnet => &self.testnet,
            // select() refuses unimplemented networks.
            Network::Regtest => unreachable!("unimplemented network selected"),
        }
    }
}

static INSTALLED: OnceLock<Registry> = OnceLock::new();

/// Install a registry as the process-wide instance. One-shot: a second
/// call fails and leaves the first installation in place.
pub fn install(registry: Registry) -> Result<(), ParamsError> {
    let network = registry.network();
    INSTALLED
        .set(registry)
        .map_err(|_| ParamsError::AlreadyInstalled)?;
    info!(%network, "network parameters installed");
    Ok(())
}

/// The process-wide active parameter set, if a registry was installed.
pub fn try_params() -> Option<&'static ChainParams> {
    INSTALLED.get().map(Registry::active)
}

/// The process-wide active parameter set.
///
/// Panics when called before [`install`]; network selection must complete
/// before any consensus-dependent component starts reading.
pub fn params() -> &'static ChainParams {
    try_params().expect("network parameters not installed")
}
