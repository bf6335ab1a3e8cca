//! Tool configuration (`story-dev.config.json`).
//!
//! Loaded explicitly once at process start; nothing in this crate reads
//! configuration as a side effect. Every field is optional:
//!
//! ```json
//! {
//!   "default_network": "testnet",
//!   "contracts": {
//!     "testnet": { "SPGNFTImpl": "0x..." }
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::contracts::{resolve_contracts, ContractSet};
use crate::error::{Result, ScaffoldError};
use crate::network::Network;

/// Per-network contract address overrides, keyed by protocol contract name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractOverrides {
    pub mainnet: HashMap<String, String>,
    pub testnet: HashMap<String, String>,
}

impl ContractOverrides {
    pub fn for_network(&self, network: Network) -> &HashMap<String, String> {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Network used when none is given on the command line.
    pub default_network: Option<Network>,
    pub contracts: ContractOverrides,
}

impl ToolConfig {
    /// Load and validate a config file.
    ///
    /// Overrides for both networks are checked here so a bad file fails before any
    /// prompt is shown.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ScaffoldError::ConfigNotFound {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ToolConfig =
            serde_json::from_str(&contents).map_err(|e| ScaffoldError::ConfigParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        for network in Network::ALL {
            config.contracts_for(network)?;
        }
        tracing::debug!("loaded tool config from {}", path.display());
        Ok(config)
    }

    /// Contract set for `network` with this config's overrides applied.
    pub fn contracts_for(&self, network: Network) -> Result<ContractSet> {
        resolve_contracts(network).with_overrides(self.contracts.for_network(network))
    }
}
