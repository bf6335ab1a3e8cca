//! Static Story Protocol network registry.
//!
//! Profiles are process-wide constants. They are looked up by [`Network`] and are
//! never built from user input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScaffoldError;

/// Target network for a generated project.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    /// All networks, testnet first (the recommended default).
    pub const ALL: [Network; 2] = [Network::Testnet, Network::Mainnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(ScaffoldError::UnknownNetwork(other.to_string())),
        }
    }
}

/// Native gas currency of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Chain metadata for one Story network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub id: Network,
    pub chain_id: u64,
    pub name: &'static str,
    pub rpc_url: &'static str,
    pub block_explorer_url: &'static str,
    pub faucet_url: Option<&'static str>,
    pub native_currency: NativeCurrency,
}

const IP: NativeCurrency = NativeCurrency {
    name: "IP",
    symbol: "IP",
    decimals: 18,
};

/// Story mainnet (chain id 1514).
pub static STORY_MAINNET: NetworkProfile = NetworkProfile {
    id: Network::Mainnet,
    chain_id: 1514,
    name: "Story Mainnet",
    rpc_url: "https://rpc.story.foundation",
    block_explorer_url: "https://www.storyscan.io",
    faucet_url: None,
    native_currency: IP,
};

/// Story Aeneid testnet (chain id 1315).
pub static STORY_TESTNET: NetworkProfile = NetworkProfile {
    id: Network::Testnet,
    chain_id: 1315,
    name: "Story Aeneid Testnet",
    rpc_url: "https://testnet.storyscan.io/api/eth-rpc",
    block_explorer_url: "https://testnet.storyscan.io",
    faucet_url: Some("https://faucet.story.foundation"),
    native_currency: IP,
};

/// Look up the profile for a network. Total over [`Network`].
pub fn resolve_network(network: Network) -> &'static NetworkProfile {
    match network {
        Network::Mainnet => &STORY_MAINNET,
        Network::Testnet => &STORY_TESTNET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_ids() {
        assert_eq!(resolve_network(Network::Mainnet).chain_id, 1514);
        assert_eq!(resolve_network(Network::Testnet).chain_id, 1315);
    }

    #[test]
    fn test_profile_id_matches_lookup_key() {
        for network in Network::ALL {
            assert_eq!(resolve_network(network).id, network);
        }
    }

    #[test]
    fn test_only_testnet_has_faucet() {
        assert!(resolve_network(Network::Mainnet).faucet_url.is_none());
        assert_eq!(
            resolve_network(Network::Testnet).faucet_url,
            Some("https://faucet.story.foundation")
        );
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!(Network::Testnet.to_string(), "testnet");
        assert!(matches!(
            "devnet".parse::<Network>(),
            Err(ScaffoldError::UnknownNetwork(_))
        ));
    }
}
