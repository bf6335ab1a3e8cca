//! Story Protocol contract address tables.
//!
//! Each network has its own table. They currently hold the same addresses (the
//! protocol is deployed at identical addresses on mainnet and Aeneid), but they are
//! declared separately and can be overridden per network through
//! [`crate::config::ToolConfig`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ScaffoldError};
use crate::network::Network;

/// Logical name of a deployed protocol contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Contract {
    // Core protocol
    IpAssetRegistry,
    LicensingModule,
    RoyaltyModule,
    DisputeModule,
    GroupingModule,
    ModuleRegistry,
    LicenseRegistry,
    LicenseToken,
    PiLicenseTemplate,
    CoreMetadataModule,
    // Periphery / workflows
    RegistrationWorkflows,
    LicenseAttachmentWorkflows,
    RoyaltyWorkflows,
    DerivativeWorkflows,
    GroupingWorkflows,
    SpgNftImpl,
    // Misc
    Multicall3,
}

impl Contract {
    pub const ALL: [Contract; 17] = [
        Contract::IpAssetRegistry,
        Contract::LicensingModule,
        Contract::RoyaltyModule,
        Contract::DisputeModule,
        Contract::GroupingModule,
        Contract::ModuleRegistry,
        Contract::LicenseRegistry,
        Contract::LicenseToken,
        Contract::PiLicenseTemplate,
        Contract::CoreMetadataModule,
        Contract::RegistrationWorkflows,
        Contract::LicenseAttachmentWorkflows,
        Contract::RoyaltyWorkflows,
        Contract::DerivativeWorkflows,
        Contract::GroupingWorkflows,
        Contract::SpgNftImpl,
        Contract::Multicall3,
    ];

    /// Protocol name as used in Story's deployment manifests and in template tokens.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IpAssetRegistry => "IPAssetRegistry",
            Self::LicensingModule => "LicensingModule",
            Self::RoyaltyModule => "RoyaltyModule",
            Self::DisputeModule => "DisputeModule",
            Self::GroupingModule => "GroupingModule",
            Self::ModuleRegistry => "ModuleRegistry",
            Self::LicenseRegistry => "LicenseRegistry",
            Self::LicenseToken => "LicenseToken",
            Self::PiLicenseTemplate => "PILicenseTemplate",
            Self::CoreMetadataModule => "CoreMetadataModule",
            Self::RegistrationWorkflows => "RegistrationWorkflows",
            Self::LicenseAttachmentWorkflows => "LicenseAttachmentWorkflows",
            Self::RoyaltyWorkflows => "RoyaltyWorkflows",
            Self::DerivativeWorkflows => "DerivativeWorkflows",
            Self::GroupingWorkflows => "GroupingWorkflows",
            Self::SpgNftImpl => "SPGNFTImpl",
            Self::Multicall3 => "Multicall3",
        }
    }

    /// Environment variable carrying this address in the generated project.
    pub fn env_key(&self) -> &'static str {
        match self {
            Self::IpAssetRegistry => "NEXT_PUBLIC_IP_ASSET_REGISTRY",
            Self::LicensingModule => "NEXT_PUBLIC_LICENSING_MODULE",
            Self::RoyaltyModule => "NEXT_PUBLIC_ROYALTY_MODULE",
            Self::DisputeModule => "NEXT_PUBLIC_DISPUTE_MODULE",
            Self::GroupingModule => "NEXT_PUBLIC_GROUPING_MODULE",
            Self::ModuleRegistry => "NEXT_PUBLIC_MODULE_REGISTRY",
            Self::LicenseRegistry => "NEXT_PUBLIC_LICENSE_REGISTRY",
            Self::LicenseToken => "NEXT_PUBLIC_LICENSE_TOKEN",
            Self::PiLicenseTemplate => "NEXT_PUBLIC_PIL_TEMPLATE",
            Self::CoreMetadataModule => "NEXT_PUBLIC_CORE_METADATA_MODULE",
            Self::RegistrationWorkflows => "NEXT_PUBLIC_REGISTRATION_WORKFLOWS",
            Self::LicenseAttachmentWorkflows => "NEXT_PUBLIC_LICENSE_ATTACHMENT_WORKFLOWS",
            Self::RoyaltyWorkflows => "NEXT_PUBLIC_ROYALTY_WORKFLOWS",
            Self::DerivativeWorkflows => "NEXT_PUBLIC_DERIVATIVE_WORKFLOWS",
            Self::GroupingWorkflows => "NEXT_PUBLIC_GROUPING_WORKFLOWS",
            Self::SpgNftImpl => "NEXT_PUBLIC_SPG_NFT_IMPL",
            Self::Multicall3 => "NEXT_PUBLIC_MULTICALL3",
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Contract {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        Contract::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ScaffoldError::UnknownContract(s.to_string()))
    }
}

const MAINNET_ADDRESSES: [(Contract, &str); 17] = [
    (Contract::IpAssetRegistry, "0x77319B4031e6eF1250907aa00018B8B1c67a244b"),
    (Contract::LicensingModule, "0x04fbd8a2e56dd85CFD5500A4A4DfA955B9f1dE6f"),
    (Contract::RoyaltyModule, "0xD2f60c40fEbccf6311f8B47c4f2Ec6b040400086"),
    (Contract::DisputeModule, "0x9b7A9c70AFF961C799110954fc06F3093aeb94C5"),
    (Contract::GroupingModule, "0x69D3a7aa9edb72Bc226E745A7cCdd50D947b69Ac"),
    (Contract::ModuleRegistry, "0x022DBAAeA5D8fB31a0Ad793335e39Ced5D631fa5"),
    (Contract::LicenseRegistry, "0x529a750E02d8E2f15649c13D69a465286a780e24"),
    (Contract::LicenseToken, "0xFe3838BFb30B34170F00030B52eA4893d8aAC6bC"),
    (Contract::PiLicenseTemplate, "0x2E896b0b2Fdb7457499B56AAaA4AE55BCB4Cd316"),
    (Contract::CoreMetadataModule, "0x6E81a25C99C6e8430aeC7353325EB138aFE5DC16"),
    (Contract::RegistrationWorkflows, "0xbe39E1C756e921BD25DF86e7AAa31106d1eb0424"),
    (Contract::LicenseAttachmentWorkflows, "0xcC2E862bCee5B6036Db0de6E06Ae87e524a79fd8"),
    (Contract::RoyaltyWorkflows, "0x9515faE61E0c0447C6AC6dEe5628A2097aFE1890"),
    (Contract::DerivativeWorkflows, "0x9e2d496f72C547C2C535B167e06ED8729B374a4f"),
    (Contract::GroupingWorkflows, "0xD7c0beb3aa4DCD4723465f1ecAd045676c24CDCd"),
    (Contract::SpgNftImpl, "0x5266215a00c31AaA2f2BB7b951Ea0028Ea8b4e37"),
    (Contract::Multicall3, "0xcA11bde05977b3631167028862bE2a173976CA11"),
];

// Aeneid shares the mainnet deployment addresses today.
const TESTNET_ADDRESSES: [(Contract, &str); 17] = [
    (Contract::IpAssetRegistry, "0x77319B4031e6eF1250907aa00018B8B1c67a244b"),
    (Contract::LicensingModule, "0x04fbd8a2e56dd85CFD5500A4A4DfA955B9f1dE6f"),
    (Contract::RoyaltyModule, "0xD2f60c40fEbccf6311f8B47c4f2Ec6b040400086"),
    (Contract::DisputeModule, "0x9b7A9c70AFF961C799110954fc06F3093aeb94C5"),
    (Contract::GroupingModule, "0x69D3a7aa9edb72Bc226E745A7cCdd50D947b69Ac"),
    (Contract::ModuleRegistry, "0x022DBAAeA5D8fB31a0Ad793335e39Ced5D631fa5"),
    (Contract::LicenseRegistry, "0x529a750E02d8E2f15649c13D69a465286a780e24"),
    (Contract::LicenseToken, "0xFe3838BFb30B34170F00030B52eA4893d8aAC6bC"),
    (Contract::PiLicenseTemplate, "0x2E896b0b2Fdb7457499B56AAaA4AE55BCB4Cd316"),
    (Contract::CoreMetadataModule, "0x6E81a25C99C6e8430aeC7353325EB138aFE5DC16"),
    (Contract::RegistrationWorkflows, "0xbe39E1C756e921BD25DF86e7AAa31106d1eb0424"),
    (Contract::LicenseAttachmentWorkflows, "0xcC2E862bCee5B6036Db0de6E06Ae87e524a79fd8"),
    (Contract::RoyaltyWorkflows, "0x9515faE61E0c0447C6AC6dEe5628A2097aFE1890"),
    (Contract::DerivativeWorkflows, "0x9e2d496f72C547C2C535B167e06ED8729B374a4f"),
    (Contract::GroupingWorkflows, "0xD7c0beb3aa4DCD4723465f1ecAd045676c24CDCd"),
    (Contract::SpgNftImpl, "0x5266215a00c31AaA2f2BB7b951Ea0028Ea8b4e37"),
    (Contract::Multicall3, "0xcA11bde05977b3631167028862bE2a173976CA11"),
];

/// Resolved address for every [`Contract`] on one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSet {
    addresses: BTreeMap<Contract, String>,
}

impl ContractSet {
    fn from_table(table: &[(Contract, &str)]) -> Self {
        Self {
            addresses: table
                .iter()
                .map(|(contract, address)| (*contract, (*address).to_string()))
                .collect(),
        }
    }

    /// Address of `contract`. Every set is complete, so this never misses.
    pub fn address(&self, contract: Contract) -> &str {
        self.addresses
            .get(&contract)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Iterate in declaration order of [`Contract`].
    pub fn iter(&self) -> impl Iterator<Item = (Contract, &str)> {
        self.addresses.iter().map(|(c, a)| (*c, a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Replace addresses by logical contract name.
    ///
    /// Every key must name a known contract and every value must be a `0x`-prefixed
    /// 20-byte hex address.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Result<Self> {
        for (name, address) in overrides {
            let contract: Contract = name.parse()?;
            if !is_address(address) {
                return Err(ScaffoldError::InvalidAddress {
                    contract: name.clone(),
                    address: address.clone(),
                });
            }
            self.addresses.insert(contract, address.clone());
        }
        Ok(self)
    }
}

/// Look up the address table for a network. Total over [`Network`].
pub fn resolve_contracts(network: Network) -> ContractSet {
    match network {
        Network::Mainnet => ContractSet::from_table(&MAINNET_ADDRESSES),
        Network::Testnet => ContractSet::from_table(&TESTNET_ADDRESSES),
    }
}

fn is_address(s: &str) -> bool {
    s.strip_prefix("0x")
        .is_some_and(|h| h.len() == 40 && hex::decode(h).is_ok())
}
