//! Generated files that are not part of any template tree.
//!
//! - `.gitignore`: fixed canonical content, always lists [`SECRETS_FILE`]
//! - `.env.example`: committed; real network id and chain id, placeholders for the rest
//! - `.env`: never committed; the same keys with real values, including the private key
//!
//! Both env files are produced from [`env_keys`], so their key sets cannot drift.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::contracts::{Contract, ContractSet};
use crate::error::{Result, ScaffoldError};
use crate::network::NetworkProfile;
use crate::project::ProjectConfig;

pub const IGNORE_FILE: &str = ".gitignore";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";
/// Holds the raw private key. Must appear verbatim in [`IGNORE_CONTENTS`].
pub const SECRETS_FILE: &str = ".env";

pub const NETWORK_KEY: &str = "NEXT_PUBLIC_NETWORK";
pub const CHAIN_ID_KEY: &str = "NEXT_PUBLIC_CHAIN_ID";
pub const RPC_URL_KEY: &str = "NEXT_PUBLIC_RPC_URL";
pub const CREDENTIAL_KEY: &str = "PRIVATE_KEY";

pub const AUTO_PLACEHOLDER: &str = "<auto-populated>";
pub const CREDENTIAL_PLACEHOLDER: &str = "your_private_key_here";

/// Number of files [`write_all`] produces.
pub const ARTIFACT_COUNT: usize = 3;

/// Canonical `.gitignore` (v1).
pub const IGNORE_CONTENTS: &str = "\
# Environment variables (NEVER commit these!)
.env
.env.local
.env.*.local

# Dependencies
node_modules/
.pnp
.pnp.js

# Build output
dist/
build/
.next/
out/

# Testing
coverage/

# Logs
*.log
npm-debug.log*
yarn-debug.log*
yarn-error.log*

# IDE
.vscode/
.idea/
*.swp
*.swo

# OS
.DS_Store
Thumbs.db
";

/// Every key present in both env files, in file order.
pub fn env_keys() -> Vec<&'static str> {
    let mut keys = vec![NETWORK_KEY, CHAIN_ID_KEY, RPC_URL_KEY, CREDENTIAL_KEY];
    keys.extend(Contract::ALL.iter().map(|c| c.env_key()));
    keys
}

pub fn env_example_contents(network: &NetworkProfile) -> String {
    let mut out = String::new();
    out.push_str("# Story Protocol configuration\n");
    out.push_str("# Copy this file to .env and fill in your values\n\n");
    out.push_str("# Network\n");
    push_entry(&mut out, NETWORK_KEY, network.id.as_str());
    push_entry(&mut out, CHAIN_ID_KEY, &network.chain_id.to_string());
    push_entry(&mut out, RPC_URL_KEY, AUTO_PLACEHOLDER);
    out.push_str("\n# Private key (KEEP THIS SECRET!)\n");
    if let Some(faucet) = network.faucet_url {
        out.push_str(&format!("# Fund a development wallet at {faucet}\n"));
    }
    push_entry(&mut out, CREDENTIAL_KEY, CREDENTIAL_PLACEHOLDER);
    out.push_str("\n# Story Protocol contract addresses\n");
    for contract in Contract::ALL {
        push_entry(&mut out, contract.env_key(), AUTO_PLACEHOLDER);
    }
    out
}

pub fn secrets_contents(
    network: &NetworkProfile,
    contracts: &ContractSet,
    credential: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# {} runtime configuration. DO NOT COMMIT THIS FILE.\n\n",
        network.name
    ));
    out.push_str("# Network\n");
    push_entry(&mut out, NETWORK_KEY, network.id.as_str());
    push_entry(&mut out, CHAIN_ID_KEY, &network.chain_id.to_string());
    push_entry(&mut out, RPC_URL_KEY, network.rpc_url);
    out.push_str("\n# Private key\n");
    push_entry(&mut out, CREDENTIAL_KEY, credential);
    out.push_str("\n# Story Protocol contract addresses\n");
    for (contract, address) in contracts.iter() {
        push_entry(&mut out, contract.env_key(), address);
    }
    out
}

/// Write `.gitignore`, replacing any existing file.
pub fn write_ignore_file(dir: &Path) -> Result<PathBuf> {
    write(dir, IGNORE_FILE, IGNORE_CONTENTS)
}

/// Write `.env.example` for `network`. Contains no secret.
pub fn write_env_example(dir: &Path, network: &NetworkProfile) -> Result<PathBuf> {
    write(dir, ENV_EXAMPLE_FILE, &env_example_contents(network))
}

/// Write `.env` with the real private key.
///
/// On Unix a new file is created with mode 0600, and an existing one is narrowed
/// to 0600 before the key is written into it.
pub fn write_secrets_file(
    dir: &Path,
    config: &ProjectConfig,
    contracts: &ContractSet,
    network: &NetworkProfile,
) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| ScaffoldError::fs(dir, e))?;
    let path = dir.join(SECRETS_FILE);
    let contents = secrets_contents(network, contracts, &config.credential);

    let mut file = owner_only()
        .open(&path)
        .map_err(|e| ScaffoldError::fs(&path, e))?;
    restrict_permissions(&path)?;
    file.write_all(contents.as_bytes())
        .map_err(|e| ScaffoldError::fs(&path, e))?;
    tracing::debug!("wrote {}", path.display());
    Ok(path)
}

/// Write all three artifacts. The ignore file goes first so the secrets file is
/// never on disk without it.
pub fn write_all(
    dir: &Path,
    config: &ProjectConfig,
    contracts: &ContractSet,
    network: &NetworkProfile,
) -> Result<usize> {
    write_ignore_file(dir)?;
    write_env_example(dir, network)?;
    write_secrets_file(dir, config, contracts, network)?;
    Ok(ARTIFACT_COUNT)
}

fn push_entry(out: &mut String, key: &str, value: &str) {
    out.push_str(key);
    out.push('=');
    out.push_str(value);
    out.push('\n');
}

fn write(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| ScaffoldError::fs(dir, e))?;
    let path = dir.join(name);
    std::fs::write(&path, contents).map_err(|e| ScaffoldError::fs(&path, e))?;
    tracing::debug!("wrote {}", path.display());
    Ok(path)
}

fn owner_only() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| ScaffoldError::fs(path, e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::resolve_contracts;
    use crate::network::{resolve_network, Network};
    use crate::templates::TemplateId;

    fn keys_of(contents: &str) -> Vec<String> {
        contents
            .lines()
            .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .filter_map(|l| l.split_once('=').map(|(k, _)| k.to_string()))
            .collect()
    }

    fn value_of(contents: &str, key: &str) -> Option<String> {
        contents
            .lines()
            .filter_map(|l| l.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    }

    fn config(network: Network) -> ProjectConfig {
        ProjectConfig {
            project_name: "my-app".into(),
            template: TemplateId::Registration,
            network,
            credential: format!("0x{}", "b".repeat(64)),
            target_path: PathBuf::from("my-app"),
        }
    }

    #[test]
    fn test_ignore_file_lists_secrets_file() {
        assert!(IGNORE_CONTENTS.lines().any(|l| l == SECRETS_FILE));
    }

    #[test]
    fn test_env_key_sets_match() {
        for network in Network::ALL {
            let profile = resolve_network(network);
            let example = env_example_contents(profile);
            let secrets = secrets_contents(profile, &resolve_contracts(network), "k");
            assert_eq!(keys_of(&example), keys_of(&secrets));
            assert_eq!(keys_of(&example), env_keys());
        }
    }

    #[test]
    fn test_example_has_chain_id_and_no_secret() {
        let example = env_example_contents(resolve_network(Network::Mainnet));
        assert_eq!(value_of(&example, CHAIN_ID_KEY).as_deref(), Some("1514"));
        assert_eq!(value_of(&example, NETWORK_KEY).as_deref(), Some("mainnet"));
        assert_eq!(
            value_of(&example, CREDENTIAL_KEY).as_deref(),
            Some(CREDENTIAL_PLACEHOLDER)
        );
    }

    #[test]
    fn test_secrets_carry_real_values() {
        let network = Network::Testnet;
        let profile = resolve_network(network);
        let contracts = resolve_contracts(network);
        let cfg = config(network);
        let secrets = secrets_contents(profile, &contracts, &cfg.credential);

        assert_eq!(value_of(&secrets, CHAIN_ID_KEY).as_deref(), Some("1315"));
        assert_eq!(value_of(&secrets, RPC_URL_KEY).as_deref(), Some(profile.rpc_url));
        assert_eq!(value_of(&secrets, CREDENTIAL_KEY), Some(cfg.credential.clone()));
        for (contract, address) in contracts.iter() {
            assert_eq!(value_of(&secrets, contract.env_key()).as_deref(), Some(address));
        }
    }

    #[test]
    fn test_write_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let network = Network::Testnet;
        let cfg = config(network);
        let contracts = resolve_contracts(network);
        let profile = resolve_network(network);

        std::fs::write(dir.path().join(IGNORE_FILE), "stale\n").unwrap();
        assert_eq!(write_all(dir.path(), &cfg, &contracts, profile).unwrap(), ARTIFACT_COUNT);
        let first = std::fs::read(dir.path().join(SECRETS_FILE)).unwrap();
        write_all(dir.path(), &cfg, &contracts, profile).unwrap();
        assert_eq!(std::fs::read(dir.path().join(SECRETS_FILE)).unwrap(), first);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(IGNORE_FILE)).unwrap(),
            IGNORE_CONTENTS
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_secrets_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let network = Network::Mainnet;
        let path = write_secrets_file(
            dir.path(),
            &config(network),
            &resolve_contracts(network),
            resolve_network(network),
        )
        .unwrap();
        let mode = std::fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_secrets_file_is_narrowed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join(SECRETS_FILE);
        std::fs::write(&existing, "PRIVATE_KEY=old\nSTALE=1\n").unwrap();
        std::fs::set_permissions(&existing, std::fs::Permissions::from_mode(0o644)).unwrap();

        let network = Network::Testnet;
        let cfg = config(network);
        let path = write_secrets_file(
            dir.path(),
            &cfg,
            &resolve_contracts(network),
            resolve_network(network),
        )
        .unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("STALE"));
        assert_eq!(value_of(&contents, CREDENTIAL_KEY), Some(cfg.credential.clone()));
    }
}
