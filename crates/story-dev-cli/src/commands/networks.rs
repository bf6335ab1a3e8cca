use anyhow::Result;

use story_dev_core::config::ToolConfig;
use story_dev_core::network::{resolve_network, Network};

use crate::output;

/// Print every built-in network profile and its effective contract table.
///
/// Contract addresses include overrides from `--config`, if one was given.
pub async fn run(tool_config: &ToolConfig) -> Result<()> {
    output::print_header("Story Dev CLI - Networks");

    for network in Network::ALL {
        let profile = resolve_network(network);
        let contracts = tool_config.contracts_for(network)?;

        output::print_section(&format!("{} ({network})", profile.name));
        output::print_key_value("Chain ID", &profile.chain_id.to_string());
        output::print_key_value("RPC", profile.rpc_url);
        output::print_key_value("Explorer", profile.block_explorer_url);
        if let Some(faucet) = profile.faucet_url {
            output::print_key_value("Faucet", faucet);
        }
        output::print_key_value(
            "Currency",
            &format!(
                "{} ({} decimals)",
                profile.native_currency.symbol, profile.native_currency.decimals
            ),
        );
        println!();
        for (contract, address) in contracts.iter() {
            output::print_key_value(contract.name(), address);
        }
    }
    println!();

    Ok(())
}
