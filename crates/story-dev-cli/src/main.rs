//! story-dev CLI: generate ready-to-run Story Protocol projects.
//!
//! Provides two commands:
//! `create:quickstart` (scaffold a project from a bundled template) and
//! `networks` (show the built-in network and contract registry).
//!
//! All scaffolding work is delegated to [`story_dev_core::scaffold::Scaffolder`].

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use story_dev_core::config::ToolConfig;
use story_dev_core::network::Network;
use story_dev_core::templates::TemplateId;

#[derive(Parser)]
#[command(
    name = "story-dev",
    about = "Story Dev CLI — generate production-ready Story Protocol projects in minutes",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a story-dev.config.json with defaults and contract overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Story SDK quickstart project
    #[command(name = "create:quickstart", visible_alias = "create")]
    CreateQuickstart {
        /// Project name (creates a directory with this name)
        #[arg(long)]
        name: Option<String>,

        /// Project template
        #[arg(long, value_enum)]
        template: Option<TemplateChoice>,

        /// Story network
        #[arg(long, value_enum)]
        network: Option<NetworkChoice>,

        /// Write into a non-empty directory, overwriting colliding files
        #[arg(long)]
        force: bool,

        /// Take every answer from flags; the private key comes from $PRIVATE_KEY
        #[arg(long)]
        non_interactive: bool,

        /// Skip the security confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Show built-in network profiles and contract addresses
    Networks,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TemplateChoice {
    Registration,
    Licensing,
    Royalty,
}

impl From<TemplateChoice> for TemplateId {
    fn from(choice: TemplateChoice) -> Self {
        match choice {
            TemplateChoice::Registration => TemplateId::Registration,
            TemplateChoice::Licensing => TemplateId::Licensing,
            TemplateChoice::Royalty => TemplateId::Royalty,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum NetworkChoice {
    Testnet,
    Mainnet,
}

impl From<NetworkChoice> for Network {
    fn from(choice: NetworkChoice) -> Self {
        match choice {
            NetworkChoice::Testnet => Network::Testnet,
            NetworkChoice::Mainnet => Network::Mainnet,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let tool_config = match &cli.config {
        Some(path) => ToolConfig::load(path)?,
        None => ToolConfig::default(),
    };

    match cli.command {
        Commands::CreateQuickstart {
            name,
            template,
            network,
            force,
            non_interactive,
            yes,
        } => {
            let options = commands::create::CreateOptions {
                name,
                template: template.map(Into::into),
                network: network.map(Into::into),
                force,
                interactive: !non_interactive,
                assume_yes: yes,
            };
            commands::create::run(options, tool_config).await?;
        }
        Commands::Networks => {
            commands::networks::run(&tool_config).await?;
        }
    }

    Ok(())
}
