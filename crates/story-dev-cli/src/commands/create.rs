use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Password, Select};

use story_dev_core::config::ToolConfig;
use story_dev_core::error::ScaffoldError;
use story_dev_core::network::{resolve_network, Network};
use story_dev_core::project::{ProjectConfig, ScaffoldResult};
use story_dev_core::scaffold::{Abort, Scaffolder, Stage};
use story_dev_core::templates::TemplateId;
use story_dev_core::validate::{validate_credential, validate_project_name};

use crate::output;

const DEFAULT_PROJECT_NAME: &str = "my-story-app";
const CREDENTIAL_ENV: &str = "PRIVATE_KEY";

const SECURITY_WARNING: &str = "\
CRITICAL SECURITY WARNING

Your private key controls your wallet and all its assets.

NEVER:
  - Share your private key with anyone
  - Commit your .env file to version control
  - Store your key in plain text on shared systems
  - Use your production wallet for testing

ALWAYS:
  - Keep your .env file local and secure
  - Use a separate wallet for development/testing
  - Verify .env is in your .gitignore
  - Back up your private key securely

story-dev writes .env with owner-only permissions and lists it in .gitignore.";

/// Flags collected by `create:quickstart`.
#[derive(Debug)]
pub struct CreateOptions {
    pub name: Option<String>,
    pub template: Option<TemplateId>,
    pub network: Option<Network>,
    pub force: bool,
    pub interactive: bool,
    pub assume_yes: bool,
}

struct Answers {
    project_name: String,
    template: TemplateId,
    network: Network,
    credential: String,
}

/// Generate a new Story Protocol project.
///
/// Collects answers (prompts, or flags plus `$PRIVATE_KEY`), shows the security
/// warning, then runs the scaffolder into `./<name>`. Any abort is returned as an
/// error so the process exits non-zero.
pub async fn run(options: CreateOptions, tool_config: ToolConfig) -> Result<()> {
    output::print_header("Story Dev CLI - Create Quickstart");

    let default_network = tool_config.default_network.unwrap_or_default();
    let answers = if options.interactive {
        prompt(&options, default_network)?
    } else {
        from_flags(&options, default_network)?
    };

    let target_path = std::env::current_dir()
        .context("cannot determine the current directory")?
        .join(&answers.project_name);
    let config = ProjectConfig {
        project_name: answers.project_name,
        template: answers.template,
        network: answers.network,
        credential: answers.credential,
        target_path,
    };
    config.validate()?;

    let profile = resolve_network(config.network);
    if config.network == Network::Mainnet {
        output::print_warning("You selected MAINNET. Please ensure you understand the risks.");
    }
    println!("\n{SECURITY_WARNING}\n");
    if let Some(faucet) = profile.faucet_url {
        output::print_info(&format!(
            "Using {} (Chain ID: {}). Get free testnet tokens at {faucet}",
            profile.name, profile.chain_id
        ));
    }

    if options.interactive && !options.assume_yes {
        let confirmed = Confirm::new()
            .with_prompt("I understand the security implications. Continue?")
            .default(true)
            .interact()?;
        if !confirmed {
            output::print_warning("Operation cancelled.");
            return Ok(());
        }
    }

    output::print_section("Generating Project");
    let pb = output::spinner("Validating input...");
    let scaffolder = Scaffolder::new(tool_config).force(options.force);
    let outcome = scaffolder.run_with(&config, |stage| {
        tracing::debug!("stage: {stage}");
        pb.set_message(stage_message(stage));
    });

    match outcome {
        Ok(result) => {
            pb.finish_with_message("Project structure created");
            print_summary(&config, &result);
            Ok(())
        }
        Err(abort) => {
            pb.finish_and_clear();
            print_abort_hints(&abort, &config);
            Err(abort.into())
        }
    }
}

fn prompt(options: &CreateOptions, default_network: Network) -> Result<Answers> {
    let project_name = match &options.name {
        Some(name) => name.clone(),
        None => Input::<String>::new()
            .with_prompt("Project name")
            .default(DEFAULT_PROJECT_NAME.to_string())
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if validate_project_name(input) {
                    Ok(())
                } else {
                    Err("Project name must be alphanumeric with hyphens/underscores only")
                }
            })
            .interact_text()?,
    };

    let template = match options.template {
        Some(t) => t,
        None => {
            let available: Vec<TemplateId> = TemplateId::available().collect();
            let items: Vec<&str> = available.iter().map(|t| t.description()).collect();
            let selection = Select::new()
                .with_prompt("Select template")
                .items(&items)
                .default(0)
                .interact()?;
            available[selection]
        }
    };

    let network = match options.network {
        Some(n) => n,
        None => {
            let items = [
                "Testnet (Aeneid) - Recommended for development",
                "Mainnet - Production use only",
            ];
            let default = Network::ALL
                .iter()
                .position(|n| *n == default_network)
                .unwrap_or(0);
            let selection = Select::new()
                .with_prompt("Select network")
                .items(&items)
                .default(default)
                .interact()?;
            Network::ALL[selection]
        }
    };

    let credential = Password::new()
        .with_prompt("Private key (will be stored in .env)")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if validate_credential(input) {
                Ok(())
            } else {
                Err("Invalid private key format. Must be 64 hex characters (with or without 0x prefix)")
            }
        })
        .interact()?;

    Ok(Answers {
        project_name,
        template,
        network,
        credential,
    })
}

fn from_flags(options: &CreateOptions, default_network: Network) -> Result<Answers> {
    let credential = std::env::var(CREDENTIAL_ENV).unwrap_or_default();
    if !validate_credential(&credential) {
        anyhow::bail!("invalid private key: set the {CREDENTIAL_ENV} environment variable to 64 hex characters");
    }

    Ok(Answers {
        project_name: options
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        template: options.template.unwrap_or(TemplateId::Registration),
        network: options.network.unwrap_or(default_network),
        credential,
    })
}

fn stage_message(stage: Stage) -> String {
    match stage {
        Stage::Validating => "Validating input...".into(),
        Stage::GuardChecking => "Checking target directory...".into(),
        Stage::Rendering => "Creating project structure...".into(),
        Stage::WritingArtifacts => "Writing .gitignore, .env.example and .env...".into(),
        Stage::Done => "Finishing up...".into(),
    }
}

fn print_abort_hints(abort: &Abort, config: &ProjectConfig) {
    if let ScaffoldError::TargetRejected { .. } = abort.error {
        output::print_info(&format!(
            "Directory \"{}\" already exists and is not empty. Use --force to overwrite.",
            config.project_name
        ));
    }
    if abort.may_be_partial {
        output::print_warning(&format!(
            "{} may contain partially written files. Clean it up manually or re-run with --force.",
            config.target_path.display()
        ));
    }
}

fn print_summary(config: &ProjectConfig, result: &ScaffoldResult) {
    let profile = resolve_network(result.network);

    output::print_section("Project Created Successfully!");
    output::print_key_value("Project", &config.project_name);
    output::print_key_value("Template", result.template.as_str());
    output::print_key_value(
        "Network",
        &format!("{} (Chain ID: {})", profile.name, profile.chain_id),
    );
    output::print_key_value("Private Key", &result.credential_masked);
    output::print_key_value("Location", &result.target_path.display().to_string());
    output::print_key_value("Files", &result.files_written.to_string());

    output::print_section("Next Steps");
    println!("    cd {}", config.project_name);
    println!("    npm install");
    println!("    npm run dev");
    println!("    open http://localhost:3000");
    println!();

    if let Some(faucet) = profile.faucet_url {
        output::print_info(&format!("Get testnet tokens: {faucet}"));
    }
    output::print_success("Happy building on Story Protocol!");
    output::print_info("Documentation: https://docs.story.foundation");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_stage_has_a_message() {
        for stage in [
            Stage::Validating,
            Stage::GuardChecking,
            Stage::Rendering,
            Stage::WritingArtifacts,
            Stage::Done,
        ] {
            assert!(!stage_message(stage).is_empty());
        }
    }
}
