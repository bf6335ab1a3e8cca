//! Handlebars-based template renderer for project scaffolding.
//!
//! Wraps the [`handlebars::Handlebars`] engine with **strict mode** enabled, so a
//! `{{token}}` missing from the [`TemplateContext`] is an error instead of an empty
//! string. HTML escaping is turned off: the output is source code and config, and
//! URLs must survive untouched.
//!
//! ## Usage
//!
//! ```ignore
//! let renderer = TemplateRenderer::new();
//! let context = TemplateContext::new("my-app", TemplateId::Registration, profile, &contracts);
//! let written = renderer.render_tree(embedded::REGISTRATION, &context, Path::new("my-app"))?;
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;

use crate::contracts::ContractSet;
use crate::error::{Result, ScaffoldError};
use crate::network::NetworkProfile;
use crate::project::ProjectConfig;
use crate::templates::{TemplateFile, TemplateId};

/// Network fields exposed to templates as `network.*`.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkContext {
    pub id: &'static str,
    pub name: &'static str,
    pub chain_id: u64,
    pub rpc_url: &'static str,
    pub block_explorer_url: &'static str,
    /// Empty when the network has no faucet.
    pub faucet_url: &'static str,
    pub currency_symbol: &'static str,
}

impl From<&NetworkProfile> for NetworkContext {
    fn from(profile: &NetworkProfile) -> Self {
        Self {
            id: profile.id.as_str(),
            name: profile.name,
            chain_id: profile.chain_id,
            rpc_url: profile.rpc_url,
            block_explorer_url: profile.block_explorer_url,
            faucet_url: profile.faucet_url.unwrap_or_default(),
            currency_symbol: profile.native_currency.symbol,
        }
    }
}

/// The complete token vocabulary available to `.tmpl` files.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub project_name: String,
    pub template: &'static str,
    pub network: NetworkContext,
    /// Protocol contract name -> address.
    pub contracts: BTreeMap<&'static str, String>,
    /// Protocol contract name -> environment variable name.
    pub env: BTreeMap<&'static str, &'static str>,
}

impl TemplateContext {
    pub fn new(
        project_name: &str,
        template: TemplateId,
        network: &NetworkProfile,
        contracts: &ContractSet,
    ) -> Self {
        Self {
            project_name: project_name.to_string(),
            template: template.as_str(),
            network: NetworkContext::from(network),
            contracts: contracts
                .iter()
                .map(|(c, address)| (c.name(), address.to_string()))
                .collect(),
            env: contracts.iter().map(|(c, _)| (c.name(), c.env_key())).collect(),
        }
    }
}

/// Template renderer using Handlebars for generating project files.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode on and escaping off.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, name: &str, template: &str, data: &impl Serialize) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| ScaffoldError::TemplateRender {
                path: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Output bytes for one file: rendered for `.tmpl` files, borrowed as-is otherwise.
    pub fn render_file(
        &self,
        file: &TemplateFile,
        context: &TemplateContext,
    ) -> Result<Cow<'static, [u8]>> {
        if !file.is_render_instruction() {
            return Ok(Cow::Borrowed(file.contents));
        }
        let source = std::str::from_utf8(file.contents)
            .map_err(|_| ScaffoldError::TemplateEncoding(file.path.to_string()))?;
        let rendered = self.render(file.path, source, context)?;
        Ok(Cow::Owned(rendered.into_bytes()))
    }

    /// Write every file of `tree` under `dest`, mirroring its directory layout.
    ///
    /// Directories are created as needed; existing files at colliding paths are
    /// overwritten. Returns the number of files written.
    pub fn render_tree(
        &self,
        tree: &[TemplateFile],
        context: &TemplateContext,
        dest: &Path,
    ) -> Result<usize> {
        let mut written = 0;
        for file in tree {
            let contents = self.render_file(file, context)?;
            let out = destination(dest, file.output_path());
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::fs(parent, e))?;
            }
            std::fs::write(&out, &contents).map_err(|e| ScaffoldError::fs(&out, e))?;
            tracing::trace!("wrote {}", out.display());
            written += 1;
        }
        Ok(written)
    }

    /// Render the tree for `config.template` into `dest`.
    ///
    /// Unavailable templates are rejected before anything is written.
    pub fn render_project(
        &self,
        config: &ProjectConfig,
        contracts: &ContractSet,
        network: &NetworkProfile,
        dest: &Path,
    ) -> Result<usize> {
        let tree = config.template.ensure_available()?;
        let context = TemplateContext::new(&config.project_name, config.template, network, contracts);
        tracing::info!(
            "rendering {} template ({} files) into {}",
            config.template,
            tree.len(),
            dest.display()
        );
        self.render_tree(tree, &context, dest)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn destination(root: &Path, relative: &str) -> PathBuf {
    relative.split('/').fold(root.to_path_buf(), |p, seg| p.join(seg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{resolve_contracts, Contract};
    use crate::network::{resolve_network, Network};
    use crate::templates::embedded::REGISTRATION;

    fn context(network: Network) -> TemplateContext {
        TemplateContext::new(
            "my-app",
            TemplateId::Registration,
            resolve_network(network),
            &resolve_contracts(network),
        )
    }

    fn read_tree(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        let mut out = BTreeMap::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    let rel = path.strip_prefix(root).unwrap().to_path_buf();
                    out.insert(rel, std::fs::read(&path).unwrap());
                }
            }
        }
        out
    }

    #[test]
    fn test_strict_mode_rejects_unknown_token() {
        let renderer = TemplateRenderer::new();
        let result = renderer.render("x.tmpl", "{{not_a_token}}", &context(Network::Testnet));
        assert!(matches!(result, Err(ScaffoldError::TemplateRender { .. })));
    }

    #[test]
    fn test_urls_are_not_escaped() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render("x.tmpl", "{{network.rpc_url}}", &context(Network::Testnet))
            .unwrap();
        assert_eq!(out, "https://testnet.storyscan.io/api/eth-rpc");
    }

    #[test]
    fn test_contract_and_env_tokens() {
        let renderer = TemplateRenderer::new();
        let out = renderer
            .render(
                "x.tmpl",
                "{{env.SPGNFTImpl}}={{contracts.SPGNFTImpl}}",
                &context(Network::Mainnet),
            )
            .unwrap();
        let expected = format!(
            "NEXT_PUBLIC_SPG_NFT_IMPL={}",
            resolve_contracts(Network::Mainnet).address(Contract::SpgNftImpl)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_plain_files_are_copied_verbatim() {
        let renderer = TemplateRenderer::new();
        let ctx = context(Network::Testnet);
        for file in REGISTRATION.iter().filter(|f| !f.is_render_instruction()) {
            let out = renderer.render_file(file, &ctx).unwrap();
            assert_eq!(out.as_ref(), file.contents, "{}", file.path);
        }
    }

    #[test]
    fn test_binary_file_survives() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new();
        renderer
            .render_tree(REGISTRATION, &context(Network::Testnet), dir.path())
            .unwrap();
        let png = std::fs::read(dir.path().join("public/favicon.png")).unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
        let embedded = REGISTRATION
            .iter()
            .find(|f| f.path == "public/favicon.png")
            .unwrap();
        assert_eq!(png, embedded.contents);
    }

    #[test]
    fn test_render_tree_mirrors_layout() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new();
        let written = renderer
            .render_tree(REGISTRATION, &context(Network::Testnet), dir.path())
            .unwrap();
        assert_eq!(written, REGISTRATION.len());

        for file in REGISTRATION {
            assert!(dir.path().join(file.output_path()).is_file(), "{}", file.path);
        }
        assert!(!dir.path().join("package.json.tmpl").exists());

        let package = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(package.contains(r#""name": "my-app""#));
        let constants = std::fs::read_to_string(dir.path().join("src/lib/constants.ts")).unwrap();
        assert!(constants.contains("'1315'"));
        assert!(!constants.contains("{{"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = TemplateRenderer::new();
        let ctx = context(Network::Mainnet);
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        renderer.render_tree(REGISTRATION, &ctx, first.path()).unwrap();
        renderer.render_tree(REGISTRATION, &ctx, second.path()).unwrap();
        assert_eq!(read_tree(first.path()), read_tree(second.path()));

        // Rendering again over existing output changes nothing either.
        renderer.render_tree(REGISTRATION, &ctx, first.path()).unwrap();
        assert_eq!(read_tree(first.path()), read_tree(second.path()));
    }

    #[test]
    fn test_every_registration_template_renders() {
        let renderer = TemplateRenderer::new();
        for network in Network::ALL {
            let ctx = context(network);
            for file in REGISTRATION.iter().filter(|f| f.is_render_instruction()) {
                renderer.render_file(file, &ctx).unwrap();
            }
        }
    }

    #[test]
    fn test_unavailable_template_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig {
            project_name: "my-app".into(),
            template: TemplateId::Licensing,
            network: Network::Testnet,
            credential: "a".repeat(64),
            target_path: dir.path().to_path_buf(),
        };
        let result = TemplateRenderer::new().render_project(
            &config,
            &resolve_contracts(Network::Testnet),
            resolve_network(Network::Testnet),
            dir.path(),
        );
        assert!(matches!(result, Err(ScaffoldError::TemplateUnavailable(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
