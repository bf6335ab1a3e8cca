//! Template system for story-dev project scaffolding.
//!
//! Template trees are embedded into the binary at compile-time in the [`embedded`]
//! module, then written out by the [`renderer::TemplateRenderer`]. Files whose path
//! ends in `.tmpl` are rendered with [Handlebars](https://handlebarsjs.com/) and
//! lose the suffix; every other file is copied byte-for-byte.
//!
//! ## Template variables
//!
//! See [`renderer::TemplateContext`]. Common ones:
//! - `{{project_name}}`: project directory / package name
//! - `{{network.chain_id}}`, `{{network.rpc_url}}`: from the network registry
//! - `{{contracts.IPAssetRegistry}}`: deployed address by protocol name
//! - `{{env.IPAssetRegistry}}`: the matching `NEXT_PUBLIC_*` variable name
//!
//! The private key is never part of the context.

pub mod embedded;
pub mod renderer;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};

/// Suffix marking a file as a render instruction.
pub const RENDER_SUFFIX: &str = ".tmpl";

/// One file of a template tree.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    /// `/`-separated path relative to the template root.
    pub path: &'static str,
    pub contents: &'static [u8],
}

impl TemplateFile {
    pub fn is_render_instruction(&self) -> bool {
        self.path.ends_with(RENDER_SUFFIX)
    }

    /// Destination path relative to the project root.
    pub fn output_path(&self) -> &'static str {
        self.path.strip_suffix(RENDER_SUFFIX).unwrap_or(self.path)
    }
}

/// Template variant offered by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Registration,
    Licensing,
    Royalty,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::Registration,
        TemplateId::Licensing,
        TemplateId::Royalty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Licensing => "licensing",
            Self::Royalty => "royalty",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Registration => "IP Registration (register new assets)",
            Self::Licensing => "Licensing (attach licenses & mint tokens)",
            Self::Royalty => "Royalty Management (claim revenue)",
        }
    }

    /// Bundled tree for this variant, if one ships with this build.
    pub fn tree(&self) -> Option<&'static [TemplateFile]> {
        match self {
            Self::Registration => Some(embedded::REGISTRATION),
            Self::Licensing | Self::Royalty => None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.tree().is_some()
    }

    /// The tree, or [`ScaffoldError::TemplateUnavailable`] for variants that are
    /// declared but not shipped yet.
    pub fn ensure_available(&self) -> Result<&'static [TemplateFile]> {
        self.tree()
            .ok_or_else(|| ScaffoldError::TemplateUnavailable(self.as_str().to_string()))
    }

    /// Variants that can actually be scaffolded.
    pub fn available() -> impl Iterator<Item = TemplateId> {
        Self::ALL.into_iter().filter(TemplateId::is_available)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "registration" => Ok(Self::Registration),
            "licensing" => Ok(Self::Licensing),
            "royalty" => Ok(Self::Royalty),
            other => Err(ScaffoldError::UnknownTemplate(other.to_string())),
        }
    }
}
