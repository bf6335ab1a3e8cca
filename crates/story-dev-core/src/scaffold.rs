//! Scaffold orchestration.
//!
//! A run moves through
//! `Validating -> GuardChecking -> Rendering -> WritingArtifacts -> Done`
//! and stops at the first failing stage with an [`Abort`]. There is no retry.
//!
//! ## Staging
//!
//! When the target is absent or empty, everything is written into a hidden
//! sibling directory (`.story-dev-XXXX/<name>`) and renamed onto the target once
//! every stage has succeeded. A failed run drops the staging directory and leaves
//! the target as it was.
//!
//! A forced run into a non-empty directory cannot be staged (it merges into
//! existing content), so files are written in place. An abort there sets
//! [`Abort::may_be_partial`]; the directory may need manual cleanup or a forced
//! re-run.

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::artifacts;
use crate::config::ToolConfig;
use crate::error::ScaffoldError;
use crate::guard::{self, Decision};
use crate::network::resolve_network;
use crate::project::{ProjectConfig, ScaffoldResult};
use crate::templates::renderer::{TemplateContext, TemplateRenderer};
use crate::templates::TemplateFile;

const STAGING_PREFIX: &str = ".story-dev-";

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    GuardChecking,
    Rendering,
    WritingArtifacts,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validating => "validating input",
            Self::GuardChecking => "checking target directory",
            Self::Rendering => "rendering template",
            Self::WritingArtifacts => "writing configuration files",
            Self::Done => "done",
        })
    }
}

/// Terminal failure of a scaffold run.
#[derive(Error, Debug)]
#[error("aborted while {stage}: {error}")]
pub struct Abort {
    pub stage: Stage,
    pub error: ScaffoldError,
    /// Files may already have been written into the target directory.
    pub may_be_partial: bool,
}

impl Abort {
    fn new(stage: Stage, error: ScaffoldError) -> Self {
        Self {
            stage,
            error,
            may_be_partial: false,
        }
    }

    fn partial(stage: Stage, error: ScaffoldError, in_place: bool) -> Self {
        Self {
            stage,
            error,
            may_be_partial: in_place,
        }
    }
}

/// Runs one scaffold from a [`ProjectConfig`].
///
/// Holds no per-run state; one instance may serve several runs as long as each
/// uses its own target path.
pub struct Scaffolder {
    renderer: TemplateRenderer,
    tool_config: ToolConfig,
    force: bool,
}

impl Scaffolder {
    pub fn new(tool_config: ToolConfig) -> Self {
        Self {
            renderer: TemplateRenderer::new(),
            tool_config,
            force: false,
        }
    }

    /// Allow writing into a non-empty target (merge-overwrite).
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn run(&self, config: &ProjectConfig) -> Result<ScaffoldResult, Abort> {
        self.run_with(config, |_| {})
    }

    /// Run, reporting every stage entered to `observe`.
    pub fn run_with(
        &self,
        config: &ProjectConfig,
        observe: impl FnMut(Stage),
    ) -> Result<ScaffoldResult, Abort> {
        self.run_tree(config, None, observe)
    }

    fn run_tree(
        &self,
        config: &ProjectConfig,
        tree_override: Option<&[TemplateFile]>,
        mut observe: impl FnMut(Stage),
    ) -> Result<ScaffoldResult, Abort> {
        let target = config.target_path.as_path();

        observe(Stage::Validating);
        tracing::debug!("validating {config:?}");
        config
            .validate()
            .map_err(|e| Abort::new(Stage::Validating, e))?;
        let network = resolve_network(config.network);
        let contracts = self
            .tool_config
            .contracts_for(config.network)
            .map_err(|e| Abort::new(Stage::Validating, e))?;

        observe(Stage::GuardChecking);
        let decision =
            guard::check_target(target, self.force).map_err(|e| Abort::new(Stage::GuardChecking, e))?;
        if let Decision::Reject(reason) = decision {
            tracing::info!("target rejected: {reason}");
            return Err(Abort::new(
                Stage::GuardChecking,
                ScaffoldError::TargetRejected {
                    path: target.to_path_buf(),
                    reason,
                },
            ));
        }
        let staged = !target.exists()
            || guard::is_dir_empty(target).map_err(|e| Abort::new(Stage::GuardChecking, e))?;
        let in_place = !staged;

        let staging = if staged {
            Some(create_staging(target).map_err(|e| Abort::new(Stage::Rendering, e))?)
        } else {
            tracing::warn!(
                "merging into non-empty {} without staging",
                target.display()
            );
            None
        };
        let workdir = match &staging {
            Some(dir) => dir.path().join(staged_name(target)),
            None => target.to_path_buf(),
        };

        observe(Stage::Rendering);
        let rendered = match tree_override {
            None => self
                .renderer
                .render_project(config, &contracts, network, &workdir),
            Some(tree) => {
                let context =
                    TemplateContext::new(&config.project_name, config.template, network, &contracts);
                self.renderer.render_tree(tree, &context, &workdir)
            }
        }
        .map_err(|e| Abort::partial(Stage::Rendering, e, in_place))?;

        observe(Stage::WritingArtifacts);
        let generated = artifacts::write_all(&workdir, config, &contracts, network)
            .map_err(|e| Abort::partial(Stage::WritingArtifacts, e, in_place))?;

        if staging.is_some() {
            commit(&workdir, target).map_err(|e| Abort::new(Stage::WritingArtifacts, e))?;
        }
        drop(staging);

        observe(Stage::Done);
        tracing::info!(
            "scaffolded {} files into {}",
            rendered + generated,
            target.display()
        );
        Ok(ScaffoldResult {
            target_path: target.to_path_buf(),
            files_written: rendered + generated,
            network: config.network,
            template: config.template,
            credential_masked: config.credential_masked(),
            staged,
        })
    }
}

fn parent_dir(target: &Path) -> &Path {
    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

fn staged_name(target: &Path) -> &std::ffi::OsStr {
    target
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("project"))
}

/// Hidden temporary directory next to `target`, on the same filesystem so the
/// final rename is atomic.
fn create_staging(target: &Path) -> Result<tempfile::TempDir, ScaffoldError> {
    let parent = parent_dir(target);
    std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::fs(parent, e))?;
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| ScaffoldError::fs(parent, e))?;
    tracing::debug!("staging into {}", staging.path().display());
    Ok(staging)
}

/// Move the staged project onto `target`. On unix `rename` atomically replaces an
/// empty directory; elsewhere the empty target has to be removed first.
fn commit(staged: &Path, target: &Path) -> Result<(), ScaffoldError> {
    if cfg!(windows) && target.exists() {
        std::fs::remove_dir(target).map_err(|e| ScaffoldError::fs(target, e))?;
    }
    std::fs::rename(staged, target).map_err(|e| ScaffoldError::fs(target, e))
}
