//! Project configuration and scaffold results.
//!
//! A [`ProjectConfig`] is built once per invocation (from prompts or flags), handed
//! to [`crate::scaffold::Scaffolder`] and dropped after the run.

use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, ScaffoldError};
use crate::network::Network;
use crate::templates::TemplateId;
use crate::validate::{mask_credential, validate_credential, validate_project_name};

/// Longest accepted project name, in bytes. Matches the npm package-name limit
/// since the name ends up in the generated `package.json`.
pub const MAX_PROJECT_NAME_LEN: usize = 214;

/// Everything needed to scaffold one project.
#[derive(Clone)]
pub struct ProjectConfig {
    pub project_name: String,
    pub template: TemplateId,
    pub network: Network,
    /// Raw private key. Only ever written to the secrets file.
    pub credential: String,
    pub target_path: PathBuf,
}

impl ProjectConfig {
    /// Structural validation. Touches nothing on disk.
    pub fn validate(&self) -> Result<()> {
        if !validate_project_name(&self.project_name) {
            return Err(ScaffoldError::InvalidProjectName(self.project_name.clone()));
        }
        if self.project_name.len() > MAX_PROJECT_NAME_LEN {
            return Err(ScaffoldError::ProjectNameTooLong {
                len: self.project_name.len(),
                max: MAX_PROJECT_NAME_LEN,
            });
        }
        if !validate_credential(&self.credential) {
            return Err(ScaffoldError::InvalidCredential);
        }
        self.template.ensure_available()?;
        Ok(())
    }

    pub fn credential_masked(&self) -> String {
        mask_credential(&self.credential)
    }
}

// Hand-written so the raw key never reaches logs.
impl fmt::Debug for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectConfig")
            .field("project_name", &self.project_name)
            .field("template", &self.template)
            .field("network", &self.network)
            .field("credential", &self.credential_masked())
            .field("target_path", &self.target_path)
            .finish()
    }
}

/// Summary of a successful scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldResult {
    pub target_path: PathBuf,
    /// Template files plus generated artifacts.
    pub files_written: usize,
    pub network: Network,
    pub template: TemplateId,
    pub credential_masked: String,
    /// Whether output was staged and moved into place in one rename.
    pub staged: bool,
}
