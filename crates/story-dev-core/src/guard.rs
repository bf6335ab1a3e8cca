//! Target directory safety check.
//!
//! The check and the later writes are separate filesystem operations, so another
//! process can populate the directory in between. The scaffolder is a single-user
//! CLI and does not try to close that window.

use std::path::Path;

use crate::error::{Result, ScaffoldError};

pub const REASON_NOT_EMPTY: &str = "target directory is not empty";
pub const REASON_NOT_A_DIRECTORY: &str = "target path exists and is not a directory";

/// Outcome of [`check_target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Reject(String),
}

impl Decision {
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Decide whether `target` may be written to.
///
/// - absent: proceed (it will be created)
/// - empty directory: proceed
/// - non-empty directory: proceed only with `force`; existing files that collide
///   with template paths are overwritten, everything else is left alone
/// - anything that is not a directory: reject, even with `force`
///
/// I/O errors while inspecting the path are returned as errors, not decisions.
pub fn check_target(target: &Path, force: bool) -> Result<Decision> {
    let metadata = match std::fs::metadata(target) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Decision::Proceed),
        Err(e) => return Err(ScaffoldError::fs(target, e)),
    };

    if !metadata.is_dir() {
        return Ok(Decision::Reject(REASON_NOT_A_DIRECTORY.into()));
    }

    if is_dir_empty(target)? || force {
        return Ok(Decision::Proceed);
    }

    Ok(Decision::Reject(REASON_NOT_EMPTY.into()))
}

/// Whether `dir` has no entries. Hidden files count as entries.
pub fn is_dir_empty(dir: &Path) -> Result<bool> {
    let mut entries = std::fs::read_dir(dir).map_err(|e| ScaffoldError::fs(dir, e))?;
    Ok(entries.next().is_none())
}
