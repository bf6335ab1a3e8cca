//! Unified error types for the story-dev scaffolder.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur while scaffolding a project.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    // --- Validation ---

    /// The project name is empty or contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid project name '{0}': use letters, digits, hyphens and underscores only")]
    InvalidProjectName(String),

    /// The project name exceeds the accepted length.
    #[error("project name is {len} bytes long (max {max})")]
    ProjectNameTooLong { len: usize, max: usize },

    /// The private key is not 64 hex characters (optionally `0x`-prefixed).
    #[error("invalid private key format: must be 64 hex characters (with or without 0x prefix)")]
    InvalidCredential,

    /// The template id is known but has no bundled template tree yet.
    #[error("template '{0}' is not yet available (available: registration)")]
    TemplateUnavailable(String),

    /// The template id is not one of: `registration`, `licensing`, `royalty`.
    #[error("unknown template: {0} (supported: registration, licensing, royalty)")]
    UnknownTemplate(String),

    /// The network id is not one of: `mainnet`, `testnet`.
    #[error("unknown network: {0} (supported: mainnet, testnet)")]
    UnknownNetwork(String),

    // --- Preconditions ---

    /// The directory guard refused the target path.
    #[error("{reason}: {path}")]
    TargetRejected { path: PathBuf, reason: String },

    // --- Configuration ---

    /// The tool configuration file was not found or could not be read.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A contract override names a contract that is not part of the protocol set.
    #[error("unknown contract in config: {0}")]
    UnknownContract(String),

    /// A contract override is not a `0x`-prefixed 20-byte hex address.
    #[error("invalid address for {contract}: {address}")]
    InvalidAddress { contract: String, address: String },

    // --- Templates ---

    /// Handlebars rendering failed (unknown token or malformed template).
    #[error("failed to render template file {path}: {message}")]
    TemplateRender { path: String, message: String },

    /// A file marked for rendering is not valid UTF-8.
    #[error("template file {0} is marked for rendering but is not valid UTF-8")]
    TemplateEncoding(String),

    // --- General ---

    /// A filesystem operation failed on a specific path.
    #[error("I/O error at {path}: {error}")]
    Fs { path: PathBuf, error: std::io::Error },
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Fs {
            path: path.into(),
            error,
        }
    }

    /// Whether the error was detected before any filesystem access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidProjectName(_)
                | Self::ProjectNameTooLong { .. }
                | Self::InvalidCredential
                | Self::TemplateUnavailable(_)
                | Self::UnknownTemplate(_)
                | Self::UnknownNetwork(_)
        )
    }
}

/// Alias for `Result<T, ScaffoldError>`.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
