//! Core library for the story-dev scaffolder.
//!
//! Turns a validated [`project::ProjectConfig`] into a ready-to-run Story Protocol
//! project on disk. The pieces, leaf-first:
//!
//! - [`validate`] — structural checks on the project name and private key
//! - [`network`] / [`contracts`] — fixed chain metadata and protocol addresses
//! - [`guard`] — decides whether a target directory may be written to
//! - [`templates`] — bundled template trees and the Handlebars renderer
//! - [`artifacts`] — `.gitignore`, `.env.example` and `.env` generation
//! - [`scaffold`] — sequences all of the above and reports a [`project::ScaffoldResult`]
//!
//! The engine is synchronous and holds no global mutable state; the registry and
//! the embedded templates are immutable and safe to share between runs.

pub mod artifacts;
pub mod config;
pub mod contracts;
pub mod error;
pub mod guard;
pub mod network;
pub mod project;
pub mod scaffold;
pub mod templates;
pub mod validate;
