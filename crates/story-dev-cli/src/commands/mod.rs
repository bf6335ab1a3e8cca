//! CLI command implementations for story-dev.
//!
//! Each module corresponds to a subcommand (`story-dev <command>`).

pub mod create;
pub mod networks;
