//! Release preflight checks
//!
//! All checks implement the `Check` trait and run in a fixed order through a
//! `PreflightRunner`. A failed check stops the run before anything is tagged
//! or built.
//!
//! # Built-in Checks
//!
//! - **working-tree**: No uncommitted or untracked changes
//! - **unpushed-commits**: Warns (and optionally pushes) when the branch is ahead of the remote
//! - **tag-absent**: The release tag does not exist yet
//! - **hosting-cli**: The hosting CLI is installed and authenticated
//! - **version-progression**: Warns when the version is not newer than the latest release tag

mod hosting_cli;
mod runner;
mod tag_absent;
mod trait_def;
mod unpushed;
mod version_progression;
mod working_tree;

pub use runner::{PreflightReport, create_default_runner, format_result};
pub use trait_def::{CheckContext, PushPolicy};
