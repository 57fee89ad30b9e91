//! Core engine for shiprail
//!
//! - **config**: shiprail.toml parsing with defaults
//! - **context**: Per-invocation release context (root, config, product)
//! - **error**: Categorized error types with contextual help messages and exit codes
//! - **hosting**: Hosting platform abstraction (gh CLI)
//! - **process**: Captured subprocess execution for every external tool
//! - **vcs**: Git operations abstraction (SystemGit)

pub mod config;
pub mod context;
pub mod error;
pub mod hosting;
pub mod process;
pub mod vcs;
