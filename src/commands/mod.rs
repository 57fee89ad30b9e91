//! CLI commands for shiprail
//!
//! - **release**: Validate, check, build and publish a release
//! - **check**: Run the read-only stages (version, changelog, preflight)
//! - **changelog**: Print a changelog section
//! - **notes**: Preview the release notes
//! - **init**: Write a default shiprail.toml
//!
//! Every command except `init` receives the `ReleaseContext` built once in main.rs.

pub mod changelog;
pub mod check;
pub mod init;
pub mod notes;
pub mod release;

pub use changelog::run_changelog;
pub use check::run_check;
pub use init::run_init;
pub use notes::run_notes;
pub use release::run_release;
