//! Release context - resolved once in main.rs, passed to every command
//!
//! Holds the repository root, the loaded configuration and the resolved
//! product name so commands never re-read `shiprail.toml`.

use crate::core::config::ShipConfig;
use crate::core::error::RailResult;
use crate::core::vcs::SystemGit;
use std::path::{Path, PathBuf};

/// Shared per-invocation state
#[derive(Debug, Clone)]
pub struct ReleaseContext {
  /// Repository root (git work tree)
  pub root: PathBuf,

  /// Loaded configuration (defaults when no file exists)
  pub config: ShipConfig,

  /// Resolved product name
  pub product: String,
}

impl ReleaseContext {
  /// Build the context from any directory inside a git repository
  pub fn build(start: &Path) -> RailResult<Self> {
    let git = SystemGit::open(start)?;
    Self::at_root(git.work_tree())
  }

  /// Build the context for a known repository root
  pub fn at_root(root: &Path) -> RailResult<Self> {
    let config = ShipConfig::load(root)?;
    let product = config.product_name(root);
    Ok(Self {
      root: root.to_path_buf(),
      config,
      product,
    })
  }

  /// Absolute path of the version file
  pub fn version_path(&self) -> PathBuf {
    self.root.join(&self.config.version_file)
  }

  /// Absolute path of the changelog document
  pub fn changelog_path(&self) -> PathBuf {
    self.root.join(&self.config.changelog)
  }

  /// Absolute path of the dist directory
  pub fn dist_path(&self) -> PathBuf {
    self.root.join(&self.config.dist_dir)
  }
}
