//! `shiprail init`: write a default shiprail.toml

use crate::core::config::ShipConfig;
use crate::core::error::{ConfigError, RailError, RailResult};
use crate::core::vcs::SystemGit;
use std::path::Path;

/// Run the init command
///
/// Writes to the repository root when `start` is inside a git repository,
/// otherwise to `start` itself.
pub fn run_init(start: &Path, force: bool) -> RailResult<()> {
  let root = match SystemGit::open(start) {
    Ok(git) => git.work_tree().to_path_buf(),
    Err(_) => start.to_path_buf(),
  };

  if let Some(existing) = ShipConfig::find_config_path(&root)
    && !force
  {
    return Err(RailError::Config(ConfigError::AlreadyExists { path: existing }));
  }

  let config = ShipConfig {
    product: Some(ShipConfig::default().product_name(&root)),
    ..ShipConfig::default()
  };
  let path = config.save(&root)?;

  println!("✅ Wrote {}", path.display());
  println!();
  println!("Next steps:");
  println!("  1. Review the [build] command for your toolchain");
  println!("  2. Add a `Version X.Y.Z` section to {}", config.changelog.display());
  println!("  3. Run: shiprail check");
  Ok(())
}
