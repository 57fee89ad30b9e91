//! Working tree cleanliness check

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::{PreflightError, RailResult};

/// Fails when tracked or untracked changes are pending
pub struct WorkingTreeCheck;

impl Check for WorkingTreeCheck {
  fn name(&self) -> &str {
    "working-tree"
  }

  fn description(&self) -> &str {
    "Validates that the working directory is clean"
  }

  fn run(&self, ctx: &CheckContext) -> RailResult<CheckResult> {
    let changes = ctx.vcs.status_porcelain()?;

    if changes.is_empty() {
      return Ok(CheckResult::pass(self.name(), "Working directory is clean"));
    }

    Ok(
      CheckResult::failed(
        self.name(),
        PreflightError::DirtyWorkingTree {
          changes: changes.clone(),
        },
      )
      .with_details(changes),
    )
  }
}
