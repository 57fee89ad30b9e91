//! Release tag must not exist yet

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::{PreflightError, RailResult};

/// Fails when `v<version>` is already tagged locally
pub struct TagAbsentCheck;

impl Check for TagAbsentCheck {
  fn name(&self) -> &str {
    "tag-absent"
  }

  fn description(&self) -> &str {
    "Validates that the release tag does not exist yet"
  }

  fn run(&self, ctx: &CheckContext) -> RailResult<CheckResult> {
    let tag = ctx.version.tag();

    if ctx.vcs.tag_exists(&tag)? {
      return Ok(CheckResult::failed(self.name(), PreflightError::TagAlreadyExists { tag }));
    }

    Ok(CheckResult::pass(self.name(), format!("Tag '{}' does not exist", tag)))
  }
}
