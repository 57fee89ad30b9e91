//! Version progression warning
//!
//! Releasing a version that is not newer than the latest `vX.Y.Z` tag is
//! almost always a forgotten version bump, but it can be intentional
//! (backporting a fix to an older line), so it only warns.

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::RailResult;
use crate::release::tags::latest_release_tag;

pub struct VersionProgressionCheck;

impl Check for VersionProgressionCheck {
  fn name(&self) -> &str {
    "version-progression"
  }

  fn description(&self) -> &str {
    "Warns when the version is not newer than the latest release tag"
  }

  fn run(&self, ctx: &CheckContext) -> RailResult<CheckResult> {
    let tags = ctx.vcs.list_tags()?;

    let Some((latest_tag, latest)) = latest_release_tag(&tags) else {
      return Ok(CheckResult::pass(self.name(), "No previous release tags"));
    };

    if ctx.version.semver() > latest.semver() {
      return Ok(CheckResult::pass(
        self.name(),
        format!("Version {} follows {}", ctx.version, latest_tag),
      ));
    }

    Ok(
      CheckResult::warning(
        self.name(),
        format!(
          "Version {} is not newer than the latest release {}",
          ctx.version, latest_tag
        ),
      )
      .with_suggestion("Bump the version file unless this release is a backport"),
    )
  }
}
