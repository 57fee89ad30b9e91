//! `shiprail changelog`: print one changelog section

use crate::core::context::ReleaseContext;
use crate::core::error::{RailError, RailResult};
use crate::release::changelog;
use crate::release::markdown::to_markdown;
use crate::release::ReleaseVersion;

/// Run the changelog command
pub fn run_changelog(ctx: &ReleaseContext, version: Option<String>, markdown: bool) -> RailResult<()> {
  let version = match version {
    Some(raw) => ReleaseVersion::parse(&raw).ok_or_else(|| {
      RailError::with_help(
        format!("Invalid version format '{}'. Expected semver (e.g., 1.2.3)", raw),
        "Omit the version to use the version file",
      )
    })?,
    None => ReleaseVersion::resolve(&ctx.version_path())?,
  };

  let section = changelog::load_section(&ctx.changelog_path(), version.as_str())?;
  if markdown {
    println!("{}", to_markdown(&section));
  } else {
    println!("{}", section);
  }

  Ok(())
}
