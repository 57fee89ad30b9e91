//! `shiprail notes`: preview the release notes

use crate::core::context::ReleaseContext;
use crate::core::error::RailResult;
use crate::release::changelog;
use crate::release::markdown::to_markdown;
use crate::release::notes::render_release_notes;
use crate::release::ReleaseVersion;

/// Run the notes command
///
/// Nothing is built, so the checksum section is omitted.
pub fn run_notes(ctx: &ReleaseContext) -> RailResult<()> {
  let version = ReleaseVersion::resolve(&ctx.version_path())?;
  let section = changelog::load_section(&ctx.changelog_path(), version.as_str())?;

  print!("{}", render_release_notes(&ctx.product, &version, &to_markdown(&section), &[]));
  Ok(())
}
