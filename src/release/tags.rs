//! Release tag names (`v<MAJOR.MINOR.PATCH>`)

use crate::release::version::ReleaseVersion;

/// Parse a release tag such as `v1.2.3`
///
/// Tags with any other shape (`nightly`, `v1.2`, `v1.2.3-rc.1`) are not
/// release tags and yield `None`.
pub fn parse_release_tag(tag: &str) -> Option<ReleaseVersion> {
  let version = tag.strip_prefix('v')?;
  if version.trim() != version {
    return None;
  }
  ReleaseVersion::parse(version)
}

/// Highest release tag by semver ordering
pub fn latest_release_tag(tags: &[String]) -> Option<(String, ReleaseVersion)> {
  tags
    .iter()
    .filter_map(|tag| parse_release_tag(tag).map(|version| (tag.clone(), version)))
    .max_by(|(_, a), (_, b)| a.semver().cmp(b.semver()))
}
