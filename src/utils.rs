//! Utility functions for remote URL handling

use regex::Regex;

/// Placeholder used when the remote URL is not a recognizable hosting URL
pub const UNKNOWN_SLUG: &str = "OWNER/REPO";

/// Extract `owner/repo` from a remote URL on `host`
///
/// Handles SSH (`git@github.com:owner/repo.git`) and HTTPS
/// (`https://github.com/owner/repo`) forms. Returns `None` for anything else.
pub fn repo_slug(url: &str, host: &str) -> Option<String> {
  let pattern = format!(r"{}[:/]([^/]+/[^/]+?)(\.git)?$", regex::escape(host));
  let re = Regex::new(&pattern).ok()?;
  re.captures(url.trim()).map(|caps| caps[1].to_string())
}

/// Browser URL of a published release
pub fn release_url(host: &str, slug: &str, tag: &str) -> String {
  format!("https://{}/{}/releases/tag/{}", host, slug, tag)
}
