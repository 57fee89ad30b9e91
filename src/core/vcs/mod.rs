pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

use crate::core::error::RailResult;

/// Result of comparing the current branch with its upstream on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamComparison {
  /// Upstream contains every local commit
  UpToDate,
  /// Local commits missing from the upstream (`--oneline` form, newest first)
  Ahead(Vec<String>),
  /// Comparison could not run (no upstream ref, detached HEAD, git error)
  Unavailable(String),
}

/// Version-control operations the release pipeline depends on
///
/// `SystemGit` is the production implementation; tests substitute fakes so the
/// pipeline can be exercised without a repository or a remote.
pub trait VersionControl {
  /// `git status --porcelain` entries, one per changed path
  fn status_porcelain(&self) -> RailResult<Vec<String>>;

  /// Current branch name (`HEAD` when detached)
  fn current_branch(&self) -> RailResult<String>;

  /// Commits on `branch` not yet on `remote/branch`
  fn compare_with_upstream(&self, remote: &str, branch: &str) -> UpstreamComparison;

  /// Push `branch` to `remote`
  fn push_branch(&self, remote: &str, branch: &str) -> RailResult<()>;

  /// All local tag names
  fn list_tags(&self) -> RailResult<Vec<String>>;

  /// Whether a local tag with exactly this name exists
  fn tag_exists(&self, tag: &str) -> RailResult<bool>;

  /// Create a lightweight tag at HEAD
  fn create_tag(&self, tag: &str) -> RailResult<()>;

  /// Push a single tag to `remote`
  fn push_tag(&self, remote: &str, tag: &str) -> RailResult<()>;

  /// Delete a local tag
  fn delete_tag(&self, tag: &str) -> RailResult<()>;

  /// Delete a tag on `remote`
  fn delete_remote_tag(&self, remote: &str, tag: &str) -> RailResult<()>;

  /// Configured URL of `remote`, if any
  fn remote_url(&self, remote: &str) -> RailResult<Option<String>>;
}
