//! `VersionControl` operations for SystemGit (status, upstream comparison, tags, push)

use super::system_git::SystemGit;
use super::{UpstreamComparison, VersionControl};
use crate::core::error::{GitError, RailError, RailResult};

impl SystemGit {
  fn push(&self, remote: &str, refspec: &str) -> RailResult<()> {
    let output = self.run(&["push", remote, refspec])?;

    if !output.success() {
      return Err(RailError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        refspec: refspec.to_string(),
        reason: output.stderr,
      }));
    }

    Ok(())
  }
}

impl VersionControl for SystemGit {
  fn status_porcelain(&self) -> RailResult<Vec<String>> {
    Ok(self.run_ok(&["status", "--porcelain"])?.stdout_lines())
  }

  fn current_branch(&self) -> RailResult<String> {
    let output = self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;

    if !output.success() {
      return Ok("HEAD".to_string()); // Unborn or detached HEAD
    }

    Ok(output.stdout_trimmed().to_string())
  }

  fn compare_with_upstream(&self, remote: &str, branch: &str) -> UpstreamComparison {
    let range = format!("{}/{}..HEAD", remote, branch);
    match self.run(&["log", &range, "--oneline"]) {
      Ok(output) if output.success() => {
        let commits = output.stdout_lines();
        if commits.is_empty() {
          UpstreamComparison::UpToDate
        } else {
          UpstreamComparison::Ahead(commits)
        }
      }
      Ok(output) => UpstreamComparison::Unavailable(output.stderr.trim().to_string()),
      Err(err) => UpstreamComparison::Unavailable(err.to_string()),
    }
  }

  fn push_branch(&self, remote: &str, branch: &str) -> RailResult<()> {
    self.push(remote, branch)
  }

  fn list_tags(&self) -> RailResult<Vec<String>> {
    Ok(self.run_ok(&["tag", "--list"])?.stdout_lines())
  }

  fn tag_exists(&self, tag: &str) -> RailResult<bool> {
    let output = self.run_ok(&["tag", "--list", tag])?;
    Ok(output.stdout_lines().iter().any(|t| t == tag))
  }

  fn create_tag(&self, tag: &str) -> RailResult<()> {
    self.run_ok(&["tag", tag])?;
    Ok(())
  }

  fn push_tag(&self, remote: &str, tag: &str) -> RailResult<()> {
    self.push(remote, &format!("refs/tags/{}", tag))
  }

  fn delete_tag(&self, tag: &str) -> RailResult<()> {
    self.run_ok(&["tag", "-d", tag])?;
    Ok(())
  }

  fn delete_remote_tag(&self, remote: &str, tag: &str) -> RailResult<()> {
    self.push(remote, &format!(":refs/tags/{}", tag))
  }

  fn remote_url(&self, remote: &str) -> RailResult<Option<String>> {
    let key = format!("remote.{}.url", remote);
    let output = self.run(&["config", "--get", &key])?;

    if !output.success() {
      return Ok(None); // Exit 1: key not set
    }

    Ok(Some(output.stdout_trimmed().to_string()))
  }
}
