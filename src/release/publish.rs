//! Release publishing with compensating rollback
//!
//! Publishing happens in two steps so the pipeline can record the state in
//! between:
//!
//! 1. [`ReleasePublisher::push_tag`] creates `v<version>` locally and pushes
//!    it. A failed push leaves the local tag in place; retrying the push is up
//!    to the operator.
//! 2. [`ReleasePublisher::create_release`] writes the notes to a temporary
//!    file and asks the hosting platform for the release. If that fails, the
//!    tag is deleted locally (required) and remotely (best-effort).

use crate::core::error::{PublishError, RailResult, RollbackReport};
use crate::core::hosting::{HostingPlatform, ReleaseRequest};
use crate::core::vcs::VersionControl;
use crate::release::build::Artifact;
use crate::release::version::ReleaseVersion;
use crate::utils;
use std::io::Write;

/// Tags and publishes one release
pub struct ReleasePublisher<'a> {
  vcs: &'a dyn VersionControl,
  hosting: &'a dyn HostingPlatform,
  remote: &'a str,
  product: &'a str,
  quiet: bool,
}

impl<'a> ReleasePublisher<'a> {
  pub fn new(
    vcs: &'a dyn VersionControl,
    hosting: &'a dyn HostingPlatform,
    remote: &'a str,
    product: &'a str,
  ) -> Self {
    Self {
      vcs,
      hosting,
      remote,
      product,
      quiet: false,
    }
  }

  pub fn quiet(mut self, quiet: bool) -> Self {
    self.quiet = quiet;
    self
  }

  fn say(&self, line: &str) {
    if !self.quiet {
      println!("{}", line);
    }
  }

  /// Create the release tag and push it to the remote
  pub fn push_tag(&self, version: &ReleaseVersion) -> RailResult<String> {
    let tag = version.tag();

    self.say(&format!("ℹ️  Creating git tag '{}'...", tag));
    self
      .vcs
      .create_tag(&tag)
      .map_err(|e| PublishError::TagCreateFailed {
        tag: tag.clone(),
        reason: e.to_string(),
      })?;

    self.say(&format!("ℹ️  Pushing tag to {}...", self.remote));
    self.vcs.push_tag(self.remote, &tag).map_err(|e| {
      tracing::error!(tag = %tag, remote = self.remote, error = %e, "tag push failed; local tag kept");
      PublishError::TagPushFailed {
        tag: tag.clone(),
        remote: self.remote.to_string(),
        reason: e.to_string(),
      }
    })?;

    self.say(&format!("✅ Tag '{}' pushed to {}", tag, self.remote));
    Ok(tag)
  }

  /// Create the hosted release for an already pushed tag
  ///
  /// The notes file is removed when this returns, whatever the outcome.
  pub fn create_release(&self, version: &ReleaseVersion, notes: &str, artifacts: &[Artifact]) -> RailResult<()> {
    let tag = version.tag();

    let mut notes_file = tempfile::Builder::new()
      .prefix("shiprail-notes-")
      .suffix(".md")
      .tempfile()?;
    notes_file.write_all(notes.as_bytes())?;
    notes_file.flush()?;

    let request = ReleaseRequest {
      tag: tag.clone(),
      title: format!("{} v{}", self.product, version),
      notes_file: notes_file.path().to_path_buf(),
      artifacts: artifacts.iter().map(|a| a.path.clone()).collect(),
      latest: true,
    };

    self.say(&format!("ℹ️  Creating release with `{}`...", self.hosting.tool_name()));
    let Err(reason) = self.hosting.create_release(&request) else {
      return Ok(());
    };

    tracing::error!(tag = %tag, reason = %reason.trim_end(), "release creation failed; rolling back tag");
    let rollback = self.rollback(&tag);
    Err(PublishError::ReleaseCreateFailed { tag, reason, rollback }.into())
  }

  /// Delete the tag locally, then try to delete it on the remote
  pub fn rollback(&self, tag: &str) -> RollbackReport {
    self.say("ℹ️  Cleaning up tag...");

    let mut report = RollbackReport {
      local_tag_deleted: false,
      remote_tag_deleted: false,
      local_error: None,
      remote_error: None,
    };

    match self.vcs.delete_tag(tag) {
      Ok(()) => report.local_tag_deleted = true,
      Err(e) => {
        tracing::error!(tag, error = %e, "could not delete local tag during rollback");
        report.local_error = Some(e.to_string());
      }
    }

    match self.vcs.delete_remote_tag(self.remote, tag) {
      Ok(()) => report.remote_tag_deleted = true,
      Err(e) => {
        tracing::warn!(tag, remote = self.remote, error = %e, "could not delete remote tag during rollback");
        self.say(&format!("⚠️  Could not delete remote tag '{}' on {}", tag, self.remote));
        report.remote_error = Some(e.to_string());
      }
    }

    report
  }

  /// Browser URL of the release, with a placeholder slug when the remote URL
  /// is not a hosting URL
  pub fn release_url(&self, host: &str, tag: &str) -> String {
    let slug = match self.vcs.remote_url(self.remote) {
      Ok(Some(url)) => utils::repo_slug(&url, host),
      Ok(None) => None,
      Err(e) => {
        tracing::debug!(error = %e, "could not read remote url");
        None
      }
    };

    utils::release_url(host, slug.as_deref().unwrap_or(utils::UNKNOWN_SLUG), tag)
  }
}
