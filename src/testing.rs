//! In-memory collaborators for unit tests
//!
//! Each fake records the calls it receives so tests can assert on what the
//! pipeline did (and did not) do.

use crate::checks::{CheckContext, PushPolicy};
use crate::core::config::ShipConfig;
use crate::core::context::ReleaseContext;
use crate::core::error::{GitError, RailError, RailResult};
use crate::core::hosting::{HostingPlatform, ReleaseRequest};
use crate::core::vcs::{UpstreamComparison, VersionControl};
use crate::release::build::Toolchain;
use crate::release::matrix::BuildTarget;
use crate::release::version::ReleaseVersion;
use crate::ui::Prompt;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

fn git_failure(command: String) -> RailError {
  RailError::Git(GitError::CommandFailed {
    command,
    stderr: "simulated failure".to_string(),
  })
}

/// Repository with local and remote tag sets
pub struct FakeGit {
  pub status: Vec<String>,
  pub branch: String,
  pub upstream: UpstreamComparison,
  pub remote_url: Option<String>,
  pub fail_push_branch: bool,
  pub fail_push_tag: bool,
  pub fail_delete_tag: bool,
  pub fail_delete_remote_tag: bool,
  tags: RefCell<Vec<String>>,
  remote_tags: RefCell<Vec<String>>,
  calls: RefCell<Vec<String>>,
}

impl FakeGit {
  /// Clean `main` branch, up to date with `origin`, no tags
  pub fn clean() -> Self {
    Self {
      status: Vec::new(),
      branch: "main".to_string(),
      upstream: UpstreamComparison::UpToDate,
      remote_url: Some("git@github.com:acme/product.git".to_string()),
      fail_push_branch: false,
      fail_push_tag: false,
      fail_delete_tag: false,
      fail_delete_remote_tag: false,
      tags: RefCell::new(Vec::new()),
      remote_tags: RefCell::new(Vec::new()),
      calls: RefCell::new(Vec::new()),
    }
  }

  pub fn dirty(mut self, changes: &[&str]) -> Self {
    self.status = changes.iter().map(|s| s.to_string()).collect();
    self
  }

  pub fn ahead(self, commits: &[&str]) -> Self {
    self.upstream(UpstreamComparison::Ahead(commits.iter().map(|s| s.to_string()).collect()))
  }

  pub fn upstream(mut self, upstream: UpstreamComparison) -> Self {
    self.upstream = upstream;
    self
  }

  pub fn with_tags(self, tags: &[&str]) -> Self {
    self.tags.borrow_mut().extend(tags.iter().map(|s| s.to_string()));
    self
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }

  pub fn local_tags(&self) -> Vec<String> {
    self.tags.borrow().clone()
  }

  pub fn remote_tags(&self) -> Vec<String> {
    self.remote_tags.borrow().clone()
  }

  fn record(&self, call: String) {
    self.calls.borrow_mut().push(call);
  }
}

impl VersionControl for FakeGit {
  fn status_porcelain(&self) -> RailResult<Vec<String>> {
    self.record("status".to_string());
    Ok(self.status.clone())
  }

  fn current_branch(&self) -> RailResult<String> {
    self.record("current_branch".to_string());
    Ok(self.branch.clone())
  }

  fn compare_with_upstream(&self, remote: &str, branch: &str) -> UpstreamComparison {
    self.record(format!("compare {}/{}", remote, branch));
    self.upstream.clone()
  }

  fn push_branch(&self, remote: &str, branch: &str) -> RailResult<()> {
    self.record(format!("push_branch {} {}", remote, branch));
    if self.fail_push_branch {
      return Err(RailError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        refspec: branch.to_string(),
        reason: "rejected".to_string(),
      }));
    }
    Ok(())
  }

  fn list_tags(&self) -> RailResult<Vec<String>> {
    self.record("list_tags".to_string());
    Ok(self.local_tags())
  }

  fn tag_exists(&self, tag: &str) -> RailResult<bool> {
    self.record(format!("tag_exists {}", tag));
    Ok(self.tags.borrow().iter().any(|t| t == tag))
  }

  fn create_tag(&self, tag: &str) -> RailResult<()> {
    self.record(format!("create_tag {}", tag));
    self.tags.borrow_mut().push(tag.to_string());
    Ok(())
  }

  fn push_tag(&self, remote: &str, tag: &str) -> RailResult<()> {
    self.record(format!("push_tag {} {}", remote, tag));
    if self.fail_push_tag {
      return Err(RailError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        refspec: format!("refs/tags/{}", tag),
        reason: "connection refused".to_string(),
      }));
    }
    self.remote_tags.borrow_mut().push(tag.to_string());
    Ok(())
  }

  fn delete_tag(&self, tag: &str) -> RailResult<()> {
    self.record(format!("delete_tag {}", tag));
    if self.fail_delete_tag {
      return Err(git_failure(format!("git tag -d {}", tag)));
    }
    self.tags.borrow_mut().retain(|t| t != tag);
    Ok(())
  }

  fn delete_remote_tag(&self, remote: &str, tag: &str) -> RailResult<()> {
    self.record(format!("delete_remote_tag {} {}", remote, tag));
    if self.fail_delete_remote_tag {
      return Err(git_failure(format!("git push {} :refs/tags/{}", remote, tag)));
    }
    self.remote_tags.borrow_mut().retain(|t| t != tag);
    Ok(())
  }

  fn remote_url(&self, _remote: &str) -> RailResult<Option<String>> {
    Ok(self.remote_url.clone())
  }
}

/// Hosting CLI that records release requests and the notes they pointed at
pub struct FakeHosting {
  installed: bool,
  authenticated: bool,
  fail_with: Option<String>,
  probes: Cell<usize>,
  requests: RefCell<Vec<ReleaseRequest>>,
  notes: RefCell<Vec<String>>,
}

impl FakeHosting {
  fn with_state(installed: bool, authenticated: bool) -> Self {
    Self {
      installed,
      authenticated,
      fail_with: None,
      probes: Cell::new(0),
      requests: RefCell::new(Vec::new()),
      notes: RefCell::new(Vec::new()),
    }
  }

  pub fn ready() -> Self {
    Self::with_state(true, true)
  }

  pub fn missing() -> Self {
    Self::with_state(false, false)
  }

  pub fn logged_out() -> Self {
    Self::with_state(true, false)
  }

  pub fn failing_with(mut self, stderr: &str) -> Self {
    self.fail_with = Some(stderr.to_string());
    self
  }

  /// Number of installed/authenticated probes
  pub fn probes(&self) -> usize {
    self.probes.get()
  }

  pub fn requests(&self) -> Vec<ReleaseRequest> {
    self.requests.borrow().clone()
  }

  pub fn notes(&self) -> Vec<String> {
    self.notes.borrow().clone()
  }
}

impl HostingPlatform for FakeHosting {
  fn tool_name(&self) -> &str {
    "gh"
  }

  fn is_installed(&self) -> bool {
    self.probes.set(self.probes.get() + 1);
    self.installed
  }

  fn is_authenticated(&self) -> bool {
    self.probes.set(self.probes.get() + 1);
    self.authenticated
  }

  fn create_release(&self, request: &ReleaseRequest) -> Result<(), String> {
    let notes = fs::read_to_string(&request.notes_file).map_err(|e| e.to_string())?;
    self.notes.borrow_mut().push(notes);
    self.requests.borrow_mut().push(request.clone());

    match &self.fail_with {
      Some(stderr) => Err(stderr.clone()),
      None => Ok(()),
    }
  }
}

/// Toolchain writing a small placeholder binary per target
#[derive(Default)]
pub struct FakeToolchain {
  fail_on: Option<String>,
  calls: Mutex<Vec<String>>,
}

impl FakeToolchain {
  pub fn failing_on(target: &str) -> Self {
    Self {
      fail_on: Some(target.to_string()),
      ..Self::default()
    }
  }

  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().map(|c| c.clone()).unwrap_or_default()
  }
}

impl Toolchain for FakeToolchain {
  fn build(&self, target: &BuildTarget, output: &Path) -> Result<(), String> {
    let name = target.to_string();
    if let Ok(mut calls) = self.calls.lock() {
      calls.push(name.clone());
    }

    if self.fail_on.as_deref() == Some(name.as_str()) {
      return Err(format!("compile error for {}", name));
    }
    fs::write(output, format!("binary for {}", name)).map_err(|e| e.to_string())
  }
}

/// Prompt with a canned answer
pub struct FakePrompt {
  answer: bool,
  questions: RefCell<Vec<String>>,
}

impl FakePrompt {
  pub fn answering(answer: bool) -> Self {
    Self {
      answer,
      questions: RefCell::new(Vec::new()),
    }
  }

  pub fn questions(&self) -> Vec<String> {
    self.questions.borrow().clone()
  }
}

impl Prompt for FakePrompt {
  fn confirm(&self, question: &str) -> bool {
    self.questions.borrow_mut().push(question.to_string());
    self.answer
  }
}

/// Version 2.0.0, shared by check tests
pub fn release_version() -> &'static ReleaseVersion {
  static VERSION: OnceLock<ReleaseVersion> = OnceLock::new();
  VERSION.get_or_init(|| ReleaseVersion::parse("2.0.0").unwrap())
}

/// Check context for version 2.0.0 against `origin`, asking before pushes
pub fn check_context<'a>(git: &'a FakeGit, hosting: &'a FakeHosting, prompt: &'a FakePrompt) -> CheckContext<'a> {
  CheckContext {
    vcs: git,
    hosting,
    prompt,
    push_policy: PushPolicy::Ask,
    remote: "origin",
    version: release_version(),
    read_only: false,
    quiet: true,
  }
}

/// Temporary repository layout with a version file and changelog
pub fn release_repo(version: &str, changelog: &str) -> (TempDir, ReleaseContext) {
  let dir = TempDir::new().unwrap();
  let config = ShipConfig::default();

  fs::write(dir.path().join(&config.version_file), format!("{}\n", version)).unwrap();
  let changelog_path = dir.path().join(&config.changelog);
  fs::create_dir_all(changelog_path.parent().unwrap()).unwrap();
  fs::write(&changelog_path, changelog).unwrap();

  let ctx = ReleaseContext {
    root: dir.path().to_path_buf(),
    config,
    product: "product".to_string(),
  };
  (dir, ctx)
}
