//! Hosting platform release creation via its CLI (`gh` by default)

use crate::core::process::{self, CommandOutput};
use std::io;
use std::path::PathBuf;
use std::process::Command;

/// Everything the hosting platform needs to publish one release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
  /// Tag the release points at (already pushed)
  pub tag: String,
  /// Release title
  pub title: String,
  /// File holding the rendered release notes
  pub notes_file: PathBuf,
  /// Archives to upload, in matrix order
  pub artifacts: Vec<PathBuf>,
  /// Mark as the repository's latest release
  pub latest: bool,
}

/// Hosting platform operations used by preflight and publishing
pub trait HostingPlatform {
  /// Name of the CLI, for messages
  fn tool_name(&self) -> &str;

  /// Whether the CLI can be executed at all
  fn is_installed(&self) -> bool;

  /// Whether the CLI is logged in
  fn is_authenticated(&self) -> bool;

  /// Create the release; `Err` carries the CLI's stderr
  fn create_release(&self, request: &ReleaseRequest) -> Result<(), String>;
}

/// GitHub CLI backed hosting platform
pub struct GhCli {
  program: String,
  workdir: PathBuf,
}

impl GhCli {
  /// Create a CLI wrapper running `program` inside `workdir`
  pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      workdir: workdir.into(),
    }
  }

  fn run(&self, args: &[String]) -> io::Result<CommandOutput> {
    let mut cmd = Command::new(&self.program);
    cmd.current_dir(&self.workdir).args(args);
    process::run(&mut cmd)
  }

  /// Arguments for `gh release create`
  pub fn release_args(request: &ReleaseRequest) -> Vec<String> {
    let mut args = vec!["release".to_string(), "create".to_string(), request.tag.clone()];
    args.extend(request.artifacts.iter().map(|p| p.display().to_string()));
    args.push("--title".to_string());
    args.push(request.title.clone());
    args.push("--notes-file".to_string());
    args.push(request.notes_file.display().to_string());
    if request.latest {
      args.push("--latest".to_string());
    }
    args
  }
}

impl HostingPlatform for GhCli {
  fn tool_name(&self) -> &str {
    &self.program
  }

  fn is_installed(&self) -> bool {
    match self.run(&["--version".to_string()]) {
      Ok(output) => output.success(),
      Err(err) => {
        tracing::debug!(program = %self.program, error = %err, "hosting CLI not runnable");
        false
      }
    }
  }

  fn is_authenticated(&self) -> bool {
    self
      .run(&["auth".to_string(), "status".to_string()])
      .map(|output| output.success())
      .unwrap_or(false)
  }

  fn create_release(&self, request: &ReleaseRequest) -> Result<(), String> {
    let output = self.run(&Self::release_args(request)).map_err(|e| e.to_string())?;
    if output.success() {
      Ok(())
    } else {
      Err(output.stderr)
    }
  }
}
