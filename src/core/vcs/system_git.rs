//! System git backend - zero dependencies
//!
//! Every operation shells out to the `git` binary with an isolated environment
//! and captures (exit code, stdout, stderr) through `core::process`.

use crate::core::error::{GitError, RailError, RailResult};
use crate::core::process::{self, CommandOutput};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variables forwarded to git; everything else is cleared
const FORWARDED_ENV: &[&str] = &[
  "PATH",
  "HOME",
  "USERPROFILE",
  "SSH_AUTH_SOCK",
  "GIT_SSH_COMMAND",
  "GIT_ASKPASS",
  "GIT_TERMINAL_PROMPT",
  // pushes behind a proxy
  "HTTPS_PROXY",
  "https_proxy",
  "HTTP_PROXY",
  "http_proxy",
  "ALL_PROXY",
  "NO_PROXY",
  "no_proxy",
  // relocated git config and signing keys
  "XDG_CONFIG_HOME",
  "GIT_CONFIG_GLOBAL",
  "GIT_CONFIG_NOSYSTEM",
  "GNUPGHOME",
];

/// Copy the whitelisted variables `lookup` knows about onto `cmd`
fn forward_env(cmd: &mut Command, lookup: impl Fn(&str) -> Option<String>) {
  for key in FORWARDED_ENV {
    if let Some(value) = lookup(key) {
      cmd.env(key, value);
    }
  }
}

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> RailResult<Self> {
    let output = process::run_checked_spawn(
      Command::new("git")
        .arg("-C")
        .arg(path)
        .args(["rev-parse", "--show-toplevel"]),
      "git rev-parse",
    )?;

    if !output.success() {
      if output.stderr.contains("not a git repository") {
        return Err(RailError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(RailError::message(format!(
        "Failed to open git repository: {}",
        output.stderr.trim()
      )));
    }

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(output.stdout_trimmed()),
    })
  }

  /// Working tree root
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Run git with `args` and capture the output, whatever the exit code
  pub(crate) fn run(&self, args: &[&str]) -> RailResult<CommandOutput> {
    let mut cmd = self.git_cmd();
    cmd.args(args);
    process::run_checked_spawn(&mut cmd, &format!("git {}", args.join(" ")))
  }

  /// Run git with `args`, failing on non-zero exit
  pub(crate) fn run_ok(&self, args: &[&str]) -> RailResult<CommandOutput> {
    let output = self.run(args)?;
    if !output.success() {
      return Err(RailError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: output.stderr,
      }));
    }
    Ok(output)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists PATH, HOME and the credential helpers push needs
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    forward_env(&mut cmd, |key| std::env::var(key).ok());

    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}
