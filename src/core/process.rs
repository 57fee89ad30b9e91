//! Subprocess execution shared by every external collaborator
//!
//! Git, the hosting CLI and the build toolchain are all driven through
//! [`run`], which captures exit code, stdout and stderr and logs the
//! invocation at debug level.

use crate::core::error::{RailError, RailResult};
use std::ffi::OsStr;
use std::io;
use std::process::Command;

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
  /// Exit code (`-1` when terminated by a signal)
  pub code: i32,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  /// Whether the command exited with status 0
  pub fn success(&self) -> bool {
    self.code == 0
  }

  /// Trimmed stdout
  pub fn stdout_trimmed(&self) -> &str {
    self.stdout.trim()
  }

  /// Non-empty stdout lines
  pub fn stdout_lines(&self) -> Vec<String> {
    self
      .stdout
      .lines()
      .map(|l| l.trim_end().to_string())
      .filter(|l| !l.trim().is_empty())
      .collect()
  }
}

/// Run a prepared command to completion and capture its output
///
/// Spawn failures (program missing, permission denied) are returned as
/// `io::Error` so callers can tell "not installed" apart from "exited non-zero".
pub fn run(cmd: &mut Command) -> io::Result<CommandOutput> {
  let program = cmd.get_program().to_string_lossy().into_owned();
  let args = cmd
    .get_args()
    .map(OsStr::to_string_lossy)
    .collect::<Vec<_>>()
    .join(" ");

  let output = cmd.output()?;
  let result = CommandOutput {
    code: output.status.code().unwrap_or(-1),
    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
  };

  tracing::debug!(program = %program, args = %args, code = result.code, "command finished");
  Ok(result)
}

/// Run a command, mapping spawn failures to a contextual error
pub fn run_checked_spawn(cmd: &mut Command, what: &str) -> RailResult<CommandOutput> {
  run(cmd).map_err(|e| RailError::message(format!("Failed to run {}: {}", what, e)))
}
