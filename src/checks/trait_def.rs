//! Check trait abstraction for release preflight checks
//!
//! Every preflight check implements [`Check`] and reports a [`CheckResult`]
//! with one of three outcomes: passed, warning (never blocks) or failed
//! (terminal for the pipeline). Checks may mutate state only when the
//! operator agrees to it (pushing unpushed commits).

use crate::core::error::{PreflightError, RailError, RailResult};
use crate::core::hosting::HostingPlatform;
use crate::core::vcs::VersionControl;
use crate::release::version::ReleaseVersion;
use crate::ui::Prompt;
use serde::Serialize;
use std::fmt;

/// Outcome of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
  /// Precondition holds (or soft-passed)
  Passed,
  /// Operator was warned; the pipeline continues
  Warning,
  /// Precondition broken; the pipeline stops here
  Failed,
}

impl fmt::Display for CheckStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CheckStatus::Passed => write!(f, "PASS"),
      CheckStatus::Warning => write!(f, "WARN"),
      CheckStatus::Failed => write!(f, "FAIL"),
    }
  }
}

/// Result of running a check
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
  /// Name of the check that ran
  pub check_name: String,
  pub status: CheckStatus,
  /// Human-readable message
  pub message: String,
  /// Offending items (changed paths, unpushed commits)
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub details: Vec<String>,
  /// Optional suggested fix
  #[serde(skip_serializing_if = "Option::is_none")]
  pub suggestion: Option<String>,
  /// Typed failure for the pipeline to surface
  #[serde(skip)]
  pub failure: Option<PreflightError>,
}

impl CheckResult {
  /// Create a passing check result
  pub fn pass(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      check_name: check_name.into(),
      status: CheckStatus::Passed,
      message: message.into(),
      details: Vec::new(),
      suggestion: None,
      failure: None,
    }
  }

  /// Create a non-blocking warning
  pub fn warning(check_name: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      status: CheckStatus::Warning,
      ..Self::pass(check_name, message)
    }
  }

  /// Create a failing check result from the precondition that broke
  pub fn failed(check_name: impl Into<String>, failure: PreflightError) -> Self {
    let error = RailError::Preflight(failure.clone());
    Self {
      check_name: check_name.into(),
      status: CheckStatus::Failed,
      message: error.to_string(),
      details: Vec::new(),
      suggestion: error.help_message(),
      failure: Some(failure),
    }
  }

  /// Attach offending items
  pub fn with_details(mut self, details: Vec<String>) -> Self {
    self.details = details;
    self
  }

  pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
    self.suggestion = Some(suggestion.into());
    self
  }

  pub fn is_failed(&self) -> bool {
    self.status == CheckStatus::Failed
  }
}

/// What to do when local commits are missing from the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushPolicy {
  /// Ask the operator
  #[default]
  Ask,
  /// Push without asking
  Always,
  /// Never push; warn and continue
  Never,
}

/// Everything a check may look at
pub struct CheckContext<'a> {
  pub vcs: &'a dyn VersionControl,
  pub hosting: &'a dyn HostingPlatform,
  pub prompt: &'a dyn Prompt,
  pub push_policy: PushPolicy,
  /// Remote receiving pushes (`origin` by default)
  pub remote: &'a str,
  pub version: &'a ReleaseVersion,
  /// Report only: never push, never prompt
  pub read_only: bool,
  /// Suppress operator output (JSON mode)
  pub quiet: bool,
}

/// Preflight check
///
/// Each check implements this trait to validate one precondition.
/// Checks are run in a fixed order by the [`PreflightRunner`](super::PreflightRunner).
///
/// # Example
///
/// ```rust,ignore
/// struct LicenseFileCheck;
///
/// impl Check for LicenseFileCheck {
///   fn name(&self) -> &str {
///     "license-file"
///   }
///
///   fn description(&self) -> &str {
///     "Validates that a LICENSE file is committed"
///   }
///
///   fn run(&self, ctx: &CheckContext) -> RailResult<CheckResult> {
///     Ok(CheckResult::pass(self.name(), "LICENSE present"))
///   }
/// }
/// ```
pub trait Check: Send + Sync {
  /// Unique name for this check (kebab-case)
  fn name(&self) -> &str;

  /// Human-readable description of what this check validates
  fn description(&self) -> &str;

  /// Run the check and return a result
  ///
  /// `Err` is reserved for the check itself breaking (git not runnable,
  /// push rejected); a broken precondition is a `Failed` result.
  fn run(&self, ctx: &CheckContext) -> RailResult<CheckResult>;
}
