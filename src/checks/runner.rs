//! Preflight runner: fixed order, stops at the first failure

use super::hosting_cli::HostingCliCheck;
use super::tag_absent::TagAbsentCheck;
use super::trait_def::{Check, CheckContext, CheckResult, CheckStatus};
use super::unpushed::UnpushedCommitsCheck;
use super::version_progression::VersionProgressionCheck;
use super::working_tree::WorkingTreeCheck;
use crate::core::error::{PreflightError, RailResult};
use serde::Serialize;

/// Results of one preflight run, in execution order
#[derive(Debug, Clone, Default, Serialize)]
pub struct PreflightReport {
  pub results: Vec<CheckResult>,
}

impl PreflightReport {
  /// True when no check failed
  pub fn passed(&self) -> bool {
    !self.results.iter().any(CheckResult::is_failed)
  }

  pub fn warnings(&self) -> usize {
    self.results.iter().filter(|r| r.status == CheckStatus::Warning).count()
  }

  /// The failure that stopped the run, if any
  pub fn failure(&self) -> Option<&PreflightError> {
    self.results.iter().find_map(|r| r.failure.as_ref())
  }

  /// Turn a failed report into the pipeline error
  pub fn ensure_passed(&self) -> RailResult<()> {
    match self.failure() {
      Some(failure) => Err(failure.clone().into()),
      None => Ok(()),
    }
  }
}

/// Runs registered checks in order
pub struct PreflightRunner {
  checks: Vec<Box<dyn Check>>,
}

impl PreflightRunner {
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  pub fn add_check(&mut self, check: Box<dyn Check>) {
    self.checks.push(check);
  }

  /// Names of registered checks, in run order
  pub fn check_names(&self) -> Vec<&str> {
    self.checks.iter().map(|c| c.name()).collect()
  }

  /// Run every check until one fails
  ///
  /// `observe` sees each result as soon as it is produced, so operator output
  /// stays interleaved with prompts.
  pub fn run(&self, ctx: &CheckContext, mut observe: impl FnMut(&CheckResult)) -> RailResult<PreflightReport> {
    let mut report = PreflightReport::default();

    for check in &self.checks {
      tracing::debug!(check = check.name(), about = check.description(), "running preflight check");
      let result = check.run(ctx)?;
      observe(&result);

      let failed = result.is_failed();
      report.results.push(result);
      if failed {
        break;
      }
    }

    Ok(report)
  }
}

impl Default for PreflightRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Runner with the release checks in their required order
pub fn create_default_runner() -> PreflightRunner {
  let mut runner = PreflightRunner::new();
  runner.add_check(Box::new(WorkingTreeCheck));
  runner.add_check(Box::new(UnpushedCommitsCheck));
  runner.add_check(Box::new(TagAbsentCheck));
  runner.add_check(Box::new(HostingCliCheck));
  runner.add_check(Box::new(VersionProgressionCheck));
  runner
}

/// Operator-facing line for one result
pub fn format_result(result: &CheckResult) -> String {
  let icon = match result.status {
    CheckStatus::Passed => "✅",
    CheckStatus::Warning => "⚠️ ",
    CheckStatus::Failed => "❌",
  };
  format!("{} {}", icon, result.message)
}
