//! Unpushed commit detection
//!
//! Local commits missing from the remote are a warning, never a failure: the
//! operator may push them now or release anyway. When the comparison itself
//! cannot run (no upstream ref, detached HEAD) the check soft-passes, and logs
//! that it did so.

use super::trait_def::{Check, CheckContext, CheckResult, PushPolicy};
use crate::core::error::RailResult;
use crate::core::vcs::UpstreamComparison;

pub struct UnpushedCommitsCheck;

impl Check for UnpushedCommitsCheck {
  fn name(&self) -> &str {
    "unpushed-commits"
  }

  fn description(&self) -> &str {
    "Warns about local commits missing from the remote branch"
  }

  fn run(&self, ctx: &CheckContext) -> RailResult<CheckResult> {
    let branch = ctx.vcs.current_branch()?;

    let commits = match ctx.vcs.compare_with_upstream(ctx.remote, &branch) {
      UpstreamComparison::UpToDate => {
        return Ok(CheckResult::pass(self.name(), "No unpushed commits"));
      }
      UpstreamComparison::Unavailable(reason) => {
        tracing::warn!(
          remote = ctx.remote,
          branch = %branch,
          reason = %reason,
          "upstream comparison unavailable; assuming no unpushed commits"
        );
        return Ok(
          CheckResult::pass(
            self.name(),
            format!(
              "Could not compare with {}/{}; assuming no unpushed commits",
              ctx.remote, branch
            ),
          )
          .with_details(vec![reason]),
        );
      }
      UpstreamComparison::Ahead(commits) => commits,
    };

    let count = commits.len();
    let summary = format!("{} unpushed commit(s) on branch '{}'", count, branch);

    if ctx.read_only {
      return Ok(
        CheckResult::warning(self.name(), summary)
          .with_details(commits)
          .with_suggestion(format!("git push {} {}", ctx.remote, branch)),
      );
    }

    let push = match ctx.push_policy {
      PushPolicy::Always => true,
      PushPolicy::Never => false,
      PushPolicy::Ask => {
        eprintln!("⚠️  You have {}:", summary);
        for commit in &commits {
          eprintln!("  {}", commit);
        }
        ctx.prompt.confirm("Push them first?")
      }
    };

    if !push {
      return Ok(
        CheckResult::warning(self.name(), format!("Continuing without pushing {}", summary)).with_details(commits),
      );
    }

    if !ctx.quiet {
      println!("ℹ️  Pushing commits to {}/{}...", ctx.remote, branch);
    }
    ctx.vcs.push_branch(ctx.remote, &branch)?;

    Ok(CheckResult::pass(
      self.name(),
      format!("Pushed {} commit(s) to {}/{}", count, ctx.remote, branch),
    ))
  }
}
