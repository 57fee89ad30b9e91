//! Hosting CLI availability and authentication

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::{PreflightError, RailResult};

/// Fails when the release CLI is missing or logged out
pub struct HostingCliCheck;

impl Check for HostingCliCheck {
  fn name(&self) -> &str {
    "hosting-cli"
  }

  fn description(&self) -> &str {
    "Validates that the hosting CLI is installed and authenticated"
  }

  fn run(&self, ctx: &CheckContext) -> RailResult<CheckResult> {
    let tool = ctx.hosting.tool_name().to_string();

    if !ctx.hosting.is_installed() {
      return Ok(CheckResult::failed(self.name(), PreflightError::ToolingUnavailable { tool }));
    }
    if !ctx.hosting.is_authenticated() {
      return Ok(CheckResult::failed(self.name(), PreflightError::ToolingUnauthenticated { tool }));
    }

    Ok(CheckResult::pass(self.name(), format!("`{}` is installed and authenticated", tool)))
  }
}
