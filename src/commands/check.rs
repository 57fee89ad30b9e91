//! `shiprail check`: stages 1-3 without touching anything

use crate::core::context::ReleaseContext;
use crate::core::error::RailResult;
use crate::core::hosting::GhCli;
use crate::core::vcs::SystemGit;
use crate::release::{CommandToolchain, PipelineOptions, ReleasePipeline};
use crate::ui::StdinPrompt;

/// Run the check command
///
/// Exits like `release` would at the same point: a failed check is an error.
pub fn run_check(ctx: &ReleaseContext, json: bool) -> RailResult<()> {
  let git = SystemGit::open(&ctx.root)?;
  let hosting = GhCli::new(ctx.config.hosting.cli.clone(), &ctx.root);
  let toolchain = CommandToolchain::from_config(&ctx.config.build, &ctx.root);

  let outcome = ReleasePipeline::new(ctx, &git, &hosting, &toolchain, &StdinPrompt)
    .with_options(PipelineOptions {
      quiet: json,
      ..PipelineOptions::default()
    })
    .check()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
  } else if outcome.preflight.passed() {
    println!();
    match outcome.preflight.warnings() {
      0 => println!("✅ Ready to release {}", outcome.tag),
      n => println!("✅ Ready to release {} ({} warning(s))", outcome.tag, n),
    }
  }

  outcome.preflight.ensure_passed()
}
