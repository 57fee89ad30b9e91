//! `shiprail release`: the full five-stage pipeline

use crate::checks::PushPolicy;
use crate::core::context::ReleaseContext;
use crate::core::error::RailResult;
use crate::core::hosting::GhCli;
use crate::core::vcs::SystemGit;
use crate::release::{CommandToolchain, PipelineOptions, ReleasePipeline};
use crate::ui::StdinPrompt;

/// Run the release command
pub fn run_release(ctx: &ReleaseContext, push_policy: PushPolicy, jobs: usize, json: bool) -> RailResult<()> {
  let git = SystemGit::open(&ctx.root)?;
  let hosting = GhCli::new(ctx.config.hosting.cli.clone(), &ctx.root);
  let toolchain = CommandToolchain::from_config(&ctx.config.build, &ctx.root);

  let options = PipelineOptions {
    push_policy,
    jobs,
    progress: jobs > 1 && !json,
    quiet: json,
  };

  if !json {
    println!("🚀 Releasing {}", ctx.product);
  }

  let outcome = ReleasePipeline::new(ctx, &git, &hosting, &toolchain, &StdinPrompt)
    .with_options(options)
    .run()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&outcome)?);
  } else {
    println!();
    println!("🎉 Release {} completed successfully!", outcome.tag);
  }

  Ok(())
}
