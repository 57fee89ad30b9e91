//! The five-stage release pipeline
//!
//! ```text
//! [1/5] version     -> Validated
//! [2/5] changelog   -> ChangelogExtracted
//! [3/5] preflight   -> PreflightPassed
//! [4/5] build       -> Built
//! [5/5] publish     -> TagPushed -> Published
//!                              \-> RolledBack (release creation failed)
//! ```
//!
//! Each stage returns a `RailResult`; the first error ends the run. Nothing is
//! mutated before stage 4 except an operator-approved branch push.

use crate::checks::{CheckContext, PreflightReport, PushPolicy, create_default_runner, format_result};
use crate::core::context::ReleaseContext;
use crate::core::error::{PublishError, RailError, RailResult};
use crate::core::hosting::HostingPlatform;
use crate::core::vcs::VersionControl;
use crate::release::build::{Artifact, BuildMatrixRunner, BuildWorkspace, Toolchain};
use crate::release::changelog;
use crate::release::markdown::to_markdown;
use crate::release::matrix::TARGETS;
use crate::release::notes::render_release_notes;
use crate::release::publish::ReleasePublisher;
use crate::release::version::ReleaseVersion;
use crate::ui::{BuildProgress, Prompt};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Pipeline progress markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
  Validated,
  ChangelogExtracted,
  PreflightPassed,
  Built,
  TagPushed,
  Published,
  RolledBack,
}

impl PipelineState {
  /// Legal successors; `RolledBack` is the only backward edge
  fn can_follow(self, previous: Option<PipelineState>) -> bool {
    use PipelineState::*;
    matches!(
      (previous, self),
      (None, Validated)
        | (Some(Validated), ChangelogExtracted)
        | (Some(ChangelogExtracted), PreflightPassed)
        | (Some(PreflightPassed), Built)
        | (Some(Built), TagPushed)
        | (Some(TagPushed), Published)
        | (Some(TagPushed), RolledBack)
    )
  }
}

impl fmt::Display for PipelineState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      PipelineState::Validated => "validated",
      PipelineState::ChangelogExtracted => "changelog-extracted",
      PipelineState::PreflightPassed => "preflight-passed",
      PipelineState::Built => "built",
      PipelineState::TagPushed => "tag-pushed",
      PipelineState::Published => "published",
      PipelineState::RolledBack => "rolled-back",
    };
    f.write_str(name)
  }
}

/// Checked sequence of pipeline states
#[derive(Debug, Default, Clone)]
pub struct StateMachine {
  history: Vec<PipelineState>,
}

impl StateMachine {
  pub fn current(&self) -> Option<PipelineState> {
    self.history.last().copied()
  }

  pub fn history(&self) -> &[PipelineState] {
    &self.history
  }

  /// Move to `next`, rejecting transitions the pipeline never makes
  pub fn advance(&mut self, next: PipelineState) -> RailResult<()> {
    let current = self.current();
    if !next.can_follow(current) {
      let from = current.map(|s| s.to_string()).unwrap_or_else(|| "start".to_string());
      return Err(RailError::message(format!(
        "Illegal release pipeline transition: {} -> {}",
        from, next
      )));
    }

    tracing::debug!(state = %next, "release pipeline advanced");
    self.history.push(next);
    Ok(())
  }
}

/// Summary of a successful release
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseOutcome {
  pub product: String,
  pub version: String,
  pub tag: String,
  pub url: String,
  pub archives: Vec<Artifact>,
  pub states: Vec<PipelineState>,
  pub released_at: DateTime<Utc>,
}

/// Summary of a read-only preflight run (`shiprail check`)
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
  pub version: String,
  pub tag: String,
  pub changelog: String,
  pub preflight: PreflightReport,
}

/// Knobs for one pipeline run
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
  pub push_policy: PushPolicy,
  /// Concurrent build targets (1 = sequential)
  pub jobs: usize,
  /// Draw a progress bar for the build matrix
  pub progress: bool,
  /// Suppress operator output (JSON mode)
  pub quiet: bool,
}

impl Default for PipelineOptions {
  fn default() -> Self {
    Self {
      push_policy: PushPolicy::Ask,
      jobs: 1,
      progress: false,
      quiet: false,
    }
  }
}

/// The release pipeline over injected collaborators
pub struct ReleasePipeline<'a> {
  ctx: &'a ReleaseContext,
  vcs: &'a dyn VersionControl,
  hosting: &'a dyn HostingPlatform,
  toolchain: &'a dyn Toolchain,
  prompt: &'a dyn Prompt,
  options: PipelineOptions,
}

impl<'a> ReleasePipeline<'a> {
  pub fn new(
    ctx: &'a ReleaseContext,
    vcs: &'a dyn VersionControl,
    hosting: &'a dyn HostingPlatform,
    toolchain: &'a dyn Toolchain,
    prompt: &'a dyn Prompt,
  ) -> Self {
    Self {
      ctx,
      vcs,
      hosting,
      toolchain,
      prompt,
      options: PipelineOptions::default(),
    }
  }

  pub fn with_options(mut self, options: PipelineOptions) -> Self {
    self.options = options;
    self
  }

  fn say(&self, line: impl AsRef<str>) {
    if !self.options.quiet {
      println!("{}", line.as_ref());
    }
  }

  fn stage(&self, n: usize, title: &str) {
    self.say(format!("\n[{}/5] {}", n, title));
  }

  /// Stage 1: read and validate the version file
  pub fn resolve_version(&self) -> RailResult<ReleaseVersion> {
    let version = ReleaseVersion::resolve(&self.ctx.version_path())?;
    self.say(format!("✅ Version: {}", version));
    Ok(version)
  }

  /// Stage 2: extract the changelog section for `version`
  pub fn extract_changelog(&self, version: &ReleaseVersion) -> RailResult<String> {
    let section = changelog::load_section(&self.ctx.changelog_path(), version.as_str())?;
    self.say(format!("✅ Extracted changelog for version {}", version));
    Ok(section)
  }

  /// Stage 3: run the preflight checks, stopping at the first failure
  ///
  /// Returns the report even when a check failed; callers decide whether to
  /// abort (`PreflightReport::ensure_passed`).
  pub fn preflight(&self, version: &ReleaseVersion, read_only: bool) -> RailResult<PreflightReport> {
    let check_ctx = CheckContext {
      vcs: self.vcs,
      hosting: self.hosting,
      prompt: self.prompt,
      push_policy: self.options.push_policy,
      remote: &self.ctx.config.remote,
      version,
      read_only,
      quiet: self.options.quiet,
    };

    let runner = create_default_runner();
    tracing::debug!(checks = ?runner.check_names(), read_only, "running preflight");
    runner.run(&check_ctx, |result| self.say(format_result(result)))
  }

  /// Stage 4: build and package every target
  pub fn build(&self, version: &ReleaseVersion) -> RailResult<Vec<Artifact>> {
    let workspace = BuildWorkspace::prepare(&self.ctx.root, self.ctx.dist_path())?;

    let mut runner = BuildMatrixRunner::new(self.toolchain, &self.ctx.product)
      .with_jobs(self.options.jobs)
      .quiet(self.options.quiet);
    if self.options.progress && !self.options.quiet {
      runner = runner.with_progress(BuildProgress::new(TARGETS.len(), "Building targets"));
    }

    let artifacts = runner.run(&workspace, version)?;
    self.say(format!("✅ Built and packaged {} binaries", artifacts.len()));
    Ok(artifacts)
  }

  /// Run stages 1-3 without pushing, prompting or building
  pub fn check(&self) -> RailResult<CheckOutcome> {
    self.stage(1, "Reading version file...");
    let version = self.resolve_version()?;

    self.stage(2, "Extracting changelog...");
    let changelog = self.extract_changelog(&version)?;

    self.stage(3, "Running pre-flight checks...");
    let preflight = self.preflight(&version, true)?;

    Ok(CheckOutcome {
      tag: version.tag(),
      version: version.to_string(),
      changelog,
      preflight,
    })
  }

  /// Run the whole pipeline
  pub fn run(&self) -> RailResult<ReleaseOutcome> {
    let mut states = StateMachine::default();

    self.stage(1, "Reading version file...");
    let version = self.resolve_version()?;
    states.advance(PipelineState::Validated)?;

    self.stage(2, "Extracting changelog...");
    let changes = self.extract_changelog(&version)?;
    states.advance(PipelineState::ChangelogExtracted)?;

    self.stage(3, "Running pre-flight checks...");
    self.preflight(&version, false)?.ensure_passed()?;
    states.advance(PipelineState::PreflightPassed)?;

    self.stage(4, "Building binaries...");
    let artifacts = self.build(&version)?;
    states.advance(PipelineState::Built)?;

    self.stage(5, "Creating release...");
    let publisher = ReleasePublisher::new(self.vcs, self.hosting, &self.ctx.config.remote, &self.ctx.product)
      .quiet(self.options.quiet);
    let tag = publisher.push_tag(&version)?;
    states.advance(PipelineState::TagPushed)?;

    let notes = render_release_notes(&self.ctx.product, &version, &to_markdown(&changes), &artifacts);
    match publisher.create_release(&version, &notes, &artifacts) {
      Ok(()) => states.advance(PipelineState::Published)?,
      Err(err @ RailError::Publish(PublishError::ReleaseCreateFailed { .. })) => {
        states.advance(PipelineState::RolledBack)?;
        return Err(err);
      }
      Err(err) => return Err(err),
    }

    let url = publisher.release_url(&self.ctx.config.hosting.host, &tag);
    self.say(format!("✅ Release {} created successfully!", tag));
    self.say(format!("🔗 View it at: {}", url));

    Ok(ReleaseOutcome {
      product: self.ctx.product.clone(),
      version: version.to_string(),
      tag,
      url,
      archives: artifacts,
      states: states.history().to_vec(),
      released_at: Utc::now(),
    })
  }
}
