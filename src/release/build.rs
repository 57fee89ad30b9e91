//! Build matrix runner
//!
//! Compiles the product once per target through a [`Toolchain`], packages each
//! binary into its own zip archive and hashes it. The dist directory is owned
//! by a [`BuildWorkspace`] value for the duration of the run: it is wiped and
//! recreated up front, and per-target directories are removed as soon as the
//! archive is written. The first failing target aborts the matrix; archives
//! produced before it stay on disk.

use crate::core::config::BuildConfig;
use crate::core::error::{BuildError, RailError, RailResult};
use crate::core::process;
use crate::release::matrix::{BuildTarget, TARGETS};
use crate::release::package::{package_binary, sha256_file};
use crate::release::version::ReleaseVersion;
use crate::ui::BuildProgress;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

/// Placeholder in the build command replaced by the per-target binary path
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Compiles the product for one target
///
/// Implementations must be shareable across build workers.
pub trait Toolchain: Send + Sync {
  /// Produce a single binary at `output`; `Err` carries the toolchain's stderr
  fn build(&self, target: &BuildTarget, output: &Path) -> Result<(), String>;
}

/// Toolchain driven by the `[build]` section of shiprail.toml
///
/// The target OS and architecture are passed through environment variables
/// (`GOOS`/`GOARCH` by default), on top of the configured extra environment.
#[derive(Debug, Clone)]
pub struct CommandToolchain {
  command: Vec<String>,
  os_env: String,
  arch_env: String,
  env: BTreeMap<String, String>,
  workdir: PathBuf,
}

impl CommandToolchain {
  pub fn from_config(config: &BuildConfig, workdir: &Path) -> Self {
    Self {
      command: config.command.clone(),
      os_env: config.os_env.clone(),
      arch_env: config.arch_env.clone(),
      env: config.env.clone(),
      workdir: workdir.to_path_buf(),
    }
  }

  fn command_for(&self, target: &BuildTarget, output: &Path) -> Option<Command> {
    let output = output.display().to_string();
    let mut parts = self
      .command
      .iter()
      .map(|part| part.replace(OUTPUT_PLACEHOLDER, &output));

    let mut cmd = Command::new(parts.next()?);
    cmd
      .args(parts)
      .current_dir(&self.workdir)
      .envs(&self.env)
      .env(&self.os_env, target.os)
      .env(&self.arch_env, target.arch);
    Some(cmd)
  }
}

impl Toolchain for CommandToolchain {
  fn build(&self, target: &BuildTarget, output: &Path) -> Result<(), String> {
    let mut cmd = self
      .command_for(target, output)
      .ok_or_else(|| "build command is empty".to_string())?;

    match process::run(&mut cmd) {
      Ok(result) if result.success() => Ok(()),
      Ok(result) => Err(result.stderr),
      Err(err) => Err(format!("failed to run {}: {}", cmd.get_program().to_string_lossy(), err)),
    }
  }
}

/// The dist directory, exclusively owned by one build run
#[derive(Debug)]
pub struct BuildWorkspace {
  root: PathBuf,
}

impl BuildWorkspace {
  /// Remove any previous dist directory and create it empty
  ///
  /// `root` must name a directory strictly below `repo_root`; anything else
  /// (the repository itself, a parent, a path escaping via `..`) is refused
  /// before touching the filesystem.
  pub fn prepare(repo_root: &Path, root: impl Into<PathBuf>) -> RailResult<Self> {
    let root = root.into();
    let inside_repo = root
      .strip_prefix(repo_root)
      .map(|rel| rel.components().next().is_some() && rel.components().all(|c| matches!(c, Component::Normal(_))))
      .unwrap_or(false);
    if !inside_repo {
      return Err(RailError::with_help(
        format!("Refusing to use {} as the dist directory", root.display()),
        format!("Set `dist_dir` to a subdirectory of {}", repo_root.display()),
      ));
    }

    if root.exists() {
      fs::remove_dir_all(&root)?;
    }
    fs::create_dir_all(&root)?;
    tracing::debug!(dist = %root.display(), "prepared build workspace");
    Ok(Self { root })
  }

  pub fn path(&self) -> &Path {
    &self.root
  }

  /// Temporary directory holding one target's binary
  pub fn target_dir(&self, target: &BuildTarget) -> PathBuf {
    self.root.join(target.slug())
  }

  /// Final archive location for one target
  pub fn archive_path(&self, product: &str, version: &ReleaseVersion, target: &BuildTarget) -> PathBuf {
    self.root.join(target.archive_name(product, version.as_str()))
  }
}

/// One packaged archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
  pub target: BuildTarget,
  pub path: PathBuf,
  pub sha256: String,
}

impl Artifact {
  /// Archive file name without the directory
  pub fn file_name(&self) -> String {
    self
      .path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_default()
  }
}

/// Runs the six-target matrix, sequentially or on a bounded worker pool
pub struct BuildMatrixRunner<'a> {
  toolchain: &'a dyn Toolchain,
  product: &'a str,
  jobs: usize,
  progress: Option<BuildProgress>,
  quiet: bool,
}

impl<'a> BuildMatrixRunner<'a> {
  pub fn new(toolchain: &'a dyn Toolchain, product: &'a str) -> Self {
    Self {
      toolchain,
      product,
      jobs: 1,
      progress: None,
      quiet: false,
    }
  }

  /// Number of targets built concurrently (1 = sequential)
  pub fn with_jobs(mut self, jobs: usize) -> Self {
    self.jobs = jobs.max(1);
    self
  }

  pub fn with_progress(mut self, progress: BuildProgress) -> Self {
    self.progress = Some(progress);
    self
  }

  /// Suppress per-target lines (JSON mode)
  pub fn quiet(mut self, quiet: bool) -> Self {
    self.quiet = quiet;
    self
  }

  fn announce(&self) -> bool {
    !self.quiet && self.progress.is_none()
  }

  /// Build every target; artifacts come back in matrix order
  pub fn run(&self, workspace: &BuildWorkspace, version: &ReleaseVersion) -> RailResult<Vec<Artifact>> {
    if self.jobs == 1 {
      return TARGETS
        .iter()
        .map(|target| self.build_target(workspace, version, target))
        .collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
      .num_threads(self.jobs.min(TARGETS.len()))
      .build()?;

    pool.install(|| {
      TARGETS
        .par_iter()
        .map(|target| self.build_target(workspace, version, target))
        .collect()
    })
  }

  fn build_target(
    &self,
    workspace: &BuildWorkspace,
    version: &ReleaseVersion,
    target: &BuildTarget,
  ) -> RailResult<Artifact> {
    let dir = workspace.target_dir(target);
    fs::create_dir_all(&dir)?;

    let binary_name = target.binary_name(self.product);
    let binary = dir.join(&binary_name);

    if self.announce() {
      println!("  🔨 Building {}...", target);
    }
    self.toolchain.build(target, &binary).map_err(|stderr| BuildError::BuildFailed {
      target: target.to_string(),
      stderr,
    })?;

    let archive = workspace.archive_path(self.product, version, target);
    package_binary(&binary, &binary_name, &archive)?;
    fs::remove_dir_all(&dir)?;

    let sha256 = sha256_file(&archive)?;
    tracing::debug!(target = %target, archive = %archive.display(), %sha256, "packaged target");

    if let Some(progress) = &self.progress {
      progress.inc();
    } else if self.announce() {
      println!("  📦 Created {}", archive.display());
    }

    Ok(Artifact {
      target: *target,
      path: archive,
      sha256,
    })
  }
}
