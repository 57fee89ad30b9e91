//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const CHANGELOG: &str = "\
Version 2.0.0
-------------

**Breaking changes**

- Renamed ``--out`` to ``--output``

Version 1.9.0
-------------

- Older entry
";

/// A product repository with a version file, a changelog and one commit
pub struct TestRepo {
  root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Repository at version 2.0.0 with the default file layout
  pub fn new() -> Result<Self> {
    Self::with_version("2.0.0")
  }

  pub fn with_version(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("product");
    std::fs::create_dir_all(path.join("docs/source"))?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(path.join("VERSION"), format!("{}\n", version))?;
    std::fs::write(path.join("docs/source/changes.rst"), CHANGELOG)?;
    std::fs::write(path.join(".gitignore"), "dist/\n")?;

    let repo = Self { root, path };
    repo.commit("Initial release layout")?;
    Ok(repo)
  }

  /// Write shiprail.toml and commit it
  pub fn configure(&self, toml: &str) -> Result<()> {
    std::fs::write(self.path.join("shiprail.toml"), toml)?;
    self.commit("Configure shiprail")?;
    Ok(())
  }

  /// Attach a bare repository as `origin` and push main to it
  pub fn add_origin(&self) -> Result<PathBuf> {
    let origin = self.scratch_dir().join("origin.git");
    git(self.scratch_dir(), &["init", "--bare", "--initial-branch=main", "origin.git"])?;
    git(&self.path, &["remote", "add", "origin", &origin.display().to_string()])?;
    git(&self.path, &["push", "-u", "origin", "main"])?;
    Ok(origin)
  }

  /// Directory next to the repository for files that must not dirty it
  pub fn scratch_dir(&self) -> &Path {
    self.root.path()
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<()> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  pub fn tag(&self, tag: &str) -> Result<()> {
    git(&self.path, &["tag", tag])?;
    Ok(())
  }

  /// Local tags, one per line
  pub fn local_tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(stdout(&output).lines().map(String::from).collect())
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(path), content)?;
    Ok(())
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Write an executable stand-in for the hosting CLI
///
/// Every invocation is appended to `log`; `release create` exits with
/// `release_exit`.
#[cfg(unix)]
pub fn fake_hosting_cli(dir: &Path, log: &Path, release_exit: i32) -> Result<PathBuf> {
  use std::os::unix::fs::PermissionsExt;

  let script = dir.join("fake-gh");
  std::fs::write(
    &script,
    format!(
      "#!/bin/sh\necho \"$@\" >> \"{}\"\nif [ \"$1\" = release ]; then\n  echo 'HTTP 422: validation failed' >&2\n  exit {}\nfi\nexit 0\n",
      log.display(),
      release_exit
    ),
  )?;
  std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
  Ok(script)
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run shiprail and return its output, whatever the exit status
pub fn run_shiprail(cwd: &Path, args: &[&str]) -> Result<Output> {
  let shiprail_bin = env!("CARGO_BIN_EXE_shiprail");

  Command::new(shiprail_bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run shiprail")
}

/// Run shiprail and fail unless it exits successfully
pub fn run_shiprail_ok(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_shiprail(cwd, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "shiprail command failed: shiprail {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout(&output),
      stderr(&output)
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
