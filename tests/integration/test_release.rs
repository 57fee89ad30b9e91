//! End-to-end tests for the `release` command
//!
//! The toolchain is `sh` and the hosting CLI is a script that logs its
//! arguments, so these run without Go or network access.

use crate::helpers::*;
use anyhow::Result;

const BUILD: &str = r#"[build]
command = ["sh", "-c", "echo \"$GOOS/$GOARCH\" > \"$1\"", "sh", "{output}"]
"#;

fn configure_release(repo: &TestRepo, cli: &std::path::Path) -> Result<()> {
  repo.configure(&format!("{}\n[hosting]\ncli = \"{}\"\n", BUILD, cli.display()))?;
  git(&repo.path, &["push", "origin", "main"])?;
  Ok(())
}

fn remote_tags(origin: &std::path::Path) -> Result<String> {
  let output = git(origin, &["tag", "--list"])?;
  Ok(stdout(&output))
}

#[test]
#[cfg(unix)]
fn test_release_builds_tags_and_publishes() -> Result<()> {
  let repo = TestRepo::new()?;
  let origin = repo.add_origin()?;
  let log = repo.scratch_dir().join("gh.log");
  let cli = fake_hosting_cli(repo.scratch_dir(), &log, 0)?;
  configure_release(&repo, &cli)?;

  let output = run_shiprail_ok(&repo.path, &["release", "--json", "--jobs", "3"])?;
  let outcome: serde_json::Value = serde_json::from_str(&stdout(&output))?;

  assert_eq!(outcome["tag"], "v2.0.0");
  assert_eq!(outcome["product"], "product");
  assert_eq!(outcome["url"], "https://github.com/OWNER/REPO/releases/tag/v2.0.0");
  assert_eq!(outcome["archives"].as_array().map(Vec::len), Some(6));
  assert_eq!(outcome["states"].as_array().and_then(|s| s.last()).cloned(), Some("published".into()));

  assert!(repo.file_exists("dist/product-v2.0.0-linux-amd64.zip"));
  assert!(repo.file_exists("dist/product-v2.0.0-windows-arm64.zip"));
  assert_eq!(repo.local_tags()?, vec!["v2.0.0"]);
  assert!(remote_tags(&origin)?.contains("v2.0.0"));

  let calls = std::fs::read_to_string(&log)?;
  let create = calls
    .lines()
    .find(|line| line.starts_with("release create v2.0.0"))
    .unwrap_or_default();
  assert!(create.contains("--title product v2.0.0"));
  assert!(create.contains("--latest"));
  assert_eq!(create.matches(".zip").count(), 6);

  // VERSION is never written
  assert_eq!(repo.read_file("VERSION")?, "2.0.0\n");

  Ok(())
}

#[test]
#[cfg(unix)]
fn test_failed_release_creation_rolls_back_tags() -> Result<()> {
  let repo = TestRepo::new()?;
  let origin = repo.add_origin()?;
  let log = repo.scratch_dir().join("gh.log");
  let cli = fake_hosting_cli(repo.scratch_dir(), &log, 1)?;
  configure_release(&repo, &cli)?;

  let output = run_shiprail(&repo.path, &["release"])?;

  assert_eq!(output.status.code(), Some(5));
  assert!(stderr(&output).contains("HTTP 422"));
  assert!(repo.local_tags()?.is_empty());
  assert!(!remote_tags(&origin)?.contains("v2.0.0"));

  Ok(())
}

#[test]
#[cfg(unix)]
fn test_release_with_existing_tag_builds_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_origin()?;
  let log = repo.scratch_dir().join("gh.log");
  let cli = fake_hosting_cli(repo.scratch_dir(), &log, 0)?;
  configure_release(&repo, &cli)?;
  repo.tag("v2.0.0")?;

  let output = run_shiprail(&repo.path, &["release"])?;

  assert_eq!(output.status.code(), Some(3));
  assert!(!repo.file_exists("dist"));
  assert!(!std::fs::read_to_string(&log).unwrap_or_default().contains("release"));

  Ok(())
}

#[test]
#[cfg(unix)]
fn test_build_failure_stops_before_tagging() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_origin()?;
  let log = repo.scratch_dir().join("gh.log");
  let cli = fake_hosting_cli(repo.scratch_dir(), &log, 0)?;
  repo.configure(&format!(
    "[build]\ncommand = [\"sh\", \"-c\", \"exit 7\", \"sh\", \"{{output}}\"]\n\n[hosting]\ncli = \"{}\"\n",
    cli.display()
  ))?;
  git(&repo.path, &["push", "origin", "main"])?;

  let output = run_shiprail(&repo.path, &["release"])?;

  assert_eq!(output.status.code(), Some(4));
  assert!(repo.local_tags()?.is_empty());

  Ok(())
}

#[test]
fn test_release_rejects_invalid_version_before_any_check() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("VERSION", "not-a-version\n")?;
  repo.commit("Break version")?;

  let output = run_shiprail(&repo.path, &["release", "--no-push-unpushed"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(repo.local_tags()?.is_empty());

  Ok(())
}
