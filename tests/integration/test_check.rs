//! Tests for the `check` command: read-only stages 1-3

use crate::helpers::*;
use anyhow::Result;

const MISSING_CLI: &str = "[hosting]\ncli = \"shiprail-test-missing-cli\"\n";

#[test]
fn test_check_rejects_invalid_version() -> Result<()> {
  let repo = TestRepo::with_version("2.0")?;

  let output = run_shiprail(&repo.path, &["check"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid version format '2.0'"));

  Ok(())
}

#[test]
fn test_check_fails_on_dirty_tree() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("notes.txt", "scratch")?;

  let output = run_shiprail(&repo.path, &["check"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Working directory is not clean"));

  Ok(())
}

#[test]
fn test_check_fails_on_existing_tag_before_hosting_probe() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.configure(MISSING_CLI)?;
  repo.tag("v2.0.0")?;

  let output = run_shiprail(&repo.path, &["check"])?;
  let err = stderr(&output);

  assert_eq!(output.status.code(), Some(3));
  assert!(err.contains("Git tag 'v2.0.0' already exists"));
  assert!(!err.contains("shiprail-test-missing-cli"));

  // read-only: the tag is untouched
  assert_eq!(repo.local_tags()?, vec!["v2.0.0"]);

  Ok(())
}

#[test]
fn test_check_reports_missing_hosting_cli() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.configure(MISSING_CLI)?;

  let output = run_shiprail(&repo.path, &["check"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("`shiprail-test-missing-cli` is not installed"));

  Ok(())
}

#[test]
fn test_check_json_reports_failed_check() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.configure(MISSING_CLI)?;

  let output = run_shiprail(&repo.path, &["check", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(report["tag"], "v2.0.0");

  let results = report["preflight"]["results"].as_array().cloned().unwrap_or_default();
  let failed: Vec<_> = results.iter().filter(|r| r["status"] == "failed").collect();
  assert_eq!(failed.len(), 1);
  assert_eq!(failed[0]["check_name"], "hosting-cli");

  Ok(())
}

#[test]
#[cfg(unix)]
fn test_check_passes_with_ready_hosting_cli() -> Result<()> {
  let repo = TestRepo::new()?;
  let log = repo.scratch_dir().join("gh.log");
  let cli = fake_hosting_cli(repo.scratch_dir(), &log, 0)?;
  repo.configure(&format!("[hosting]\ncli = \"{}\"\n", cli.display()))?;

  let output = run_shiprail_ok(&repo.path, &["check"])?;
  assert!(stdout(&output).contains("Ready to release v2.0.0"));

  // nothing was tagged or released
  assert!(repo.local_tags()?.is_empty());
  let calls = std::fs::read_to_string(&log)?;
  assert!(!calls.contains("release"));

  Ok(())
}
