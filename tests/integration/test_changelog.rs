//! Tests for the `changelog` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_changelog_prints_current_section() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_shiprail_ok(&repo.path, &["changelog"])?;
  let text = stdout(&output);

  assert!(text.contains("**Breaking changes**"));
  assert!(text.contains("``--out``"));
  assert!(!text.contains("Older entry"));
  assert!(!text.contains("Version 2.0.0"));

  Ok(())
}

#[test]
fn test_changelog_for_explicit_version() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_shiprail_ok(&repo.path, &["changelog", "1.9.0"])?;
  assert_eq!(stdout(&output).trim(), "- Older entry");

  Ok(())
}

#[test]
fn test_changelog_markdown_conversion() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_shiprail_ok(&repo.path, &["changelog", "--markdown"])?;
  let text = stdout(&output);

  assert!(text.contains("`--out`"));
  assert!(!text.contains("``"));

  Ok(())
}

#[test]
fn test_changelog_missing_section_is_user_error() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_shiprail(&repo.path, &["changelog", "3.0.0"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("3.0.0"));

  Ok(())
}

#[test]
fn test_changelog_rejects_malformed_version_argument() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_shiprail(&repo.path, &["changelog", "v2"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Invalid version format 'v2'"));

  Ok(())
}
