//! Tests for the `notes` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_notes_preview_uses_markdown_changes() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_shiprail_ok(&repo.path, &["notes"])?;
  let notes = stdout(&output);

  assert!(notes.starts_with("## product v2.0.0"));
  assert!(notes.contains("### Changes"));
  assert!(notes.contains("`--out`"));
  assert!(!notes.contains("### Checksums"));

  Ok(())
}

#[test]
fn test_notes_use_configured_product() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.configure("product = \"widget\"\n")?;

  let output = run_shiprail_ok(&repo.path, &["notes"])?;
  assert!(stdout(&output).starts_with("## widget v2.0.0"));

  Ok(())
}
