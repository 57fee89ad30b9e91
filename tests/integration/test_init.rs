//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_shiprail_ok(&repo.path, &["init"])?;
  assert!(stdout(&output).contains("shiprail.toml"));
  assert!(repo.file_exists("shiprail.toml"));

  let config = repo.read_file("shiprail.toml")?;
  assert!(config.contains("product = \"product\""));
  assert!(config.contains("[build]"));
  assert!(config.contains("{output}"));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("shiprail.toml", "product = \"custom\"\n")?;

  let output = run_shiprail(&repo.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));
  assert_eq!(repo.read_file("shiprail.toml")?, "product = \"custom\"\n");

  Ok(())
}

#[test]
fn test_init_force_overwrites() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("shiprail.toml", "product = \"custom\"\n")?;

  run_shiprail_ok(&repo.path, &["init", "--force"])?;
  assert!(repo.read_file("shiprail.toml")?.contains("product = \"product\""));

  Ok(())
}

#[test]
fn test_generated_config_is_loadable() -> Result<()> {
  let repo = TestRepo::new()?;
  run_shiprail_ok(&repo.path, &["init"])?;

  // a command that loads the config must accept what init wrote
  run_shiprail_ok(&repo.path, &["changelog"])?;

  Ok(())
}
