use crate::core::error::{ConfigError, RailError, RailResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration for shiprail
/// Searched in order: shiprail.toml, .shiprail.toml, .config/shiprail.toml
///
/// Every field has a default, so a repository without a config file releases
/// with the conventions of a Go project (`VERSION`, `docs/source/changes.rst`, `go build`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShipConfig {
  /// Product name: archive prefix, binary name and release title
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub product: Option<String>,

  /// File holding the single `MAJOR.MINOR.PATCH` line
  #[serde(default = "default_version_file")]
  pub version_file: PathBuf,

  /// Changelog document with `Version X.Y.Z` headings
  #[serde(default = "default_changelog")]
  pub changelog: PathBuf,

  /// Staging directory for per-target builds and archives
  #[serde(default = "default_dist_dir")]
  pub dist_dir: PathBuf,

  /// Remote that receives pushes and tags
  #[serde(default = "default_remote")]
  pub remote: String,

  #[serde(default)]
  pub build: BuildConfig,

  #[serde(default)]
  pub hosting: HostingConfig,
}

fn default_version_file() -> PathBuf {
  PathBuf::from("VERSION")
}

fn default_changelog() -> PathBuf {
  PathBuf::from("docs/source/changes.rst")
}

fn default_dist_dir() -> PathBuf {
  PathBuf::from("dist")
}

fn default_remote() -> String {
  "origin".to_string()
}

/// Toolchain invocation for one build target
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
  /// Program and arguments; `{output}` is replaced with the binary path
  #[serde(default = "default_build_command")]
  pub command: Vec<String>,

  /// Environment variable receiving the target OS (e.g. `GOOS`)
  #[serde(default = "default_os_env")]
  pub os_env: String,

  /// Environment variable receiving the target architecture (e.g. `GOARCH`)
  #[serde(default = "default_arch_env")]
  pub arch_env: String,

  /// Extra environment applied to every target (e.g. `CGO_ENABLED = "0"`)
  #[serde(default)]
  pub env: BTreeMap<String, String>,
}

fn default_build_command() -> Vec<String> {
  ["go", "build", "-o", "{output}", "."]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_os_env() -> String {
  "GOOS".to_string()
}

fn default_arch_env() -> String {
  "GOARCH".to_string()
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      command: default_build_command(),
      os_env: default_os_env(),
      arch_env: default_arch_env(),
      env: BTreeMap::new(),
    }
  }
}

/// Hosting platform CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostingConfig {
  /// CLI used for auth checks and release creation
  #[serde(default = "default_hosting_cli")]
  pub cli: String,

  /// Host name used to derive owner/repo from the remote URL
  #[serde(default = "default_host")]
  pub host: String,
}

fn default_hosting_cli() -> String {
  "gh".to_string()
}

fn default_host() -> String {
  "github.com".to_string()
}

impl Default for HostingConfig {
  fn default() -> Self {
    Self {
      cli: default_hosting_cli(),
      host: default_host(),
    }
  }
}

impl Default for ShipConfig {
  fn default() -> Self {
    Self {
      product: None,
      version_file: default_version_file(),
      changelog: default_changelog(),
      dist_dir: default_dist_dir(),
      remote: default_remote(),
      build: BuildConfig::default(),
      hosting: HostingConfig::default(),
    }
  }
}

/// Non-empty relative path made only of normal components
fn is_plain_relative(path: &Path) -> bool {
  // `Path::components` drops interior `.`, so check the raw text too
  let raw = path.to_string_lossy();
  let dotted = raw.split(['/', '\\']).any(|part| part == "." || part == "..");

  !dotted && path.components().next().is_some() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

impl ShipConfig {
  /// Find config file in search order: shiprail.toml, .shiprail.toml, .config/shiprail.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("shiprail.toml"),
      path.join(".shiprail.toml"),
      path.join(".config").join("shiprail.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> RailResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no shiprail.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ShipConfig = toml_edit::de::from_str(&content).map_err(|e| {
      RailError::Config(ConfigError::Invalid {
        path: config_path.clone(),
        reason: e.to_string(),
      })
    })?;

    config.validate(&config_path)?;
    Ok(config)
  }

  /// Reject configurations that can never build
  fn validate(&self, config_path: &Path) -> RailResult<()> {
    let invalid = |reason: &str| {
      RailError::Config(ConfigError::Invalid {
        path: config_path.to_path_buf(),
        reason: reason.to_string(),
      })
    };

    if self.build.command.is_empty() {
      return Err(invalid("[build] command must name a program"));
    }
    if !self.build.command.iter().any(|arg| arg.contains("{output}")) {
      return Err(invalid("[build] command must contain the {output} placeholder"));
    }
    if let Some(product) = &self.product
      && (product.is_empty() || product.contains(['/', '\\']))
    {
      return Err(invalid("product must be a non-empty name without path separators"));
    }
    if self.remote.trim().is_empty() {
      return Err(invalid("remote must not be empty"));
    }
    if !is_plain_relative(&self.dist_dir) {
      return Err(invalid(
        "dist_dir must be a relative path below the repository root (no `.`, `..` or absolute parts)",
      ));
    }

    Ok(())
  }

  /// Product name, defaulting to the repository directory name
  pub fn product_name(&self, root: &Path) -> String {
    self.product.clone().unwrap_or_else(|| {
      root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
    })
  }

  /// Save config to shiprail.toml (default location)
  pub fn save(&self, path: &Path) -> RailResult<PathBuf> {
    let config_path = path.join("shiprail.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }
}
