//! The fixed build matrix: three OS families times two architectures

use serde::Serialize;
use std::fmt;

/// One (os, arch) pair the product is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildTarget {
  pub os: &'static str,
  pub arch: &'static str,
  /// Executable suffix on disk (`.exe` for Windows, empty otherwise)
  #[serde(skip)]
  pub ext: &'static str,
  /// Human label used in the release notes
  #[serde(skip)]
  pub label: &'static str,
}

/// Every release builds exactly these targets, in this order
pub const TARGETS: [BuildTarget; 6] = [
  BuildTarget::new("linux", "amd64", "", "Linux AMD64"),
  BuildTarget::new("linux", "arm64", "", "Linux ARM64"),
  BuildTarget::new("windows", "amd64", ".exe", "Windows AMD64"),
  BuildTarget::new("windows", "arm64", ".exe", "Windows ARM64"),
  BuildTarget::new("darwin", "amd64", "", "macOS Intel"),
  BuildTarget::new("darwin", "arm64", "", "macOS Apple Silicon"),
];

impl BuildTarget {
  const fn new(os: &'static str, arch: &'static str, ext: &'static str, label: &'static str) -> Self {
    Self { os, arch, ext, label }
  }

  /// `<os>-<arch>`, used for per-target directories and archive names
  pub fn slug(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }

  /// Binary file name, with the executable suffix
  pub fn binary_name(&self, product: &str) -> String {
    format!("{}{}", product, self.ext)
  }

  /// `<product>-v<version>-<os>-<arch>.zip`
  pub fn archive_name(&self, product: &str, version: &str) -> String {
    format!("{}-v{}-{}.zip", product, version, self.slug())
  }
}

impl fmt::Display for BuildTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.os, self.arch)
  }
}
