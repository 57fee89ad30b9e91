//! Release version resolution
//!
//! The version file is the single source of truth and is never written. Its
//! trimmed content must be exactly `MAJOR.MINOR.PATCH`; no pre-release or build
//! metadata, no normalization, no default.

use crate::core::error::{RailResult, ValidationError};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// A validated `MAJOR.MINOR.PATCH` version, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
  raw: String,
  semver: semver::Version,
}

impl ReleaseVersion {
  /// Validate a version string (already trimmed by the caller or not)
  ///
  /// Returns `None` unless the trimmed input is three ASCII-digit groups.
  pub fn parse(input: &str) -> Option<Self> {
    let raw = input.trim();
    let mut parts = raw.split('.');
    let (major, minor, patch) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
      return None;
    }

    let component = |part: &str| -> Option<u64> {
      if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
      }
      part.parse().ok()
    };

    Some(Self {
      raw: raw.to_string(),
      semver: semver::Version::new(component(major)?, component(minor)?, component(patch)?),
    })
  }

  /// Read and validate the version file
  pub fn resolve(path: &Path) -> RailResult<Self> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(err) if err.kind() == io::ErrorKind::NotFound => {
        return Err(
          ValidationError::InvalidVersionFormat {
            path: path.to_path_buf(),
            found: None,
          }
          .into(),
        );
      }
      Err(err) => return Err(err.into()),
    };

    Self::parse(&content).ok_or_else(|| {
      ValidationError::InvalidVersionFormat {
        path: path.to_path_buf(),
        found: Some(content.trim().to_string()),
      }
      .into()
    })
  }

  /// The version exactly as written in the file (trimmed)
  pub fn as_str(&self) -> &str {
    &self.raw
  }

  /// Numeric form for ordering against existing tags
  pub fn semver(&self) -> &semver::Version {
    &self.semver
  }

  /// Release tag name: `v<version>`
  pub fn tag(&self) -> String {
    format!("v{}", self.raw)
  }
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}
