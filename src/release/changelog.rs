//! Changelog section extraction
//!
//! Sections are delimited by a `Version X.Y.Z` heading line followed by a line
//! of dashes (reStructuredText section style):
//!
//! ```text
//! Version 1.1.0
//! -------------
//!
//! - Fixed bug X
//! ```
//!
//! Headings only match at line starts, so version numbers mentioned in prose
//! never open or close a section.

use crate::core::error::{RailResult, ValidationError};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

/// Any section heading, used to find where the current section ends
const ANY_HEADING: &str = r"(?m)^Version [0-9]+\.[0-9]+\.[0-9]+[ \t]*\r?\n-+[ \t]*\r?$";

/// Extract the trimmed body of the `Version <version>` section
///
/// Pure function of the document text and version string.
pub fn extract_section(text: &str, version: &str) -> RailResult<String> {
  let heading = Regex::new(&format!(
    r"(?m)^Version {}[ \t]*\r?\n-+[ \t]*(\r?\n|$)",
    regex::escape(version)
  ))?;

  let Some(found) = heading.find(text) else {
    return Err(
      ValidationError::SectionNotFound {
        version: version.to_string(),
      }
      .into(),
    );
  };

  let rest = &text[found.end()..];
  let next = Regex::new(ANY_HEADING)?;
  let window = match next.find(rest) {
    Some(m) => &rest[..m.start()],
    None => rest,
  };

  let body = window.trim();
  if body.is_empty() {
    return Err(
      ValidationError::EmptySection {
        version: version.to_string(),
      }
      .into(),
    );
  }

  Ok(body.to_string())
}

/// Read the changelog document and extract the section for `version`
pub fn load_section(path: &Path, version: &str) -> RailResult<String> {
  let text = match fs::read_to_string(path) {
    Ok(text) => text,
    Err(err) if err.kind() == io::ErrorKind::NotFound => {
      return Err(ValidationError::ChangelogMissing { path: path.to_path_buf() }.into());
    }
    Err(err) => return Err(err.into()),
  };

  extract_section(&text, version)
}
