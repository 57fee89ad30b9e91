//! Release notes rendering
//!
//! Notes are the installation / quick start template followed by the
//! Markdown-converted changelog section and, once archives exist, their
//! SHA-256 checksums in `sha256sum` format.

use crate::release::build::Artifact;
use crate::release::matrix::TARGETS;
use crate::release::version::ReleaseVersion;

/// Render the full release notes document
pub fn render_release_notes(
  product: &str,
  version: &ReleaseVersion,
  changes: &str,
  artifacts: &[Artifact],
) -> String {
  let v = version.as_str();
  let downloads = TARGETS
    .iter()
    .map(|target| format!("- **{}**: `{}`", target.label, target.archive_name(product, v)))
    .collect::<Vec<_>>()
    .join("\n");

  let mut notes = format!(
    "## {product} v{v}

### Installation

Download the appropriate zip file for your platform below, extract it, and you're ready to go!

{downloads}

### Quick Start

1. Download the zip file for your platform
2. Extract it: `unzip {product}-v{v}-<platform>.zip`
3. Make it executable (Linux/macOS): `chmod +x {product}`
4. Move to your PATH: `sudo mv {product} /usr/local/bin/`
5. Run: `{product} --help`

### Changes

{changes}
"
  );

  if !artifacts.is_empty() {
    notes.push_str("\n### Checksums\n\n```\n");
    for artifact in artifacts {
      notes.push_str(&format!("{}  {}\n", artifact.sha256, artifact.file_name()));
    }
    notes.push_str("```\n");
  }

  notes
}
