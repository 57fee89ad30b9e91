//! Archive packaging and checksums for built binaries

use crate::core::error::{BuildError, RailResult};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Write `binary` into a new zip at `archive`, stored at the root as `entry_name`
pub fn package_binary(binary: &Path, entry_name: &str, archive: &Path) -> RailResult<()> {
  write_archive(binary, entry_name, archive).map_err(|reason| {
    BuildError::PackagingFailed {
      archive: archive.to_path_buf(),
      reason,
    }
    .into()
  })
}

fn write_archive(binary: &Path, entry_name: &str, archive: &Path) -> Result<(), String> {
  let mut input = BufReader::new(File::open(binary).map_err(|e| format!("cannot read {}: {}", binary.display(), e))?);
  let output = File::create(archive).map_err(|e| e.to_string())?;

  let options = SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .unix_permissions(0o755);

  let mut zip = ZipWriter::new(output);
  zip.start_file(entry_name, options).map_err(|e| e.to_string())?;
  io::copy(&mut input, &mut zip).map_err(|e| e.to_string())?;
  zip.finish().map_err(|e| e.to_string())?;
  Ok(())
}

/// Lowercase hex SHA-256 of a file
pub fn sha256_file(path: &Path) -> RailResult<String> {
  let mut file = BufReader::new(File::open(path)?);
  let mut hasher = Sha256::new();
  io::copy(&mut file, &mut hasher)?;
  Ok(format!("{:x}", hasher.finalize()))
}
