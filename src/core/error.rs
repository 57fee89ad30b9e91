//! Error types for shiprail with contextual messages and exit codes
//!
//! Every pipeline stage has its own error category so a failure names the exact
//! precondition that broke. Each category carries a help message pointing the
//! operator at the fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for shiprail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, bad version, missing changelog section)
  User = 1,
  /// System error (git, I/O)
  System = 2,
  /// Preflight check failed
  Preflight = 3,
  /// Build matrix failed
  Build = 4,
  /// Publishing failed (tag rolled back where possible)
  Publish = 5,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for shiprail
#[derive(Debug)]
pub enum RailError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Release inputs are invalid (version file, changelog)
  Validation(ValidationError),

  /// A preflight check failed
  Preflight(PreflightError),

  /// A build matrix target failed
  Build(BuildError),

  /// Tagging or release creation failed
  Publish(PublishError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RailError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RailError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RailError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RailError::Message { message, context, help } => RailError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      RailError::Io(e) => RailError::Message {
        message: format!("{}: {}", ctx_str, e),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RailError::Config(_) => ExitCode::User,
      RailError::Validation(_) => ExitCode::User,
      RailError::Git(_) => ExitCode::System,
      RailError::Io(_) => ExitCode::System,
      RailError::Preflight(_) => ExitCode::Preflight,
      RailError::Build(_) => ExitCode::Build,
      RailError::Publish(_) => ExitCode::Publish,
      RailError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RailError::Config(e) => e.help_message(),
      RailError::Git(e) => e.help_message(),
      RailError::Validation(e) => e.help_message(),
      RailError::Preflight(e) => e.help_message(),
      RailError::Build(e) => e.help_message(),
      RailError::Publish(e) => e.help_message(),
      RailError::Message { help, .. } => help.clone(),
      RailError::Io(_) => None,
    }
  }
}

impl fmt::Display for RailError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RailError::Config(e) => write!(f, "{}", e),
      RailError::Git(e) => write!(f, "{}", e),
      RailError::Validation(e) => write!(f, "{}", e),
      RailError::Preflight(e) => write!(f, "{}", e),
      RailError::Build(e) => write!(f, "{}", e),
      RailError::Publish(e) => write!(f, "{}", e),
      RailError::Io(e) => write!(f, "I/O error: {}", e),
      RailError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RailError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RailError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RailError {
  fn from(err: io::Error) -> Self {
    RailError::Io(err)
  }
}

impl From<String> for RailError {
  fn from(msg: String) -> Self {
    RailError::message(msg)
  }
}

impl From<&str> for RailError {
  fn from(msg: &str) -> Self {
    RailError::message(msg)
  }
}

impl From<ValidationError> for RailError {
  fn from(err: ValidationError) -> Self {
    RailError::Validation(err)
  }
}

impl From<PreflightError> for RailError {
  fn from(err: PreflightError) -> Self {
    RailError::Preflight(err)
  }
}

impl From<BuildError> for RailError {
  fn from(err: BuildError) -> Self {
    RailError::Build(err)
  }
}

impl From<PublishError> for RailError {
  fn from(err: PublishError) -> Self {
    RailError::Publish(err)
  }
}

impl From<GitError> for RailError {
  fn from(err: GitError) -> Self {
    RailError::Git(err)
  }
}

impl From<toml_edit::de::Error> for RailError {
  fn from(err: toml_edit::de::Error) -> Self {
    RailError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for RailError {
  fn from(err: toml_edit::ser::Error) -> Self {
    RailError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for RailError {
  fn from(err: serde_json::Error) -> Self {
    RailError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for RailError {
  fn from(err: regex::Error) -> Self {
    RailError::message(format!("Pattern error: {}", err))
  }
}

impl From<zip::result::ZipError> for RailError {
  fn from(err: zip::result::ZipError) -> Self {
    RailError::message(format!("Archive error: {}", err))
  }
}

impl From<rayon::ThreadPoolBuildError> for RailError {
  fn from(err: rayon::ThreadPoolBuildError) -> Self {
    RailError::message(format!("Failed to start build workers: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file exists but could not be parsed
  Invalid { path: PathBuf, reason: String },

  /// Config file already present (init without --force)
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => Some("Run `shiprail init --force` to regenerate a default configuration.".to_string()),
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite the existing file.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration already exists: {}", path.display())
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },

  /// Push failed
  PushFailed {
    remote: String,
    refspec: String,
    reason: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") {
          Some("The remote has commits you don't have. Pull first, then re-run the release.".to_string())
        } else if reason.contains("Permission denied") || reason.contains("403") {
          Some("Check your SSH key or token permissions for the remote.".to_string())
        } else {
          None
        }
      }
      GitError::RepoNotFound { path } => Some(format!(
        "Run shiprail from inside a git repository (checked: {})",
        path.display()
      )),
      GitError::CommandFailed { .. } => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim_end())
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
      GitError::PushFailed {
        remote,
        refspec,
        reason,
      } => {
        write!(f, "Push of {} to {} failed: {}", refspec, remote, reason.trim_end())
      }
    }
  }
}

/// Release input validation errors
///
/// Nothing has been mutated when one of these is raised.
#[derive(Debug)]
pub enum ValidationError {
  /// Version file missing, or its content is not `MAJOR.MINOR.PATCH`
  InvalidVersionFormat { path: PathBuf, found: Option<String> },

  /// Changelog document does not exist
  ChangelogMissing { path: PathBuf },

  /// No `Version X.Y.Z` heading for the release version
  SectionNotFound { version: String },

  /// Heading exists but the section body is blank
  EmptySection { version: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::InvalidVersionFormat { path, .. } => Some(format!(
        "Write a single semantic version such as 1.2.3 to {}",
        path.display()
      )),
      ValidationError::ChangelogMissing { .. } => {
        Some("Set `changelog` in shiprail.toml to the changelog document path.".to_string())
      }
      ValidationError::SectionNotFound { version } => Some(format!(
        "Add a section to the changelog:\n  Version {}\n  {}",
        version,
        "-".repeat(8 + version.len())
      )),
      ValidationError::EmptySection { version } => {
        Some(format!("Describe the changes under the `Version {}` heading.", version))
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::InvalidVersionFormat { path, found: None } => {
        write!(f, "Version file not found: {}", path.display())
      }
      ValidationError::InvalidVersionFormat { path, found: Some(found) } => {
        write!(
          f,
          "Invalid version format '{}' in {}. Expected semver (e.g., 1.2.3)",
          found,
          path.display()
        )
      }
      ValidationError::ChangelogMissing { path } => {
        write!(f, "Changelog not found: {}", path.display())
      }
      ValidationError::SectionNotFound { version } => {
        write!(f, "No changes found for version {} in the changelog", version)
      }
      ValidationError::EmptySection { version } => {
        write!(f, "Changelog for version {} is empty", version)
      }
    }
  }
}

/// Preflight check failures
///
/// Nothing has been mutated when one of these is raised.
#[derive(Debug, Clone)]
pub enum PreflightError {
  /// Uncommitted or untracked changes are pending
  DirtyWorkingTree { changes: Vec<String> },

  /// The release tag already exists locally
  TagAlreadyExists { tag: String },

  /// The hosting CLI is not installed
  ToolingUnavailable { tool: String },

  /// The hosting CLI is installed but not logged in
  ToolingUnauthenticated { tool: String },
}

impl PreflightError {
  fn help_message(&self) -> Option<String> {
    match self {
      PreflightError::DirtyWorkingTree { .. } => Some("Commit or stash your changes first.".to_string()),
      PreflightError::TagAlreadyExists { tag } => Some(format!(
        "Either update the version file to a new version, or delete the existing tag: git tag -d {}",
        tag
      )),
      PreflightError::ToolingUnavailable { tool } if tool == "gh" => {
        Some("Install the GitHub CLI from https://cli.github.com/".to_string())
      }
      PreflightError::ToolingUnavailable { tool } => Some(format!("Install `{}` and make sure it is on PATH.", tool)),
      PreflightError::ToolingUnauthenticated { tool } => Some(format!("Run: {} auth login", tool)),
    }
  }
}

impl fmt::Display for PreflightError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PreflightError::DirtyWorkingTree { changes } => {
        write!(f, "Working directory is not clean. Uncommitted changes:")?;
        for change in changes {
          write!(f, "\n  {}", change)?;
        }
        Ok(())
      }
      PreflightError::TagAlreadyExists { tag } => write!(f, "Git tag '{}' already exists", tag),
      PreflightError::ToolingUnavailable { tool } => write!(f, "`{}` is not installed", tool),
      PreflightError::ToolingUnauthenticated { tool } => write!(f, "`{}` is not authenticated", tool),
    }
  }
}

/// Build matrix failures
#[derive(Debug)]
pub enum BuildError {
  /// The toolchain failed for one target; the matrix is aborted
  BuildFailed { target: String, stderr: String },

  /// The binary was built but could not be packaged
  PackagingFailed { archive: PathBuf, reason: String },
}

impl BuildError {
  fn help_message(&self) -> Option<String> {
    match self {
      BuildError::BuildFailed { .. } => {
        Some("Fix the build for this target; archives from earlier targets are left in the dist directory.".to_string())
      }
      BuildError::PackagingFailed { .. } => Some("Check free disk space and permissions on the dist directory.".to_string()),
    }
  }
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::BuildFailed { target, stderr } => {
        write!(f, "Failed to build {}", target)?;
        if !stderr.trim().is_empty() {
          write!(f, "\n{}", stderr.trim_end())?;
        }
        Ok(())
      }
      BuildError::PackagingFailed { archive, reason } => {
        write!(f, "Failed to package {}: {}", archive.display(), reason)
      }
    }
  }
}

/// What the compensating rollback managed to undo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackReport {
  /// Local tag was deleted
  pub local_tag_deleted: bool,
  /// Remote tag was deleted (best-effort)
  pub remote_tag_deleted: bool,
  /// Why the local deletion failed, if it did
  pub local_error: Option<String>,
  /// Why the remote deletion failed, if it did
  pub remote_error: Option<String>,
}

/// Publishing failures
#[derive(Debug)]
pub enum PublishError {
  /// `git tag` failed; nothing to undo
  TagCreateFailed { tag: String, reason: String },

  /// Tag exists locally but could not be pushed; left in place
  TagPushFailed { tag: String, remote: String, reason: String },

  /// Release creation failed after the tag was pushed; tag rolled back
  ReleaseCreateFailed {
    tag: String,
    reason: String,
    rollback: RollbackReport,
  },
}

impl PublishError {
  fn help_message(&self) -> Option<String> {
    match self {
      PublishError::TagCreateFailed { .. } => None,
      PublishError::TagPushFailed { tag, remote, .. } => Some(format!(
        "The tag still exists locally. Retry with `git push {} {}` or delete it with `git tag -d {}`.",
        remote, tag, tag
      )),
      PublishError::ReleaseCreateFailed { tag, rollback, .. } => {
        if !rollback.local_tag_deleted {
          Some(format!("Delete the local tag manually: git tag -d {}", tag))
        } else if !rollback.remote_tag_deleted {
          Some(format!("Delete the orphaned remote tag manually: git push origin :refs/tags/{}", tag))
        } else {
          Some("The tag was removed locally and remotely; fix the cause and re-run the release.".to_string())
        }
      }
    }
  }
}

impl fmt::Display for PublishError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PublishError::TagCreateFailed { tag, reason } => {
        write!(f, "Failed to create tag '{}': {}", tag, reason.trim_end())
      }
      PublishError::TagPushFailed { tag, remote, reason } => {
        write!(f, "Failed to push tag '{}' to {}: {}", tag, remote, reason.trim_end())
      }
      PublishError::ReleaseCreateFailed { tag, reason, rollback } => {
        write!(f, "Failed to create release for '{}': {}", tag, reason.trim_end())?;
        if let Some(err) = &rollback.local_error {
          write!(f, "\nRollback could not delete the local tag: {}", err.trim_end())?;
        }
        if let Some(err) = &rollback.remote_error {
          write!(f, "\nRollback could not delete the remote tag: {}", err.trim_end())?;
        }
        Ok(())
      }
    }
  }
}

/// Result type alias for shiprail
pub type RailResult<T> = Result<T, RailError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RailResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RailResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RailError>,
{
  fn context(self, ctx: impl Into<String>) -> RailResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RailResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RailError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}

impl From<anyhow::Error> for RailError {
  fn from(err: anyhow::Error) -> Self {
    RailError::message(err.to_string())
  }
}
