//! Release orchestration
//!
//! # Pipeline
//!
//! 1. **version**: read `VERSION`, require `MAJOR.MINOR.PATCH`
//! 2. **changelog**: extract the `Version X.Y.Z` section from the changelog
//! 3. **preflight**: working tree, unpushed commits, tag, hosting CLI (see `checks`)
//! 4. **build**: compile and zip the six-target matrix into `dist/`
//! 5. **publish**: tag, push, create the hosted release; roll the tag back if that fails
//!
//! # Invariants
//!
//! - The version file is never written
//! - No state is mutated before the build stage (except an approved branch push)
//! - A failed release creation never leaves the local tag behind

pub mod build;
pub mod changelog;
pub mod markdown;
pub mod matrix;
pub mod notes;
pub mod package;
pub mod pipeline;
pub mod publish;
pub mod tags;
pub mod version;

pub use build::CommandToolchain;
pub use pipeline::{PipelineOptions, ReleasePipeline};
pub use version::ReleaseVersion;
