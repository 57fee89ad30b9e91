//! Terminal UI helpers

pub mod progress;
pub mod prompt;

pub use progress::BuildProgress;
pub use prompt::{Prompt, StdinPrompt};
