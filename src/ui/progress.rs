//! Progress indicators for the build matrix
//!
//! Uses `linya` for allocation-free, concurrency-friendly progress bars.
//! Cloned handles share one bar, so parallel build workers can tick it.

use linya::{Bar, Progress};
use std::sync::{Arc, Mutex};

/// Thread-safe progress bar counting finished build targets
#[derive(Clone)]
pub struct BuildProgress {
  progress: Arc<Mutex<Progress>>,
  bar: Arc<Bar>,
}

impl BuildProgress {
  /// Create a bar for `total` targets
  pub fn new(total: usize, label: impl Into<String>) -> Self {
    let mut progress = Progress::new();
    let bar = progress.bar(total, label.into());
    Self {
      progress: Arc::new(Mutex::new(progress)),
      bar: Arc::new(bar),
    }
  }

  /// Mark one target as finished
  pub fn inc(&self) {
    // A poisoned lock only means another worker panicked mid-draw
    if let Ok(mut progress) = self.progress.lock() {
      progress.inc_and_draw(&self.bar, 1);
    }
  }
}
