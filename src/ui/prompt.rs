//! Interactive confirmation prompts

use std::io::{self, BufRead, Write};

/// Yes/no question asked of the operator
pub trait Prompt {
  /// Ask `question`; `true` only on an explicit yes
  fn confirm(&self, question: &str) -> bool;
}

/// Prompt on the terminal, answered on stdin
///
/// Blocks until a line is read. End of input counts as "no".
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
  fn confirm(&self, question: &str) -> bool {
    eprint!("{} [y/N]: ", question);
    let _ = io::stderr().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
      Ok(_) => is_yes(&line),
      Err(err) => {
        tracing::warn!(error = %err, "could not read prompt answer, treating as no");
        false
      }
    }
  }
}

fn is_yes(answer: &str) -> bool {
  matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
