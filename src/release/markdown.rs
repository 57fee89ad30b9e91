//! Best-effort reStructuredText to Markdown conversion for release notes
//!
//! Only two patterns are rewritten:
//! - ``` ``code`` ``` inline literals become `` `code` ``
//! - bold label lines (`**Features:**`) lose surrounding indentation so they
//!   don't render as code blocks
//!
//! Everything else passes through untouched. The conversion never fails and is
//! idempotent.

/// Convert a changelog section to Markdown
pub fn to_markdown(text: &str) -> String {
  let mut out = String::with_capacity(text.len());

  for line in text.split_inclusive('\n') {
    let (content, ending) = split_line_ending(line);
    let converted = convert_inline_literals(content);

    if is_bold_label(converted.trim()) {
      out.push_str(converted.trim());
    } else {
      out.push_str(&converted);
    }
    out.push_str(ending);
  }

  out
}

fn split_line_ending(line: &str) -> (&str, &str) {
  if let Some(content) = line.strip_suffix("\r\n") {
    (content, "\r\n")
  } else if let Some(content) = line.strip_suffix('\n') {
    (content, "\n")
  } else {
    (line, "")
  }
}

/// `**Label:**` with a non-empty, asterisk-free label
fn is_bold_label(trimmed: &str) -> bool {
  trimmed
    .strip_prefix("**")
    .and_then(|rest| rest.strip_suffix(":**"))
    .is_some_and(|label| !label.is_empty() && !label.contains('*'))
}

/// Rewrite exact double-backtick spans to single backticks
///
/// A span opens at a run of exactly two backticks and closes at the next
/// backtick run, which must also be exactly two long. Longer or shorter runs
/// are copied verbatim.
fn convert_inline_literals(line: &str) -> String {
  let runs = backtick_runs(line);
  let mut out = String::with_capacity(line.len());
  let mut copied = 0;
  let mut i = 0;

  while i < runs.len() {
    let (open_start, open_len) = runs[i];
    if open_len == 2
      && let Some(&(close_start, 2)) = runs.get(i + 1)
    {
      out.push_str(&line[copied..open_start]);
      out.push('`');
      out.push_str(&line[open_start + 2..close_start]);
      out.push('`');
      copied = close_start + 2;
      i += 2;
    } else {
      i += 1;
    }
  }

  out.push_str(&line[copied..]);
  out
}

/// Maximal backtick runs as (byte offset, length)
fn backtick_runs(line: &str) -> Vec<(usize, usize)> {
  let bytes = line.as_bytes();
  let mut runs = Vec::new();
  let mut i = 0;

  while i < bytes.len() {
    if bytes[i] == b'`' {
      let start = i;
      while i < bytes.len() && bytes[i] == b'`' {
        i += 1;
      }
      runs.push((start, i - start));
    } else {
      i += 1;
    }
  }

  runs
}
