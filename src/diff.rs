//! # Diff Module
//!
//! This module renders line diffs between a file's current text and the text
//! the processor would write. It backs `--show-diff`.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};
use similar::TextDiff;

/// Lines of unchanged context shown around each hunk.
const CONTEXT_RADIUS: usize = 3;

/// Manages diff rendering for header changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Renders a unified diff of `original` against `new`, labelled with
  /// `label` on both sides.
  pub fn render(label: &str, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);
    let mut unified = diff.unified_diff();
    unified
      .context_radius(CONTEXT_RADIUS)
      .header(&format!("a/{label}"), &format!("b/{label}"));

    unified.to_string()
  }

  /// Prints the diff for one file to stderr when diffs are enabled.
  ///
  /// Added lines are green and removed lines are red when the terminal
  /// supports colors.
  pub fn display_diff(&self, path: &Path, label: &str, original: &str, new: &str) {
    if !self.show_diff {
      return;
    }

    tracing::trace!("Rendering diff for {}", path.display());

    let rendered = Self::render(label, original, new);
    let mut lines = rendered.lines();

    // File headers come first and are never colored.
    for line in lines.by_ref().take(2) {
      eprintln!("{line}");
    }
    for line in lines {
      match line.as_bytes().first() {
        Some(b'@') => eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.cyan())),
        Some(b'-') => eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.red())),
        Some(b'+') => eprintln!("{}", line.if_supports_color(Stream::Stderr, |l| l.green())),
        _ => eprintln!("{line}"),
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_shows_inserted_header() {
    let rendered = DiffManager::render("app.py", "print('hi')\n", "# HDR\n# body\n\nprint('hi')\n");

    assert!(rendered.contains("--- a/app.py"));
    assert!(rendered.contains("+++ b/app.py"));
    assert!(rendered.contains("+# HDR\n"));
    assert!(rendered.contains("+# body\n"));
    assert!(rendered.contains(" print('hi')\n"));
  }

  #[test]
  fn test_render_shows_replaced_lines() {
    let rendered = DiffManager::render("a.py", "# HDR\n# old\n\ncode\n", "# HDR\n# new\n\ncode\n");

    assert!(rendered.contains("-# old\n"));
    assert!(rendered.contains("+# new\n"));
  }

  #[test]
  fn test_render_identical_is_empty_of_changes() {
    let rendered = DiffManager::render("a.py", "same\n", "same\n");
    assert!(!rendered.contains("@@"));
  }
}
