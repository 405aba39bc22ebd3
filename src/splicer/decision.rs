//! # Decision Module
//!
//! Decides what to do with a located header and rebuilds the file text when a
//! header has to be inserted or replaced.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::line_ending::LineEnding;
use super::locator::{Located, locate};

/// How aggressively existing headers are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
  /// Only add headers to files that lack one; existing headers are never
  /// touched
  #[default]
  InsertOnly,
  /// Add missing headers and replace existing ones that differ from the
  /// canonical header
  FullRegeneration,
}

impl std::fmt::Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Mode::InsertOnly => write!(f, "insert-only"),
      Mode::FullRegeneration => write!(f, "full-regeneration"),
    }
  }
}

/// State of a file's header relative to the canonical header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
  /// No header block was found
  Missing,
  /// The header matches the canonical text (ignoring surrounding whitespace)
  Current,
  /// A header exists but its text differs
  Stale,
}

impl HeaderState {
  /// Maps the state to an action under the given mode.
  pub const fn action(self, mode: Mode) -> Action {
    match (self, mode) {
      (HeaderState::Missing, _) => Action::Insert,
      (HeaderState::Stale, Mode::FullRegeneration) => Action::Replace,
      (HeaderState::Stale, Mode::InsertOnly) | (HeaderState::Current, _) => Action::Skip,
    }
  }
}

/// What the updater should do with the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Insert,
  Replace,
  Skip,
}

/// Outcome of splicing a header into a file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
  pub state: HeaderState,
  pub action: Action,
  /// The rebuilt file text. `None` when the action is [`Action::Skip`].
  pub content: Option<String>,
}

impl Splice {
  /// Whether the file needs to be written.
  pub const fn changes_file(&self) -> bool {
    self.content.is_some()
  }
}

/// Decides the action for a located file and rebuilds its text if needed.
///
/// `new_header` is converted to `line_ending` before it is spliced in.
/// Comparison with the existing header ignores line terminators and leading
/// and trailing whitespace on both sides.
pub fn plan(located: &Located<'_>, new_header: &str, mode: Mode, line_ending: LineEnding) -> Splice {
  let header = line_ending.apply(new_header);

  let state = match located.existing_header {
    None => HeaderState::Missing,
    Some(existing) if is_current(existing, new_header) => HeaderState::Current,
    Some(_) => HeaderState::Stale,
  };

  let action = state.action(mode);
  let content = match action {
    Action::Skip => None,
    Action::Insert | Action::Replace => Some(recombine(located, &header, line_ending)),
  };

  Splice { state, action, content }
}

/// Locates the header identified by `marker` in `text` and plans the update.
pub fn splice(text: &str, marker: &str, new_header: &str, mode: Mode) -> Splice {
  let located = locate(text, marker);
  plan(&located, new_header, mode, LineEnding::detect(text))
}

/// Whether `existing` holds the canonical header.
///
/// The located block can run past the header into comment lines that follow
/// it (`#nullable enable`, `# note`). A block that begins with the canonical
/// header and continues on a new line is therefore current as well.
fn is_current(existing: &str, canonical: &str) -> bool {
  let existing = LineEnding::Lf.apply(existing);
  let canonical = LineEnding::Lf.apply(canonical);
  let canonical = canonical.trim();

  existing
    .trim()
    .strip_prefix(canonical)
    .is_some_and(|rest| rest.is_empty() || rest.starts_with('\n'))
}

/// Joins preamble, header and remainder with exactly one blank line between
/// the header and the remainder.
fn recombine(located: &Located<'_>, header: &str, line_ending: LineEnding) -> String {
  let eol = line_ending.as_str();
  let header = header.trim_end_matches(['\r', '\n']);

  let mut out =
    String::with_capacity(located.preserved.len() + header.len() + located.remainder.len() + 2 * eol.len() + 2);

  out.push_str(located.preserved);
  if !located.preserved.is_empty() && !located.preserved.ends_with('\n') {
    out.push_str(eol);
  }
  out.push_str(header);
  out.push_str(eol);
  out.push_str(eol);
  out.push_str(located.remainder);
  out
}
