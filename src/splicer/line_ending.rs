//! # Line Ending Module
//!
//! Detects whether a file uses LF or CRLF so that spliced headers use the
//! same terminators as the rest of the file.

use std::borrow::Cow;

/// Line terminator style of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
  /// Unix style `\n`
  #[default]
  Lf,
  /// Windows style `\r\n`
  Crlf,
}

impl LineEnding {
  /// Detects the style used by `text`. Any `\r\n` pair makes the file CRLF.
  pub fn detect(text: &str) -> Self {
    if text.contains("\r\n") { Self::Crlf } else { Self::Lf }
  }

  /// The terminator as text.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Lf => "\n",
      Self::Crlf => "\r\n",
    }
  }

  /// Rewrites every line break in `text` to this style.
  pub fn apply(self, text: &str) -> Cow<'_, str> {
    match self {
      Self::Lf if text.contains("\r\n") => Cow::Owned(text.replace("\r\n", "\n")),
      Self::Lf => Cow::Borrowed(text),
      Self::Crlf => {
        if !text.contains('\n') {
          return Cow::Borrowed(text);
        }
        let normalized = text.replace("\r\n", "\n");
        Cow::Owned(normalized.replace('\n', "\r\n"))
      }
    }
  }
}
