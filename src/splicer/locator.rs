//! # Header Locator Module
//!
//! Partitions raw file text into its preamble, its existing license header
//! (if any) and everything that follows.

use super::classifier::{is_blank_line, is_comment_line, is_special_line};

/// The three regions of a file as seen by the splicer.
///
/// Every field borrows from the text passed to [`locate`], with original line
/// terminators intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located<'a> {
  /// Leading run of special lines (shebang, encoding, editor directives).
  pub preserved: &'a str,
  /// The header block starting at the marker line, including any blank lines
  /// that trail it. `None` when the file has no recognizable header.
  pub existing_header: Option<&'a str>,
  /// Content after the header block, or all content after the preamble when
  /// no header was found.
  pub remainder: &'a str,
}

impl Located<'_> {
  /// Whether a header block was found.
  pub const fn has_header(&self) -> bool {
    self.existing_header.is_some()
  }
}

/// Locates the license header identified by `marker` in `text`.
///
/// The marker is only recognized on the first non-blank line after the
/// preamble. Any other content before it means the file has no header, even
/// if the marker text appears further down.
pub fn locate<'a>(text: &'a str, marker: &str) -> Located<'a> {
  let preamble_len: usize = text
    .split_inclusive('\n')
    .take_while(|line| is_special_line(line))
    .map(str::len)
    .sum();

  let (preserved, content) = text.split_at(preamble_len);

  let Some(start) = find_marker_line(content, marker) else {
    return Located {
      preserved,
      existing_header: None,
      remainder: content,
    };
  };

  let block = &content[start..];
  let mut lines = block.split_inclusive('\n');

  // The marker line opens the block unconditionally.
  let mut end = lines.next().map_or(0, str::len);
  for line in lines {
    if !is_comment_line(line) {
      break;
    }
    end += line.len();
  }

  Located {
    preserved,
    existing_header: Some(&block[..end]),
    remainder: &block[end..],
  }
}

/// Returns the byte offset of the marker line within `content`, if the first
/// non-blank line carries the marker.
fn find_marker_line(content: &str, marker: &str) -> Option<usize> {
  if marker.trim().is_empty() {
    return None;
  }

  let mut offset = 0;
  for line in content.split_inclusive('\n') {
    if is_blank_line(line) {
      offset += line.len();
      continue;
    }

    return line.trim().starts_with(marker).then_some(offset);
  }

  None
}
