//! # Line Classifier Module
//!
//! Prefix predicates used by the locator to recognize preamble lines and the
//! lines that make up a header block.

/// Prefixes of lines that must stay at the very top of a file: interpreter
/// directives, encoding declarations and editor configuration.
const SPECIAL_PREFIXES: [&str; 3] = ["#!", "# -*-", "# vim:"];

/// Comment openers accepted inside a header block, across every supported
/// category.
const COMMENT_PREFIXES: [&str; 4] = ["#", "/*", "*", "//"];

/// Returns `true` if the line is a preamble line (shebang, encoding or editor
/// directive).
pub fn is_special_line(line: &str) -> bool {
  let trimmed = line.trim_start();
  SPECIAL_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

/// Returns `true` if the line can belong to a header block.
///
/// Blank lines qualify, as does anything that starts with a comment opener
/// once leading whitespace is removed. Only the prefix is inspected, so an
/// unterminated `/*` or a stray ` */` are both accepted.
pub fn is_comment_line(line: &str) -> bool {
  let trimmed = line.trim_start();
  trimmed.is_empty() || COMMENT_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

/// Returns `true` if the line holds nothing but whitespace and its terminator.
pub fn is_blank_line(line: &str) -> bool {
  line.trim().is_empty()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_special_line_shebang() {
    assert!(is_special_line("#!/usr/bin/env python3\n"));
    assert!(is_special_line("  #!/bin/sh"));
  }

  #[test]
  fn test_special_line_encoding_and_vim() {
    assert!(is_special_line("# -*- coding: utf-8 -*-\n"));
    assert!(is_special_line("# vim: set fileencoding=utf-8 :\r\n"));
  }

  #[test]
  fn test_special_line_rejects_plain_comments() {
    assert!(!is_special_line("# region License Header\n"));
    assert!(!is_special_line("#region License Header\n"));
    assert!(!is_special_line("// -*- not python -*-\n"));
    assert!(!is_special_line("\n"));
    assert!(!is_special_line("import os\n"));
  }

  #[test]
  fn test_comment_line_prefixes() {
    assert!(is_comment_line("# a python comment\n"));
    assert!(is_comment_line("#endregion\n"));
    assert!(is_comment_line("/*\n"));
    assert!(is_comment_line(" * body line\n"));
    assert!(is_comment_line(" */\n"));
    assert!(is_comment_line("// line comment"));
  }

  #[test]
  fn test_comment_line_accepts_blank_lines() {
    assert!(is_comment_line(""));
    assert!(is_comment_line("\n"));
    assert!(is_comment_line("   \r\n"));
  }

  #[test]
  fn test_comment_line_rejects_code() {
    assert!(!is_comment_line("using System;\n"));
    assert!(!is_comment_line("def main():\n"));
    assert!(!is_comment_line("x = 1 # trailing comment\n"));
    assert!(!is_comment_line("/ not quite a comment\n"));
  }

  #[test]
  fn test_blank_line() {
    assert!(is_blank_line("\n"));
    assert!(is_blank_line(" \t\r\n"));
    assert!(!is_blank_line(" x\n"));
  }
}
