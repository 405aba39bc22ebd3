//! # Output Module
//!
//! This module centralizes all user-facing output for the reheader tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Informative**: Show actionable information without requiring flags
//! - **Scannable**: Use formatting to make output easy to parse visually
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: Keep stdout predictable for piping/automation

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileAction, FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Header inserted or current
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Stale header left in place
  pub const STALE: &str = "-";
  /// Header regenerated
  pub const UPDATED: &str = "\u{21bb}"; // ↻
}

/// Maximum number of files to show in the default output before truncating
const DEFAULT_FILE_LIST_LIMIT: usize = 20;

/// Print the initial "Checking N files..." or "Processing N files..." message.
pub fn print_start_message(file_count: usize, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Processing" } else { "Checking" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Groups of reports printed as separate lists.
pub struct CategorizedReports<'a> {
  pub inserted: Vec<&'a FileReport>,
  pub regenerated: Vec<&'a FileReport>,
  pub stale_kept: Vec<&'a FileReport>,
  pub failed: Vec<&'a FileReport>,
}

impl<'a> CategorizedReports<'a> {
  /// Categorize a slice of file reports. Up-to-date files are not listed.
  pub fn from_reports(reports: &'a [FileReport]) -> Self {
    let mut categorized = Self {
      inserted: Vec::new(),
      regenerated: Vec::new(),
      stale_kept: Vec::new(),
      failed: Vec::new(),
    };

    for report in reports {
      match report.action {
        FileAction::Inserted => categorized.inserted.push(report),
        FileAction::Regenerated => categorized.regenerated.push(report),
        FileAction::StaleKept => categorized.stale_kept.push(report),
        FileAction::Failed => categorized.failed.push(report),
        FileAction::UpToDate => {}
      }
    }

    categorized
  }
}

/// Print every non-empty group of reports.
///
/// In check mode the headings describe what would happen.
pub fn print_reports(reports: &[FileReport], root: &Path, check_only: bool) {
  let categorized = CategorizedReports::from_reports(reports);

  let (inserted, regenerated) = if check_only {
    ("Would insert header in", "Would regenerate header in")
  } else {
    ("Inserted header in", "Regenerated header in")
  };

  print_file_list(
    &categorized.inserted,
    root,
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    inserted,
  );
  print_file_list(
    &categorized.regenerated,
    root,
    symbols::UPDATED.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
    regenerated,
  );
  print_file_list(
    &categorized.stale_kept,
    root,
    symbols::STALE.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string(),
    "Kept stale header in",
  );
  print_failed_files(&categorized.failed, root);
}

/// Print a heading and up to [`DEFAULT_FILE_LIST_LIMIT`] paths, or all of them
/// in verbose mode.
fn print_file_list(files: &[&FileReport], root: &Path, symbol: String, heading: &str) {
  if is_quiet() || files.is_empty() {
    return;
  }

  let count = files.len();
  println!(
    "{} {} {} {}:",
    symbol,
    heading,
    count,
    if count == 1 { "file" } else { "files" }
  );

  let show_all = is_verbose();
  let limit = if show_all { count } else { DEFAULT_FILE_LIST_LIMIT };

  for file in files.iter().take(limit) {
    println!("  {}", make_relative_path(&file.path, root));
  }

  if !show_all && count > limit {
    println!(
      "  {} ... and {} more (use -v to see all)",
      "".if_supports_color(Stream::Stdout, |s| s.dimmed()),
      count - limit
    );
  }
}

/// Print failed files with their errors. Failures go to stderr and are shown
/// even in quiet mode.
fn print_failed_files(files: &[&FileReport], root: &Path) {
  if files.is_empty() {
    return;
  }

  let count = files.len();
  eprintln!(
    "{} Failed to process {} {}:",
    symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
    count,
    if count == 1 { "file" } else { "files" }
  );

  for file in files {
    let error = file.error.as_deref().unwrap_or("unknown error");
    eprintln!("  {}: {}", make_relative_path(&file.path, root), error);
  }
}

/// Print the processing summary.
///
/// Format: "Summary: A up to date, B inserted, C regenerated, D stale kept,
/// E failed (F modified)". In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, check_only: bool) {
  if is_quiet() {
    return;
  }

  let failed_str = if summary.failed > 0 {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
  } else {
    summary.failed.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
  };
  let modified_word = if check_only { "would change" } else { "modified" };

  let mut summary_line = format!(
    "Summary: {} up to date, {} inserted, {} regenerated, {} stale kept, {} failed ({} {})",
    summary.up_to_date.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.inserted.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.regenerated.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.stale_kept.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    failed_str,
    summary.modified,
    modified_word,
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the root for display, using `/` separators.
pub fn make_relative_path(path: &Path, root: &Path) -> String {
  let relative = path
    .strip_prefix(root)
    .map(Path::to_path_buf)
    .ok()
    .or_else(|| pathdiff::diff_paths(path, root).filter(|p| !p.starts_with("..")))
    .unwrap_or_else(|| path.to_path_buf());

  relative.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;
  use crate::templates::Category;

  fn create_test_report(path: &str, action: FileAction) -> FileReport {
    FileReport::new(PathBuf::from(path), Category::CSharp, action)
  }

  #[test]
  fn test_categorize_reports_mixed() {
    let reports = vec![
      create_test_report("src/ok.cs", FileAction::UpToDate),
      create_test_report("src/new.cs", FileAction::Inserted),
      create_test_report("src/old.cs", FileAction::Regenerated),
      create_test_report("src/kept.cs", FileAction::StaleKept),
      FileReport::failed(PathBuf::from("src/bad.cs"), Category::CSharp, "denied"),
    ];

    let categorized = CategorizedReports::from_reports(&reports);

    assert_eq!(categorized.inserted.len(), 1);
    assert_eq!(categorized.regenerated.len(), 1);
    assert_eq!(categorized.stale_kept.len(), 1);
    assert_eq!(categorized.failed.len(), 1);
    assert_eq!(categorized.failed[0].error.as_deref(), Some("denied"));
  }

  #[test]
  fn test_categorize_reports_up_to_date_not_listed() {
    let reports = vec![create_test_report("src/ok.cs", FileAction::UpToDate)];

    let categorized = CategorizedReports::from_reports(&reports);

    assert!(categorized.inserted.is_empty());
    assert!(categorized.regenerated.is_empty());
    assert!(categorized.stale_kept.is_empty());
    assert!(categorized.failed.is_empty());
  }

  #[test]
  fn test_make_relative_path_with_root() {
    let path = PathBuf::from("/workspace/project/src/main.py");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, &root), "src/main.py");
  }

  #[test]
  fn test_make_relative_path_outside_root() {
    let path = PathBuf::from("/elsewhere/main.py");
    let root = PathBuf::from("/workspace/project");

    assert_eq!(make_relative_path(&path, &root), "/elsewhere/main.py");
  }
}
