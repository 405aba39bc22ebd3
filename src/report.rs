//! # Report Module
//!
//! This module records what happened to each processed file and writes a
//! JSON report for `--report-json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::splicer::{Action, HeaderState, Splice};
use crate::templates::Category;

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// File category, used to pick the header
  pub category: Category,
  /// Outcome for the file
  pub action: FileAction,
  /// Error message for failed files
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl FileReport {
  pub const fn new(path: PathBuf, category: Category, action: FileAction) -> Self {
    Self {
      path,
      category,
      action,
      error: None,
    }
  }

  pub fn failed(path: PathBuf, category: Category, error: impl std::fmt::Display) -> Self {
    Self {
      path,
      category,
      action: FileAction::Failed,
      error: Some(error.to_string()),
    }
  }
}

/// Outcome for a single file.
///
/// In check mode the same values describe what *would* happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileAction {
  /// A header was inserted
  Inserted,
  /// A stale header was replaced
  Regenerated,
  /// The header already matched
  UpToDate,
  /// A stale header was left alone because the mode is insert-only
  StaleKept,
  /// The file could not be read or written
  Failed,
}

impl FileAction {
  /// Whether this outcome rewrites the file.
  pub const fn modifies_file(self) -> bool {
    matches!(self, FileAction::Inserted | FileAction::Regenerated)
  }
}

impl From<&Splice> for FileAction {
  fn from(splice: &Splice) -> Self {
    match (splice.action, splice.state) {
      (Action::Insert, _) => FileAction::Inserted,
      (Action::Replace, _) => FileAction::Regenerated,
      (Action::Skip, HeaderState::Stale) => FileAction::StaleKept,
      (Action::Skip, _) => FileAction::UpToDate,
    }
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy().replace('\\', "/"))
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
  /// Total number of supported files seen
  pub total_files: usize,
  pub up_to_date: usize,
  pub inserted: usize,
  pub regenerated: usize,
  pub stale_kept: usize,
  pub failed: usize,
  /// Files rewritten (or that would be rewritten in check mode)
  pub modified: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: std::time::Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: std::time::Duration) -> Self {
    let mut summary = Self {
      total_files: files.len(),
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      ..Self::default()
    };

    for file in files {
      match file.action {
        FileAction::Inserted => summary.inserted += 1,
        FileAction::Regenerated => summary.regenerated += 1,
        FileAction::UpToDate => summary.up_to_date += 1,
        FileAction::StaleKept => summary.stale_kept += 1,
        FileAction::Failed => summary.failed += 1,
      }
      if file.action.modifies_file() {
        summary.modified += 1;
      }
    }

    summary
  }

  /// Whether the run should exit non-zero.
  pub const fn is_failure(&self, check_only: bool) -> bool {
    self.failed > 0 || (check_only && self.modified > 0)
  }
}

/// Report Generator for creating JSON reports
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
  /// Root used to make file paths relative
  root: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path, root: &'a Path) -> Self {
    Self { output_path, root }
  }

  /// Generate a report and write it to the output path.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary, check_only: bool) -> Result<()> {
    let content = self.generate_json(files, summary, check_only)?;

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }

  /// Generate JSON report content
  fn generate_json(&self, files: &[FileReport], summary: &ProcessingSummary, check_only: bool) -> Result<String> {
    use serde_json::{json, to_string_pretty};

    let files: Vec<FileReport> = files
      .iter()
      .map(|file| FileReport {
        path: file.path.strip_prefix(self.root).unwrap_or(&file.path).to_path_buf(),
        ..file.clone()
      })
      .collect();

    let report = json!({
        "generated_at": Local::now().to_rfc3339(),
        "check_only": check_only,
        "summary": summary,
        "files": files,
    });

    Ok(to_string_pretty(&report)?)
  }
}
