//! # Processor Module
//!
//! This module contains the file updater: it walks the root directory, runs
//! the splicer on every supported file and writes back the files that
//! changed.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and writing with byte order mark handling
//! - [`file_collector`] - Directory traversal, exclusions and ignore globs
//!
//! The [`Processor`] struct is the main entry point for all file operations.
//! Files are processed one at a time. A failure on one file is recorded in
//! its [`FileReport`] and processing moves on to the next file.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::Result;
pub use file_collector::{DEFAULT_EXCLUDED_DIRS, FileCollector, absolutize_path};
pub use file_io::{BOM_BYTES, FileError, FileIO, SourceText};
use tracing::{debug, trace, warn};

use crate::diff::DiffManager;
use crate::info_log;
use crate::output::make_relative_path;
use crate::report::{FileAction, FileReport};
use crate::splicer::{self, Mode};
use crate::templates::{Category, HeaderSet};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Headers for every supported category
  pub headers: HeaderSet,
  /// Directory to traverse
  pub root: PathBuf,

  // Behavior flags
  pub mode: Mode,
  pub check_only: bool,

  // Traversal
  pub exclude_dirs: Vec<String>,
  pub ignore_patterns: Vec<String>,

  pub diff_manager: DiffManager,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     mode: Mode::FullRegeneration,
  ///     ..ProcessorConfig::new(headers, root)
  /// }
  /// ```
  pub fn new(headers: HeaderSet, root: PathBuf) -> Self {
    Self {
      headers,
      root,
      mode: Mode::default(),
      check_only: false,
      exclude_dirs: Vec::new(),
      ignore_patterns: Vec::new(),
      diff_manager: DiffManager::default(),
    }
  }
}

/// Processor for keeping license headers current.
///
/// The `Processor` is responsible for:
/// - Collecting candidate files under the root
/// - Skipping files with no known category
/// - Inserting or regenerating headers according to the [`Mode`]
/// - Showing diffs and honoring check mode
/// - Collecting report data about processed files
pub struct Processor {
  headers: HeaderSet,
  mode: Mode,
  check_only: bool,
  diff_manager: DiffManager,
  file_collector: FileCollector,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the ignore patterns are invalid.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let file_collector = FileCollector::new(config.root, &config.exclude_dirs, &config.ignore_patterns)?;

    Ok(Self {
      headers: config.headers,
      mode: config.mode,
      check_only: config.check_only,
      diff_manager: config.diff_manager,
      file_collector,
    })
  }

  pub fn root(&self) -> &Path {
    self.file_collector.root()
  }

  /// Collects every file under the root that has a known category.
  ///
  /// # Errors
  ///
  /// Returns an error if the root does not exist.
  pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
    let files = self.file_collector.collect()?;

    Ok(
      files
        .into_iter()
        .filter(|path| {
          let supported = self.headers.can_handle(path);
          if !supported {
            trace!("Skipping: {} (no header defined for extension)", path.display());
          }
          supported
        })
        .collect(),
    )
  }

  /// Processes `files` in order and returns one report per supported file.
  ///
  /// Per-file errors never abort the run; they are logged and reported as
  /// [`FileAction::Failed`].
  pub fn process(&self, files: &[PathBuf]) -> Vec<FileReport> {
    let start = std::time::Instant::now();
    let mut reports = Vec::with_capacity(files.len());

    for path in files {
      let Some(category) = Category::from_path(path) else {
        trace!("Skipping: {} (no header defined for extension)", path.display());
        continue;
      };

      match self.process_file(path) {
        Ok(Some(action)) => reports.push(FileReport::new(path.clone(), category, action)),
        Ok(None) => {}
        Err(e) => {
          warn!("{}", e);
          reports.push(FileReport::failed(path.clone(), category, e));
        }
      }
    }

    debug!("Processed {} files in {}ms", reports.len(), start.elapsed().as_millis());

    reports
  }

  /// Processes a single file.
  ///
  /// Returns `Ok(None)` for files without a known category. In check mode the
  /// returned action is what would have happened; nothing is written.
  ///
  /// # Errors
  ///
  /// Returns [`FileError`] if the file cannot be read as UTF-8 or cannot be
  /// written back.
  pub fn process_file(&self, path: &Path) -> Result<Option<FileAction>, FileError> {
    let Some((category, template)) = self.headers.for_path(path) else {
      return Ok(None);
    };

    let source = FileIO::read_source(path)?;
    let result = splicer::splice(&source.text, &template.marker, &template.header, self.mode);
    let action = FileAction::from(&result);

    trace!(
      "{} ({}): {:?} -> {:?}",
      path.display(),
      category,
      result.state,
      result.action
    );

    let Some(new_text) = result.content else {
      if action == FileAction::StaleKept {
        debug!("Keeping stale header in {} (mode is {})", path.display(), self.mode);
      }
      return Ok(Some(action));
    };

    let display_path = make_relative_path(path, self.root());
    self
      .diff_manager
      .display_diff(path, &display_path, &source.text, &new_text);

    if self.check_only {
      debug!("Would update {} ({:?})", display_path, action);
      return Ok(Some(action));
    }

    FileIO::write_source(path, &new_text, source.bom)?;

    match action {
      FileAction::Inserted => info_log!("Inserted header in: {}", display_path),
      FileAction::Regenerated => info_log!("Regenerated header in: {}", display_path),
      _ => {}
    }

    Ok(Some(action))
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;
  use crate::templates::{LicenseData, TemplateManager};

  fn headers(body: &str) -> HeaderSet {
    let mut manager = TemplateManager::new();
    manager.set_template(body);
    manager.build(&LicenseData::new("2025")).unwrap()
  }

  fn processor(root: &Path, mode: Mode, check_only: bool) -> Processor {
    Processor::new(ProcessorConfig {
      mode,
      check_only,
      ..ProcessorConfig::new(headers("Copyright {{year}} Example"), root.to_path_buf())
    })
    .unwrap()
  }

  #[test]
  fn test_process_file_inserts_python_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("app.py");
    fs::write(&path, "#!/usr/bin/env python3\nprint('hi')\n").unwrap();

    let action = processor(dir.path(), Mode::InsertOnly, false)
      .process_file(&path)
      .unwrap();

    assert_eq!(action, Some(FileAction::Inserted));
    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      "#!/usr/bin/env python3\n# region License Header\n#\n# Copyright 2025 Example\n#\n# endregion\n\nprint('hi')\n"
    );
  }

  #[test]
  fn test_process_file_unknown_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "hello\n").unwrap();

    let action = processor(dir.path(), Mode::FullRegeneration, false)
      .process_file(&path)
      .unwrap();

    assert_eq!(action, None);
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
  }

  #[test]
  fn test_check_only_does_not_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Program.cs");
    fs::write(&path, "using System;\n").unwrap();

    let action = processor(dir.path(), Mode::InsertOnly, true)
      .process_file(&path)
      .unwrap();

    assert_eq!(action, Some(FileAction::Inserted));
    assert_eq!(fs::read_to_string(&path).unwrap(), "using System;\n");
  }

  #[test]
  fn test_process_continues_after_failure() {
    let dir = tempdir().unwrap();
    let bad = dir.path().join("bad.py");
    let good = dir.path().join("good.py");
    fs::write(&bad, [0xFF, 0xFE, 0x00]).unwrap();
    fs::write(&good, "x = 1\n").unwrap();

    let processor = processor(dir.path(), Mode::InsertOnly, false);
    let files = processor.collect_files().unwrap();
    let reports = processor.process(&files);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].action, FileAction::Failed);
    assert!(reports[0].error.is_some());
    assert_eq!(reports[1].action, FileAction::Inserted);
    assert_eq!(fs::read(&bad).unwrap(), vec![0xFF, 0xFE, 0x00]);
  }

  #[test]
  fn test_collect_files_skips_unsupported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "").unwrap();
    fs::write(dir.path().join("b.CS"), "").unwrap();
    fs::write(dir.path().join("c.rs"), "").unwrap();

    let files = processor(dir.path(), Mode::InsertOnly, false).collect_files().unwrap();
    let names: Vec<_> = files
      .iter()
      .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
      .collect();

    assert_eq!(names, vec!["a.py", "b.CS"]);
  }
}
