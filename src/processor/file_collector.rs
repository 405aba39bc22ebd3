//! # File Collector Module
//!
//! This module collects candidate files under a root directory. Excluded
//! directory names are pruned during the walk so their contents are never
//! visited, and ignore globs filter the remaining files.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names that are never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["obj", "bin", "venv", "env", "__pycache__", ".git", ".venv"];

/// File collector for directory traversal.
///
/// The `FileCollector` handles:
/// - Recursive traversal without following symlinks
/// - Pruning directories whose name is in the exclusion set
/// - Skipping files that match an ignore glob
pub struct FileCollector {
  /// Root of the traversal
  root: PathBuf,
  /// Directory names to prune
  exclude_dirs: BTreeSet<String>,
  /// Globs matched against root-relative paths
  ignore_patterns: Vec<glob::Pattern>,
}

impl FileCollector {
  /// Creates a collector with the default exclusion set plus
  /// `extra_exclude_dirs`.
  ///
  /// # Errors
  ///
  /// Returns an error if any ignore pattern is not a valid glob.
  pub fn new(root: PathBuf, extra_exclude_dirs: &[String], ignore_patterns: &[String]) -> Result<Self> {
    let exclude_dirs = DEFAULT_EXCLUDED_DIRS
      .iter()
      .map(|name| (*name).to_string())
      .chain(extra_exclude_dirs.iter().cloned())
      .collect();

    let ignore_patterns = ignore_patterns
      .iter()
      .map(|pattern| glob::Pattern::new(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern)))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      root,
      exclude_dirs,
      ignore_patterns,
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Whether a directory entry should be pruned. The root itself is never
  /// pruned, even if its name is excluded.
  fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
    entry.depth() > 0
      && entry.file_type().is_dir()
      && entry
        .file_name()
        .to_str()
        .is_some_and(|name| self.exclude_dirs.contains(name))
  }

  /// Whether a file matches one of the ignore globs.
  ///
  /// Patterns are tried against the root-relative path (with `/`
  /// separators) and against the bare file name, so `*.g.cs` works at any
  /// depth.
  pub fn is_ignored(&self, path: &Path) -> bool {
    if self.ignore_patterns.is_empty() {
      return false;
    }

    let relative = path.strip_prefix(&self.root).unwrap_or(path);
    let relative = relative.to_string_lossy().replace('\\', "/");
    let file_name = path.file_name().map(|name| name.to_string_lossy());

    self.ignore_patterns.iter().any(|pattern| {
      pattern.matches(&relative) || file_name.as_deref().is_some_and(|name| pattern.matches(name))
    })
  }

  /// Traverses the root recursively and collects all regular files, sorted by
  /// path.
  ///
  /// Entries that cannot be read are logged and skipped.
  ///
  /// # Errors
  ///
  /// Returns an error if the root does not exist or is not a directory.
  pub fn collect(&self) -> Result<Vec<PathBuf>> {
    if !self.root.is_dir() {
      return Err(anyhow::anyhow!("Root directory does not exist: {}", self.root.display()));
    }

    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    let walker = WalkDir::new(&self.root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| {
        let excluded = self.is_excluded_dir(entry);
        if excluded {
          trace!("Skipping directory: {} (excluded)", entry.path().display());
        }
        !excluded
      });

    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error walking directory: {}", e);
          continue;
        }
      };

      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.into_path();
      if self.is_ignored(&path) {
        trace!("Skipping: {} (matches ignore pattern)", path.display());
        continue;
      }
      files.push(path);
    }

    debug!("Found {} files in {}ms", files.len(), start_time.elapsed().as_millis());

    Ok(files)
  }
}

/// Converts a potentially relative path to an absolute path.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    Ok(current_dir.join(path))
  }
}
