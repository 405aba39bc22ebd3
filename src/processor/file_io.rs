//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! Files are read whole as UTF-8. A leading byte order mark is split off on
//! read and written back unchanged.

use std::io;
use std::path::{Path, PathBuf};

/// UTF-8 byte order mark.
pub const BOM_BYTES: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Errors for a single file. These are reported per file and never stop a
/// run.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
  #[error("Failed to read file {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write file {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl FileError {
  pub fn path(&self) -> &Path {
    match self {
      FileError::Read { path, .. } | FileError::Write { path, .. } => path,
    }
  }
}

/// Decoded content of a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
  /// Whether the file started with a UTF-8 byte order mark
  pub bom: bool,
  /// File text without the byte order mark
  pub text: String,
}

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the full content of a file as UTF-8.
  ///
  /// # Errors
  ///
  /// Returns [`FileError::Read`] if the file cannot be opened or is not valid
  /// UTF-8. Invalid UTF-8 is reported with [`io::ErrorKind::InvalidData`].
  pub fn read_source(path: &Path) -> Result<SourceText, FileError> {
    let read_error = |source| FileError::Read {
      path: path.to_path_buf(),
      source,
    };

    let bytes = std::fs::read(path).map_err(read_error)?;

    let (bom, body) = match bytes.strip_prefix(BOM_BYTES) {
      Some(rest) => (true, rest.to_vec()),
      None => (false, bytes),
    };

    let text = String::from_utf8(body).map_err(|e| read_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    Ok(SourceText { bom, text })
  }

  /// Writes `text` to `path`, prefixed with a byte order mark when `bom` is
  /// set.
  pub fn write_source(path: &Path, text: &str, bom: bool) -> Result<(), FileError> {
    let mut bytes = Vec::with_capacity(text.len() + BOM_BYTES.len());
    if bom {
      bytes.extend_from_slice(BOM_BYTES);
    }
    bytes.extend_from_slice(text.as_bytes());

    std::fs::write(path, bytes).map_err(|source| FileError::Write {
      path: path.to_path_buf(),
      source,
    })
  }
}
