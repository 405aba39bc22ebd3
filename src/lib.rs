//! # reheader
//!
//! A tool that keeps a canonical, region-wrapped license header at the top of
//! every C# and Python file under a directory.
//!
//! `reheader` rewrites files in place. It inserts a header where none exists
//! and, in full-regeneration mode, replaces headers whose text has drifted
//! from the canonical one. Shebang, encoding and editor lines stay first, and
//! a file whose header is already current is never rewritten.
//!
//! ## Features
//!
//! * Recursive traversal with excluded directory names and ignore globs
//! * Insert-only (default) and full-regeneration modes
//! * `{{name}}` placeholders in the license file, with `{{year}}` built in
//! * Check mode with diffs and a JSON report for CI
//! * Byte order marks and CRLF line endings are preserved
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use reheader::processor::{Processor, ProcessorConfig};
//! use reheader::splicer::Mode;
//! use reheader::templates::{LicenseData, TemplateManager};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut template_manager = TemplateManager::new();
//!     template_manager.load_template(Path::new("HEADER.txt"))?;
//!     let headers = template_manager.build(&LicenseData::new("2025"))?;
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         mode: Mode::FullRegeneration,
//!         ..ProcessorConfig::new(headers, PathBuf::from("src"))
//!     })?;
//!
//!     let files = processor.collect_files()?;
//!     for report in processor.process(&files) {
//!         println!("{}: {:?}", report.path.display(), report.action);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`splicer`] - Pure header detection and splicing
//! * [`templates`] - Categories, comment styles and header rendering
//! * [`processor`] - Traversal and in-place file updates
//! * [`config`] - `.reheader.toml` loading
//! * [`logging`] - Output modes and tracing setup

pub mod cli;
pub mod config;
pub mod diff;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod splicer;
pub mod templates;
