//! # Logging Module
//!
//! This module provides logging utilities for the reheader tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Tracing subscriber setup for diagnostics
//!
//! Verbose logs and tracing output go to stderr, info logs go to stdout for
//! better pipeline integration.
//!
//! ## Example
//!
//! ```rust
//! use reheader::logging::{ColorMode, set_verbose};
//! use reheader::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! // Goes to stderr
//! verbose_log!("Processing file: {}", "example.py");
//!
//! // Goes to stdout
//! info_log!("Inserted header in: {}", "example.py");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, level_for, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info message, colored when stdout supports it.
///
/// Used by the [`info_log!`] macro.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
