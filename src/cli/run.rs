//! # Run Command
//!
//! This module implements the default (and only) command: walk the root,
//! insert or regenerate headers, print what happened and set the exit code.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use tracing::debug;

use crate::config::{Config, is_identifier, load_config};
use crate::diff::DiffManager;
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{print_blank_line, print_hint, print_reports, print_start_message, print_summary};
use crate::processor::{Processor, ProcessorConfig, absolutize_path};
use crate::report::{ProcessingSummary, ReportGenerator};
use crate::splicer::Mode;
use crate::templates::{LicenseData, TemplateManager};

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Root directory to process recursively [default: current directory]
  #[arg(value_name = "ROOT")]
  pub root: Option<PathBuf>,

  /// How to treat existing headers
  #[arg(long, value_enum, value_name = "MODE")]
  pub mode: Option<Mode>,

  /// License body to wrap in each language's header
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// Title following the opening region directive [default: License Header]
  #[arg(long, value_name = "TEXT")]
  pub title: Option<String>,

  /// Template variable (repeatable), available as {{KEY}} in the license file
  #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_variable)]
  pub vars: Vec<(String, String)>,

  /// Value for {{year}} [default: current year]
  #[arg(long)]
  pub year: Option<String>,

  /// Directory name to skip, in addition to the defaults (repeatable)
  #[arg(long, value_name = "NAME")]
  pub exclude_dir: Vec<String>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Dry run: report what would change without modifying files; exits 1 if
  /// any file would change
  #[arg(long, visible_alias = "dry-run")]
  pub check: bool,

  /// Show a diff for every file that changes (or would change)
  #[arg(long)]
  pub show_diff: bool,

  /// Write a JSON report of every processed file to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .reheader.toml in the root)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Parses a `KEY=VALUE` pair for `--var`.
fn parse_variable(raw: &str) -> Result<(String, String), String> {
  let (key, value) = raw
    .split_once('=')
    .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

  let key = key.trim();
  if !is_identifier(key) {
    return Err(format!("invalid variable name '{}'", key));
  }

  Ok((key.to_string(), value.to_string()))
}

/// Settings after merging the config file and CLI flags.
struct Settings {
  license_file: PathBuf,
  mode: Mode,
  exclude_dirs: Vec<String>,
  ignore: Vec<String>,
}

impl Settings {
  /// CLI flags win over config values; list options are combined.
  fn merge(args: &RunArgs, config: Option<&Config>) -> Result<Self> {
    let license_file = args
      .license_file
      .clone()
      .or_else(|| config.and_then(|c| c.license_file.clone()))
      .ok_or_else(|| {
        anyhow::anyhow!("Missing required argument: --license-file <FILE> (or license-file in the config file)")
      })?;

    let mode = args.mode.or_else(|| config.and_then(|c| c.mode)).unwrap_or_default();

    let mut exclude_dirs = config.map(|c| c.exclude_dirs.clone()).unwrap_or_default();
    exclude_dirs.extend(args.exclude_dir.iter().cloned());

    let mut ignore = config.map(|c| c.ignore.clone()).unwrap_or_default();
    ignore.extend(args.ignore.iter().cloned());

    Ok(Self {
      license_file,
      mode,
      exclude_dirs,
      ignore,
    })
  }
}

/// Builds the template manager from the license file, title and sections.
fn load_templates(args: &RunArgs, config: Option<&Config>, license_file: &std::path::Path) -> Result<TemplateManager> {
  let mut manager = TemplateManager::new();
  manager
    .load_template(license_file)
    .with_context(|| format!("Failed to load license template from {}", license_file.display()))?;

  if let Some(title) = args.title.clone().or_else(|| config.and_then(|c| c.title.clone())) {
    manager.set_title(title);
  }

  for section in config.map(|c| c.sections.as_slice()).unwrap_or_default() {
    manager.load_section(section.title.clone(), &section.file)?;
  }

  Ok(manager)
}

/// Collects template variables: current year, then config, then `--var`,
/// then `--year`.
fn license_data(args: &RunArgs, config: Option<&Config>) -> LicenseData {
  let mut data = LicenseData::new(chrono::Local::now().year().to_string());

  for (name, value) in config.map(|c| &c.variables).into_iter().flatten() {
    data.set(name.clone(), value.clone());
  }
  for (name, value) in &args.vars {
    data.set(name.clone(), value.clone());
  }
  if let Some(year) = &args.year {
    data.set("year", year.clone());
  }

  data
}

/// Run the command with the given arguments.
///
/// Exits the process with status 1 if any file failed, or in check mode if
/// any file would change.
pub fn run(args: RunArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let root = absolutize_path(args.root.as_deref().unwrap_or_else(|| std::path::Path::new(".")))?;
  if !root.is_dir() {
    anyhow::bail!("Root directory does not exist: {}", root.display());
  }
  debug!("Using root: {}", root.display());

  let config = load_config(args.config.as_deref(), &root, args.no_config)?;
  let settings = Settings::merge(&args, config.as_ref())?;

  let template_manager = load_templates(&args, config.as_ref(), &settings.license_file)?;
  let headers = template_manager
    .build(&license_data(&args, config.as_ref()))
    .context("Failed to render license header")?;

  let check_only = args.check;
  debug!("Mode: {}, check only: {}", settings.mode, check_only);

  let processor = Processor::new(ProcessorConfig {
    mode: settings.mode,
    check_only,
    exclude_dirs: settings.exclude_dirs,
    ignore_patterns: settings.ignore,
    diff_manager: DiffManager::new(args.show_diff),
    ..ProcessorConfig::new(headers, root.clone())
  })?;

  let files = processor.collect_files()?;
  print_start_message(files.len(), !check_only);

  let start_time = Instant::now();
  let file_reports = processor.process(&files);
  let summary = ProcessingSummary::from_reports(&file_reports, start_time.elapsed());

  print_blank_line();
  print_reports(&file_reports, &root, check_only);
  print_summary(&summary, check_only);

  if check_only && summary.modified > 0 {
    print_blank_line();
    print_hint("Run without --check to apply these changes.");
  }

  if let Some(ref output_path) = args.report_json {
    let report_generator = ReportGenerator::new(output_path, &root);
    if let Err(e) = report_generator.generate(&file_reports, &summary, check_only) {
      eprintln!("Error generating JSON report: {:#}", e);
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if summary.is_failure(check_only) {
    process::exit(1);
  }

  Ok(())
}
