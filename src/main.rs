//! # reheader
//!
//! Keeps a canonical license header at the top of C# and Python source files.

use anyhow::Result;
use reheader::cli::{Cli, run};

fn main() -> Result<()> {
  let cli = Cli::parse_args();

  run(cli.args)
}
