#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reheader::templates::{HeaderSet, LicenseData, TemplateManager};

/// License body used by most tests.
pub const LICENSE_BODY: &str = "Copyright (C) {{year}} Example Corp\n\nLicensed under the Example License.\n";

/// Canonical Python header for [`LICENSE_BODY`] in 2025.
pub const PYTHON_HEADER: &str = "# region License Header\n#\n# Copyright (C) 2025 Example Corp\n#\n# Licensed under the Example License.\n#\n# endregion\n";

/// Canonical C# header for [`LICENSE_BODY`] in 2025.
pub const CSHARP_HEADER: &str = "#region License Header\n/*\n * Copyright (C) 2025 Example Corp\n *\n * Licensed under the Example License.\n */\n#endregion\n";

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Writes the license body to `HEADER.txt` under `root`.
pub fn write_license(root: &Path, body: &str) -> Result<PathBuf> {
  write_file(root, "HEADER.txt", body)
}

/// Builds headers from `body` with the year fixed to 2025.
pub fn headers(body: &str) -> Result<HeaderSet> {
  let mut manager = TemplateManager::new();
  manager.set_template(body);
  Ok(manager.build(&LicenseData::new("2025"))?)
}

pub fn read(path: &Path) -> Result<String> {
  fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
