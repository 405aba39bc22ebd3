//! # Templates Module
//!
//! This module turns a license template into the canonical header for every
//! supported file category.
//!
//! The module includes:
//! - [`Category`] for the closed set of file categories the tool understands
//! - [`CommentStyle`] for the comment and region syntax of each category
//! - [`LicenseData`] for the variables substituted into the template
//! - [`TemplateManager`] for loading, rendering and assembling headers
//! - [`HeaderSet`] for the read-only `{marker, header}` table built at startup
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use reheader::templates::{Category, LicenseData, TemplateManager};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut manager = TemplateManager::new();
//! manager.set_template("Copyright (C) {{year}} Example Corp");
//!
//! let headers = manager.build(&LicenseData::new("2025"))?;
//! let (category, template) = headers.for_path(Path::new("Program.cs")).expect("C# is supported");
//!
//! assert_eq!(category, Category::CSharp);
//! assert_eq!(template.marker, "#region License Header");
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::verbose_log;

/// Title used in the opening region line when none is configured.
pub const DEFAULT_TITLE: &str = "License Header";

/// File categories with a known header format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
  /// C# sources, wrapped in `#region` and a `/* */` block
  CSharp,
  /// Python sources, wrapped in `# region` and `#` line comments
  Python,
}

impl Category {
  /// Every supported category.
  pub const ALL: [Category; 2] = [Category::CSharp, Category::Python];

  /// Extensions (lowercase, without the dot) that belong to this category.
  pub const fn extensions(self) -> &'static [&'static str] {
    match self {
      Category::CSharp => &["cs", "csx"],
      Category::Python => &["py", "pyw", "pyi"],
    }
  }

  /// Looks up the category for a file extension, case-insensitively.
  pub fn from_extension(extension: &str) -> Option<Self> {
    let extension = extension.trim_start_matches('.').to_lowercase();
    Self::ALL
      .into_iter()
      .find(|category| category.extensions().contains(&extension.as_str()))
  }

  /// Looks up the category for a file path based on its extension.
  pub fn from_path(path: &Path) -> Option<Self> {
    path
      .extension()
      .and_then(|ext| ext.to_str())
      .and_then(Self::from_extension)
  }

  /// Comment syntax used to build headers for this category.
  pub const fn comment_style(self) -> CommentStyle {
    match self {
      Category::CSharp => CommentStyle {
        block_start: "/*",
        block_line: " * ",
        block_end: " */",
        region_start: "#region",
        region_end: "#endregion",
      },
      Category::Python => CommentStyle {
        block_start: "#",
        block_line: "# ",
        block_end: "#",
        region_start: "# region",
        region_end: "# endregion",
      },
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Category::CSharp => write!(f, "C#"),
      Category::Python => write!(f, "Python"),
    }
  }
}

/// Defines how a header is written for one category.
///
/// A header is a region containing one comment block per text section:
///
/// ```text
/// {region_start} {title}
/// {block_start}
/// {block_line}license text...
/// {block_end}
/// {region_end}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
  /// Line opening a comment block (e.g., "/*")
  pub block_start: &'static str,
  /// Prefix for each line inside the block (e.g., " * ")
  pub block_line: &'static str,
  /// Line closing a comment block (e.g., " */")
  pub block_end: &'static str,
  /// Opening region directive; followed by a space and the title
  pub region_start: &'static str,
  /// Closing region directive
  pub region_end: &'static str,
}

impl CommentStyle {
  /// The region line that opens a header with the given title. This line is
  /// also the marker used to find existing headers.
  pub fn region_open(&self, title: &str) -> String {
    format!("{} {}", self.region_start, title)
  }

  /// Appends `text` as a comment block to `lines`.
  ///
  /// Blank lines at either end of `text` are dropped; blank lines inside it
  /// become a bare block-line prefix without trailing whitespace.
  fn push_block(&self, text: &str, lines: &mut Vec<String>) {
    lines.push(self.block_start.to_string());
    for line in text.trim_matches(['\r', '\n']).lines() {
      if line.trim().is_empty() {
        lines.push(self.block_line.trim_end().to_string());
      } else {
        lines.push(format!("{}{}", self.block_line, line.trim_end()));
      }
    }
    lines.push(self.block_end.to_string());
  }
}

/// Errors raised while rendering license templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
  /// The template references a variable that was never defined.
  #[error("Unknown template variable '{{{{{name}}}}}'; define it with --var {name}=VALUE or in [variables]")]
  UnknownVariable { name: String },

  /// The license template has no content.
  #[error("License template is empty")]
  EmptyTemplate,

  /// The header title cannot be used as a marker.
  #[error("Invalid header title '{0}': must be a non-empty single line")]
  InvalidTitle(String),
}

/// Variables substituted into `{{name}}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct LicenseData {
  variables: BTreeMap<String, String>,
}

impl LicenseData {
  /// Creates license data with the `year` variable set.
  pub fn new(year: impl Into<String>) -> Self {
    let mut data = Self::default();
    data.set("year", year);
    data
  }

  /// Adds or replaces a variable, returning the updated data.
  pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.set(name, value);
    self
  }

  /// Adds or replaces a variable.
  pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.variables.insert(name.into(), value.into());
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.variables.get(name).map(String::as_str)
  }
}

/// A titled sub-region nested inside the header (for example a translated
/// copy of the license notice).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
  pub title: String,
  pub body: String,
}

/// Manager for loading license templates and assembling headers.
///
/// The `TemplateManager` is responsible for:
/// - Loading the license body and optional sections from files
/// - Rendering `{{name}}` placeholders from [`LicenseData`]
/// - Wrapping the rendered text in each category's comment syntax
pub struct TemplateManager {
  /// The main license body
  template: String,
  /// Nested sections appended after the main body
  sections: Vec<Section>,
  /// Title placed after the opening region directive
  title: String,
}

impl Default for TemplateManager {
  fn default() -> Self {
    Self::new()
  }
}

impl TemplateManager {
  /// Creates an empty template manager using [`DEFAULT_TITLE`].
  ///
  /// A template must be loaded with [`load_template`](Self::load_template)
  /// or [`set_template`](Self::set_template) before building headers.
  pub fn new() -> Self {
    Self {
      template: String::new(),
      sections: Vec::new(),
      title: DEFAULT_TITLE.to_string(),
    }
  }

  /// Sets the title that follows the opening region directive.
  pub fn set_title(&mut self, title: impl Into<String>) {
    self.title = title.into();
  }

  pub fn title(&self) -> &str {
    &self.title
  }

  /// Loads the license body from a file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8.
  pub fn load_template(&mut self, path: &Path) -> Result<()> {
    verbose_log!("Loading template from: {}", path.display());

    let template_content =
      fs::read_to_string(path).with_context(|| format!("Failed to read license template file: {}", path.display()))?;

    self.template = template_content;

    Ok(())
  }

  /// Sets the license body directly.
  pub fn set_template(&mut self, template: impl Into<String>) {
    self.template = template.into();
  }

  /// Loads a nested section body from a file.
  pub fn load_section(&mut self, title: impl Into<String>, path: &Path) -> Result<()> {
    verbose_log!("Loading section from: {}", path.display());

    let body = fs::read_to_string(path).with_context(|| format!("Failed to read section file: {}", path.display()))?;
    self.add_section(title, body);

    Ok(())
  }

  /// Appends a nested section.
  pub fn add_section(&mut self, title: impl Into<String>, body: impl Into<String>) {
    self.sections.push(Section {
      title: title.into(),
      body: body.into(),
    });
  }

  /// Replaces `{{name}}` placeholders in `text` with values from `data`.
  ///
  /// Every placeholder must be defined; unknown names are reported before
  /// any substitution happens.
  pub fn render(text: &str, data: &LicenseData) -> Result<String, TemplateError> {
    static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
      Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder regex must compile")
    });

    if let Some(caps) = PLACEHOLDER
      .captures_iter(text)
      .find(|caps| data.get(&caps[1]).is_none())
    {
      return Err(TemplateError::UnknownVariable {
        name: caps[1].to_string(),
      });
    }

    let rendered = PLACEHOLDER.replace_all(text, |caps: &regex::Captures| {
      data.get(&caps[1]).unwrap_or_default().to_string()
    });

    Ok(rendered.into_owned())
  }

  /// Renders the header for a single category.
  pub fn render_header(&self, category: Category, data: &LicenseData) -> Result<HeaderTemplate, TemplateError> {
    if self.template.trim().is_empty() {
      return Err(TemplateError::EmptyTemplate);
    }

    let title = Self::render(self.title.trim(), data)?;
    if title.is_empty() || title.contains('\n') {
      return Err(TemplateError::InvalidTitle(title));
    }

    let style = category.comment_style();
    let marker = style.region_open(&title);

    let mut lines = vec![marker.clone()];
    style.push_block(&Self::render(&self.template, data)?, &mut lines);

    for section in &self.sections {
      lines.push(String::new());
      lines.push(style.region_open(Self::render(&section.title, data)?.trim()));
      style.push_block(&Self::render(&section.body, data)?, &mut lines);
      lines.push(style.region_end.to_string());
    }

    if !self.sections.is_empty() {
      lines.push(String::new());
    }
    lines.push(style.region_end.to_string());

    let mut header = lines.join("\n");
    header.push('\n');

    Ok(HeaderTemplate { marker, header })
  }

  /// Renders headers for every category into a [`HeaderSet`].
  pub fn build(&self, data: &LicenseData) -> Result<HeaderSet, TemplateError> {
    Category::ALL
      .into_iter()
      .map(|category| Ok((category, self.render_header(category, data)?)))
      .collect()
  }
}

/// Marker and full header text for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
  /// Literal text that opens the header block
  pub marker: String,
  /// The complete header, starting with the marker and ending with a newline
  pub header: String,
}

/// Read-only table of headers, keyed by category.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
  headers: HashMap<Category, HeaderTemplate>,
}

impl HeaderSet {
  pub fn get(&self, category: Category) -> Option<&HeaderTemplate> {
    self.headers.get(&category)
  }

  /// Resolves the category and header for a file path. Returns `None` for
  /// files the tool does not handle.
  pub fn for_path(&self, path: &Path) -> Option<(Category, &HeaderTemplate)> {
    let category = Category::from_path(path)?;
    self.get(category).map(|template| (category, template))
  }

  /// Whether the file at `path` has a header defined.
  pub fn can_handle(&self, path: &Path) -> bool {
    self.for_path(path).is_some()
  }
}

impl FromIterator<(Category, HeaderTemplate)> for HeaderSet {
  fn from_iter<I: IntoIterator<Item = (Category, HeaderTemplate)>>(iter: I) -> Self {
    Self {
      headers: iter.into_iter().collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::splicer::is_comment_line;

  fn manager(template: &str) -> TemplateManager {
    let mut manager = TemplateManager::new();
    manager.set_template(template);
    manager
  }

  #[test]
  fn test_category_from_extension() {
    assert_eq!(Category::from_extension("cs"), Some(Category::CSharp));
    assert_eq!(Category::from_extension(".CS"), Some(Category::CSharp));
    assert_eq!(Category::from_extension("py"), Some(Category::Python));
    assert_eq!(Category::from_extension("pyi"), Some(Category::Python));
    assert_eq!(Category::from_extension("rs"), None);
    assert_eq!(Category::from_extension(""), None);
  }

  #[test]
  fn test_category_from_path() {
    assert_eq!(Category::from_path(Path::new("src/Program.cs")), Some(Category::CSharp));
    assert_eq!(Category::from_path(Path::new("tools/run.PY")), Some(Category::Python));
    assert_eq!(Category::from_path(Path::new("Makefile")), None);
    assert_eq!(Category::from_path(Path::new("notes.txt")), None);
  }

  #[test]
  fn test_render_variables() {
    let data = LicenseData::new("2025").with_variable("author", "Jane Doe");
    let rendered = TemplateManager::render("Copyright (C) {{year}} {{ author }}", &data).unwrap();
    assert_eq!(rendered, "Copyright (C) 2025 Jane Doe");
  }

  #[test]
  fn test_render_unknown_variable() {
    let data = LicenseData::new("2025");
    let err = TemplateManager::render("Copyright {{year}} {{owner}}", &data).unwrap_err();
    assert!(matches!(err, TemplateError::UnknownVariable { ref name } if name == "owner"));
    assert!(err.to_string().contains("{{owner}}"));
  }

  #[test]
  fn test_render_leaves_other_braces_alone() {
    let data = LicenseData::new("2025");
    let rendered = TemplateManager::render("{ not a placeholder } {{year}}", &data).unwrap();
    assert_eq!(rendered, "{ not a placeholder } 2025");
  }

  #[test]
  fn test_csharp_header_layout() {
    let header = manager("Copyright (C) {{year}} Example\n\nAll rights reserved.\n")
      .render_header(Category::CSharp, &LicenseData::new("2025"))
      .unwrap();

    assert_eq!(header.marker, "#region License Header");
    assert_eq!(
      header.header,
      "#region License Header\n/*\n * Copyright (C) 2025 Example\n *\n * All rights reserved.\n */\n#endregion\n"
    );
  }

  #[test]
  fn test_python_header_layout() {
    let header = manager("Copyright (C) {{year}} Example")
      .render_header(Category::Python, &LicenseData::new("2024"))
      .unwrap();

    assert_eq!(header.marker, "# region License Header");
    assert_eq!(
      header.header,
      "# region License Header\n#\n# Copyright (C) 2024 Example\n#\n# endregion\n"
    );
  }

  #[test]
  fn test_header_with_sections() {
    let mut manager = manager("Project {{year}}");
    manager.set_title("GPL v3 License Header");
    manager.add_section("English version", "This file is free software.");

    let header = manager
      .render_header(Category::Python, &LicenseData::new("2025"))
      .unwrap();

    assert_eq!(
      header.header,
      concat!(
        "# region GPL v3 License Header\n",
        "#\n",
        "# Project 2025\n",
        "#\n",
        "\n",
        "# region English version\n",
        "#\n",
        "# This file is free software.\n",
        "#\n",
        "# endregion\n",
        "\n",
        "# endregion\n",
      )
    );
  }

  #[test]
  fn test_every_header_line_is_part_of_the_block() {
    let mut manager = manager("Line one\n\n   indented\nLast");
    manager.add_section("Section", "Body\n\nMore");

    for category in Category::ALL {
      let header = manager.render_header(category, &LicenseData::new("2025")).unwrap();
      assert!(header.header.starts_with(&header.marker));
      for line in header.header.lines() {
        assert!(is_comment_line(line), "{:?} line {:?} would end the block", category, line);
      }
    }
  }

  #[test]
  fn test_empty_template_is_rejected() {
    let err = manager("  \n").render_header(Category::CSharp, &LicenseData::new("2025"));
    assert!(matches!(err, Err(TemplateError::EmptyTemplate)));
  }

  #[test]
  fn test_invalid_title_is_rejected() {
    let mut manager = manager("Body");
    manager.set_title("  ");
    let err = manager.render_header(Category::Python, &LicenseData::new("2025"));
    assert!(matches!(err, Err(TemplateError::InvalidTitle(_))));
  }

  #[test]
  fn test_build_header_set() {
    let headers = manager("Body").build(&LicenseData::new("2025")).unwrap();

    let (category, template) = headers.for_path(Path::new("a/b/script.py")).unwrap();
    assert_eq!(category, Category::Python);
    assert_eq!(template.marker, "# region License Header");

    assert!(headers.can_handle(Path::new("Program.cs")));
    assert!(!headers.can_handle(Path::new("main.rs")));
  }
}
