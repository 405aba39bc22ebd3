//! # Splicer Module
//!
//! Pure text logic for finding and replacing license headers. Nothing in
//! this module touches the filesystem.
//!
//! - [`classifier`] - Prefix predicates for preamble and comment lines
//! - [`locator`] - Splits file text into preamble, existing header and
//!   remainder
//! - [`decision`] - Chooses insert/replace/skip and rebuilds the text
//! - [`line_ending`] - Line terminator detection so headers match the file
//!
//! ```rust
//! use reheader::splicer::{Action, Mode, splice};
//!
//! let result = splice("print('hi')\n", "# HDR", "# HDR\n# body\n", Mode::InsertOnly);
//! assert_eq!(result.action, Action::Insert);
//! assert_eq!(result.content.as_deref(), Some("# HDR\n# body\n\nprint('hi')\n"));
//! ```

pub mod classifier;
pub mod decision;
pub mod line_ending;
pub mod locator;

pub use classifier::{is_comment_line, is_special_line};
pub use decision::{Action, HeaderState, Mode, Splice, plan, splice};
pub use line_ending::LineEnding;
pub use locator::{Located, locate};
