//! Human-readable positions produced by the source decoder.

use std::fmt;
use std::path::PathBuf;

/// A source location resolved to a file path and 1-indexed line/column.
///
/// Displays as `path:line`, the form upgrade-safety reports quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    /// The file path, relative to the decoder's base directory when possible.
    pub path: PathBuf,
    /// The line number (1-indexed).
    pub line: u32,
    /// The column number (1-indexed).
    pub col: u32,
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}
