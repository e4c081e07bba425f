//! Source text with a line-start index for fast line/column lookup.

use std::path::PathBuf;

use crate::location::SourceUnitId;

/// One compilation unit's source text, as embedded in the build artifacts.
///
/// Line starts are computed once so that resolving many syntax-tree
/// locations in the same file stays cheap.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// The compilation unit this text belongs to.
    pub unit: SourceUnitId,
    /// The path under which the file is reported.
    pub path: PathBuf,
    /// The full text of the file.
    pub content: String,
    /// Offset of every line's first byte; starts with 0.
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Indexes `content` for `unit`, reported under `path`.
    pub fn new(unit: SourceUnitId, path: PathBuf, content: String) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .match_indices('\n')
                .map(|(newline, _)| (newline + 1) as u32),
        );
        Self {
            unit,
            path,
            content,
            line_starts,
        }
    }

    /// Maps a byte offset to a 1-based `(line, column)` pair.
    ///
    /// Returns `None` when the offset lies past the end of the file, which
    /// happens when a descriptor was produced against a different text.
    pub fn line_col(&self, offset: u32) -> Option<(u32, u32)> {
        if offset as usize > self.content.len() {
            return None;
        }
        // Index of the last line starting at or before `offset`.
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Some((line as u32 + 1, offset - self.line_starts[line] + 1))
    }
}
