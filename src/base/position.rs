//! Position tracking for tokens and lines
//!
//! Lines are 1-indexed, columns and offsets are 0-indexed byte positions
//! into the original file content (after the optional BOM).

use text_size::{TextRange, TextSize};

/// A position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePosition {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl FilePosition {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Shift the position along the same line by `delta` bytes
    pub fn advanced_by(&self, delta: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + delta,
            offset: self.offset + delta,
        }
    }

    /// Byte range of `len` bytes starting at this position
    pub fn range(&self, len: usize) -> TextRange {
        let start = TextSize::new(self.offset as u32);
        TextRange::at(start, TextSize::new(len as u32))
    }

    /// Check whether this position lies before `other` in the file
    pub fn is_before(&self, other: &FilePosition) -> bool {
        self.offset < other.offset
    }
}
