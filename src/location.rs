//! Positions and text ranges for locating matches in source text.

use std::fmt;

/// A position in source text (0-based line and byte column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range in source text (start inclusive, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Position reached after walking `prefix` from `base`.
///
/// Counts embedded newlines: with no newline the column advances by the
/// prefix length; otherwise the line advances by the newline count and the
/// column is the length of the text after the last newline.
pub fn advance_position(base: Position, prefix: &str) -> Position {
    let newlines = prefix.bytes().filter(|&b| b == b'\n').count();
    if newlines == 0 {
        Position::new(base.line, base.column + prefix.len())
    } else {
        let tail = prefix.len() - prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
        Position::new(base.line + newlines, tail)
    }
}
