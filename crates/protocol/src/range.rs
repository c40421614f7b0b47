use serde::{Deserialize, Serialize};

/// Zero-based line/character position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Span inside a resource; `end.line` is inclusive for line arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeData {
    pub start: Position,
    pub end: Position,
}

impl RangeData {
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Range covering whole lines `start_line..=end_line`
    #[must_use]
    pub const fn lines(start_line: u32, end_line: u32) -> Self {
        Self {
            start: Position::new(start_line, 0),
            end: Position::new(end_line, 0),
        }
    }

    /// True when this range's line span encloses `other`'s line span.
    /// Characters are ignored; equal spans contain each other.
    #[must_use]
    pub const fn contains_lines(&self, other: &Self) -> bool {
        self.start.line <= other.start.line && other.end.line <= self.end.line
    }

    /// True when the two line spans share at least one line
    #[must_use]
    pub const fn overlaps_lines(&self, other: &Self) -> bool {
        self.start.line <= other.end.line && other.start.line <= self.end.line
    }

    #[must_use]
    pub const fn line_count(&self) -> u32 {
        self.end.line.saturating_sub(self.start.line) + 1
    }
}
