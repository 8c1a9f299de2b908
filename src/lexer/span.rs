//! Immutable source location primitives.

use serde::Serialize;

/// Identifier for a logical input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SourceId(u32);

impl SourceId {
    /// Creates a source identifier.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Byte offset within a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct ByteOffset(u32);

impl ByteOffset {
    /// Creates a byte offset value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates an offset from `usize` with saturation.
    pub fn from_usize(value: usize) -> Self {
        match u32::try_from(value) {
            Ok(offset) => Self(offset),
            Err(_) => Self(u32::MAX),
        }
    }

    /// Returns the raw offset value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Converts the offset to `usize`.
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Immutable source span using byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    /// Source identity for this span.
    pub source_id: SourceId,
    /// Inclusive start byte offset.
    pub start: ByteOffset,
    /// Exclusive end byte offset.
    pub end: ByteOffset,
}

impl Span {
    /// Creates a span and normalizes offset ordering.
    pub fn new(source_id: SourceId, start: ByteOffset, end: ByteOffset) -> Self {
        if start <= end {
            Self {
                source_id,
                start,
                end,
            }
        } else {
            Self {
                source_id,
                start: end,
                end: start,
            }
        }
    }

    /// Creates an empty span at `offset`.
    pub fn point(source_id: SourceId, offset: ByteOffset) -> Self {
        Self::new(source_id, offset, offset)
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Self {
        Self::new(
            self.source_id,
            self.start.min(other.start),
            self.end.max(other.end),
        )
    }

    /// Returns the span length in bytes.
    pub fn len(self) -> u32 {
        self.end.value() - self.start.value()
    }

    /// Returns `true` when the span contains no bytes.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// One-based line and column of a byte offset.
///
/// Columns count Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
}

impl Position {
    /// Creates a position value.
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Line-start table used to map byte offsets to [`Position`] values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex<'a> {
    input: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    /// Builds the line table for `input`.
    pub fn new(input: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            input
                .bytes()
                .enumerate()
                .filter(|(_, byte)| *byte == b'\n')
                .map(|(index, _)| index + 1),
        );
        Self { input, line_starts }
    }

    /// Returns the number of lines, counting a trailing partial line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Maps a byte offset to its one-based position.
    ///
    /// Offsets past the end clamp to the end of input.
    pub fn position(&self, offset: ByteOffset) -> Position {
        let offset = offset.as_usize().min(self.input.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let line_start = self.line_starts[line];
        let column = self.input[line_start..]
            .char_indices()
            .take_while(|(index, _)| line_start + index < offset)
            .count();

        Position::new(saturating_u32(line + 1), saturating_u32(column + 1))
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
