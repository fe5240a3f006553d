//! Source span representation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span in source text, represented as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at a position.
    #[must_use]
    #[inline]
    pub const fn empty(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Creates a one-byte span at a position.
    #[must_use]
    #[inline]
    pub const fn at(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Returns the length of this span in bytes.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the source text covered by this span.
    ///
    /// Out-of-range spans are clamped to the end of `source`.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        let end = (self.end as usize).min(source.len());
        let start = (self.start as usize).min(end);
        source.get(start..end).unwrap_or_default()
    }

    /// Resolves the start of this span to a line and column.
    #[must_use]
    pub fn line_col(&self, source: &str) -> LineCol {
        LineCol::from_offset(source, self.start as usize)
    }
}

impl From<std::ops::Range<u32>> for Span {
    fn from(range: std::ops::Range<u32>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(
            miette::SourceOffset::from(span.start as usize),
            (span.end - span.start) as usize,
        )
    }
}

/// A 1-based line and column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl LineCol {
    /// Converts a byte offset into a line and column.
    #[must_use]
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() as u32;
        let column = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(offset, |pos| offset - pos - 1) as u32;
        Self {
            line: line + 1,
            column: column + 1,
        }
    }
}

impl std::fmt::Display for LineCol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_span_text() {
        let source = "query { me }";
        assert_eq!(Span::new(0, 5).text(source), "query");
        assert_eq!(Span::at(6).text(source), "{");
        assert_eq!(Span::new(10, 40).text(source), " }");
    }

    #[test]
    fn test_line_col() {
        let source = "{\n  countries\n}";
        assert_eq!(LineCol::from_offset(source, 0), LineCol { line: 1, column: 1 });
        assert_eq!(LineCol::from_offset(source, 4), LineCol { line: 2, column: 3 });
        assert_eq!(Span::at(14).line_col(source).to_string(), "3:1");
    }

    #[test]
    fn test_line_col_clamps() {
        let source = "ab";
        assert_eq!(LineCol::from_offset(source, 99), LineCol { line: 1, column: 3 });
    }
}
