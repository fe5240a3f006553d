//! Lexer for GraphQL source text.
//!
//! The lexer is deliberately forgiving: it never fails, and anything it does
//! not recognise becomes part of a [`TokenKind::Word`]. Whitespace and commas
//! are insignificant and skipped; comments are kept so the formatter can
//! re-emit them.

use crate::token::{Token, TokenKind};
use gqlterm_core::Span;

/// A lexer over GraphQL (or GraphQL-like) source text.
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    /// Returns the current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn advance_by(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    #[inline]
    fn starts_with(&self, pattern: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pattern)
    }

    /// Scans the next token, or `None` at end of input.
    ///
    /// A `.` that does not begin `...` starts a word, so `.x` lexes as one word.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        self.skip_insignificant();

        let start = self.pos;
        let c = self.peek()?;

        let kind = if let Some(punct) = TokenKind::from_punct(c) {
            self.advance_by(1);
            punct
        } else {
            match c {
                b'.' if self.starts_with(b"...") => {
                    self.advance_by(3);
                    TokenKind::Spread
                }
                b'"' if self.starts_with(b"\"\"\"") => self.scan_block_string(),
                b'"' => self.scan_string(),
                b'#' => self.scan_comment(),
                _ => self.scan_word(),
            }
        };

        Some(Token::new(
            kind,
            &self.source[start..self.pos],
            Span::new(start as u32, self.pos as u32),
        ))
    }

    /// Skips whitespace, commas, and a leading byte order mark.
    fn skip_insignificant(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n' | b',') => self.advance_by(1),
                Some(0xEF) if self.peek_at(1) == Some(0xBB) && self.peek_at(2) == Some(0xBF) => {
                    self.advance_by(3);
                }
                _ => break,
            }
        }
    }

    /// Scans a comment up to (not including) the end of the line.
    fn scan_comment(&mut self) -> TokenKind {
        let rest = &self.bytes[self.pos..];
        let len = memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
        self.advance_by(len);
        TokenKind::Comment
    }

    /// Scans a double-quoted string, honouring backslash escapes.
    ///
    /// An unterminated string runs to the end of input.
    fn scan_string(&mut self) -> TokenKind {
        self.advance_by(1);
        while let Some(c) = self.peek() {
            match c {
                b'\\' => self.advance_by(2),
                b'"' => {
                    self.advance_by(1);
                    break;
                }
                _ => self.advance_by(1),
            }
        }
        TokenKind::StringLiteral
    }

    /// Scans a triple-quoted block string up to the next `"""`.
    fn scan_block_string(&mut self) -> TokenKind {
        self.advance_by(3);
        let rest = &self.bytes[self.pos..];
        match memchr::memmem::find(rest, b"\"\"\"") {
            Some(end) => self.advance_by(end + 3),
            None => self.advance_by(rest.len()),
        }
        TokenKind::BlockStringLiteral
    }

    /// Scans a maximal run of non-separator bytes.
    fn scan_word(&mut self) -> TokenKind {
        self.advance_by(1);
        while let Some(c) = self.peek() {
            if is_separator(c) {
                break;
            }
            self.advance_by(1);
        }
        TokenKind::Word
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[inline]
fn is_separator(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | b',' | b'"' | b'#') || TokenKind::from_punct(c).is_some()
}

/// Tokenizes the entire source.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}
