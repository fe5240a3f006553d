//! Token kinds and structures for GraphQL source text.

use gqlterm_core::Span;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Bang,
    Dollar,
    At,
    Eq,
    Spread,

    // Literals and trivia that survive formatting
    StringLiteral,
    BlockStringLiteral,
    Comment,

    /// Identifier, number, or enum literal.
    Word,
}

impl TokenKind {
    /// Returns the punctuation kind for a single structural byte.
    #[must_use]
    pub const fn from_punct(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(Self::LBrace),
            b'}' => Some(Self::RBrace),
            b'(' => Some(Self::LParen),
            b')' => Some(Self::RParen),
            b'[' => Some(Self::LBracket),
            b']' => Some(Self::RBracket),
            b':' => Some(Self::Colon),
            b'!' => Some(Self::Bang),
            b'$' => Some(Self::Dollar),
            b'@' => Some(Self::At),
            b'=' => Some(Self::Eq),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_punct(self) -> bool {
        !matches!(
            self,
            Self::StringLiteral | Self::BlockStringLiteral | Self::Comment | Self::Word
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Colon => ":",
            Self::Bang => "!",
            Self::Dollar => "$",
            Self::At => "@",
            Self::Eq => "=",
            Self::Spread => "...",
            Self::StringLiteral => "<string>",
            Self::BlockStringLiteral => "<block-string>",
            Self::Comment => "<comment>",
            Self::Word => "<word>",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A token with its kind, source text and span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    #[must_use]
    #[inline]
    pub const fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }

    #[must_use]
    #[inline]
    pub const fn is(&self, kind: TokenKind) -> bool {
        self.kind as u8 == kind as u8
    }

    #[must_use]
    #[inline]
    pub const fn len(&self) -> u32 {
        self.span.len()
    }

    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}
