//! Delimiter balance checking.
//!
//! A single byte-level pass over the source tracking brace depth, paren depth
//! and whether we are inside a string literal. This runs independently of the
//! formatter so an editor can flag unbalanced text without reformatting it.

use gqlterm_core::Span;
use miette::Diagnostic;
use thiserror::Error;

/// An unmatched or unterminated delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum BalanceError {
    /// A closing delimiter with no matching opener.
    #[error("unexpected '{delimiter}' at position {offset}")]
    #[diagnostic(code(gqlterm::syntax::unexpected_delimiter))]
    Unexpected {
        delimiter: char,
        offset: usize,
        #[label("no matching opening delimiter")]
        span: Span,
    },

    /// Delimiters still open at end of input.
    #[error("unclosed '{delimiter}' ({count} left open)")]
    #[diagnostic(code(gqlterm::syntax::unclosed_delimiter))]
    Unclosed { delimiter: char, count: usize },

    /// A string literal still open at end of input.
    #[error("unclosed string literal starting at position {offset}")]
    #[diagnostic(code(gqlterm::syntax::unclosed_string))]
    UnclosedString {
        offset: usize,
        #[label("string starts here")]
        span: Span,
    },
}

impl BalanceError {
    fn unexpected(delimiter: char, offset: usize) -> Self {
        Self::Unexpected {
            delimiter,
            offset,
            span: Span::at(offset as u32),
        }
    }

    /// Where the error was found, if it has a position.
    #[must_use]
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Unexpected { span, .. } | Self::UnclosedString { span, .. } => Some(*span),
            Self::Unclosed { .. } => None,
        }
    }
}

/// Checks that braces and parentheses are balanced and strings terminated.
///
/// A premature closing delimiter is reported at its byte offset as soon as it
/// is seen. Delimiters inside string literals are ignored.
pub fn validate_balance(source: &str) -> Result<(), BalanceError> {
    let bytes = source.as_bytes();
    let mut braces: usize = 0;
    let mut parens: usize = 0;
    let mut string_start: Option<usize> = None;

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if string_start.is_some() {
            match c {
                b'\\' => {
                    i += 2;
                    continue;
                }
                b'"' => string_start = None,
                _ => {}
            }
        } else {
            match c {
                b'"' => string_start = Some(i),
                b'{' => braces += 1,
                b'(' => parens += 1,
                b'}' => {
                    braces = braces
                        .checked_sub(1)
                        .ok_or_else(|| BalanceError::unexpected('}', i))?;
                }
                b')' => {
                    parens = parens
                        .checked_sub(1)
                        .ok_or_else(|| BalanceError::unexpected(')', i))?;
                }
                _ => {}
            }
        }
        i += 1;
    }

    if let Some(offset) = string_start {
        return Err(BalanceError::UnclosedString {
            offset,
            span: Span::at(offset as u32),
        });
    }
    if braces > 0 {
        return Err(BalanceError::Unclosed {
            delimiter: '{',
            count: braces,
        });
    }
    if parens > 0 {
        return Err(BalanceError::Unclosed {
            delimiter: '(',
            count: parens,
        });
    }
    Ok(())
}
