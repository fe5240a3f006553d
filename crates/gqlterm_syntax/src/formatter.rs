//! Token-level formatting for GraphQL source text.
//!
//! The formatter works purely on the token stream produced by
//! [`crate::lexer`], so it is total: malformed input still produces
//! best-effort output. Because the output depends only on the tokens, and
//! every emitted separator re-lexes to the same tokens, formatting is
//! idempotent.

use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

/// Words that keep the following token on the same line.
const INLINE_KEYWORDS: [&str; 5] = ["query", "mutation", "subscription", "fragment", "on"];

/// Formatting options.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Number of spaces for indentation.
    pub indent_size: usize,
    /// Use tabs instead of spaces.
    pub use_tabs: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            use_tabs: false,
        }
    }
}

/// What to emit after a token at selection-set level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Separator {
    None,
    Space,
    Newline,
}

/// Token-stream formatter.
pub struct Formatter<'a> {
    tokens: Vec<Token<'a>>,
    options: FormatOptions,
    output: String,
    indent: usize,
    paren_depth: usize,
}

impl<'a> Formatter<'a> {
    /// Creates a new formatter over `source`.
    pub fn new(source: &'a str, options: FormatOptions) -> Self {
        Self {
            tokens: tokenize(source),
            options,
            output: String::with_capacity(source.len()),
            indent: 0,
            paren_depth: 0,
        }
    }

    /// Formats the source, consuming the formatter.
    pub fn format(mut self) -> String {
        for i in 0..self.tokens.len() {
            let token = self.tokens[i];
            let prev = i.checked_sub(1).map(|p| self.tokens[p]);
            let next = self.tokens.get(i + 1).copied();

            if self.paren_depth > 0 {
                self.format_inline(token, prev, next);
                continue;
            }

            match token.kind {
                TokenKind::LBrace => self.open_block(),
                TokenKind::RBrace => self.close_block(next),
                TokenKind::LParen => {
                    self.output.push('(');
                    self.paren_depth += 1;
                }
                TokenKind::Colon => self.output.push_str(": "),
                TokenKind::Comment => {
                    self.output.push_str(token.text);
                    self.push_newline();
                }
                _ => {
                    self.output.push_str(token.text);
                    self.push_separator(token, next);
                }
            }
        }

        let trimmed = self.output.trim_end_matches([' ', '\t', '\n']).len();
        self.output.truncate(trimmed);
        self.output
    }

    /// Formats a token inside an argument list, where tokens are joined by
    /// single spaces.
    fn format_inline(&mut self, token: Token<'a>, prev: Option<Token<'a>>, next: Option<Token<'a>>) {
        if self.needs_inline_space(prev, token) {
            self.output.push(' ');
        }

        match token.kind {
            TokenKind::Colon => self.output.push_str(": "),
            TokenKind::Comment => {
                self.output.push_str(token.text);
                self.push_newline();
            }
            TokenKind::LParen => {
                self.output.push('(');
                self.paren_depth += 1;
            }
            TokenKind::RParen => {
                self.output.push(')');
                self.paren_depth -= 1;
                if self.paren_depth == 0 {
                    self.push_separator(token, next);
                }
            }
            _ => self.output.push_str(token.text),
        }
    }

    fn needs_inline_space(&self, prev: Option<Token<'a>>, token: Token<'a>) -> bool {
        let Some(prev) = prev else {
            return false;
        };
        if self.output.is_empty() || self.output.ends_with(char::is_whitespace) {
            return false;
        }
        let glued_to_prev = matches!(
            prev.kind,
            TokenKind::LParen
                | TokenKind::Colon
                | TokenKind::Dollar
                | TokenKind::At
                | TokenKind::LBracket
        );
        let glued_to_next = matches!(
            token.kind,
            TokenKind::RParen | TokenKind::Colon | TokenKind::Bang | TokenKind::RBracket
        );
        !glued_to_prev && !glued_to_next
    }

    fn open_block(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with(char::is_whitespace) {
            self.output.push(' ');
        }
        self.output.push('{');
        self.indent += 1;
        self.push_newline();
    }

    fn close_block(&mut self, next: Option<Token<'a>>) {
        self.indent = self.indent.saturating_sub(1);

        let trimmed = self.output.trim_end_matches([' ', '\t']).len();
        self.output.truncate(trimmed);
        if !self.output.is_empty() && !self.output.ends_with('\n') {
            self.output.push('\n');
        }
        self.push_indent();
        self.output.push('}');

        // Consecutive closing braces stay adjacent.
        if next.is_some_and(|t| t.kind != TokenKind::RBrace) {
            self.push_newline();
        }
    }

    fn push_separator(&mut self, token: Token<'a>, next: Option<Token<'a>>) {
        match separator(token, next) {
            Separator::None => {}
            Separator::Space => self.output.push(' '),
            Separator::Newline => self.push_newline(),
        }
    }

    fn push_newline(&mut self) {
        self.output.push('\n');
        self.push_indent();
    }

    fn push_indent(&mut self) {
        if self.options.use_tabs {
            for _ in 0..self.indent {
                self.output.push('\t');
            }
        } else {
            for _ in 0..(self.indent * self.options.indent_size) {
                self.output.push(' ');
            }
        }
    }
}

/// Decides what follows `token` outside of an argument list.
fn separator(token: Token<'_>, next: Option<Token<'_>>) -> Separator {
    let Some(next) = next else {
        return Separator::None;
    };

    match next.kind {
        TokenKind::RBrace
        | TokenKind::LBrace
        | TokenKind::LParen
        | TokenKind::Colon
        | TokenKind::Bang
        | TokenKind::LBracket
        | TokenKind::RBracket => return Separator::None,
        _ => {}
    }

    match token.kind {
        TokenKind::LBracket | TokenKind::Dollar => Separator::None,
        TokenKind::Spread | TokenKind::At => Separator::Space,
        TokenKind::Word if INLINE_KEYWORDS.contains(&token.text) => Separator::Space,
        TokenKind::Eq => Separator::Space,
        _ if next.kind == TokenKind::Eq => Separator::Space,
        _ => Separator::Newline,
    }
}

/// Formats GraphQL source with default options.
pub fn format(source: &str) -> String {
    Formatter::new(source, FormatOptions::default()).format()
}

/// Formats GraphQL source with custom options.
pub fn format_with_options(source: &str, options: FormatOptions) -> String {
    Formatter::new(source, options).format()
}
