//! Syntax layer for gqlterm.
//!
//! This crate provides:
//! - `token`: Token kinds and token structures
//! - `lexer`: Tokenization
//! - `formatter`: Canonical re-indentation of GraphQL text
//! - `balance`: Brace, paren and string balance checking
//! - `json`: JSON pretty-printing and validation

pub mod balance;
pub mod formatter;
pub mod json;
pub mod lexer;
pub mod token;

pub use balance::{validate_balance, BalanceError};
pub use formatter::{format, format_with_options, FormatOptions, Formatter};
pub use json::{format_json, validate_json, SyntaxError};
pub use lexer::{tokenize, Lexer};
pub use token::{Token, TokenKind};
