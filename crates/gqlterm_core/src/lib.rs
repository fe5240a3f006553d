//! Core utilities for gqlterm.
//!
//! This crate provides foundational types used throughout gqlterm:
//! - `span`: Source location tracking and line/column resolution

pub mod span;

pub use span::{LineCol, Span};
