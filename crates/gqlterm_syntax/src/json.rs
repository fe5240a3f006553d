//! JSON formatting and validation for variables and response panes.

use miette::Diagnostic;
use thiserror::Error;

/// Malformed JSON input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(gqlterm::syntax::invalid_json))]
pub struct SyntaxError {
    /// 1-based line of the error.
    pub line: usize,
    /// 1-based column of the error.
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for SyntaxError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Pretty-prints JSON with 2-space indentation.
///
/// Blank input is valid and returned unchanged. Object keys keep their input
/// order.
pub fn format_json(source: &str) -> Result<String, SyntaxError> {
    if source.trim().is_empty() {
        return Ok(source.to_string());
    }
    let value: serde_json::Value = serde_json::from_str(source)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Checks that `source` is well-formed JSON. Blank input is valid.
pub fn validate_json(source: &str) -> Result<(), SyntaxError> {
    if source.trim().is_empty() {
        return Ok(());
    }
    serde_json::from_str::<serde_json::Value>(source)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json() {
        assert_eq!(
            format_json(r#"{"key":"value","num":42}"#).unwrap(),
            "{\n  \"key\": \"value\",\n  \"num\": 42\n}"
        );
    }

    #[test]
    fn test_format_json_keeps_key_order() {
        assert_eq!(
            format_json(r#"{"z":1,"a":[true,null]}"#).unwrap(),
            "{\n  \"z\": 1,\n  \"a\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(format_json("  \n").unwrap(), "  \n");
        assert_eq!(validate_json(""), Ok(()));
    }

    #[test]
    fn test_invalid_json() {
        let err = format_json(r#"{"key": }"#).unwrap_err();
        assert_eq!(err.line, 1);
        assert!(validate_json("{").is_err());
        assert!(validate_json("[1, 2]").is_ok());
    }
}
