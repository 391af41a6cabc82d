//! Error types and utilities to do with decoding the JSON AST produced by the
//! JavaScript parser into the typed AST.
//!
//! Decoding is all-or-nothing: the first violation of the schema aborts the
//! whole decode, and no partially-built tree is ever returned.

use serde_json::error::Category;
use thiserror::Error;

/// The result type for use while decoding.
pub type Result<T> = std::result::Result<T, Error>;

/// This error type is for use while decoding the JSON AST.
///
/// The `line` and `column` reported by each variant refer to the position in
/// the JSON document at which the decoder gave up.
#[derive(Debug, Error)]
pub enum Error {
    /// A tag that is not one of the known alternatives for its position.
    ///
    /// This is usually a node's `type` discriminator that is unknown for the
    /// grammar category (statement, expression, and so on) in which it
    /// appeared. Enumerated values such as a declaration `kind` or a program's
    /// `sourceType` are reported the same way, and `expected` lists the
    /// alternatives so that the two can be told apart.
    #[error("Unsupported node type `{kind}` at line {line}, column {column}, expected {expected}")]
    UnknownNodeType {
        kind:     String,
        expected: String,
        line:     usize,
        column:   usize,
    },

    /// A node was missing a field that is mandatory for its type.
    #[error("Missing field `{field}` at line {line}, column {column}")]
    MissingField {
        field:  String,
        line:   usize,
        column: usize,
    },

    /// A field was present but had the wrong shape.
    #[error("Invalid AST at line {line}, column {column}: {message}")]
    InvalidData {
        message: String,
        line:    usize,
        column:  usize,
    },

    /// The input was not well-formed JSON.
    #[error("Malformed AST JSON at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line:    usize,
        column:  usize,
    },

    /// The input ended before the document was complete.
    #[error("Unexpected end of AST JSON at line {line}, column {column}")]
    UnexpectedEof { line: usize, column: usize },

    /// An error when reading the AST JSON.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl Error {
    /// Gets the node type that caused the error, if the error was caused by
    /// an unrecognized discriminator.
    #[must_use]
    pub fn unknown_kind(&self) -> Option<&str> {
        match self {
            Self::UnknownNodeType { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    /// Sorts the error produced by `serde_json` into our structured variants.
    fn from(value: serde_json::Error) -> Self {
        let line = value.line();
        let column = value.column();

        match value.classify() {
            Category::Io => Self::IOError(value.into()),
            Category::Eof => Self::UnexpectedEof { line, column },
            Category::Syntax => Self::Syntax {
                message: bare_message(&value),
                line,
                column,
            },
            Category::Data => {
                let message = bare_message(&value);
                if let Some(kind) = backticked(&message, "unknown variant ") {
                    let expected = message
                        .split_once(", expected ")
                        .map_or_else(|| "nothing".to_string(), |(_, rest)| rest.to_string());
                    Self::UnknownNodeType {
                        kind,
                        expected,
                        line,
                        column,
                    }
                } else if let Some(field) = backticked(&message, "missing field ") {
                    Self::MissingField {
                        field,
                        line,
                        column,
                    }
                } else {
                    Self::InvalidData {
                        message,
                        line,
                        column,
                    }
                }
            }
        }
    }
}

/// Gets the message of a `serde_json` error without the position suffix that
/// its `Display` implementation appends.
fn bare_message(error: &serde_json::Error) -> String {
    let full = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    full.strip_suffix(&suffix).unwrap_or(&full).to_string()
}

/// Extracts the first backtick-quoted word of `message` if it starts with
/// `prefix`.
fn backticked(message: &str, prefix: &str) -> Option<String> {
    let rest = message.strip_prefix(prefix)?.strip_prefix('`')?;
    let end = rest.find('`')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod test {
    use serde::de::Error as _;

    use crate::decode::{backticked, Error};

    #[test]
    fn extracts_backticked_words() {
        assert_eq!(
            backticked("unknown variant `WhileStatement`, expected one of `A`", "unknown variant "),
            Some("WhileStatement".to_string())
        );
        assert_eq!(backticked("missing field `name`", "unknown variant "), None);
    }

    #[test]
    fn classifies_unknown_variants() {
        let json_err = serde_json::Error::unknown_variant("WhileStatement", &["BlockStatement"]);
        let err = Error::from(json_err);

        assert_eq!(err.unknown_kind(), Some("WhileStatement"));
        assert!(matches!(err, Error::UnknownNodeType { expected, .. } if expected == "`BlockStatement`"));
    }

    #[test]
    fn unknown_enumerated_values_list_the_alternatives() {
        let json_err = serde_json::Error::unknown_variant("using", &["var", "let", "const"]);
        let err = Error::from(json_err);

        assert_eq!(err.unknown_kind(), Some("using"));
        assert!(err.to_string().ends_with("expected one of `var`, `let`, `const`"));
    }

    #[test]
    fn classifies_missing_fields() {
        let json_err = serde_json::Error::missing_field("name");
        let err = Error::from(json_err);

        assert!(matches!(err, Error::MissingField { field, .. } if field == "name"));
    }

    #[test]
    fn classifies_syntax_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope }").unwrap_err();
        let err = Error::from(json_err);

        assert!(matches!(err, Error::Syntax { line: 1, .. }));
    }
}
