//! Error types and utilities to do with the compilation from the JavaScript
//! AST to host-language source code.

use std::ops::Range;

use thiserror::Error;

/// The result type for use in the compiler.
pub type Result<T> = std::result::Result<T, Error>;

/// A range of offsets into the original JavaScript source, as reported by the
/// parser for every AST node.
pub type Span = Range<usize>;

/// This error type is for use during code generation.
///
/// Every variant is fatal for the current compilation: the compiler stops at
/// the first error it encounters and no partially generated code is returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Emitted when the program uses bracketed member access such as
    /// `console["log"]`, which the compiler does not support for any shape of
    /// object or property.
    #[error("Computed member access is not supported")]
    ComputedMemberAccess { span: Span },

    /// Emitted when the compiler encounters a statement whose kind it decodes
    /// but cannot generate code for.
    #[error("Unsupported statement type `{kind}`")]
    UnsupportedStatement { kind: String, span: Span },

    /// Emitted when the compiler encounters an expression whose kind it
    /// decodes but cannot generate code for.
    #[error("Unsupported expression type `{kind}`")]
    UnsupportedExpression { kind: String, span: Span },
}

impl Error {
    /// Gets the span of the AST node that caused the error.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::ComputedMemberAccess { span }
            | Self::UnsupportedStatement { span, .. }
            | Self::UnsupportedExpression { span, .. } => span.clone(),
        }
    }

    /// Gets the node type (the AST discriminator) that caused the error.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::ComputedMemberAccess { .. } => "MemberExpression",
            Self::UnsupportedStatement { kind, .. } | Self::UnsupportedExpression { kind, .. } => {
                kind
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::compile::Error;

    #[test]
    fn reports_kind_and_span() {
        let err = Error::UnsupportedStatement {
            kind: "WhileStatement".to_string(),
            span: 0..12,
        };

        assert_eq!(err.kind(), "WhileStatement");
        assert_eq!(err.span(), 0..12);
        assert_eq!(err.to_string(), "Unsupported statement type `WhileStatement`");
    }

    #[test]
    fn computed_access_names_member_expression() {
        let err = Error::ComputedMemberAccess { span: 3..9 };

        assert_eq!(err.kind(), "MemberExpression");
        assert_eq!(err.span(), 3..9);
    }
}
