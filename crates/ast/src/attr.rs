//! The positional metadata carried by every AST node.

use std::ops::Range;

use serde::Deserialize;

/// The attributes common to every node: where in the source it came from.
///
/// These are only ever used for diagnostics, and never influence compilation.
/// The node's `type` discriminator is held by the enum variant that contains
/// the node, and is available through [`crate::Node::kind`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Attr {
    /// The offset of the first character of the node.
    pub start: usize,

    /// The offset one past the last character of the node.
    pub end: usize,

    /// The line and column form of the node's position.
    pub loc: SourceLocation,
}

impl Attr {
    /// Gets the range of source offsets covered by the node.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The start and end position of a node.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct SourceLocation {
    pub start: Position,
    pub end:   Position,

    /// The parser attaches the identifier's name to the locations of
    /// identifiers.
    #[serde(rename = "identifierName", default)]
    pub identifier_name: Option<String>,
}

/// A position in the source, with a 1-based line and a 0-based column.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub line:   usize,
    pub column: usize,
}

/// The raw text of a literal as it appeared in the source.
///
/// This is retained for completeness but not used by the compiler.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Extra {
    pub raw: String,

    #[serde(rename = "rawValue")]
    pub raw_value: serde_json::Value,
}
