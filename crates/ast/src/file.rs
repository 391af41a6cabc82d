//! The root of the tree, and the entry points for decoding it.

use std::{fmt, io::Read, str::FromStr};

use itertools::Itertools;
use jtr_errors::decode::Result;
use serde::Deserialize;

use crate::{
    attr::Attr,
    node::{impl_node, Node},
    statement::Statement,
};

/// The root node produced by the parser for a single source file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct File {
    #[serde(flatten)]
    pub attr:     Attr,
    pub program:  Program,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl File {
    /// Decodes a file from the parser's JSON output.
    ///
    /// Fields the tree does not model, such as the parser's `tokens`, are
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`jtr_errors::decode::Error::UnknownNodeType`] if any node has a
    ///   `type` that is not part of the grammar in its position.
    /// - [`jtr_errors::decode::Error::MissingField`] if any node lacks a field
    ///   that is mandatory for its type.
    /// - Another [`jtr_errors::decode::Error`] if the input is not valid JSON
    ///   or does not have the shape of an AST.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a file from JSON bytes.
    ///
    /// # Errors
    ///
    /// As for [`Self::from_json`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decodes a file from JSON read from `reader`.
    ///
    /// # Errors
    ///
    /// As for [`Self::from_json`], and additionally
    /// [`jtr_errors::decode::Error::IOError`] if reading fails.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl FromStr for File {
    type Err = jtr_errors::decode::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

/// The program: the top-level statements of the file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Program {
    #[serde(flatten)]
    pub attr:        Attr,
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
    pub body:        Vec<Statement>,
    #[serde(default)]
    pub directives:  Vec<Directive>,
}

/// Whether the source was parsed as a classic script or as a module.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Script,
    Module,
}

/// A directive prologue entry such as `"use strict"`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Directive {
    #[serde(flatten)]
    pub attr:  Attr,
    pub value: DirectiveLiteral,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct DirectiveLiteral {
    #[serde(flatten)]
    pub attr:  Attr,
    pub value: String,
}

/// A comment in the source. Comments are retained but never compiled.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Comment {
    CommentBlock(CommentData),
    CommentLine(CommentData),
}

impl Comment {
    /// Gets the text of the comment, without its delimiters.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::CommentBlock(data) | Self::CommentLine(data) => &data.value,
        }
    }
}

impl Node for Comment {
    fn attr(&self) -> &Attr {
        match self {
            Self::CommentBlock(data) | Self::CommentLine(data) => &data.attr,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::CommentBlock(_) => "CommentBlock",
            Self::CommentLine(_) => "CommentLine",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CommentData {
    #[serde(flatten)]
    pub attr:  Attr,
    pub value: String,
}

impl_node!(
    File => "File",
    Program => "Program",
    Directive => "Directive",
    DirectiveLiteral => "DirectiveLiteral",
);

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.program.fmt(f)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for directive in &self.directives {
            writeln!(f, "{directive}")?;
        }
        write!(f, "{}", self.body.iter().join("\n"))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value.value.escape_debug())
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommentBlock(data) => write!(f, "/*{}*/", data.value),
            Self::CommentLine(data) => write!(f, "//{}", data.value),
        }
    }
}
