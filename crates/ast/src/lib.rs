//! The typed JavaScript abstract syntax tree consumed by the JTR compiler.
//!
//! The tree is decoded from the JSON that the external JavaScript parser
//! produces, which follows the [Babel AST
//! schema](https://github.com/babel/babel/blob/main/packages/babel-parser/ast/spec.md).
//! Each node in that JSON carries a `type` discriminator, and each grammar
//! category is modelled here as a closed enum keyed on that discriminator:
//!
//! - [`Statement`] for statement positions.
//! - [`Expression`] for expression positions, literals included.
//! - [`Comment`] for the comments attached to the [`File`].
//!
//! Decoding is schema-driven and all-or-nothing. An unknown discriminator or a
//! missing mandatory field aborts the whole decode with a
//! [`jtr_errors::decode::Error`] that names the offending type or field.
//!
//! Once decoded, the tree is immutable. It is consumed by exactly one compiler
//! pass and then discarded.
//!
//! # Unparsing
//!
//! Every node implements [`std::fmt::Display`], rendering JavaScript-like text
//! for the node. This is a debugging view only, and makes no attempt to
//! reproduce the original source exactly.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod attr;
pub mod expression;
pub mod file;
pub mod node;
pub mod statement;

pub use attr::{Attr, Extra, Position, SourceLocation};
pub use expression::{
    AssignmentExpression,
    AssignmentOperator,
    BinaryExpression,
    BinaryOperator,
    CallExpression,
    Expression,
    FunctionExpression,
    Identifier,
    MemberExpression,
    NumericLiteral,
    StringLiteral,
};
pub use file::{Comment, CommentData, Directive, DirectiveLiteral, File, Program, SourceType};
pub use node::Node;
pub use statement::{
    BlockStatement,
    ExpressionStatement,
    Statement,
    VariableDeclaration,
    VariableDeclarator,
    VariableKind,
};
