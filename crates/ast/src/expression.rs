//! Expressions, including the literals.

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;

use crate::{
    attr::{Attr, Extra},
    node::{impl_node, Node},
    statement::BlockStatement,
};

/// Any node that may appear in expression position.
///
/// Decoding an expression whose `type` is not one of these variants fails.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier(Identifier),
    CallExpression(CallExpression),
    MemberExpression(MemberExpression),
    AssignmentExpression(AssignmentExpression),
    BinaryExpression(BinaryExpression),
    FunctionExpression(FunctionExpression),
    StringLiteral(StringLiteral),
    NumericLiteral(NumericLiteral),
}

impl Expression {
    /// Gets the identifier if this expression is one.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    fn node(&self) -> &dyn Node {
        match self {
            Self::Identifier(e) => e,
            Self::CallExpression(e) => e,
            Self::MemberExpression(e) => e,
            Self::AssignmentExpression(e) => e,
            Self::BinaryExpression(e) => e,
            Self::FunctionExpression(e) => e,
            Self::StringLiteral(e) => e,
            Self::NumericLiteral(e) => e,
        }
    }
}

impl Node for Expression {
    fn attr(&self) -> &Attr {
        self.node().attr()
    }

    fn kind(&self) -> &'static str {
        self.node().kind()
    }
}

/// A reference to a binding by name.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Identifier {
    #[serde(flatten)]
    pub attr: Attr,
    pub name: String,
}

/// A call such as `callee(a, b)`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CallExpression {
    #[serde(flatten)]
    pub attr:      Attr,
    pub callee:    Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// A property access: `object.property` or, when `computed`,
/// `object[property]`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MemberExpression {
    #[serde(flatten)]
    pub attr:     Attr,
    pub object:   Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
}

/// An assignment such as `left = right` or `left += right`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AssignmentExpression {
    #[serde(flatten)]
    pub attr:     Attr,
    pub operator: AssignmentOperator,
    pub left:     Box<Expression>,
    pub right:    Box<Expression>,
}

/// A binary operation such as `left + right`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BinaryExpression {
    #[serde(flatten)]
    pub attr:     Attr,
    pub operator: BinaryOperator,
    pub left:     Box<Expression>,
    pub right:    Box<Expression>,
}

/// A function expression, `function id(params) { body }`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct FunctionExpression {
    #[serde(flatten)]
    pub attr:      Attr,
    pub id:        Option<Identifier>,
    pub params:    Vec<Identifier>,
    pub body:      BlockStatement,
    #[serde(default)]
    pub generator: bool,
    #[serde(default, rename = "async")]
    pub is_async:  bool,
}

/// A string literal, whose `value` has had its escapes resolved.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StringLiteral {
    #[serde(flatten)]
    pub attr:  Attr,
    pub value: String,
    #[serde(default)]
    pub extra: Option<Extra>,
}

/// A numeric literal. All JavaScript numbers are doubles.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NumericLiteral {
    #[serde(flatten)]
    pub attr:  Attr,
    pub value: f64,
    #[serde(default)]
    pub extra: Option<Extra>,
}

/// The operator of an assignment, such as `=` or `+=`, kept verbatim.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AssignmentOperator(pub String);

impl AssignmentOperator {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The operator of a binary expression, such as `+` or `===`, kept verbatim.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BinaryOperator(pub String);

impl BinaryOperator {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl_node!(
    Identifier => "Identifier",
    CallExpression => "CallExpression",
    MemberExpression => "MemberExpression",
    AssignmentExpression => "AssignmentExpression",
    BinaryExpression => "BinaryExpression",
    FunctionExpression => "FunctionExpression",
    StringLiteral => "StringLiteral",
    NumericLiteral => "NumericLiteral",
);

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(e) => e.fmt(f),
            Self::CallExpression(e) => e.fmt(f),
            Self::MemberExpression(e) => e.fmt(f),
            Self::AssignmentExpression(e) => e.fmt(f),
            Self::BinaryExpression(e) => e.fmt(f),
            Self::FunctionExpression(e) => e.fmt(f),
            Self::StringLiteral(e) => e.fmt(f),
            Self::NumericLiteral(e) => e.fmt(f),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.callee, self.arguments.iter().join(", "))
    }
}

impl fmt::Display for MemberExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.computed {
            write!(f, "{}[{}]", self.object, self.property)
        } else {
            write!(f, "{}.{}", self.object, self.property)
        }
    }
}

impl fmt::Display for AssignmentExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

impl fmt::Display for FunctionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_async {
            f.write_str("async ")?;
        }
        f.write_str("function")?;
        if self.generator {
            f.write_str("*")?;
        }
        if let Some(id) = &self.id {
            write!(f, " {id}")?;
        }
        write!(f, "({}) {}", self.params.iter().join(", "), self.body)
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.value.escape_debug())
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.extra {
            Some(extra) => f.write_str(&extra.raw),
            None => write!(f, "{}", self.value),
        }
    }
}

impl fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use crate::{expression::Expression, node::Node};

    fn identifier(name: &str, start: usize) -> String {
        let end = start + name.len();
        format!(
            r#"{{"type":"Identifier","start":{start},"end":{end},"loc":{{"start":{{"line":1,"column":{start}}},"end":{{"line":1,"column":{end}}},"identifierName":"{name}"}},"name":"{name}"}}"#
        )
    }

    #[test]
    fn decodes_member_expressions() -> anyhow::Result<()> {
        let json = format!(
            r#"{{"type":"MemberExpression","start":0,"end":11,"loc":{{"start":{{"line":1,"column":0}},"end":{{"line":1,"column":11}}}},"object":{},"property":{},"computed":false}}"#,
            identifier("console", 0),
            identifier("log", 8),
        );
        let expr: Expression = serde_json::from_str(&json)?;

        assert_eq!(expr.kind(), "MemberExpression");
        assert_eq!(expr.span(), 0..11);
        assert_eq!(expr.to_string(), "console.log");

        let Expression::MemberExpression(member) = &expr else {
            panic!("Expected a member expression, found {}", expr.kind());
        };
        assert!(!member.computed);
        assert_eq!(
            member.property.as_identifier().map(|i| i.name.as_str()),
            Some("log")
        );
        assert_eq!(
            member.property.attr().loc.identifier_name.as_deref(),
            Some("log")
        );

        Ok(())
    }

    #[test]
    fn unknown_expression_types_are_rejected() {
        let json = r#"{"type":"ThisExpression","start":0,"end":4,"loc":{"start":{"line":1,"column":0},"end":{"line":1,"column":4}}}"#;
        let result = serde_json::from_str::<Expression>(json);

        let error = result.expect_err("ThisExpression is not in the grammar");
        assert!(error.to_string().contains("unknown variant `ThisExpression`"));
    }

    #[test]
    fn missing_mandatory_fields_are_rejected() {
        let json = r#"{"type":"Identifier","start":0,"end":3,"loc":{"start":{"line":1,"column":0},"end":{"line":1,"column":3}}}"#;
        let result = serde_json::from_str::<Expression>(json);

        let error = result.expect_err("Identifier requires a name");
        assert!(error.to_string().contains("missing field `name`"));
    }

    #[test]
    fn string_literals_unparse_escaped() -> anyhow::Result<()> {
        let json = r#"{"type":"StringLiteral","start":0,"end":8,"loc":{"start":{"line":1,"column":0},"end":{"line":1,"column":8}},"value":"a\"b\nc"}"#;
        let expr: Expression = serde_json::from_str(json)?;

        assert_eq!(expr.to_string(), r#""a\"b\nc""#);

        Ok(())
    }
}
