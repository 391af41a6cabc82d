//! Statements and declarations.

use std::fmt;

use itertools::Itertools;
use serde::Deserialize;

use crate::{
    attr::Attr,
    expression::{Expression, Identifier},
    file::Directive,
    node::{impl_node, Node},
};

/// Any node that may appear in statement position.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Statement {
    ExpressionStatement(ExpressionStatement),
    VariableDeclaration(VariableDeclaration),
    BlockStatement(BlockStatement),
}

impl Statement {
    fn node(&self) -> &dyn Node {
        match self {
            Self::ExpressionStatement(s) => s,
            Self::VariableDeclaration(s) => s,
            Self::BlockStatement(s) => s,
        }
    }
}

impl Node for Statement {
    fn attr(&self) -> &Attr {
        self.node().attr()
    }

    fn kind(&self) -> &'static str {
        self.node().kind()
    }
}

/// An expression evaluated for its effects.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ExpressionStatement {
    #[serde(flatten)]
    pub attr:       Attr,
    pub expression: Expression,
}

/// A `var`, `let` or `const` declaration of one or more bindings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VariableDeclaration {
    #[serde(flatten)]
    pub attr:         Attr,
    pub declarations: Vec<VariableDeclarator>,
    pub kind:         VariableKind,
}

/// A single binding within a [`VariableDeclaration`], with its optional
/// initializer.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct VariableDeclarator {
    #[serde(flatten)]
    pub attr: Attr,
    pub id:   Identifier,
    pub init: Option<Expression>,
}

/// The keyword that introduced a [`VariableDeclaration`].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// A braced sequence of statements, preceded by any directives that open it.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct BlockStatement {
    #[serde(flatten)]
    pub attr:       Attr,
    pub body:       Vec<Statement>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl_node!(
    ExpressionStatement => "ExpressionStatement",
    VariableDeclaration => "VariableDeclaration",
    VariableDeclarator => "VariableDeclarator",
    BlockStatement => "BlockStatement",
);

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpressionStatement(s) => s.fmt(f),
            Self::VariableDeclaration(s) => s.fmt(f),
            Self::BlockStatement(s) => s.fmt(f),
        }
    }
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expression.fmt(f)
    }
}

impl fmt::Display for VariableDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.declarations.iter().join(", "))
    }
}

impl fmt::Display for VariableDeclarator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.init {
            Some(init) => write!(f, "{} = {init}", self.id),
            None => self.id.fmt(f),
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() && self.directives.is_empty() {
            return f.write_str("{}");
        }

        let directives = self.directives.iter().map(ToString::to_string);
        let body = self.body.iter().map(ToString::to_string);
        write!(f, "{{ {} }}", directives.chain(body).join("; "))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        expression::Expression,
        node::Node,
        statement::{Statement, VariableKind},
        File,
    };

    #[test]
    fn decodes_declarations_with_and_without_initializers() -> anyhow::Result<()> {
        let file = File::from_json(include_str!("../input/assignment.json"))?;
        let Statement::VariableDeclaration(decl) = &file.program.body[0] else {
            panic!("Expected a variable declaration");
        };

        assert_eq!(decl.kind, VariableKind::Let);
        assert_eq!(decl.declarations.len(), 1);
        assert_eq!(decl.declarations[0].id.name, "foo");
        assert!(decl.declarations[0].init.is_none());
        assert_eq!(decl.to_string(), "let foo");

        let file = File::from_json(include_str!("../input/let_foo.json"))?;
        assert_eq!(file.program.body[0].to_string(), r#"let foo = "hello""#);

        Ok(())
    }

    #[test]
    fn decodes_blocks() -> anyhow::Result<()> {
        let file = File::from_json(include_str!("../input/block.json"))?;
        let statement = &file.program.body[0];

        assert_eq!(statement.kind(), "BlockStatement");
        let Statement::BlockStatement(block) = statement else {
            panic!("Expected a block statement");
        };
        assert_eq!(block.body.len(), 1);
        assert_eq!(statement.to_string(), r#"{ console.log("x") }"#);

        Ok(())
    }

    #[test]
    fn blocks_keep_their_directives() -> anyhow::Result<()> {
        let file = File::from_json(include_str!("../input/strict_function.json"))?;
        let Statement::VariableDeclaration(decl) = &file.program.body[0] else {
            panic!("Expected a variable declaration");
        };
        let Some(Expression::FunctionExpression(function)) = &decl.declarations[0].init else {
            panic!("Expected a function expression");
        };

        assert_eq!(function.body.directives.len(), 1);
        assert_eq!(function.body.directives[0].value.value, "use strict");
        assert_eq!(function.body.directives[0].span(), 22..35);
        assert_eq!(function.body.to_string(), r#"{ "use strict"; console.log("x") }"#);

        Ok(())
    }
}
