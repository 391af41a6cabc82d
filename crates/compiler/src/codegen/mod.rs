//! The code generator, which walks the AST and emits the equivalent Rust.
//!
//! Generation is a single pass over the tree in source order. Each node that
//! is visited emits one chunk of Rust into the [`Code`] being built, and
//! nothing is ever revisited or rewritten. The only state carried between
//! nodes is the output itself and the set of declared variables (see
//! [`CodegenData`]).
//!
//! # Runtime Model
//!
//! Every JavaScript value is represented in the generated program as a
//! [`jtr_runtime::Value`]. The program owns a global environment, always bound
//! to `__global`, in which declared variables are published and through which
//! references to undeclared names are resolved at runtime.

pub mod data;
pub mod ident;
pub mod output;

use jtr_ast::{
    AssignmentExpression,
    CallExpression,
    Expression,
    File,
    Identifier,
    MemberExpression,
    Node,
    NumericLiteral,
    Program,
    Statement,
    StringLiteral,
    VariableDeclaration,
};
use jtr_errors::compile::{Error, Result};
use tracing::{debug, trace};

use crate::{
    catalog::BuiltinCatalog,
    codegen::{data::CodegenData, ident::host_ident, output::Code},
};

/// The name of the binding for the global environment in generated programs.
pub const GLOBAL_BINDING: &str = "__global";

/// Handles the translation of a decoded JavaScript [`File`] into [`Code`].
#[derive(Clone, Debug)]
pub struct CodeGenerator {
    /// The builtins that are candidates for inlining.
    ///
    /// It is intended to never be mutated during the generation process.
    catalog: BuiltinCatalog,
}

/// Basic operations for construction and accessing fields.
impl CodeGenerator {
    /// Constructs a new code generator that inlines the builtins in `catalog`.
    #[must_use]
    pub fn new(catalog: BuiltinCatalog) -> Self {
        Self { catalog }
    }

    /// Gets the builtin catalog that the generator consults.
    #[must_use]
    pub fn catalog(&self) -> &BuiltinCatalog {
        &self.catalog
    }
}

/// The functionality that actually performs code generation.
impl CodeGenerator {
    /// Executes the code generation process on `file`, returning the generated
    /// code if it succeeds.
    ///
    /// # Errors
    ///
    /// - [`Error`] for the first construct in the file that cannot be
    ///   compiled. No code is returned in this case.
    pub fn run(&self, file: &File) -> Result<Code> {
        let mut data = CodegenData::new();
        self.generate_program(&file.program, &mut data)?;

        Ok(data.into())
    }

    /// Generates each of the program's top-level statements in order.
    pub fn generate_program(&self, program: &Program, data: &mut CodegenData) -> Result<()> {
        program
            .body
            .iter()
            .try_for_each(|statement| self.generate_statement(statement, data))
    }

    /// Generates code for a single `statement`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedStatement`] if the statement is of a kind that
    ///   cannot be compiled.
    pub fn generate_statement(&self, statement: &Statement, data: &mut CodegenData) -> Result<()> {
        debug!(kind = statement.kind(), span = ?statement.span(), "Generating statement");

        match statement {
            Statement::ExpressionStatement(stmt) => match &stmt.expression {
                Expression::AssignmentExpression(assign) => self.generate_assignment(assign, data),
                expression => {
                    self.generate_expression(expression, data)?;
                    data.output_mut().write_line(";");
                    Ok(())
                }
            },
            Statement::VariableDeclaration(decl) => self.generate_declaration(decl, data),
            Statement::BlockStatement(_) => Err(Error::UnsupportedStatement {
                kind: statement.kind().to_string(),
                span: statement.span(),
            }),
        }
    }

    /// Generates code for each of the declarators in `declaration`.
    ///
    /// Each variable becomes a mutable Rust local, optionally initialized, that
    /// is then published into the global environment under its JavaScript
    /// name. The name counts as declared only once this is done, so an
    /// initializer that refers to the variable being declared sees the global
    /// instead.
    ///
    /// The declaration kind (`var`, `let` or `const`) does not affect the
    /// generated code.
    pub fn generate_declaration(
        &self,
        declaration: &VariableDeclaration,
        data: &mut CodegenData,
    ) -> Result<()> {
        for declarator in &declaration.declarations {
            let name = &declarator.id.name;
            let local = host_ident(name);

            data.output_mut()
                .write_line(&format!("let mut {local}: Value = Value::Undefined;"));
            data.output_mut().write_line(&format!("let _ = &{local};"));

            if let Some(init) = &declarator.init {
                data.output_mut().write(&format!("{local} = "));
                self.generate_expression(init, data)?;
                data.output_mut().write_line(";");
            }

            data.output_mut().write_line(&format!(
                "{GLOBAL_BINDING}.define({name:?}, {local}.clone());"
            ));
            data.declare(name);
        }

        Ok(())
    }

    /// Generates code for `expression` in value position.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedExpression`] if the expression, or any expression
    ///   it contains, is of a kind that cannot be compiled. Assignments are
    ///   only compiled as statements, so one in value position is rejected
    ///   too.
    /// - [`Error::ComputedMemberAccess`] if the expression contains a computed
    ///   member access.
    pub fn generate_expression(&self, expression: &Expression, data: &mut CodegenData) -> Result<()> {
        trace!(kind = expression.kind(), "Generating expression");

        match expression {
            Expression::Identifier(ident) => {
                Self::generate_identifier(ident, data);
                Ok(())
            }
            Expression::CallExpression(call) => self.generate_call(call, data),
            Expression::MemberExpression(member) => self.generate_member(member, data),
            Expression::StringLiteral(lit) => {
                Self::generate_string(lit, data);
                Ok(())
            }
            Expression::NumericLiteral(lit) => {
                Self::generate_number(lit, data);
                Ok(())
            }
            Expression::AssignmentExpression(_)
            | Expression::BinaryExpression(_)
            | Expression::FunctionExpression(_) => {
                Err(Error::UnsupportedExpression {
                    kind: expression.kind().to_string(),
                    span: expression.span(),
                })
            }
        }
    }

    /// Generates a reference to the value of `ident`.
    ///
    /// Declared variables are referenced directly, while anything else is
    /// looked up in the global environment when the program runs, failing
    /// with a `ReferenceError` if it is not bound.
    pub fn generate_identifier(ident: &Identifier, data: &mut CodegenData) {
        let text = if data.is_declared(&ident.name) {
            format!("{}.clone()", host_ident(&ident.name))
        } else {
            format!("{GLOBAL_BINDING}.get({:?})?", ident.name)
        };
        data.output_mut().write(&text);
    }

    /// Generates the callee of `call` followed by its argument list.
    pub fn generate_call(&self, call: &CallExpression, data: &mut CodegenData) -> Result<()> {
        self.generate_expression(&call.callee, data)?;

        data.output_mut().write("(&[");
        for (index, argument) in call.arguments.iter().enumerate() {
            if index > 0 {
                data.output_mut().write(", ");
            }
            self.generate_expression(argument, data)?;
        }
        data.output_mut().write("])");

        Ok(())
    }

    /// Generates a property access.
    ///
    /// Where the access names a builtin function in the catalog, the Rust
    /// function implementing it is referenced directly. Otherwise the object is
    /// generated followed by `.` and the property name.
    ///
    /// # Errors
    ///
    /// - [`Error::ComputedMemberAccess`] if `member` is computed, regardless of
    ///   its object or property.
    pub fn generate_member(&self, member: &MemberExpression, data: &mut CodegenData) -> Result<()> {
        if member.computed {
            return Err(Error::ComputedMemberAccess {
                span: member.span(),
            });
        }

        if let Some(symbol) = self.inlined_builtin(member, data) {
            trace!(member = %member, symbol, "Inlining builtin");
            data.output_mut().write(symbol);
            return Ok(());
        }

        trace!(member = %member, "Generating dotted member access");
        self.generate_expression(&member.object, data)?;
        data.output_mut().write(".");
        match member.property.as_identifier() {
            Some(property) => data.output_mut().write(&host_ident(&property.name)),
            None => self.generate_expression(&member.property, data)?,
        }

        Ok(())
    }

    /// Gets the symbol of the builtin that `member` refers to, if it can be
    /// inlined.
    ///
    /// Both the object and the property must be bare identifiers, and the
    /// object must not be shadowed by a declared variable.
    fn inlined_builtin(&self, member: &MemberExpression, data: &CodegenData) -> Option<&'static str> {
        let object = member.object.as_identifier()?;
        let property = member.property.as_identifier()?;

        if data.is_declared(&object.name) {
            return None;
        }

        self.catalog
            .resolve_member(&object.name, &property.name)
            .map(|function| function.symbol())
    }

    /// Generates an assignment statement, terminator included.
    ///
    /// The operator is emitted as written in the source. The assignment must
    /// be the whole of its statement, as Rust assignments have no value.
    pub fn generate_assignment(
        &self,
        assign: &AssignmentExpression,
        data: &mut CodegenData,
    ) -> Result<()> {
        self.generate_assignment_target(&assign.left, data)?;
        data.output_mut().write(&format!(" {} ", assign.operator));
        self.generate_expression(&assign.right, data)?;
        data.output_mut().write_line(";");

        Ok(())
    }

    /// Generates the place being assigned to by an assignment.
    ///
    /// Assigning to an undeclared name creates it in the global environment.
    /// Targets other than identifiers are generated as they would be in value
    /// position.
    pub fn generate_assignment_target(
        &self,
        target: &Expression,
        data: &mut CodegenData,
    ) -> Result<()> {
        match target.as_identifier() {
            Some(ident) if data.is_declared(&ident.name) => {
                data.output_mut().write(&host_ident(&ident.name));
                Ok(())
            }
            Some(ident) => {
                data.output_mut()
                    .write(&format!("*{GLOBAL_BINDING}.slot({:?})", ident.name));
                Ok(())
            }
            None => self.generate_expression(target, data),
        }
    }

    /// Generates a string value, escaping the literal's text as a Rust string
    /// literal.
    pub fn generate_string(literal: &StringLiteral, data: &mut CodegenData) {
        data.output_mut()
            .write(&format!("Value::string({:?})", literal.value));
    }

    /// Generates a number value.
    pub fn generate_number(literal: &NumericLiteral, data: &mut CodegenData) {
        let value = literal.value;
        let text = if value.is_nan() {
            "f64::NAN".to_string()
        } else if value.is_infinite() {
            if value > 0.0 {
                "f64::INFINITY".to_string()
            } else {
                "f64::NEG_INFINITY".to_string()
            }
        } else {
            format!("{value:?}")
        };
        data.output_mut().write(&format!("Value::number({text})"));
    }
}

#[cfg(test)]
mod test {
    use jtr_ast::{
        AssignmentExpression,
        AssignmentOperator,
        Attr,
        CallExpression,
        Expression,
        ExpressionStatement,
        File,
        Identifier,
        MemberExpression,
        NumericLiteral,
        Program,
        SourceType,
        Statement,
        StringLiteral,
        VariableDeclaration,
        VariableDeclarator,
        VariableKind,
    };
    use jtr_errors::compile::Error;

    use crate::{catalog::BuiltinCatalog, codegen::CodeGenerator};

    fn generate(json: &str) -> anyhow::Result<String> {
        let file = File::from_json(json)?;
        let code = CodeGenerator::new(BuiltinCatalog::default()).run(&file)?;
        Ok(code.body().to_string())
    }

    fn generate_err(json: &str) -> anyhow::Result<Error> {
        let file = File::from_json(json)?;
        let result = CodeGenerator::new(BuiltinCatalog::default()).run(&file);
        Ok(result.expect_err("Compilation should have failed"))
    }

    fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier {
            attr: Attr::default(),
            name: name.to_string(),
        })
    }

    fn member(object: &str, property: &str) -> Expression {
        Expression::MemberExpression(MemberExpression {
            attr:     Attr::default(),
            object:   Box::new(ident(object)),
            property: Box::new(ident(property)),
            computed: false,
        })
    }

    fn call(callee: Expression, arguments: Vec<Expression>) -> Statement {
        Statement::ExpressionStatement(ExpressionStatement {
            attr:       Attr::default(),
            expression: Expression::CallExpression(CallExpression {
                attr: Attr::default(),
                callee: Box::new(callee),
                arguments,
            }),
        })
    }

    fn declare(name: &str) -> Statement {
        Statement::VariableDeclaration(VariableDeclaration {
            attr:         Attr::default(),
            declarations: vec![VariableDeclarator {
                attr: Attr::default(),
                id:   Identifier {
                    attr: Attr::default(),
                    name: name.to_string(),
                },
                init: None,
            }],
            kind:         VariableKind::Let,
        })
    }

    fn program(body: Vec<Statement>) -> File {
        File {
            attr:     Attr::default(),
            program:  Program {
                attr: Attr::default(),
                source_type: SourceType::Script,
                body,
                directives: Vec::new(),
            },
            comments: Vec::new(),
        }
    }

    fn number(value: f64) -> Expression {
        Expression::NumericLiteral(NumericLiteral {
            attr: Attr::default(),
            value,
            extra: None,
        })
    }

    fn assign(target: &str, value: Expression) -> Expression {
        Expression::AssignmentExpression(AssignmentExpression {
            attr:     Attr {
                start: 12,
                end: 25,
                ..Attr::default()
            },
            operator: AssignmentOperator("=".to_string()),
            left:     Box::new(ident(target)),
            right:    Box::new(value),
        })
    }

    #[test]
    fn inlines_console_log() -> anyhow::Result<()> {
        let body = generate(include_str!("../../../ast/input/hello.json"))?;

        assert_eq!(body, "console_log(&[Value::string(\"Hello, Godzilla\")]);\n");

        Ok(())
    }

    #[test]
    fn declared_variables_are_published_and_referenced_directly() -> anyhow::Result<()> {
        let body = generate(include_str!("../../../ast/input/let_foo.json"))?;

        assert_eq!(
            body,
            "let mut foo: Value = Value::Undefined;\nlet _ = &foo;\nfoo = \
             Value::string(\"hello\");\n__global.define(\"foo\", \
             foo.clone());\nconsole_log(&[foo.clone()]);\n"
        );

        Ok(())
    }

    #[test]
    fn assigns_to_declared_variables() -> anyhow::Result<()> {
        let body = generate(include_str!("../../../ast/input/assignment.json"))?;

        assert_eq!(
            body,
            "let mut foo: Value = Value::Undefined;\nlet _ = &foo;\n__global.define(\"foo\", \
             foo.clone());\nfoo = Value::string(\"hello\");\nconsole_log(&[foo.clone()]);\n"
        );

        Ok(())
    }

    #[test]
    fn undeclared_names_are_looked_up_globally() -> anyhow::Result<()> {
        let body = generate(include_str!("../../../ast/input/undeclared.json"))?;

        assert_eq!(body, "console_log(&[__global.get(\"bar\")?]);\n");

        Ok(())
    }

    #[test]
    fn numeric_literals_are_doubles() -> anyhow::Result<()> {
        let body = generate(include_str!("../../../ast/input/numeric.json"))?;
        assert_eq!(body, "console_log(&[Value::number(10.0)]);\n");

        let file = program(vec![call(member("console", "log"), vec![
            number(0.5),
            number(f64::INFINITY),
        ])]);
        let code = CodeGenerator::new(BuiltinCatalog::default()).run(&file)?;
        assert_eq!(
            code.body(),
            "console_log(&[Value::number(0.5), Value::number(f64::INFINITY)]);\n"
        );

        Ok(())
    }

    #[test]
    fn computed_member_access_is_rejected() -> anyhow::Result<()> {
        let error = generate_err(include_str!("../../../ast/input/computed.json"))?;

        assert_eq!(error, Error::ComputedMemberAccess { span: 0..14 });

        Ok(())
    }

    #[test]
    fn unsupported_kinds_are_rejected_by_name() -> anyhow::Result<()> {
        let binary = generate_err(include_str!("../../../ast/input/binary.json"))?;
        assert_eq!(binary, Error::UnsupportedExpression {
            kind: "BinaryExpression".to_string(),
            span: 12..17,
        });

        let function = generate_err(include_str!("../../../ast/input/function.json"))?;
        assert_eq!(function.kind(), "FunctionExpression");

        let block = generate_err(include_str!("../../../ast/input/block.json"))?;
        assert!(matches!(block, Error::UnsupportedStatement { .. }));
        assert_eq!(block.kind(), "BlockStatement");
        assert_eq!(block.span().start, 0);

        Ok(())
    }

    #[test]
    fn unregistered_members_fall_back_to_dotted_access() -> anyhow::Result<()> {
        let file = program(vec![
            call(member("foo", "bar"), vec![number(1.0)]),
            call(member("console", "warn"), vec![]),
        ]);
        let code = CodeGenerator::new(BuiltinCatalog::default()).run(&file)?;

        assert_eq!(
            code.body(),
            "__global.get(\"foo\")?.bar(&[Value::number(1.0)]);\n__global.get(\"console\")?.\
             warn(&[]);\n"
        );

        Ok(())
    }

    #[test]
    fn declared_variables_shadow_builtins() -> anyhow::Result<()> {
        let file = program(vec![
            declare("console"),
            call(member("console", "log"), vec![]),
        ]);
        let code = CodeGenerator::new(BuiltinCatalog::default()).run(&file)?;

        assert!(code.body().ends_with("console.clone().log(&[]);\n"));

        Ok(())
    }

    #[test]
    fn assignment_to_undeclared_names_creates_globals() -> anyhow::Result<()> {
        let json = include_str!("../../../ast/input/assignment.json");
        let mut file = File::from_json(json)?;
        file.program.body.remove(0);
        let code = CodeGenerator::new(BuiltinCatalog::default()).run(&file)?;

        assert_eq!(
            code.body(),
            "*__global.slot(\"foo\") = Value::string(\"hello\");\nconsole_log(&[__global.\
             get(\"foo\")?]);\n"
        );

        Ok(())
    }

    #[test]
    fn strings_are_escaped_for_rust() -> anyhow::Result<()> {
        let file = program(vec![call(member("console", "log"), vec![
            Expression::StringLiteral(StringLiteral {
                attr:  Attr::default(),
                value: "say \"hi\"\n\\".to_string(),
                extra: None,
            }),
        ])]);
        let code = CodeGenerator::new(BuiltinCatalog::default()).run(&file)?;

        assert_eq!(
            code.body(),
            "console_log(&[Value::string(\"say \\\"hi\\\"\\n\\\\\")]);\n"
        );

        Ok(())
    }

    #[test]
    fn keywords_are_mangled() -> anyhow::Result<()> {
        let file = program(vec![
            declare("match"),
            call(member("console", "log"), vec![ident("match")]),
        ]);
        let code = CodeGenerator::new(BuiltinCatalog::default()).run(&file)?;

        assert!(code.body().contains("let mut r#match: Value = Value::Undefined;"));
        assert!(code.body().contains("__global.define(\"match\", r#match.clone());"));
        assert!(code.body().ends_with("console_log(&[r#match.clone()]);\n"));

        Ok(())
    }

    #[test]
    fn assignments_in_value_position_are_rejected() -> anyhow::Result<()> {
        let string = || {
            Expression::StringLiteral(StringLiteral {
                attr:  Attr::default(),
                value: "hello".to_string(),
                extra: None,
            })
        };
        let generator = CodeGenerator::new(BuiltinCatalog::default());

        let as_argument = program(vec![call(member("console", "log"), vec![assign("foo", string())])]);
        let error = generator.run(&as_argument).expect_err("nested assignment is not a statement");
        assert_eq!(error, Error::UnsupportedExpression {
            kind: "AssignmentExpression".to_string(),
            span: 12..25,
        });

        let Statement::VariableDeclaration(mut chained) = declare("a") else {
            unreachable!()
        };
        chained.declarations[0].init = Some(assign("b", number(1.0)));
        let error = generator
            .run(&program(vec![Statement::VariableDeclaration(chained)]))
            .expect_err("chained assignment is not a statement");
        assert_eq!(error.kind(), "AssignmentExpression");

        let statement = program(vec![Statement::ExpressionStatement(ExpressionStatement {
            attr:       Attr::default(),
            expression: assign("foo", string()),
        })]);
        let code = generator.run(&statement)?;
        assert_eq!(code.body(), "*__global.slot(\"foo\") = Value::string(\"hello\");\n");

        Ok(())
    }
}
