//! This library implements the compilation of JavaScript, in the form of the
//! AST decoded by [`jtr_ast`], to [Rust](https://rust-lang.org) source code.
//!
//! The generated source is a complete Rust program. It links against the
//! [`jtr_runtime`] crate, which provides the dynamically-typed value model in
//! which every JavaScript value is represented, along with the builtin
//! library.
//!
//! # Process Overview
//!
//! While more information can be found in the module-level documentation of
//! each part of this codebase, a brief overview of the compilation process can
//! be stated as follows:
//!
//! 1. We ingest the AST, already decoded from the parser's JSON.
//! 2. We walk that AST once in source order, emitting Rust for each node into
//!    a code buffer (see [`codegen`]). References to builtins are resolved at
//!    compile time wherever possible (see [`catalog`]).
//! 3. We place the generated code into a fixed program skeleton that builds
//!    the program's global environment and runs the generated code.
//!
//! Turning the resulting source into an executable is the concern of the
//! driver, and not of this crate.
//!
//! # Language Support
//!
//! Only a small subset of JavaScript is supported: variable declarations,
//! assignment, calls, non-computed member access, identifiers, and string and
//! number literals. Anything else is rejected with an error naming the
//! unsupported construct, and no code is produced.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod catalog;
pub mod codegen;

use jtr_ast::File;
use jtr_errors::compile::Result;
use tracing::debug;

pub use crate::codegen::output::Code;
use crate::{catalog::BuiltinCatalog, codegen::CodeGenerator};

/// Handles the compilation of a JavaScript [`File`] to Rust [`Code`].
///
/// Each compiler instance is used for exactly one compilation, and owns a
/// catalog of builtins that is created for it and discarded with it. Nothing
/// is shared between compilations.
#[derive(Clone, Debug)]
pub struct Compiler {
    /// The builtins that the compiler may reference directly.
    pub catalog: BuiltinCatalog,
}

/// The basic operations required of the compiler.
impl Compiler {
    /// Constructs a new compiler instance that inlines the builtins in
    /// `catalog`.
    #[must_use]
    pub fn new(catalog: BuiltinCatalog) -> Self {
        Self { catalog }
    }

    /// Executes the compiler on the provided `file`.
    ///
    /// Compilation either produces the code for the entire program, or fails
    /// at the first construct that cannot be compiled. It consumes the
    /// compiler to prevent reuse of its catalog across compilations.
    ///
    /// # Errors
    ///
    /// - [`jtr_errors::compile::Error`] if the compilation process fails for
    ///   any reason.
    pub fn run(self, file: &File) -> Result<Code> {
        debug!(
            statements = file.program.body.len(),
            "Compiling program"
        );

        let generator = CodeGenerator::new(self.catalog);
        generator.run(file)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        CompilerBuilder::new().build()
    }
}

/// Allows for building a [`Compiler`] instance while retaining the defaults for
/// fields that do not need to be customized.
#[derive(Clone, Debug, Default)]
pub struct CompilerBuilder {
    /// The builtins that the compiler may reference directly.
    catalog: Option<BuiltinCatalog>,
}

impl CompilerBuilder {
    /// Creates a new compiler builder.
    ///
    /// The compiler's catalog will be the full builtin library unless
    /// specified otherwise by calling [`Self::with_builtins`].
    ///
    /// # API Style
    ///
    /// Please note that the API for the builder consumes `self` and is hence
    /// designed to have calls chained in the "fluent" API style.
    #[must_use]
    pub fn new() -> Self {
        let catalog = None;
        Self { catalog }
    }

    /// Specifies the builtin catalog for the compiler.
    ///
    /// # API Style
    ///
    /// Please note that the API for the builder consumes `self` and is hence
    /// designed to have calls chained in the "fluent" API style.
    #[must_use]
    pub fn with_builtins(mut self, catalog: BuiltinCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Builds a compiler from the specified configuration.
    ///
    /// # API Style
    ///
    /// Please note that the API for the builder consumes `self` and is hence
    /// designed to have calls chained in the "fluent" API style.
    #[must_use]
    pub fn build(self) -> Compiler {
        Compiler::new(self.catalog.unwrap_or_default())
    }
}

#[cfg(test)]
mod test {
    use jtr_ast::File;
    use jtr_runtime::ObjectRecord;

    use crate::{catalog::BuiltinCatalog, CompilerBuilder};

    #[test]
    fn compiler_runs_successfully() -> anyhow::Result<()> {
        let file = File::from_json(include_str!("../../ast/input/hello.json"))?;

        let compiler = CompilerBuilder::new().build();
        let code = compiler.run(&file)?;

        assert_eq!(
            code.to_string(),
            "#![allow(unused_mut, unused_assignments, unused_variables, non_snake_case)]\n\nuse \
             jtr_runtime::prelude::*;\n\nfn main() -> Result<()> {\n    let mut __global = \
             global();\n\n    console_log(&[Value::string(\"Hello, Godzilla\")]);\n\n    \
             Ok(())\n}\n"
        );

        Ok(())
    }

    #[test]
    fn compiler_uses_the_configured_builtins() -> anyhow::Result<()> {
        let file = File::from_json(include_str!("../../ast/input/hello.json"))?;

        let empty = BuiltinCatalog::new(ObjectRecord::new());
        let code = CompilerBuilder::new().with_builtins(empty).build().run(&file)?;

        assert_eq!(
            code.body(),
            "__global.get(\"console\")?.log(&[Value::string(\"Hello, Godzilla\")]);\n"
        );

        Ok(())
    }

    #[test]
    fn failed_compilations_produce_no_code() -> anyhow::Result<()> {
        let file = File::from_json(include_str!("../../ast/input/function.json"))?;

        let result = CompilerBuilder::new().build().run(&file);
        assert!(result.is_err());

        Ok(())
    }
}
