//! The driver plumbs together the stages of turning JavaScript into a running
//! program:
//!
//! 1. The external JavaScript parser turns source into AST JSON (see
//!    [`parser`]).
//! 2. That JSON is decoded into the typed AST ([`jtr_ast`]).
//! 3. The compiler turns the AST into Rust source ([`jtr_compiler`]).
//! 4. The Rust toolchain builds, and possibly runs, that source inside a
//!    temporary Cargo project (see [`project`]).
//!
//! Every stage is synchronous, and the first failure of any stage ends the
//! whole process. The external programs involved are configured through
//! [`DriverConfig`].

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod config;
pub mod parser;
pub mod project;

use std::{fs, path::Path, process::ExitStatus};

use jtr_ast::File;
use jtr_compiler::{Code, CompilerBuilder};
use jtr_errors::Result;
use tracing::info;

pub use crate::config::DriverConfig;
use crate::project::Project;

/// Runs the stages of compilation according to its configuration.
#[derive(Clone, Debug, Default)]
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    /// Creates a driver that uses the external programs described by
    /// `config`.
    #[must_use]
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    /// Gets the driver's configuration.
    #[must_use]
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Parses the JavaScript `source` into its AST.
    ///
    /// # Errors
    ///
    /// - [`jtr_errors::Error`] if the parser fails or produces an invalid AST.
    pub fn parse(&self, source: &str) -> Result<File> {
        parser::parse(&self.config, source)
    }

    /// Compiles the JavaScript `source` to Rust.
    ///
    /// # Errors
    ///
    /// - [`jtr_errors::Error`] if parsing or compilation fails.
    pub fn compile(&self, source: &str) -> Result<Code> {
        let file = self.parse(source)?;
        Self::compile_file(&file)
    }

    /// Compiles an already decoded `file` to Rust.
    ///
    /// # Errors
    ///
    /// - [`jtr_errors::Error::Compile`] if compilation fails.
    pub fn compile_file(file: &File) -> Result<Code> {
        let compiler = CompilerBuilder::new().build();
        Ok(compiler.run(file)?)
    }

    /// Compiles the JavaScript `source` and runs the resulting program,
    /// returning the status with which the program exited.
    ///
    /// # Errors
    ///
    /// - [`jtr_errors::Error`] if any stage before running the program fails.
    pub fn run(&self, source: &str) -> Result<ExitStatus> {
        let project = self.prepare(source)?;
        Ok(project.run(&self.config)?)
    }

    /// Compiles the JavaScript `source` into an optimized executable at
    /// `output`.
    ///
    /// # Errors
    ///
    /// - [`jtr_errors::Error`] if any stage fails, or the executable cannot be
    ///   copied to `output`.
    pub fn build(&self, source: &str, output: &Path) -> Result<()> {
        let project = self.prepare(source)?;
        let artifact = project.build(&self.config, true)?;

        info!(output = %output.display(), "Writing executable");
        fs::copy(&artifact, output).map_err(jtr_errors::driver::Error::from)?;

        Ok(())
    }

    /// Compiles `source` into a formatted project ready to be built.
    fn prepare(&self, source: &str) -> Result<Project> {
        let code = self.compile(source)?;
        let project = Project::create(&self.config, &code)?;
        project.format(&self.config)?;

        if self.config.debug {
            eprintln!("{}", project.source()?);
        }

        Ok(project)
    }
}
