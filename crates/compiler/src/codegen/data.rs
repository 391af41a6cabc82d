//! This module contains the data store for the in-progress work of the code
//! generator.

use std::collections::HashSet;

use crate::codegen::output::Code;

/// The state that the code generator threads through the walk of the tree.
///
/// This is intended to be handed as a mutable reference through each of the
/// steps of the code generation process, and modified by each step.
#[derive(Debug, Default)]
pub struct CodegenData {
    /// The code generated so far.
    output: Code,

    /// The JavaScript names of every variable declared so far.
    ///
    /// There is no block scoping, so this is a single flat set that only ever
    /// grows over the course of a compilation.
    declared: HashSet<String>,
}

impl CodegenData {
    /// Constructs a new code generator data store with no output and no
    /// declared variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an immutable reference to the code being built.
    #[must_use]
    pub fn output(&self) -> &Code {
        &self.output
    }

    /// Gets a mutable reference to the code being built.
    pub fn output_mut(&mut self) -> &mut Code {
        &mut self.output
    }

    /// Records that a variable called `name` has been declared.
    pub fn declare(&mut self, name: &str) {
        self.declared.insert(name.to_string());
    }

    /// Returns true if a variable called `name` has been declared.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }
}

impl From<CodegenData> for Code {
    fn from(value: CodegenData) -> Self {
        value.output
    }
}
