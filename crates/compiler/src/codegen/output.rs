//! This module contains the output structures for the code generation process.

use std::{fmt, io};

use itertools::Itertools;

/// The indentation applied to every line of the program body.
const INDENT: &str = "    ";

/// Everything in the generated program that precedes the body.
const PROGRAM_HEADER: &str = "#![allow(unused_mut, unused_assignments, unused_variables, \
                              non_snake_case)]\n\nuse jtr_runtime::prelude::*;\n\nfn main() -> \
                              Result<()> {\n    let mut __global = global();\n";

/// Everything in the generated program that follows the body.
const PROGRAM_FOOTER: &str = "    Ok(())\n}\n";

/// The Rust source generated for a JavaScript program.
///
/// Code is accumulated into the body by the code generator, and only ever
/// appended to. The complete program is obtained by [`Self::finalize`], which
/// places the body inside the program skeleton: an entry point that builds the
/// program's global environment, runs the body, and succeeds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Code {
    body: String,
}

impl Code {
    /// Creates an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text` to the body.
    pub fn write(&mut self, text: &str) {
        self.body.push_str(text);
    }

    /// Appends `text` to the body, followed by a newline.
    pub fn write_line(&mut self, text: &str) {
        self.body.push_str(text);
        self.body.push('\n');
    }

    /// Gets the body as generated so far, without the program skeleton.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Renders the complete program.
    ///
    /// The body has its surrounding whitespace removed and is indented into
    /// the entry point. This is a textual substitution, and the result is not
    /// otherwise formatted.
    #[must_use]
    pub fn finalize(&self) -> String {
        let body = self.body.trim();
        let mut program = String::from(PROGRAM_HEADER);

        if !body.is_empty() {
            let indented = body
                .lines()
                .map(|line| {
                    if line.trim().is_empty() {
                        String::new()
                    } else {
                        format!("{INDENT}{line}")
                    }
                })
                .join("\n");
            program.push('\n');
            program.push_str(&indented);
            program.push_str("\n\n");
        }

        program.push_str(PROGRAM_FOOTER);
        program
    }

    /// Writes the complete program to `writer`.
    ///
    /// # Errors
    ///
    /// - [`io::Error`] if writing fails.
    pub fn write_to(&self, mut writer: impl io::Write) -> io::Result<()> {
        writer.write_all(self.finalize().as_bytes())
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.finalize())
    }
}

#[cfg(test)]
mod test {
    use crate::codegen::output::Code;

    #[test]
    fn empty_programs_still_have_an_entry_point() {
        let code = Code::new();

        assert_eq!(
            code.finalize(),
            "#![allow(unused_mut, unused_assignments, unused_variables, non_snake_case)]\n\nuse \
             jtr_runtime::prelude::*;\n\nfn main() -> Result<()> {\n    let mut __global = \
             global();\n    Ok(())\n}\n"
        );
    }

    #[test]
    fn body_is_trimmed_and_indented() {
        let mut code = Code::new();
        code.write("\n\n");
        code.write_line("let _ = 1;");
        code.write("let _ = 2;");
        code.write_line("\n\n");

        assert_eq!(code.body(), "\n\nlet _ = 1;\nlet _ = 2;\n\n\n");
        assert!(code.finalize().ends_with(
            "global();\n\n    let _ = 1;\n    let _ = 2;\n\n    Ok(())\n}\n"
        ));
    }

    #[test]
    fn display_and_write_to_agree() -> anyhow::Result<()> {
        let mut code = Code::new();
        code.write_line("console_log(&[]);");

        let mut written = Vec::new();
        code.write_to(&mut written)?;

        assert_eq!(String::from_utf8(written)?, code.to_string());
        assert!(code.to_string().contains("use jtr_runtime::prelude::*;"));

        Ok(())
    }
}
