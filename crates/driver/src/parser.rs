//! Invocation of the external JavaScript parser.
//!
//! The parser is a separate executable. It is handed the JavaScript source on
//! its standard input and writes the AST as JSON to its standard output. Its
//! standard error is captured separately, so diagnostics it prints can never
//! corrupt the AST, and is only shown if the parser fails.

use std::{
    io::{self, Write},
    process::{Command, Stdio},
    thread,
};

use jtr_ast::File;
use jtr_errors::{driver::Error, Result};
use tracing::{debug, info};

use crate::config::DriverConfig;

/// Runs the configured parser on `source`, returning the JSON that it
/// produced.
///
/// # Errors
///
/// - [`Error::Spawn`] if the parser cannot be started.
/// - [`Error::ParserFailed`] if the parser exits unsuccessfully.
/// - [`Error::IOError`] if communicating with the parser fails.
pub fn parse_to_json(config: &DriverConfig, source: &str) -> Result<Vec<u8>> {
    let program = config.parser();
    info!(parser = %program.display(), bytes = source.len(), "Invoking parser");

    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::Spawn {
            program: program.display().to_string(),
            source,
        })?;

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| io::Error::other("parser standard input was not captured"))
        .map_err(Error::from)?;

    // Writing happens alongside reading so that neither side blocks on a full
    // pipe.
    let (written, output) = thread::scope(|scope| {
        let writer = scope.spawn(move || stdin.write_all(source.as_bytes()));
        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("parser input writer panicked")));
        (written, output)
    });
    let output = output.map_err(Error::from)?;

    if !output.status.success() {
        let mut captured = String::from_utf8_lossy(&output.stderr).into_owned();
        if captured.trim().is_empty() {
            captured = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        return Err(Error::ParserFailed {
            status: output.status,
            output: captured,
        }
        .into());
    }

    // A parser that succeeds without reading all of its input has still
    // produced an AST.
    if let Err(e) = written {
        if e.kind() != io::ErrorKind::BrokenPipe {
            return Err(Error::from(e).into());
        }
    }

    debug!(bytes = output.stdout.len(), "Parser succeeded");
    Ok(output.stdout)
}

/// Runs the configured parser on `source` and decodes its output.
///
/// # Errors
///
/// - [`jtr_errors::Error::Driver`] if running the parser fails, as described
///   for [`parse_to_json`].
/// - [`jtr_errors::Error::Decode`] if the parser's output is not a valid AST.
pub fn parse(config: &DriverConfig, source: &str) -> Result<File> {
    let json = parse_to_json(config, source)?;
    Ok(File::from_slice(&json)?)
}
