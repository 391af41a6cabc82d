//! This is the CLI driver for the compilation of JavaScript to Rust. For more
//! detail, please see the documentation for the [`jtr_driver`] and
//! `jtr_compiler` crates.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

mod cli;

use std::{
    fs,
    io::{self, IsTerminal, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use jtr_driver::{Driver, DriverConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands, InputArgs};

/// The name of the parser executable that is looked for next to `jtr`.
const PARSER_NAME: &str = "jtr-parser";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let driver = Driver::new(config(&cli));
    let input = match &cli.command {
        Commands::Run(input) | Commands::Emit(input) => input,
        Commands::Build(args) => &args.input,
    };

    let (name, source) = match read_input(input) {
        Ok(read) => read,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match execute(&driver, &cli.command, &source) {
        Ok(code) => code,
        Err(e) => {
            report(&e, &name, &source);
            ExitCode::FAILURE
        }
    }
}

/// Builds the driver configuration from the command line and environment.
fn config(cli: &Cli) -> DriverConfig {
    let mut config = DriverConfig::default()
        .with_parser(cli.parser_path.clone().unwrap_or_else(default_parser))
        .with_debug(cli.debug);

    if let Some(runtime) = &cli.runtime_path {
        config = config.with_runtime(runtime);
    }

    config
}

/// Prefers the parser installed next to this executable, and otherwise leaves
/// it to be found on the `PATH`.
fn default_parser() -> PathBuf {
    std::env::current_exe()
        .ok()
        .map(|exe| exe.with_file_name(format!("{PARSER_NAME}{}", std::env::consts::EXE_SUFFIX)))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from(PARSER_NAME))
}

/// Reads the JavaScript source named by `input`, returning a display name for
/// it along with its contents.
fn read_input(input: &InputArgs) -> anyhow::Result<(String, String)> {
    match input.path() {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Could not read `{}`", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Could not read standard input")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

/// Executes `command` on the provided JavaScript `source`.
fn execute(driver: &Driver, command: &Commands, source: &str) -> jtr_errors::Result<ExitCode> {
    match command {
        Commands::Run(_) => {
            let status = driver.run(source)?;
            debug!(%status, "Program finished");

            // Propagate the program's own exit status.
            Ok(status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .map_or(ExitCode::FAILURE, ExitCode::from))
        }
        Commands::Build(args) => {
            let output = args.output_path();
            driver.build(source, &output)?;
            debug!(output = %output.display(), "Build finished");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Emit(_) => {
            let code = driver.compile(source)?;
            print!("{code}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Prints `error` to standard error, pointing into the source where the error
/// is associated with a node of the program.
fn report(error: &jtr_errors::Error, name: &str, source: &str) {
    if let jtr_errors::Error::Compile(compile) = error {
        let color = io::stderr().is_terminal();
        if jtr_errors::diagnostic::eprint(compile, name, source, color).is_ok() {
            return;
        }
    }

    eprintln!("Error: {error}");
    if let Some(path) = missing_parser(error) {
        eprintln!(
            "Set --parser-path or JTR_PARSER_PATH to the location of `{}`",
            path.display()
        );
    }
}

/// Gets the program that could not be started if `error` is due to a missing
/// parser.
fn missing_parser(error: &jtr_errors::Error) -> Option<&Path> {
    match error {
        jtr_errors::Error::Driver(jtr_errors::driver::Error::Spawn { program, source })
            if source.kind() == io::ErrorKind::NotFound && program.contains(PARSER_NAME) =>
        {
            Some(Path::new(program))
        }
        _ => None,
    }
}
