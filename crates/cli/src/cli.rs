//! Command line argument parsing for `jtr`.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

/// Compile JavaScript to Rust, and build or run the result.
#[derive(Debug, Parser)]
#[command(name = "jtr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The JavaScript parser executable [default: `jtr-parser` next to this
    /// executable, or on the PATH]
    #[arg(long, global = true, env = "JTR_PARSER_PATH")]
    pub parser_path: Option<PathBuf>,

    /// The directory of the `jtr-runtime` crate that programs are linked
    /// against
    #[arg(long, global = true, env = "JTR_RUNTIME_PATH")]
    pub runtime_path: Option<PathBuf>,

    /// Print the generated Rust program before building it
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile a JavaScript file and run it
    Run(InputArgs),

    /// Compile a JavaScript file to an executable
    Build(BuildArgs),

    /// Print the Rust program generated for a JavaScript file
    Emit(InputArgs),
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// The JavaScript file to compile, or `-` for standard input
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// Gets the input path, or [`None`] if the input is standard input.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref().filter(|p| *p != Path::new("-"))
    }
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Where to write the executable [default: the input's name without its
    /// extension, or `main` when reading standard input]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl BuildArgs {
    /// Gets the path that the executable should be written to.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }

        let stem = self
            .input
            .path()
            .and_then(Path::file_stem)
            .map_or_else(|| "main".into(), PathBuf::from);
        let mut output = stem;
        output.set_extension(std::env::consts::EXE_EXTENSION);
        output
    }
}
