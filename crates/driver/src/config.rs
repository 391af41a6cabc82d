//! The configuration for the driver: where to find the external programs it
//! invokes, and how verbose to be about it.

use std::path::{Path, PathBuf};

/// The name of the parser executable when no path is configured.
pub const DEFAULT_PARSER: &str = "jtr-parser";

/// The location of the runtime crate in the source tree of this project.
pub const DEFAULT_RUNTIME_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../runtime");

/// Configures the driver's use of its external collaborators.
///
/// The defaults look for the parser on the `PATH`, the runtime in this
/// project's source tree, and `cargo` and `rustfmt` on the `PATH`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverConfig {
    /// The executable that reads JavaScript on its standard input and writes
    /// the AST as JSON to its standard output.
    pub parser_path: PathBuf,

    /// The directory of the `jtr-runtime` crate that generated programs
    /// depend on.
    pub runtime_path: PathBuf,

    /// The `cargo` executable used to build generated programs.
    pub cargo_path: PathBuf,

    /// The `rustfmt` executable used to format generated programs.
    pub rustfmt_path: PathBuf,

    /// Whether to print the formatted generated program to standard error
    /// before handing it to the toolchain.
    pub debug: bool,
}

impl DriverConfig {
    /// Sets the parser executable.
    #[must_use]
    pub fn with_parser(mut self, path: impl Into<PathBuf>) -> Self {
        self.parser_path = path.into();
        self
    }

    /// Sets the directory of the runtime crate.
    #[must_use]
    pub fn with_runtime(mut self, path: impl Into<PathBuf>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Sets the `cargo` executable.
    #[must_use]
    pub fn with_cargo(mut self, path: impl Into<PathBuf>) -> Self {
        self.cargo_path = path.into();
        self
    }

    /// Sets the `rustfmt` executable.
    #[must_use]
    pub fn with_rustfmt(mut self, path: impl Into<PathBuf>) -> Self {
        self.rustfmt_path = path.into();
        self
    }

    /// Sets whether generated programs are printed before they are built.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Gets the parser executable.
    #[must_use]
    pub fn parser(&self) -> &Path {
        &self.parser_path
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            parser_path:  PathBuf::from(DEFAULT_PARSER),
            runtime_path: PathBuf::from(DEFAULT_RUNTIME_PATH),
            cargo_path:   PathBuf::from("cargo"),
            rustfmt_path: PathBuf::from("rustfmt"),
            debug:        false,
        }
    }
}
