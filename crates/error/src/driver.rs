//! Error types for the external collaborators that the driver plumbs together:
//! the JavaScript parser process and the host toolchain.

use std::process::ExitStatus;

use thiserror::Error;

/// The result type for use in the driver.
pub type Result<T> = std::result::Result<T, Error>;

/// This error type is for failures of the processes and files around the core
/// compiler.
///
/// None of these are retried. Where a child process fails, its captured output
/// is kept so that it can be shown to the user.
#[derive(Debug, Error)]
pub enum Error {
    /// The named program could not be started at all.
    #[error("Could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source:  std::io::Error,
    },

    /// The JavaScript parser exited unsuccessfully.
    #[error("Error parsing JavaScript ({status}):\n{output}")]
    ParserFailed { status: ExitStatus, output: String },

    /// A toolchain invocation exited unsuccessfully.
    #[error("`{command}` failed ({status}):\n{output}")]
    ToolchainFailed {
        command: String,
        status:  ExitStatus,
        output:  String,
    },

    /// The runtime crate that generated programs link against could not be
    /// found.
    #[error("The JTR runtime could not be found at `{_0}`")]
    MissingRuntime(String),

    /// The toolchain finished but the artifact it should have produced is not
    /// where we expected it.
    #[error("Expected build artifact `{_0}` does not exist")]
    MissingArtifact(String),

    /// An error when doing IO in the driver.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}
