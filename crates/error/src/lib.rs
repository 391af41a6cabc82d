//! Error handling types and utilities for the JTR project.
//!
//! # Error Conventions
//!
//! As we are providing libraries that others may want to interact with from
//! _code_ as well as from the CLI driver, we keep our errors strongly typed at
//! all times. While libraries like
//! [anyhow](https://docs.rs/anyhow/latest/anyhow/) are well-suited for
//! application code, they make it more difficult than is necessary to handle
//! specific errors in library code. To that end, each stage of the pipeline
//! has its own error type:
//!
//! - [`decode::Error`] for turning the parser's JSON into the typed AST.
//! - [`compile::Error`] for generating host code from that AST.
//! - [`driver::Error`] for the external collaborators (the JavaScript parser
//!   and the host toolchain).
//!
//! All of these convert implicitly into the root [`Error`] that is used at the
//! boundaries of the libraries.
//!
//! Errors raised by the _generated_ program at run time are not part of this
//! hierarchy, and instead live in `jtr-runtime` so that generated programs do
//! not need to depend on this crate.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod compile;
pub mod decode;
pub mod diagnostic;
pub mod driver;

use thiserror::Error;

/// The result type to be used at the boundaries of the libraries.
pub type Result<T> = std::result::Result<T, Error>;

/// The root of the error hierarchy for this project.
///
/// All errors should be able to be implicitly converted to this error type as
/// this is the type that is used at the boundaries of the libraries.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] decode::Error),

    #[error(transparent)]
    Compile(#[from] compile::Error),

    #[error(transparent)]
    Driver(#[from] driver::Error),

    #[error("An unknown error occurred: {_0}")]
    Miscellaneous(String),
}

impl Error {
    /// Gets the source span associated with this error, if the error was
    /// raised while processing a particular AST node.
    #[must_use]
    pub fn span(&self) -> Option<compile::Span> {
        match self {
            Self::Compile(e) => Some(e.span()),
            _ => None,
        }
    }
}
