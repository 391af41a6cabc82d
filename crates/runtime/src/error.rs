//! Errors raised by generated programs at run time.

use std::fmt;

use thiserror::Error;

/// The result type used by generated programs.
pub type Result<T> = std::result::Result<T, ReferenceError>;

/// Raised when a program reads a name that is bound nowhere, mirroring the
/// JavaScript error of the same name.
#[derive(Clone, Error, PartialEq, Eq)]
#[error("ReferenceError: {name} is not defined")]
pub struct ReferenceError {
    /// The name that could not be resolved.
    pub name: String,
}

impl ReferenceError {
    /// Creates a reference error for the provided `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { name }
    }
}

/// A generated `main` returns [`Result`], and the standard library reports an
/// error returned from `main` using its `Debug` representation, so we make
/// that read the same as the message JavaScript would print.
impl fmt::Debug for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
