//! The runtime value model for programs generated by the JTR compiler.
//!
//! This crate plays two roles:
//!
//! 1. It is the **runtime** of every generated program. The emitted `main.rs`
//!    imports [`prelude`], builds its own global environment with
//!    [`builtins::global`], and binds every JavaScript variable to a [`Value`].
//! 2. It is the **compile-time catalog** of known builtins. The compiler builds
//!    a _separate_ global environment with the very same function, and uses it
//!    to resolve expressions like `console.log` to the stable symbol of the
//!    builtin that implements them.
//!
//! These two environments never share state. Each has its own lifecycle: the
//! catalog lives as long as one compilation, and the runtime environment as
//! long as one execution of the generated program.
//!
//! # Builtin Identity
//!
//! Builtins are identified by the stable symbol under which they are
//! registered in [`builtins::REGISTRY`], and that symbol is also the name of
//! the Rust function exported from [`prelude`]. This is what allows the
//! compiler to emit a direct call to `console_log` when it sees `console.log`.

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming
#![allow(clippy::multiple_crate_versions)] // Enforced by our dependencies

pub mod builtins;
pub mod error;
pub mod function;
pub mod object;
pub mod value;

pub use error::{ReferenceError, Result};
pub use function::BuiltinFunction;
pub use object::ObjectRecord;
pub use value::{JsString, Object, TypeTag, Value};

/// Everything a generated program needs in scope.
pub mod prelude {
    pub use crate::{
        builtins::{console_log, global},
        error::{ReferenceError, Result},
        object::ObjectRecord,
        value::Value,
    };
}
