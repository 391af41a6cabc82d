//! The compile-time view of the builtin library.
//!
//! When the compiler sees a member access such as `console.log` it can, rather
//! than emitting a dynamic lookup through the program's global environment,
//! emit a direct reference to the Rust function that implements the builtin.
//! We term this _builtin inlining_, and the catalog is what allows the compiler
//! to decide when it applies.
//!
//! The catalog is a global environment built by the same seeding function
//! that generated programs call at startup, namely
//! [`jtr_runtime::builtins::global`]. The two are separate instances. The
//! compiler's copy is only read, and is discarded at the end of the
//! compilation that created it.

use jtr_runtime::{builtins, BuiltinFunction, ObjectRecord};

/// The read-only environment of builtins consulted during code generation.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltinCatalog {
    /// The environment whose bindings are candidates for inlining.
    environment: ObjectRecord,
}

impl BuiltinCatalog {
    /// Constructs a new catalog over the provided `environment`.
    #[must_use]
    pub fn new(environment: ObjectRecord) -> Self {
        Self { environment }
    }

    /// Gets the environment underlying the catalog.
    #[must_use]
    pub fn environment(&self) -> &ObjectRecord {
        &self.environment
    }

    /// Resolves `object.property` to a builtin function, returning [`None`]
    /// unless `object` is bound to an object record in the catalog and
    /// `property` names a builtin function on that record.
    ///
    /// ```
    /// use jtr_compiler::catalog::BuiltinCatalog;
    ///
    /// let catalog = BuiltinCatalog::default();
    ///
    /// assert_eq!(
    ///     catalog.resolve_member("console", "log").map(|f| f.symbol()),
    ///     Some("console_log")
    /// );
    /// assert!(catalog.resolve_member("console", "warn").is_none());
    /// ```
    #[must_use]
    pub fn resolve_member(&self, object: &str, property: &str) -> Option<&BuiltinFunction> {
        self.environment
            .lookup(object)?
            .as_object()?
            .lookup(property)?
            .as_function()
    }
}

impl Default for BuiltinCatalog {
    /// Seeds the catalog with every builtin the runtime registers.
    fn default() -> Self {
        Self::new(builtins::global())
    }
}
