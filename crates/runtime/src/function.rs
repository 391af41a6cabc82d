//! Builtin functions, implemented in Rust and identified by a stable symbol.

use std::fmt;

use crate::value::{Object, TypeTag, Value};

/// The signature of the Rust function behind a builtin.
///
/// Builtins receive their arguments in order and do not return a value in the
/// current feature set.
pub type NativeFunction = fn(&[Value]);

/// A callable builtin.
///
/// The `symbol` is the name of the Rust function implementing the builtin as
/// exported from [`crate::prelude`], and is what the compiler emits when it
/// inlines a reference to the builtin. The `name` is the property name under
/// which JavaScript code sees it.
#[derive(Clone, Copy)]
pub struct BuiltinFunction {
    symbol: &'static str,
    name:   &'static str,
    native: NativeFunction,
}

impl BuiltinFunction {
    /// Registers a builtin under the stable `symbol`, visible to JavaScript as
    /// `name`, and implemented by `native`.
    #[must_use]
    pub const fn new(symbol: &'static str, name: &'static str, native: NativeFunction) -> Self {
        Self {
            symbol,
            name,
            native,
        }
    }

    /// Gets the stable symbol of the builtin.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Gets the property name of the builtin.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Invokes the builtin with the provided arguments.
    pub fn call(&self, args: &[Value]) {
        (self.native)(args);
    }
}

impl Object for BuiltinFunction {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Function
    }
}

/// Two builtins are the same builtin when they are registered under the same
/// symbol.
impl PartialEq for BuiltinFunction {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for BuiltinFunction {}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinFunction")
            .field("symbol", &self.symbol)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use crate::{
        function::BuiltinFunction,
        value::{Object, TypeTag, Value},
    };

    fn ignore(_: &[Value]) {}

    #[test]
    fn identity_is_the_symbol() {
        let a = BuiltinFunction::new("ns_a", "a", ignore);
        let b = BuiltinFunction::new("ns_a", "other", ignore);
        let c = BuiltinFunction::new("ns_c", "a", ignore);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.type_tag(), TypeTag::Function);
    }
}
