//! The builtin library, and the registry through which both the compiler and
//! generated programs discover it.
//!
//! Only one illustrative namespace is provided: `console`, exposing `log`.
//! Adding a builtin means writing its function, exporting it from
//! [`crate::prelude`] under its symbol, and adding a [`Registration`] for it
//! to [`REGISTRY`].

use crate::{function::BuiltinFunction, object::ObjectRecord, value::Value};

/// A builtin together with the global namespace it is installed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Registration {
    /// The name of the global object that holds the builtin.
    pub namespace: &'static str,

    /// The builtin itself.
    pub function: BuiltinFunction,
}

impl Registration {
    /// Gets the JavaScript path of the builtin, such as `console.log`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}.{}", self.namespace, self.function.name())
    }
}

pub const CONSOLE_LOG: BuiltinFunction = BuiltinFunction::new("console_log", "log", console_log);

/// Every builtin known to the runtime.
pub const REGISTRY: &[Registration] = &[Registration {
    namespace: "console",
    function:  CONSOLE_LOG,
}];

/// Finds the registration for the builtin with the provided stable `symbol`.
#[must_use]
pub fn lookup(symbol: &str) -> Option<&'static Registration> {
    REGISTRY.iter().find(|r| r.function.symbol() == symbol)
}

/// Builds a fresh global environment seeded with every registered builtin.
///
/// Each call returns an independent environment; nothing is shared between
/// them.
#[must_use]
pub fn global() -> ObjectRecord {
    let mut global = ObjectRecord::new();

    for (namespace, registrations) in group_by_namespace(REGISTRY) {
        let mut object = ObjectRecord::new();
        for registration in registrations {
            let function = registration.function;
            object.define(function.name(), Value::Function(function));
        }
        global.define(namespace, Value::object(object));
    }

    global
}

/// Implements `console.log`, printing its arguments to standard output.
pub fn console_log(args: &[Value]) {
    println!("{}", format_log(args));
}

/// Formats arguments the way `console.log` prints them: each argument
/// rendered in turn, separated by single spaces.
#[must_use]
pub fn format_log(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Groups registrations by namespace, keeping the order in which each namespace
/// first appears.
fn group_by_namespace(registrations: &[Registration]) -> Vec<(&'static str, Vec<&Registration>)> {
    let mut groups: Vec<(&'static str, Vec<&Registration>)> = Vec::new();
    for registration in registrations {
        match groups.iter_mut().find(|(ns, _)| *ns == registration.namespace) {
            Some((_, members)) => members.push(registration),
            None => groups.push((registration.namespace, vec![registration])),
        }
    }
    groups
}
