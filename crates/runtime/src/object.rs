//! The generic JavaScript object: a container of uniquely-named properties.

use std::collections::HashMap;

use crate::{
    error::{ReferenceError, Result},
    value::{Object, TypeTag, Value},
};

/// A JavaScript object holding named properties.
///
/// Property names are unique and insertion order is irrelevant. The global
/// environment of a program is one of these.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectRecord {
    properties: HashMap<String, Value>,
}

impl ObjectRecord {
    /// Creates a new, empty, object.
    #[must_use]
    pub fn new() -> Self {
        let properties = HashMap::new();
        Self { properties }
    }

    /// Binds `name` to `value`, replacing any existing binding.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.properties.insert(name.into(), value);
    }

    /// Gets the value bound to `name`.
    ///
    /// # Errors
    ///
    /// - [`ReferenceError`] if nothing is bound to `name`.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| ReferenceError::new(name))
    }

    /// Gets a reference to the value bound to `name` if it exists, and returns
    /// [`None`] otherwise.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Gets mutable access to the binding for `name`, binding it to
    /// `undefined` first if it does not exist.
    ///
    /// This is what assignment to an undeclared name goes through, creating
    /// the global the way sloppy-mode JavaScript does.
    pub fn slot(&mut self, name: &str) -> &mut Value {
        self.properties.entry(name.to_string()).or_default()
    }

    /// Returns true if `name` is bound in this object.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Gets the number of properties in this object.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the object has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Object for ObjectRecord {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Object
    }
}
