//! The generic runtime object that every JavaScript binding holds.

use std::{fmt, rc::Rc};

use crate::{function::BuiltinFunction, object::ObjectRecord};

/// The type tag reported by every runtime object, as given by JavaScript's
/// `typeof`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Undefined,
    Object,
    String,
    Number,
    Function,
}

impl TypeTag {
    /// Gets the name of the tag as JavaScript spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capability shared by every kind of runtime object.
pub trait Object {
    /// Reports the type of the object.
    fn type_tag(&self) -> TypeTag;
}

/// An immutable JavaScript string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JsString(Rc<str>);

impl JsString {
    /// Gets the text of the string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JsString {
    fn from(value: &str) -> Self {
        Self(Rc::from(value))
    }
}

impl From<String> for JsString {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

impl Object for JsString {
    fn type_tag(&self) -> TypeTag {
        TypeTag::String
    }
}

impl fmt::Display for JsString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A JavaScript value.
///
/// Cloning a value is cheap: strings and objects are reference counted, so a
/// clone behaves like a second JavaScript reference to the same thing.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// undefined
    #[default]
    Undefined,
    /// Number (IEEE 754 double)
    Number(f64),
    /// String
    String(JsString),
    /// A generic object holding named properties
    Object(Rc<ObjectRecord>),
    /// A builtin function
    Function(BuiltinFunction),
}

impl Value {
    /// Creates a string value.
    #[must_use]
    pub fn string(text: impl Into<JsString>) -> Self {
        Self::String(text.into())
    }

    /// Creates a number value.
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates an object value owning the provided `record`.
    #[must_use]
    pub fn object(record: ObjectRecord) -> Self {
        Self::Object(Rc::new(record))
    }

    /// Returns true if this value is undefined.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Gets the object record behind this value, if it is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectRecord> {
        match self {
            Self::Object(record) => Some(record),
            _ => None,
        }
    }

    /// Gets the builtin behind this value, if it is a function.
    #[must_use]
    pub fn as_function(&self) -> Option<&BuiltinFunction> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }
}

impl Object for Value {
    fn type_tag(&self) -> TypeTag {
        match self {
            Self::Undefined => TypeTag::Undefined,
            Self::Number(_) => TypeTag::Number,
            Self::String(s) => s.type_tag(),
            Self::Object(o) => o.type_tag(),
            Self::Function(f) => f.type_tag(),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Formats values the way `console.log` prints them.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => write!(f, "{s}"),
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Function(function) => write!(f, "[Function: {}]", function.name()),
        }
    }
}

/// Formats a number the way JavaScript's `Number.prototype.toString` does.
///
/// Magnitudes in `[1e-6, 1e21)` are written out in full, and everything else
/// uses exponent notation with an explicit sign on the exponent.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers negative zero, which JavaScript prints without its sign.
        return "0".to_string();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        format!("{value}")
    } else {
        let formatted = format!("{value:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    }
}
