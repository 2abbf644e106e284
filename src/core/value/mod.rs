// src/core/value/mod.rs

//! Defines `Value`, the tagged union every container in the document model
//! stores, together with its deep copy, in-place modification and typed
//! comparison.

pub mod compare;

use crate::core::errors::{DocError, DocResult};
use crate::core::storage::array::Array;
use crate::core::storage::object::Object;
use std::cmp::Ordering;
use std::fmt;

/// The largest magnitude below which an `f64` still represents every integer exactly (2^53).
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// The variant tag of a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON-shaped value. Each variant exclusively owns its payload.
#[derive(Debug, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Creates a number value. JSON has no spelling for NaN or infinities,
    /// so non-finite input is rejected.
    pub fn number(value: f64) -> DocResult<Self> {
        if !value.is_finite() {
            return Err(DocError::InvalidArgument(format!(
                "number {value} is not finite"
            )));
        }
        Ok(Value::Number(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn array(value: Array) -> Self {
        Value::Array(value)
    }

    pub fn object(value: Object) -> Self {
        Value::Object(value)
    }

    /// Returns the variant tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Deep-copies the value. Every allocation along the recursion is fallible;
    /// whatever was copied before a failure is dropped on the way out.
    pub fn try_clone(&self) -> DocResult<Value> {
        Ok(match self {
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(try_clone_str(s)?),
            Value::Array(a) => Value::Array(a.try_clone()?),
            Value::Object(o) => Value::Object(o.try_clone()?),
        })
    }

    /// Replaces this value's variant and payload with a deep copy of `new_value`.
    /// The value keeps its slot inside whatever container holds it. On failure
    /// the value is left untouched.
    pub fn modify(&mut self, new_value: &Value) -> DocResult<()> {
        let replacement = new_value.try_clone()?;
        *self = replacement;
        Ok(())
    }

    /// Orders two values of the same variant. Values of different variants
    /// cannot be compared.
    pub fn compare(&self, other: &Value) -> DocResult<Ordering> {
        if self.kind() != other.kind() {
            return Err(DocError::InvalidArgument(format!(
                "cannot compare {} with {}",
                self.kind(),
                other.kind()
            )));
        }
        Ok(compare::comparator(self.kind())(self, other))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

/// Returns `n` as an `i64` when it is integral and small enough to be exact.
pub fn as_exact_integer(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        Some(n as i64)
    } else {
        None
    }
}

/// Copies a string, reporting allocation failure instead of aborting.
pub(crate) fn try_clone_str(s: &str) -> DocResult<String> {
    let mut copy = String::new();
    copy.try_reserve_exact(s.len())?;
    copy.push_str(s);
    Ok(copy)
}
