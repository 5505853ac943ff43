//! Value type classification.
//!
//! Every [`Value`] maps to exactly one [`ValueType`]. Branching in the
//! comparators is an exhaustive match over this tag.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Null,
    Undefined,
    Number,
    Boolean,
    String,
    Array,
    Object,
}

impl ValueType {
    /// Arrays and objects are iterable; everything else is a scalar.
    pub fn is_iterable(self) -> bool {
        matches!(self, ValueType::Array | ValueType::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Undefined => "undefined",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(value: &Value) -> ValueType {
    match value {
        Value::Null => ValueType::Null,
        Value::Undefined => ValueType::Undefined,
        Value::Number(_) => ValueType::Number,
        Value::Bool(_) => ValueType::Boolean,
        Value::String(_) => ValueType::String,
        Value::Array(_) => ValueType::Array,
        Value::Object(_) => ValueType::Object,
    }
}

/// Strict equality between two scalars of the same type.
///
/// Composites never compare equal here; they are compared structurally by
/// the engine.
pub(crate) fn scalars_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}
