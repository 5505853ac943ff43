//! Diff tree output types.
//!
//! A comparison produces a [`Summary`] whose [`Field`]s may carry nested
//! Summaries. Trees are built bottom-up and never mutated once a child
//! Summary is attached to its parent Field.

use crate::diff::classify::ValueType;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of comparing one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffResult {
    Same,
    Different,
    LeftOnly,
    RightOnly,
}

impl DiffResult {
    /// The one-sided outcome for a value that exists only on `side`.
    pub fn only(side: Side) -> Self {
        match side {
            Side::Left => DiffResult::LeftOnly,
            Side::Right => DiffResult::RightOnly,
        }
    }
}

/// Which input a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a field: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldKey {
    Index(usize),
    Key(String),
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Index(index) => write!(f, "[{index}]"),
            FieldKey::Key(key) => f.write_str(key),
        }
    }
}

impl From<usize> for FieldKey {
    fn from(index: usize) -> Self {
        FieldKey::Index(index)
    }
}

impl From<&str> for FieldKey {
    fn from(key: &str) -> Self {
        FieldKey::Key(key.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(key: String) -> Self {
        FieldKey::Key(key)
    }
}

/// Render a traversal path as `$.a.b[2]`. The root path renders as `$`.
pub fn format_path(path: &[FieldKey]) -> String {
    let mut out = String::from("$");
    for key in path {
        match key {
            FieldKey::Index(index) => out.push_str(&format!("[{index}]")),
            FieldKey::Key(key) => {
                out.push('.');
                out.push_str(key);
            }
        }
    }
    out
}

/// One row of a diff: the comparison of a single key or index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub field_key: FieldKey,
    pub diff_result: DiffResult,
    /// Keys and indices from the root down to this field, inclusive
    pub path: Vec<FieldKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_type: Option<ValueType>,
    /// Present iff at least one side is iterable at this field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Summary>,
}

impl Field {
    /// A field for a value present only on `side`.
    pub fn one_sided(
        field_key: FieldKey,
        path: Vec<FieldKey>,
        side: Side,
        value: Value,
        value_type: ValueType,
        children: Option<Summary>,
    ) -> Self {
        let (left, right) = match side {
            Side::Left => (Some((value, value_type)), None),
            Side::Right => (None, Some((value, value_type))),
        };
        Self {
            field_key,
            diff_result: DiffResult::only(side),
            path,
            left_type: left.as_ref().map(|(_, t)| *t),
            left: left.map(|(v, _)| v),
            right_type: right.as_ref().map(|(_, t)| *t),
            right: right.map(|(v, _)| v),
            children,
        }
    }

    /// True when both sides are present and classified differently.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!((self.left_type, self.right_type), (Some(l), Some(r)) if l != r)
    }

    /// The value on `side`, if present.
    pub fn value(&self, side: Side) -> Option<&Value> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }
}

/// Aggregated diff node for one level of nesting.
///
/// Counters tally leaf outcomes across the whole subtree:
/// - a Field without children (or with an empty child Summary) counts once,
///   under its own DiffResult;
/// - a Field with a non-empty child Summary contributes its child's counters;
/// - a shape-mismatched Field with a non-empty child Summary also counts one
///   `different` for the mismatch itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub is_same: bool,
    pub same: usize,
    pub different: usize,
    pub leftonly: usize,
    pub rightonly: usize,
    /// Fields in key encounter order (objects) or index order (arrays)
    #[serde(rename = "summary")]
    pub fields: Vec<Field>,
}

impl Summary {
    /// Start an empty Summary. `assume_equal` is false when the two sides
    /// already disagree in shape or only one side exists.
    pub fn new(assume_equal: bool) -> Self {
        Self {
            is_same: assume_equal,
            same: 0,
            different: 0,
            leftonly: 0,
            rightonly: 0,
            fields: Vec::new(),
        }
    }

    /// Append a finished Field and roll its outcome into the counters.
    pub fn push(&mut self, field: Field) {
        match field.children.as_ref().filter(|c| !c.fields.is_empty()) {
            Some(children) => {
                self.same += children.same;
                self.different += children.different;
                self.leftonly += children.leftonly;
                self.rightonly += children.rightonly;
                if field.is_shape_mismatch() {
                    self.different += 1;
                }
            }
            None => self.tally(field.diff_result),
        }
        self.is_same = self.is_same && field.diff_result == DiffResult::Same;
        self.fields.push(field);
    }

    fn tally(&mut self, result: DiffResult) {
        match result {
            DiffResult::Same => self.same += 1,
            DiffResult::Different => self.different += 1,
            DiffResult::LeftOnly => self.leftonly += 1,
            DiffResult::RightOnly => self.rightonly += 1,
        }
    }

    /// Count of non-Same leaf outcomes in the subtree.
    pub fn changes(&self) -> usize {
        self.different + self.leftonly + self.rightonly
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
