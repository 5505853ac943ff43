//! Structural comparison engine.
//!
//! The entry point is [`compare`], which classifies both inputs and routes
//! them to the matching comparator:
//!
//! - same iterable category: element-wise (arrays) or key-union (objects)
//! - differing iterable categories: key-union over both, forced Different
//! - one iterable side: one-sided expansion of that side
//! - two scalars: a single-field Summary
//!
//! Every descent into a composite goes through the side's [`CycleGuard`].

use crate::diff::classify::{classify, scalars_equal};
use crate::diff::guard::CycleGuard;
use crate::diff::model::{DiffResult, Field, FieldKey, Side, Summary};
use crate::errors::Result;
use crate::value::{Array, Value};
use crate::{log_op_end, log_op_error, log_op_start};
use indexmap::IndexMap;
use std::cell::Ref;
use std::ops::Deref;
use std::time::Instant;

/// Compare two values into an annotated diff tree.
///
/// # Errors
///
/// - `CycleDetected` if either value contains itself; no partial Summary is
///   returned
pub fn compare(first: &Value, second: &Value) -> Result<Summary> {
    let start = Instant::now();
    let (left_type, right_type) = (classify(first), classify(second));
    log_op_start!(
        "compare",
        left_type = left_type.as_str(),
        right_type = right_type.as_str()
    );

    let result = Comparison::new().run(first, second);

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(summary) => log_op_end!(
            "compare",
            duration_ms = duration_ms,
            is_same = summary.is_same,
            fields_len = summary.fields.len()
        ),
        Err(err) => log_op_error!("compare", err.clone(), duration_ms = duration_ms),
    }
    result
}

/// State of a single comparison: one cycle guard per side.
struct Comparison {
    left: CycleGuard,
    right: CycleGuard,
}

impl Comparison {
    fn new() -> Self {
        Self {
            left: CycleGuard::new(Side::Left),
            right: CycleGuard::new(Side::Right),
        }
    }

    fn guard(&mut self, side: Side) -> &mut CycleGuard {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn run(&mut self, first: &Value, second: &Value) -> Result<Summary> {
        let (left_type, right_type) = (classify(first), classify(second));
        match (left_type.is_iterable(), right_type.is_iterable()) {
            (true, true) => self.descend_pair(first, second, &[], left_type == right_type),
            (true, false) => self.descend_one(first, Side::Left, &[]),
            (false, true) => self.descend_one(second, Side::Right, &[]),
            (false, false) => {
                let key = FieldKey::Index(0);
                let mut summary = Summary::new(true);
                summary.push(self.compare_entry(key.clone(), vec![key], first, second)?);
                Ok(summary)
            }
        }
    }

    /// Guarded descent into two composites. `same_category` selects the
    /// same-type comparator; otherwise both are compared as keyed collections
    /// and the result is forced Different.
    fn descend_pair(
        &mut self,
        left: &Value,
        right: &Value,
        path: &[FieldKey],
        same_category: bool,
    ) -> Result<Summary> {
        self.left.enter(left, path)?;
        self.right.enter(right, path)?;
        let summary = match (left, right) {
            (Value::Array(a), Value::Array(b)) if same_category => {
                self.compare_arrays(a, b, path)?
            }
            _ => {
                let (a, b) = (KeyedView::of(left), KeyedView::of(right));
                self.compare_keyed(&a, &b, path, same_category)?
            }
        };
        self.left.leave(left);
        self.right.leave(right);
        Ok(summary)
    }

    /// Guarded one-sided expansion of a composite.
    fn descend_one(&mut self, value: &Value, side: Side, path: &[FieldKey]) -> Result<Summary> {
        self.guard(side).enter(value, path)?;
        let summary = self.expand(value, side, path)?;
        self.guard(side).leave(value);
        Ok(summary)
    }

    /// Compare one key or index present on both sides.
    fn compare_entry(
        &mut self,
        field_key: FieldKey,
        path: Vec<FieldKey>,
        left: &Value,
        right: &Value,
    ) -> Result<Field> {
        let (left_type, right_type) = (classify(left), classify(right));
        let (diff_result, children) = match (left_type.is_iterable(), right_type.is_iterable()) {
            (false, false) => {
                let equal = left_type == right_type && scalars_equal(left, right);
                let result = if equal {
                    DiffResult::Same
                } else {
                    DiffResult::Different
                };
                (result, None)
            }
            (true, true) => {
                let same_category = left_type == right_type;
                let children = self.descend_pair(left, right, &path, same_category)?;
                let result = if same_category && children.is_same {
                    DiffResult::Same
                } else {
                    DiffResult::Different
                };
                (result, Some(children))
            }
            (true, false) => (
                DiffResult::Different,
                Some(self.descend_one(left, Side::Left, &path)?),
            ),
            (false, true) => (
                DiffResult::Different,
                Some(self.descend_one(right, Side::Right, &path)?),
            ),
        };

        Ok(Field {
            field_key,
            diff_result,
            path,
            left: Some(left.clone()),
            left_type: Some(left_type),
            right: Some(right.clone()),
            right_type: Some(right_type),
            children,
        })
    }

    /// Build the Field for a key or index present only on `side`.
    fn one_sided_entry(
        &mut self,
        field_key: FieldKey,
        path: Vec<FieldKey>,
        value: &Value,
        side: Side,
    ) -> Result<Field> {
        let value_type = classify(value);
        let children = if value_type.is_iterable() {
            Some(self.descend_one(value, side, &path)?)
        } else {
            None
        };
        Ok(Field::one_sided(
            field_key,
            path,
            side,
            value.clone(),
            value_type,
            children,
        ))
    }

    /// Index-by-index comparison. Trailing elements of the longer array are
    /// one-sided.
    fn compare_arrays(&mut self, a: &Array, b: &Array, path: &[FieldKey]) -> Result<Summary> {
        let (left, right) = (a.borrow(), b.borrow());
        let mut summary = Summary::new(true);

        for (index, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            let key = FieldKey::Index(index);
            summary.push(self.compare_entry(key.clone(), child_path(path, key), l, r)?);
        }

        let shared = left.len().min(right.len());
        let (longer, side) = if left.len() > shared {
            (&left, Side::Left)
        } else {
            (&right, Side::Right)
        };
        for (index, value) in longer.iter().enumerate().skip(shared) {
            let key = FieldKey::Index(index);
            summary.push(self.one_sided_entry(key.clone(), child_path(path, key), value, side)?);
        }

        Ok(summary)
    }

    /// Key-union comparison: left keys in order, then right-only keys in order.
    fn compare_keyed(
        &mut self,
        left: &KeyedView<'_>,
        right: &KeyedView<'_>,
        path: &[FieldKey],
        assume_equal: bool,
    ) -> Result<Summary> {
        let mut summary = Summary::new(assume_equal);

        for (key, l) in left.iter() {
            let field_key = FieldKey::Key(key.clone());
            let field_path = child_path(path, field_key.clone());
            let field = match right.get(key) {
                Some(r) => self.compare_entry(field_key, field_path, l, r)?,
                None => self.one_sided_entry(field_key, field_path, l, Side::Left)?,
            };
            summary.push(field);
        }

        for (key, r) in right.iter() {
            if left.contains_key(key) {
                continue;
            }
            let field_key = FieldKey::Key(key.clone());
            let field_path = child_path(path, field_key.clone());
            summary.push(self.one_sided_entry(field_key, field_path, r, Side::Right)?);
        }

        Ok(summary)
    }

    /// Expand a value that exists on one side only. Scalars have no entries.
    fn expand(&mut self, value: &Value, side: Side, path: &[FieldKey]) -> Result<Summary> {
        let mut summary = Summary::new(false);
        match value {
            Value::Array(items) => {
                for (index, item) in items.borrow().iter().enumerate() {
                    let key = FieldKey::Index(index);
                    summary.push(self.one_sided_entry(
                        key.clone(),
                        child_path(path, key),
                        item,
                        side,
                    )?);
                }
            }
            Value::Object(entries) => {
                for (key, item) in entries.borrow().iter() {
                    let key = FieldKey::Key(key.clone());
                    summary.push(self.one_sided_entry(
                        key.clone(),
                        child_path(path, key),
                        item,
                        side,
                    )?);
                }
            }
            _ => {}
        }
        Ok(summary)
    }
}

fn child_path(path: &[FieldKey], key: FieldKey) -> Vec<FieldKey> {
    let mut child = Vec::with_capacity(path.len() + 1);
    child.extend_from_slice(path);
    child.push(key);
    child
}

/// A composite viewed as string-keyed entries. Objects are borrowed as-is;
/// arrays are re-keyed by their stringified indices.
enum KeyedView<'a> {
    Borrowed(Ref<'a, IndexMap<String, Value>>),
    Owned(IndexMap<String, Value>),
}

impl<'a> KeyedView<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(object) => KeyedView::Borrowed(object.borrow()),
            Value::Array(array) => KeyedView::Owned(
                array
                    .borrow()
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item.clone()))
                    .collect(),
            ),
            _ => KeyedView::Owned(IndexMap::new()),
        }
    }
}

impl Deref for KeyedView<'_> {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        match self {
            KeyedView::Borrowed(map) => map,
            KeyedView::Owned(map) => map,
        }
    }
}
