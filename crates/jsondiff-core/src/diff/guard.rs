//! Per-side cycle detection.
//!
//! A [`CycleGuard`] holds the identities of the composite values currently on
//! one side's recursion stack. Callers `enter` before descending into a
//! composite and `leave` after the descent returns. A failed `enter` aborts
//! the whole comparison, so entries are never unwound on the error path.

use crate::diff::model::{format_path, FieldKey, Side};
use crate::errors::{DiffError, Result};
use crate::value::Value;
use std::collections::HashSet;

#[derive(Debug)]
pub struct CycleGuard {
    side: Side,
    active: HashSet<usize>,
}

impl CycleGuard {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            active: HashSet::new(),
        }
    }

    /// Mark `value` as being visited. Scalars are ignored.
    ///
    /// # Errors
    ///
    /// `CycleDetected` if `value` is already on this side's active path.
    pub fn enter(&mut self, value: &Value, path: &[FieldKey]) -> Result<()> {
        let Some(id) = value.identity() else {
            return Ok(());
        };
        if !self.active.insert(id) {
            tracing::debug!(
                side = %self.side,
                path = %format_path(path),
                "cycle detected"
            );
            return Err(DiffError::CycleDetected {
                side: self.side,
                path: path.to_vec(),
            });
        }
        Ok(())
    }

    /// Release `value` after its descent returned.
    pub fn leave(&mut self, value: &Value) {
        if let Some(id) = value.identity() {
            self.active.remove(&id);
        }
    }

    pub fn is_active(&self, value: &Value) -> bool {
        value
            .identity()
            .is_some_and(|id| self.active.contains(&id))
    }

    /// Number of composites currently on the active path.
    pub fn depth(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Object;
    use serde_json::json;

    #[test]
    fn test_enter_leave_is_symmetric() {
        let mut guard = CycleGuard::new(Side::Left);
        let value = Value::from(json!({"a": 1}));

        guard.enter(&value, &[]).unwrap();
        assert!(guard.is_active(&value));
        assert_eq!(guard.depth(), 1);

        guard.leave(&value);
        assert!(!guard.is_active(&value));
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn test_reentering_active_value_fails_with_side() {
        let mut guard = CycleGuard::new(Side::Right);
        let value = Value::Object(Object::new());
        guard.enter(&value, &[]).unwrap();

        let err = guard.enter(&value, &[FieldKey::from("self")]).unwrap_err();
        assert_eq!(
            err,
            DiffError::CycleDetected {
                side: Side::Right,
                path: vec![FieldKey::from("self")],
            }
        );
    }

    #[test]
    fn test_sibling_reuse_is_not_a_cycle() {
        let mut guard = CycleGuard::new(Side::Left);
        let shared = Value::from(json!([1, 2]));
        guard.enter(&shared, &[0usize.into()]).unwrap();
        guard.leave(&shared);
        guard.enter(&shared, &[1usize.into()]).unwrap();
    }

    #[test]
    fn test_equal_but_distinct_values_do_not_collide() {
        let mut guard = CycleGuard::new(Side::Left);
        let a = Value::from(json!({"k": 1}));
        let b = Value::from(json!({"k": 1}));
        guard.enter(&a, &[]).unwrap();
        guard.enter(&b, &[]).unwrap();
        assert_eq!(guard.depth(), 2);
    }

    #[test]
    fn test_scalars_are_ignored() {
        let mut guard = CycleGuard::new(Side::Left);
        let scalar = Value::from("x");
        guard.enter(&scalar, &[]).unwrap();
        guard.enter(&scalar, &[]).unwrap();
        assert_eq!(guard.depth(), 0);
    }
}
