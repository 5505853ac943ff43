#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{all_fields, diff, self_referential_object, transitive_cycle};
use jsondiff_core::{compare, Array, DiffError, DiffResult, FieldKey, Side, Value, ValueType};
use serde_json::json;

// ===== LITERAL SCENARIOS =====

#[test]
fn test_empty_composites_are_same() {
    for (left, right) in [(json!({}), json!({})), (json!([]), json!([]))] {
        let summary = diff(left, right);
        assert!(summary.is_same);
        assert!(summary.fields.is_empty());
    }
}

#[test]
fn test_number_against_boolean() {
    let summary = diff(json!(12), json!(false));

    assert_eq!(summary.fields.len(), 1);
    let field = &summary.fields[0];
    assert_eq!(field.diff_result, DiffResult::Different);
    assert_eq!(field.left_type, Some(ValueType::Number));
    assert_eq!(field.right_type, Some(ValueType::Boolean));
    assert!(field.children.is_none());
    assert!(!summary.is_same);
}

#[test]
fn test_two_strings() {
    let summary = diff(json!("left"), json!("right"));

    assert_eq!(summary.fields.len(), 1);
    let field = &summary.fields[0];
    assert_eq!(field.diff_result, DiffResult::Different);
    assert_eq!(field.left_type, Some(ValueType::String));
    assert_eq!(field.right_type, Some(ValueType::String));
}

#[test]
fn test_object_key_union() {
    let summary = diff(json!({"a": "b", "e": "g"}), json!({"c": "d", "e": "f"}));

    let keys: Vec<&FieldKey> = summary.fields.iter().map(|f| &f.field_key).collect();
    assert_eq!(
        keys,
        [&FieldKey::from("a"), &FieldKey::from("e"), &FieldKey::from("c")]
    );
    let results: Vec<DiffResult> = summary.fields.iter().map(|f| f.diff_result).collect();
    assert_eq!(
        results,
        [DiffResult::LeftOnly, DiffResult::Different, DiffResult::RightOnly]
    );
    assert_eq!(
        (summary.same, summary.different, summary.leftonly, summary.rightonly),
        (0, 1, 1, 1)
    );
}

#[test]
fn test_longer_left_array() {
    let summary = diff(json!([1, 2, 3]), json!([1, 2]));

    let results: Vec<DiffResult> = summary.fields.iter().map(|f| f.diff_result).collect();
    assert_eq!(
        results,
        [DiffResult::Same, DiffResult::Same, DiffResult::LeftOnly]
    );
    assert!(summary.fields[2].right.is_none());
    assert!(!summary.is_same);
}

// ===== CYCLES =====

#[test]
fn test_self_reference_fails_regardless_of_other_side() {
    let others = [
        json!(null),
        json!(1),
        json!("s"),
        json!([]),
        json!([1, 2]),
        json!({}),
        json!({"self": {"self": 1}}),
    ];
    for other in others {
        let other = Value::from(other);

        let err = compare(&self_referential_object(), &other).unwrap_err();
        assert_eq!(err.side(), Side::Left, "other side: {:?}", other);

        let err = compare(&other, &self_referential_object()).unwrap_err();
        assert_eq!(err.side(), Side::Right, "other side: {:?}", other);
    }
}

#[test]
fn test_cycle_error_carries_path() {
    let err = compare(&transitive_cycle(), &Value::from(json!({}))).unwrap_err();
    assert_eq!(
        err,
        DiffError::CycleDetected {
            side: Side::Left,
            path: vec![FieldKey::from("child"), FieldKey::from("back")],
        }
    );
    assert_eq!(
        err.to_string(),
        "Cycle found inside the left value at $.child.back"
    );
}

#[test]
fn test_array_containing_itself() {
    let array = Array::new();
    array.push(Value::from(1i64));
    array.push(Value::Array(array.clone()));

    let err = compare(&Value::from(json!([1, [1]])), &Value::Array(array)).unwrap_err();
    assert_eq!(
        err,
        DiffError::CycleDetected {
            side: Side::Right,
            path: vec![FieldKey::Index(1)],
        }
    );
}

#[test]
fn test_cycle_compared_with_itself_fails() {
    let cyclic = self_referential_object();
    assert!(compare(&cyclic, &cyclic).is_err());
}

#[test]
fn test_deeply_equal_distinct_values_are_not_cycles() {
    let inner = || Value::from(json!({"k": [1, {"k": 2}]}));
    let left = Value::object([("a", inner()), ("b", inner())]);
    let summary = compare(&left, &left).unwrap();
    assert!(summary.is_same);
}

// ===== MIXED SHAPES =====

#[test]
fn test_array_against_object_at_root_is_forced_different() {
    let summary = diff(json!(["x", "y"]), json!({"0": "x", "1": "y"}));

    assert!(!summary.is_same);
    assert!(summary
        .fields
        .iter()
        .all(|f| f.diff_result == DiffResult::Same));
    assert_eq!(summary.fields[0].field_key, FieldKey::from("0"));
}

#[test]
fn test_scalar_against_object_at_root_drops_scalar() {
    let summary = diff(json!(7), json!({"a": 1, "b": [2]}));

    assert!(!summary.is_same);
    assert_eq!(summary.fields.len(), 2);
    assert!(all_fields(&summary)
        .iter()
        .all(|f| f.diff_result == DiffResult::RightOnly && f.left.is_none()));
    assert_eq!(summary.rightonly, 2);
}

#[test]
fn test_null_and_undefined_differ() {
    let left = Value::object([("k", Value::Null)]);
    let right = Value::object([("k", Value::Undefined)]);
    let summary = compare(&left, &right).unwrap();

    let field = &summary.fields[0];
    assert_eq!(field.diff_result, DiffResult::Different);
    assert_eq!(field.left_type, Some(ValueType::Null));
    assert_eq!(field.right_type, Some(ValueType::Undefined));
}

#[test]
fn test_integer_and_float_forms_are_same_number() {
    let summary = diff(json!({"n": 1}), json!({"n": 1.0}));
    assert!(summary.is_same);
}

#[test]
fn test_one_sided_subtree_is_fully_expanded() {
    let summary = diff(json!({}), json!({"deep": {"list": [1, {"x": null}]}}));

    let fields = all_fields(&summary);
    assert_eq!(fields.len(), 5);
    assert!(fields.iter().all(|f| f.diff_result == DiffResult::RightOnly));
    let deepest = fields.last().unwrap();
    assert_eq!(
        deepest.path,
        vec![
            FieldKey::from("deep"),
            FieldKey::from("list"),
            FieldKey::Index(1),
            FieldKey::from("x"),
        ]
    );
    assert_eq!(summary.rightonly, 2);
}

#[test]
fn test_children_present_iff_a_side_is_iterable() {
    let summary = diff(
        json!({"a": 1, "b": [1], "c": {"x": 1}, "d": "s"}),
        json!({"a": [1], "b": 2, "c": {"x": 1}, "d": "t"}),
    );
    for field in all_fields(&summary) {
        let iterable = [field.left_type, field.right_type]
            .into_iter()
            .flatten()
            .any(|t| t.is_iterable());
        assert_eq!(field.children.is_some(), iterable, "field {:?}", field.path);
    }
}

// ===== OUTPUT CONTRACT =====

#[test]
fn test_summary_serializes_to_documented_shape() {
    let summary = diff(json!({"a": [1]}), json!({"a": [2], "b": true}));
    let json = serde_json::to_value(&summary).unwrap();

    assert_eq!(json["is_same"], false);
    assert_eq!(json["different"], 1);
    assert_eq!(json["rightonly"], 1);
    let a = &json["summary"][0];
    assert_eq!(a["field_key"], "a");
    assert_eq!(a["diff_result"], "Different");
    assert_eq!(a["left"], json!([1]));
    assert_eq!(a["left_type"], "Array");
    assert_eq!(a["children"]["summary"][0]["path"], json!(["a", 0]));
    let b = &json["summary"][1];
    assert_eq!(b["diff_result"], "RightOnly");
    assert!(b.get("left").is_none());
}

#[test]
fn test_repeated_comparisons_are_independent() {
    let left = Value::from(json!({"a": [1, 2], "b": {"c": null}}));
    let right = Value::from(json!({"a": [1, 3], "b": {}}));

    let first = compare(&left, &right).unwrap();
    let second = compare(&left, &right).unwrap();
    assert_eq!(first, second);
}
