mod common;

use common::self_referential_object;
use jsondiff_core::errors::{DiffError, ExError, ExErrorKind};
use jsondiff_core::{compare, FieldKey, Side, Value};

#[test]
fn test_cycle_verifiable_by_kind() {
    let err = DiffError::CycleDetected {
        side: Side::Left,
        path: vec![FieldKey::from("self")],
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::CycleDetected);
    assert_eq!(ex_err.code(), "ERR_CYCLE_DETECTED");
    assert_eq!(ex_err.op(), Some("compare"));
    assert_eq!(ex_err.side(), Some(Side::Left));
    assert_eq!(ex_err.path(), Some("$.self"));
}

#[test]
fn test_compare_error_converts_with_message() {
    let err = compare(&Value::Null, &self_referential_object()).unwrap_err();

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.side(), Some(Side::Right));
    assert!(ex_err.message().contains("right value"));
    assert!(ex_err.to_string().starts_with("[ERR_CYCLE_DETECTED]"));
}

#[test]
fn test_serde_error_conversion() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let ex_err: ExError = parse_err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
    assert_eq!(ex_err.code(), "ERR_SERIALIZATION");
    assert!(!ex_err.message().is_empty());
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");

    let ex_err: ExError = io_err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert_eq!(ex_err.code(), "ERR_IO");
    assert!(ex_err.message().contains("no such file"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Test that each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::CycleDetected, "ERR_CYCLE_DETECTED"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    let mut seen = std::collections::HashSet::new();
    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
        assert!(seen.insert(kind.code()), "duplicate code {}", kind.code());
    }
}

#[test]
fn test_ex_error_builder_pattern() {
    let ex_err = ExError::new(ExErrorKind::InvalidInput)
        .with_op("load_input")
        .with_input("left.json")
        .with_side(Side::Left)
        .with_path("$")
        .with_message("expected value at line 1 column 1");

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.op(), Some("load_input"));
    assert_eq!(ex_err.input(), Some("left.json"));
    assert_eq!(ex_err.side(), Some(Side::Left));
    assert_eq!(ex_err.path(), Some("$"));
    assert!(ex_err.message().contains("line 1"));
}

#[test]
fn test_ex_error_display() {
    let ex_err = ExError::new(ExErrorKind::Io)
        .with_op("load_input")
        .with_input("missing.json")
        .with_message("No such file or directory");

    assert_eq!(
        ex_err.to_string(),
        "[ERR_IO] Io in operation 'load_input': No such file or directory (input: missing.json)"
    );
}
