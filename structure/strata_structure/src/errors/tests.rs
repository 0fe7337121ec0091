use super::*;

#[test]
fn test_immutable_message() {
    assert_eq!(
        immutable("record").to_string(),
        "cannot mutate immutable record"
    );
}

#[test]
fn test_bounds_messages() {
    assert_eq!(
        index_out_of_bounds(4, 3).to_string(),
        "index 4 out of bounds for length 3"
    );
    assert_eq!(
        range_out_of_bounds(2, 9, 5).to_string(),
        "range 2..9 out of bounds for length 5"
    );
}

#[test]
fn test_unsupported_native_names_type() {
    let error = unsupported_native::<std::time::Duration>();
    assert!(matches!(
        error,
        StructureError::UnsupportedNative { type_name } if type_name.ends_with("Duration")
    ));
}

#[test]
fn test_invalid_encoding_carries_reason() {
    let error = invalid_encoding("base16", "odd number of digits");
    assert_eq!(
        error.to_string(),
        "invalid base16 input: odd number of digits"
    );
}

#[test]
fn test_scope_errors() {
    assert_eq!(scope_overflow(8), StructureError::ScopeOverflow { limit: 8 });
    assert_eq!(scope_underflow().to_string(), "scope stack underflow");
}
