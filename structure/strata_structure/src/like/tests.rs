use pretty_assertions::assert_eq;

use super::*;
use crate::{Selector, StructureError};

#[test]
fn test_scalars() {
    assert_eq!(Value::Absent.to_like(), Like::Undefined);
    assert_eq!(Value::Extant.to_like(), Like::Null);
    assert_eq!(Value::from(true).to_like(), Like::Bool(true));
    assert_eq!(Value::from(1.5).to_like(), Like::Number(1.5));
    assert_eq!(Value::from("s").to_like(), Like::String("s".to_owned()));
    assert_eq!(Value::from(vec![1u8, 2]).to_like(), Like::Bytes(vec![1, 2]));
    assert_eq!(Value::from(Selector::identity()).to_like(), Like::Undefined);
}

#[test]
fn test_records() {
    assert_eq!(
        Value::from(Record::of([1, 2])).to_like(),
        Like::Array(vec![Like::Number(1.0), Like::Number(2.0)])
    );
    let mixed = Record::of([
        Item::attr("tag", Value::Extant),
        Item::slot("a", 1),
        Item::from("bare"),
        Item::slot(2, "numeric key"),
    ]);
    assert_eq!(
        mixed.to_like(),
        Like::Object(vec![
            ("@tag".to_owned(), Like::Null),
            ("a".to_owned(), Like::Number(1.0)),
            ("$2".to_owned(), Like::String("bare".to_owned())),
            ("2".to_owned(), Like::String("numeric key".to_owned())),
        ])
    );
}

#[test]
fn test_field_item() {
    assert_eq!(
        Item::attr("a", 1).to_like(),
        Like::Object(vec![("@a".to_owned(), Like::Number(1.0))])
    );
}

#[test]
fn test_record_round_trip() {
    let record = Record::of([
        Item::attr("tag", Value::Extant),
        Item::slot("a", Record::of([1, 2])),
        Item::from("bare"),
        Item::slot("data", vec![7u8]),
    ]);
    assert_eq!(Value::from_like(&record.to_like()), Value::from(record));
}

#[test]
fn test_from_like_object_keys() {
    let like = Like::Object(vec![
        ("@t".to_owned(), Like::Null),
        ("$0".to_owned(), Like::Bool(false)),
        ("$x".to_owned(), Like::Number(3.0)),
    ]);
    assert_eq!(
        Value::from_like(&like),
        Value::from(Record::of([
            Item::attr("t", Value::Extant),
            Item::from(false),
            Item::slot("$x", 3),
        ]))
    );
}

#[test]
fn test_from_any() {
    assert_eq!(Value::from_any(&7i32), Ok(Value::from(7)));
    assert_eq!(Value::from_any(&2.5f64), Ok(Value::from(2.5)));
    assert_eq!(Value::from_any(&true), Ok(Value::from(true)));
    assert_eq!(Value::from_any(&"s".to_owned()), Ok(Value::from("s")));
    assert_eq!(Value::from_any(&"s"), Ok(Value::from("s")));
    assert_eq!(Value::from_any(&vec![1u8]), Ok(Value::from(vec![1u8])));
    assert_eq!(Value::from_any(&Item::slot("a", 1)), Ok(Value::from(1)));
    assert_eq!(
        Value::from_any(&Like::Array(vec![Like::Null])),
        Ok(Value::from(Record::of([Value::Extant])))
    );
}

#[test]
fn test_from_any_rejects_unknown_types() {
    let rejected = Value::from_any(&vec![1u32]);
    assert!(matches!(
        rejected,
        Err(StructureError::UnsupportedNative { type_name }) if type_name.contains("Vec<u32>")
    ));
}
