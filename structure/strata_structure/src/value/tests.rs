use super::*;
use crate::Item;

#[test]
fn test_predicates_for_markers() {
    assert!(!Value::Absent.is_defined());
    assert!(!Value::Absent.is_distinct());
    assert!(!Value::Absent.is_definite());

    assert!(Value::Extant.is_defined());
    assert!(!Value::Extant.is_distinct());
    assert!(!Value::Extant.is_definite());
}

#[test]
fn test_definiteness() {
    assert!(Value::from(true).is_definite());
    assert!(!Value::from(false).is_definite());
    assert!(Value::from(0).is_definite());
    assert!(Value::from("").is_definite());
    assert!(!Value::Record(Record::new()).is_definite());
    assert!(Value::Record(Record::of([1])).is_definite());
}

#[test]
fn test_type_orders() {
    assert_eq!(Value::Record(Record::new()).type_order(), 3);
    assert_eq!(Value::from(Data::new()).type_order(), 4);
    assert_eq!(Value::from("a").type_order(), 5);
    assert_eq!(Value::from(1).type_order(), 6);
    assert_eq!(Value::from(true).type_order(), 7);
    assert_eq!(Value::Extant.type_order(), 98);
    assert_eq!(Value::Absent.type_order(), 99);
    assert_eq!(Value::from(Selector::identity()).type_order(), 10);
}

#[test]
fn test_constancy() {
    assert!(Value::from(1).is_constant());
    assert!(Value::Record(Record::of([Item::slot("a", 1)])).is_constant());
    let expression = Value::from(Selector::identity().get("a"));
    assert!(expression.is_expression());
    assert!(!expression.is_constant());
    assert!(!Value::Record(Record::of([Item::from(expression)])).is_constant());
}

#[test]
fn test_option_conversion() {
    assert_eq!(Value::from(None::<i32>), Value::Absent);
    assert_eq!(Value::from(Some("x")), Value::from("x"));
    assert_eq!(Value::from(()), Value::Extant);
}

#[test]
fn test_commit_freezes_nested() {
    let mut value = Value::Record(Record::of([Item::slot(
        "inner",
        Record::of([1, 2]),
    )]));
    value.commit();
    let record = value.as_record().unwrap();
    assert!(!record.is_mutable());
    assert!(!record.get("inner").as_record().unwrap().is_mutable());
}

#[test]
fn test_deep_clone_is_mutable() {
    let mut value = Value::Record(Record::of([1]));
    value.commit();
    let mut copy = value.deep_clone();
    copy.as_record_mut().unwrap().push(2).unwrap();
    assert_eq!(value.as_record().unwrap().len(), 1);
    assert_eq!(copy.as_record().unwrap().len(), 2);
}
