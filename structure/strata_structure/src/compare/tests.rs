use proptest::prelude::*;

use super::*;
use crate::{Data, Num, Selector, Text};

#[test]
fn test_cross_kind_order_follows_type_order() {
    let ascending = [
        Item::attr("z", 9),
        Item::slot("a", 0),
        Item::from(Record::of([9])),
        Item::from(Data::from([9])),
        Item::from("z"),
        Item::from(1e9),
        Item::from(true),
        Item::from(Selector::identity()),
        Item::extant(),
        Item::absent(),
    ];
    for pair in ascending.windows(2) {
        assert!(pair[0] < pair[1], "{:?} should sort before {:?}", pair[0], pair[1]);
    }
}

#[test]
fn test_true_sorts_before_false() {
    assert!(Value::from(true) < Value::from(false));
}

#[test]
fn test_field_kinds_are_not_equal() {
    assert_ne!(Item::attr("a", 1), Item::slot("a", 1));
}

#[test]
fn test_field_order_key_then_value() {
    assert!(Item::slot("a", 2) < Item::slot("b", 1));
    assert!(Item::slot("a", 1) < Item::slot("a", 2));
}

#[test]
fn test_record_order_is_lexicographic() {
    assert!(Record::of([1, 2]) < Record::of([1, 3]));
    assert!(Record::of([1]) < Record::of([1, 0]));
    assert_eq!(Record::of([1, 2]), Record::of([1.0, 2.0]));
}

#[test]
fn test_flags_do_not_affect_equality() {
    let mutable = Record::of([Item::slot("a", 1)]);
    let frozen = mutable.clone().committed();
    assert_eq!(mutable, frozen);
    assert_eq!(Item::from(mutable).hash_code(), Item::from(frozen).hash_code());
}

#[test]
fn test_num_equivalence() {
    let a = Value::from(1.0);
    let b = Value::from(1.0 + 1e-10);
    assert!(a.equivalent(&b));
    assert_ne!(a, b);
    assert_eq!(Value::Num(Num::NAN), Value::Num(Num::NAN));
    assert!(Value::Num(Num::NAN).equivalent(&Value::Num(Num::NAN)));
}

#[test]
fn test_record_equivalence_is_recursive() {
    let a = Item::from(Record::of([Item::slot("x", 1.0), Item::from(Record::of([2.0]))]));
    let b = Item::from(Record::of([
        Item::slot("x", 1.0 + 1e-12),
        Item::from(Record::of([2.0 - 1e-12])),
    ]));
    assert!(a.equivalent(&b));
    assert!(!a.equivalent_to(&b, 0.0));
    assert!(!Item::slot("x", 1).equivalent(&Item::attr("x", 1)));
}

#[test]
fn test_deeply_nested_records_compare() {
    let mut a = Value::from(0);
    let mut b = Value::from(0);
    for _ in 0..2_000 {
        a = Value::Record(Record::of([a]));
        b = Value::Record(Record::of([b]));
    }
    assert_eq!(a, b);
}

fn leaf() -> impl Strategy<Value = Item> {
    prop_oneof![
        Just(Item::absent()),
        Just(Item::extant()),
        any::<bool>().prop_map(Item::from),
        any::<f64>().prop_map(Item::from),
        "[a-c]{0,3}".prop_map(|text: String| Item::from(Text::from(text))),
        proptest::collection::vec(any::<u8>(), 0..4).prop_map(Item::from),
    ]
}

fn item() -> impl Strategy<Value = Item> {
    leaf().prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(|items| Item::from(Record::from(items))),
            ("[a-b]", inner.clone()).prop_map(|(key, value)| Item::slot(key, value.into_value())),
            ("[a-b]", inner).prop_map(|(key, value)| Item::attr(key, value.into_value())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_order_is_antisymmetric(a in item(), b in item()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    }

    #[test]
    fn prop_cross_kind_order_is_type_order(a in item(), b in item()) {
        if a.type_order() != b.type_order() {
            prop_assert_eq!(a.cmp(&b), a.type_order().cmp(&b.type_order()));
        }
    }

    #[test]
    fn prop_equal_items_hash_alike(a in item()) {
        let copy = a.deep_clone();
        prop_assert_eq!(a.hash_code(), copy.hash_code());
        prop_assert!(a.equivalent(&copy));
    }
}
