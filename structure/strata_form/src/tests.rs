use pretty_assertions::assert_eq;
use strata_structure::{Like, Text};

use super::*;

#[test]
fn test_unparsable_text_falls_back_to_unit() {
    let item = Item::from(Text::from("x"));
    assert_eq!(for_number().cast(&item), None);
    assert_eq!(for_number().cast_or_unit(&item), Some(0.0));
    assert_eq!(for_number().cast_or_else(&item, 7.0), 7.0);
}

#[test]
fn test_registry_round_trips() {
    let text = "hello".to_owned();
    assert_eq!(for_string().cast(&for_string().mold(&text)), Some(text));
    assert_eq!(for_number().cast(&for_number().mold(&2.5)), Some(2.5));
    assert_eq!(for_boolean().cast(&for_boolean().mold(&true)), Some(true));

    let item = Item::slot("a", 1);
    assert_eq!(for_item().cast(&for_item().mold(&item)), Some(item));
    let value = Value::from(Record::of([1, 2]));
    assert_eq!(for_value().cast(&for_value().mold(&value)), Some(value));
    let like = Like::Array(vec![Like::Bool(true)]);
    assert_eq!(for_any().cast(&for_any().mold(&like)), Some(like));
    let numbers = vec![1.0, 2.0];
    assert_eq!(
        for_array(for_number()).cast(&for_array(for_number()).mold(&numbers)),
        Some(numbers)
    );
}

#[test]
fn test_mold_into_appends_to_records() {
    let existing = Item::from(Record::of([Item::slot("a", 1)]));
    assert_eq!(
        for_number().mold_into(&2.0, existing),
        Item::from(Record::of([Item::slot("a", 1), Item::from(2)]))
    );

    let existing = Item::from(Record::of([0]));
    assert_eq!(
        for_array(for_number()).mold_into(&vec![1.0, 2.0], existing),
        Item::from(Record::of([0, 1, 2]))
    );
}

#[test]
fn test_mold_into_replaces_scalars() {
    assert_eq!(for_number().mold_into(&2.0, Item::from("old")), Item::from(2));
    assert_eq!(for_number().mold_into(&2.0, Item::absent()), Item::from(2));
}

#[test]
fn test_default_tag_and_cast_into() {
    assert_eq!(for_string().tag(), None);
    assert_eq!(for_boolean().cast_into(&Item::from(true), false), Some(true));
}
