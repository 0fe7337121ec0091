use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_numbers_tween_linearly() {
    let tween = Item::from(0).interpolate_to(&Item::from(10));
    assert_eq!(tween, Interpolator::Num { from: 0.0, to: 10.0 });
    assert_eq!(tween.interpolate(0.5), Item::from(5));
    assert_eq!(tween.start(), Item::from(0));
    assert_eq!(tween.end(), Item::from(10));
}

#[test]
fn test_matching_fields_tween_their_values() {
    let tween = Item::slot("x", 0).interpolate_to(&Item::slot("x", 4));
    assert_eq!(tween.interpolate(0.25), Item::slot("x", 1));

    let mismatched = Item::slot("x", 0).interpolate_to(&Item::attr("x", 4));
    assert!(matches!(mismatched, Interpolator::Step { .. }));
}

#[test]
fn test_records_tween_member_wise() {
    let from = Item::from(Record::of([Item::slot("x", 0), Item::from(10)]));
    let to = Item::from(Record::of([Item::slot("x", 2), Item::from(20)]));
    let tween = from.interpolate_to(&to);
    assert_eq!(
        tween.interpolate(0.5),
        Item::from(Record::of([Item::slot("x", 1), Item::from(15)]))
    );
}

#[test]
fn test_unrelated_items_step() {
    let tween = Item::from("a").interpolate_to(&Item::from(1));
    assert_eq!(tween.interpolate(0.0), Item::from("a"));
    assert_eq!(tween.interpolate(0.99), Item::from("a"));
    assert_eq!(tween.interpolate(1.0), Item::from(1));

    let uneven = Item::from(Record::of([1])).interpolate_to(&Item::from(Record::of([1, 2])));
    assert!(matches!(uneven, Interpolator::Step { .. }));
}

#[test]
fn test_step_endpoints_are_committed() {
    let record = Record::of([1, 2]);
    let tween = Item::from(record.clone()).interpolate_to(&Item::from("b"));
    let start = tween.start();
    assert!(!start.as_value().as_record().unwrap().is_mutable());
    assert!(record.is_mutable());
}
