use pretty_assertions::assert_eq;

use super::*;
use crate::{for_array, for_number, for_string, ArrayForm, FormExt, NumberForm};

fn point_form() -> TagForm<ArrayForm<NumberForm>> {
    for_array(for_number()).with_tag("point")
}

#[test]
fn test_tag_form_molds_leading_attribute() {
    let form = point_form();
    assert_eq!(Form::<Vec<f64>>::tag(&form), Some("point"));
    let molded = form.mold(&vec![1.0, 2.0]);
    assert_eq!(molded.to_string(), "{@point,1,2}");
    assert_eq!(form.cast(&molded), Some(vec![1.0, 2.0]));
}

#[test]
fn test_tag_form_wraps_scalars() {
    let form = for_string().with_tag("name");
    let molded = form.mold(&"ada".to_owned());
    assert_eq!(
        molded,
        Item::from(Record::of([Item::attr("name", Value::Extant), Item::from("ada")]))
    );
    assert_eq!(form.cast(&molded), Some("ada".to_owned()));
}

#[test]
fn test_tag_form_rejects_other_tags() {
    let form = point_form();
    let other = Item::from(Record::of([Item::attr("size", Value::Extant), Item::from(1)]));
    assert_eq!(form.cast(&other), None);
    assert_eq!(form.cast(&Item::from(Record::of([1, 2]))), None);
    assert_eq!(form.cast(&Item::from(1)), None);
    assert_eq!(form.cast_or_unit(&other), Some(Vec::new()));
}

#[test]
fn test_tag_form_single_member_body() {
    let form = point_form();
    let single = Item::from(Record::of([Item::attr("point", Value::Extant), Item::from(4)]));
    assert_eq!(form.cast(&single), Some(vec![4.0]));
}

#[test]
fn test_tag_form_mold_into() {
    let form = point_form();
    let tagged = form.mold(&vec![1.0]);
    assert_eq!(form.mold_into(&vec![2.0], tagged).to_string(), "{@point,1,2}");

    let untagged = Item::from(Record::of([0]));
    assert_eq!(
        form.mold_into(&vec![2.0], untagged).to_string(),
        "{0,@point,2}"
    );
}

#[test]
fn test_tag_form_cast_into_extends() {
    let form = point_form();
    let molded = form.mold(&vec![2.0, 3.0]);
    assert_eq!(form.cast_into(&molded, vec![1.0]), Some(vec![1.0, 2.0, 3.0]));
}

#[test]
fn test_unit_form_overrides_fallback() {
    let form = for_number().with_unit(-1.0);
    assert_eq!(form.cast_or_unit(&Item::from("x")), Some(-1.0));
    assert_eq!(form.cast_or_unit(&Item::from(2)), Some(2.0));
    assert_eq!(form.mold(&3.0), Item::from(3));

    let tagged = for_number().with_tag("n").with_unit(9.0);
    assert_eq!(Form::<f64>::tag(&tagged), Some("n"));
    assert_eq!(tagged.cast_or_unit(&Item::from(1)), Some(9.0));
}
