use pretty_assertions::assert_eq;

use super::*;
use crate::{BooleanForm, NumberForm, StringForm};

#[test]
fn test_mold() {
    let form = ArrayForm::new(StringForm);
    assert_eq!(
        form.mold(&vec!["a".to_owned(), "b".to_owned()]),
        Item::from(Record::of(["a", "b"]))
    );
    assert_eq!(form.mold(&Vec::new()), Item::from(Record::new()));
}

#[test]
fn test_cast_skips_rejected_members_and_attributes() {
    let form = ArrayForm::new(NumberForm);
    let record = Item::from(Record::of([
        Item::attr("kind", "list"),
        Item::from(1),
        Item::from("nope"),
        Item::slot("b", 2),
    ]));
    assert_eq!(form.cast(&record), Some(vec![1.0, 2.0]));
}

#[test]
fn test_cast_scalar_as_single_element() {
    let form = ArrayForm::new(BooleanForm);
    assert_eq!(form.cast(&Item::from(true)), Some(vec![true]));
    assert_eq!(form.cast(&Item::from(3)), None);
    assert_eq!(form.cast(&Item::absent()), None);
    assert_eq!(form.cast_or_unit(&Item::absent()), Some(Vec::new()));
}

#[test]
fn test_cast_into_appends() {
    let form = ArrayForm::new(NumberForm);
    let record = Item::from(Record::of([2, 3]));
    assert_eq!(form.cast_into(&record, vec![1.0]), Some(vec![1.0, 2.0, 3.0]));
}
