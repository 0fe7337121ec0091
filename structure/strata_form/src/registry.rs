//! Entry points for the built-in forms.

use crate::{AnyForm, ArrayForm, BooleanForm, ItemForm, NumberForm, StringForm, ValueForm};

pub fn for_string() -> StringForm {
    StringForm
}

pub fn for_number() -> NumberForm {
    NumberForm
}

pub fn for_boolean() -> BooleanForm {
    BooleanForm
}

/// Plain native data of any shape.
pub fn for_any() -> AnyForm {
    AnyForm
}

pub fn for_item() -> ItemForm {
    ItemForm
}

pub fn for_value() -> ValueForm {
    ValueForm
}

/// Sequences of whatever `item_form` converts.
pub fn for_array<F>(item_form: F) -> ArrayForm<F> {
    ArrayForm::new(item_form)
}
