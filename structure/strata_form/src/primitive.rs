//! Forms for strings, numbers and booleans.
//!
//! Scalars cast from the tree's target, so `{@unit:"m", 5}` casts to the
//! number 5. Text converts to numbers and booleans by parsing; anything
//! that does not parse falls through to `None`.

use strata_structure::{Item, Value};

use crate::{target, Form};

#[derive(Copy, Clone, Debug, Default)]
pub struct StringForm;

impl Form<String> for StringForm {
    fn unit(&self) -> Option<String> {
        Some(String::new())
    }

    fn mold(&self, object: &String) -> Item {
        Item::from(object.as_str())
    }

    fn cast(&self, item: &Item) -> Option<String> {
        match target(item) {
            Value::Text(text) => Some(text.as_str().to_owned()),
            Value::Num(num) => Some(num.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct NumberForm;

impl Form<f64> for NumberForm {
    fn unit(&self) -> Option<f64> {
        Some(0.0)
    }

    fn mold(&self, object: &f64) -> Item {
        Item::from(*object)
    }

    fn cast(&self, item: &Item) -> Option<f64> {
        match target(item) {
            Value::Num(num) => Some(num.value()),
            Value::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct BooleanForm;

impl Form<bool> for BooleanForm {
    fn unit(&self) -> Option<bool> {
        Some(false)
    }

    fn mold(&self, object: &bool) -> Item {
        Item::from(*object)
    }

    fn cast(&self, item: &Item) -> Option<bool> {
        match target(item) {
            Value::Bool(b) => Some(b),
            Value::Text(text) => match text.as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}
