//! Forms that keep the tree, or its plain-data shape, as the native value.

use strata_structure::{Item, Like, Value};

use crate::Form;

/// Items as themselves.
#[derive(Copy, Clone, Debug, Default)]
pub struct ItemForm;

impl Form<Item> for ItemForm {
    fn unit(&self) -> Option<Item> {
        Some(Item::absent())
    }

    fn mold(&self, object: &Item) -> Item {
        object.clone()
    }

    fn cast(&self, item: &Item) -> Option<Item> {
        Some(item.clone())
    }
}

/// The value part of an item; fields lose their key.
#[derive(Copy, Clone, Debug, Default)]
pub struct ValueForm;

impl Form<Value> for ValueForm {
    fn unit(&self) -> Option<Value> {
        Some(Value::Absent)
    }

    fn mold(&self, object: &Value) -> Item {
        Item::from(object.clone())
    }

    fn cast(&self, item: &Item) -> Option<Value> {
        Some(item.to_value())
    }
}

/// Plain native data through [`Like`].
#[derive(Copy, Clone, Debug, Default)]
pub struct AnyForm;

impl Form<Like> for AnyForm {
    fn mold(&self, object: &Like) -> Item {
        Item::from(Value::from_like(object))
    }

    fn cast(&self, item: &Item) -> Option<Like> {
        match item.to_like() {
            Like::Undefined => None,
            like => Some(like),
        }
    }
}
