//! Strata Form - typed bridge between structure trees and native values.
//!
//! A [`Form`] converts one native type to and from [`Item`] trees:
//! `mold` builds a tree from a native value and `cast` extracts a native
//! value from a tree. Casting is best-effort and never fails loudly; `None`
//! means no conversion applies, and callers fall back to the form's `unit`
//! or a default of their own.
//!
//! Forms compose. [`FormExt::with_tag`] makes a form nominal by requiring a
//! leading attribute, and [`FormExt::with_unit`] replaces its fallback.

mod array;
mod decorate;
mod primitive;
mod registry;
mod structural;

pub use array::ArrayForm;
pub use decorate::{TagForm, UnitForm};
pub use primitive::{BooleanForm, NumberForm, StringForm};
pub use registry::{for_any, for_array, for_boolean, for_item, for_number, for_string, for_value};
pub use structural::{AnyForm, ItemForm, ValueForm};

use strata_structure::{Item, Record, Value};

/// Conversion between native values of type `T` and structure trees.
pub trait Form<T> {
    /// Name of the attribute that must lead a tree of this form, if any.
    fn tag(&self) -> Option<&str> {
        None
    }

    /// Fallback value for trees that do not cast.
    fn unit(&self) -> Option<T> {
        None
    }

    /// A fresh tree for `object`.
    fn mold(&self, object: &T) -> Item;

    /// Merge `object` into an existing tree.
    ///
    /// A record receives the molded members appended at its end; anything
    /// else is replaced by the fresh tree.
    fn mold_into(&self, object: &T, item: Item) -> Item {
        merge(item, self.mold(object))
    }

    /// Extract a native value, or `None` when the tree does not convert.
    fn cast(&self, item: &Item) -> Option<T>;

    /// Extract a native value, updating `object` where the form supports
    /// partial updates.
    fn cast_into(&self, item: &Item, _object: T) -> Option<T> {
        self.cast(item)
    }

    fn cast_or_unit(&self, item: &Item) -> Option<T> {
        self.cast(item).or_else(|| self.unit())
    }

    fn cast_or_else(&self, item: &Item, or_else: T) -> T {
        self.cast(item).unwrap_or(or_else)
    }
}

/// Combinators available on every form.
pub trait FormExt<T>: Form<T> + Sized {
    /// Require trees of this form to lead with an `@tag` attribute.
    #[must_use]
    fn with_tag(self, tag: impl Into<String>) -> TagForm<Self> {
        TagForm::new(tag, self)
    }

    /// Replace the fallback value.
    #[must_use]
    fn with_unit(self, unit: T) -> UnitForm<Self, T> {
        UnitForm::new(self, unit)
    }
}

impl<T, F: Form<T>> FormExt<T> for F {}

/// Append the members of `molded` to `item` when it is a record.
fn merge(item: Item, molded: Item) -> Item {
    match item {
        Item::Value(Value::Record(record)) => {
            let appended = match molded {
                Item::Value(Value::Record(members)) => members.into_vec(),
                other => vec![other],
            };
            Item::from(
                record
                    .iter()
                    .cloned()
                    .chain(appended)
                    .collect::<Record>(),
            )
        }
        _ => molded,
    }
}

/// The content a scalar cast looks at: a field's value, or a record's
/// attribute-free target.
fn target(item: &Item) -> Value {
    match item.as_value() {
        Value::Record(record) => record.target(),
        value => value.clone(),
    }
}

#[cfg(test)]
mod tests;
