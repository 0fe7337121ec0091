//! Homogeneous sequences.

use strata_structure::{Item, Record, Value};

use crate::Form;

/// `Vec<T>` as a record whose members each go through `item_form`.
///
/// Casting skips attributes and members the item form rejects, so a
/// partially valid record still yields the valid part.
#[derive(Clone, Debug)]
pub struct ArrayForm<F> {
    item_form: F,
}

impl<F> ArrayForm<F> {
    pub fn new(item_form: F) -> Self {
        ArrayForm { item_form }
    }

    pub fn item_form(&self) -> &F {
        &self.item_form
    }
}

impl<F> ArrayForm<F> {
    fn cast_members<T>(&self, record: &Record, into: &mut Vec<T>)
    where
        F: Form<T>,
    {
        into.extend(
            record
                .iter()
                .filter(|member| !matches!(member.as_field(), Some(field) if field.is_attr()))
                .filter_map(|member| self.item_form.cast(member)),
        );
    }
}

impl<T, F: Form<T>> Form<Vec<T>> for ArrayForm<F> {
    fn unit(&self) -> Option<Vec<T>> {
        Some(Vec::new())
    }

    fn mold(&self, object: &Vec<T>) -> Item {
        Item::from(
            object
                .iter()
                .map(|element| self.item_form.mold(element))
                .collect::<Record>(),
        )
    }

    /// A record casts member-wise; any other defined value casts as a
    /// single element.
    fn cast(&self, item: &Item) -> Option<Vec<T>> {
        self.cast_into(item, Vec::new())
    }

    /// Appends the cast members to `object`.
    fn cast_into(&self, item: &Item, mut object: Vec<T>) -> Option<Vec<T>> {
        match item.as_value() {
            Value::Record(record) => {
                self.cast_members(record, &mut object);
                Some(object)
            }
            Value::Absent => None,
            _ => {
                let element = self.item_form.cast(item)?;
                object.push(element);
                Some(object)
            }
        }
    }
}

#[cfg(test)]
mod tests;
