//! Forms that wrap another form and change one aspect of it.

use strata_structure::{Item, Record, Value};

use crate::{merge, Form};

/// Nominal typing over structural trees: a tree casts only when it leads
/// with the `@tag` attribute, and the rest of the record is handed to the
/// inner form.
#[derive(Clone, Debug)]
pub struct TagForm<F> {
    tag: String,
    inner: F,
}

impl<F> TagForm<F> {
    pub fn new(tag: impl Into<String>, inner: F) -> Self {
        TagForm {
            tag: tag.into(),
            inner,
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn has_tag(&self, record: &Record) -> bool {
        record.tag().is_some_and(|tag| tag == self.tag.as_str())
    }

    fn is_tagged(&self, item: &Item) -> bool {
        matches!(item.as_value(), Value::Record(record) if self.has_tag(record))
    }

    /// The record's body when it carries this form's tag.
    fn untagged(&self, item: &Item) -> Option<Item> {
        match item.as_value() {
            Value::Record(record) if self.has_tag(record) => Some(Item::from(record.body())),
            value => {
                tracing::trace!(expected = %self.tag, found = %value, "tag mismatch");
                None
            }
        }
    }
}

impl<T, F: Form<T>> Form<T> for TagForm<F> {
    fn tag(&self) -> Option<&str> {
        Some(self.tag.as_str())
    }

    fn unit(&self) -> Option<T> {
        self.inner.unit()
    }

    fn mold(&self, object: &T) -> Item {
        let head = Item::attr(self.tag.as_str(), Value::Extant);
        let body = match self.inner.mold(object) {
            Item::Value(Value::Record(record)) => record.into_vec(),
            Item::Value(Value::Absent) => Vec::new(),
            other => vec![other],
        };
        Item::from(std::iter::once(head).chain(body).collect::<Record>())
    }

    /// A record already carrying the tag receives only the inner members.
    fn mold_into(&self, object: &T, item: Item) -> Item {
        if self.is_tagged(&item) {
            merge(item, self.inner.mold(object))
        } else {
            merge(item, self.mold(object))
        }
    }

    fn cast(&self, item: &Item) -> Option<T> {
        self.untagged(item)
            .and_then(|body| self.inner.cast(&body))
    }

    fn cast_into(&self, item: &Item, object: T) -> Option<T> {
        self.untagged(item)
            .and_then(|body| self.inner.cast_into(&body, object))
    }
}

/// Another form with a different fallback value.
#[derive(Clone, Debug)]
pub struct UnitForm<F, T> {
    inner: F,
    unit: T,
}

impl<F, T> UnitForm<F, T> {
    pub fn new(inner: F, unit: T) -> Self {
        UnitForm { inner, unit }
    }
}

impl<T: Clone, F: Form<T>> Form<T> for UnitForm<F, T> {
    fn tag(&self) -> Option<&str> {
        self.inner.tag()
    }

    fn unit(&self) -> Option<T> {
        Some(self.unit.clone())
    }

    fn mold(&self, object: &T) -> Item {
        self.inner.mold(object)
    }

    fn mold_into(&self, object: &T, item: Item) -> Item {
        self.inner.mold_into(object, item)
    }

    fn cast(&self, item: &Item) -> Option<T> {
        self.inner.cast(item)
    }

    fn cast_into(&self, item: &Item, object: T) -> Option<T> {
        self.inner.cast_into(item, object)
    }
}

#[cfg(test)]
mod tests;
