//! Mutable windows over a contiguous range of a record.

use super::{rposition_field, set_field, FieldKey, Record};
use crate::errors::{index_out_of_bounds, range_out_of_bounds};
use crate::item::ABSENT_ITEM;
use crate::value::ABSENT;
use crate::{Field, FieldKind, Item, StructureResult, Text, Value};

/// A window `[lower, upper)` over a backing [`Record`].
///
/// Indices passed to a view are relative to `lower`. Every mutation is
/// applied to the backing record in its own coordinates, and the window's
/// bounds move with it: inserting `k` members grows `upper` by `k`, removing
/// shrinks it.
pub struct RecordView<'a> {
    record: &'a mut Record,
    lower: usize,
    upper: usize,
}

impl<'a> RecordView<'a> {
    pub(super) fn new(record: &'a mut Record, lower: usize, upper: usize) -> Self {
        RecordView {
            record,
            lower,
            upper,
        }
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> usize {
        self.upper
    }

    pub fn len(&self) -> usize {
        self.upper - self.lower
    }

    pub fn is_empty(&self) -> bool {
        self.upper == self.lower
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.record.as_slice()[self.lower..self.upper]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.as_slice().iter()
    }

    /// Member at `index` within the window, or `Absent`.
    pub fn get_item(&self, index: usize) -> &Item {
        self.as_slice().get(index).unwrap_or(&ABSENT_ITEM)
    }

    /// Value of the last field with `key` inside the window.
    pub fn get<K: FieldKey + ?Sized>(&self, key: &K) -> &Value {
        self.get_field(key).map_or(&ABSENT, Field::value)
    }

    pub fn get_field<K: FieldKey + ?Sized>(&self, key: &K) -> Option<&Field> {
        let slice = self.as_slice();
        rposition_field(slice, key, None).and_then(|index| slice[index].as_field())
    }

    pub fn has<K: FieldKey + ?Sized>(&self, key: &K) -> bool {
        rposition_field(self.as_slice(), key, None).is_some()
    }

    /// Owned copy of the window's members.
    pub fn to_record(&self) -> Record {
        Record::of(self.as_slice().iter().cloned())
    }

    /// Append at the end of the window.
    pub fn push(&mut self, item: impl Into<Item>) -> StructureResult<()> {
        self.record.insert(self.upper, item)?;
        self.upper += 1;
        Ok(())
    }

    pub fn insert(&mut self, index: usize, item: impl Into<Item>) -> StructureResult<()> {
        if index > self.len() {
            return Err(index_out_of_bounds(index, self.len()));
        }
        self.record.insert(self.lower + index, item)?;
        self.upper += 1;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> StructureResult<Item> {
        if index >= self.len() {
            return Err(index_out_of_bounds(index, self.len()));
        }
        let removed = self.record.remove(self.lower + index)?;
        self.upper -= 1;
        Ok(removed)
    }

    pub fn set_item(&mut self, index: usize, item: impl Into<Item>) -> StructureResult<Item> {
        if index >= self.len() {
            return Err(index_out_of_bounds(index, self.len()));
        }
        self.record.set_item(self.lower + index, item)
    }

    pub fn splice<I, T>(
        &mut self,
        start: usize,
        delete_count: usize,
        new_items: I,
    ) -> StructureResult<Vec<Item>>
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        let end = start.saturating_add(delete_count);
        if end > self.len() {
            return Err(range_out_of_bounds(start, end, self.len()));
        }
        let before = self.record.len();
        let removed = self
            .record
            .splice(self.lower + start, delete_count, new_items)?;
        // Backing length change is exactly the window's length change
        self.upper = self.upper + self.record.len() - before;
        Ok(removed)
    }

    pub fn delete<K: FieldKey + ?Sized>(&mut self, key: &K) -> StructureResult<Item> {
        match rposition_field(self.as_slice(), key, None) {
            Some(index) => self.remove(index),
            None => {
                self.record.check_mutable()?;
                Ok(Item::absent())
            }
        }
    }

    pub fn clear(&mut self) -> StructureResult<()> {
        self.splice(0, self.len(), std::iter::empty::<Item>())
            .map(drop)
    }

    fn set_with(&mut self, kind: Option<FieldKind>, key: Value, value: Value) -> StructureResult<()> {
        let range = self.lower..self.upper;
        let inserted = self
            .record
            .mutate(|items, field_count| set_field(items, field_count, range, kind, key, value))?;
        if inserted {
            self.upper += 1;
        }
        Ok(())
    }

    /// Set the last field with `key` inside the window, or append a slot
    /// at the window's end.
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> StructureResult<()> {
        self.set_with(None, key.into(), value.into())
    }

    pub fn set_attr(
        &mut self,
        key: impl Into<Text>,
        value: impl Into<Value>,
    ) -> StructureResult<()> {
        self.set_with(Some(FieldKind::Attr), Value::Text(key.into()), value.into())
    }

    pub fn set_slot(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> StructureResult<()> {
        self.set_with(Some(FieldKind::Slot), key.into(), value.into())
    }
}
