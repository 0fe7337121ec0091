//! Forward cursors that tolerate mutation of the current member.

use super::Record;
use crate::{Item, StructureResult};

/// An index-based forward cursor over a [`Record`].
///
/// `set` replaces the current member in place. `delete` removes it and
/// leaves the cursor on the member that shifted into its position, so a scan
/// that deletes never skips the next sibling and a scan that replaces never
/// revisits one.
///
/// ```text
/// let mut cursor = record.cursor();
/// while let Some(item) = cursor.head() {
///     if item.is_defined() { cursor.step() } else { cursor.delete()?; }
/// }
/// ```
pub struct RecordCursor<'a> {
    record: &'a mut Record,
    index: usize,
}

impl<'a> RecordCursor<'a> {
    pub(super) fn new(record: &'a mut Record) -> Self {
        RecordCursor { record, index: 0 }
    }

    /// Position of the current member.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current member, or `None` once the scan is past the end.
    pub fn head(&self) -> Option<&Item> {
        self.record.as_slice().get(self.index)
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.record.len()
    }

    /// Advance to the next member.
    pub fn step(&mut self) {
        if !self.is_done() {
            self.index += 1;
        }
    }

    /// Replace the current member, returning the previous one.
    pub fn set(&mut self, item: impl Into<Item>) -> StructureResult<Item> {
        self.record.set_item(self.index, item)
    }

    /// Remove the current member; the cursor stays on its successor.
    pub fn delete(&mut self) -> StructureResult<Item> {
        self.record.remove(self.index)
    }

    /// Insert before the current member and step past it.
    pub fn insert(&mut self, item: impl Into<Item>) -> StructureResult<()> {
        self.record.insert(self.index, item)?;
        self.index += 1;
        Ok(())
    }
}
