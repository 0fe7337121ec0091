//! Ordered, heterogeneous, copy-on-write containers.
//!
//! A [`Record`] is a sequence of [`Item`]s mixing bare values and fields.
//! Members live in a reference-counted array so [`Record::branch`] is O(1);
//! the first mutation through a shared or `ALIASED` handle copies the array
//! (rounded up to a power of two, floor 8) before writing.
//!
//! Field lookup always resolves the **last** field with a matching key, so a
//! later member shadows an earlier one with the same key.

mod cursor;
mod view;

use std::ops::Range;
use std::sync::Arc;

use bitflags::bitflags;
use strata_stack::ensure_sufficient_stack;

pub use cursor::RecordCursor;
pub use view::RecordView;

use crate::errors::{immutable, index_out_of_bounds, range_out_of_bounds};
use crate::item::ABSENT_ITEM;
use crate::value::ABSENT;
use crate::{Field, FieldKind, Item, Num, StructureResult, Text, Value};

bitflags! {
    /// Ownership state of a record's member array.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct RecordFlags: u8 {
        /// Member array may be shared; copy before the first write.
        const ALIASED = 1 << 0;
        /// Committed; every mutation fails.
        const IMMUTABLE = 1 << 1;
    }
}

/// Smallest member array allocated on growth.
const MIN_CAPACITY: usize = 8;

fn expand(capacity: usize) -> usize {
    capacity.max(MIN_CAPACITY).next_power_of_two()
}

/// Reserve room for `additional` members, growing to a power of two.
fn grow(items: &mut Vec<Item>, additional: usize) {
    let needed = items.len() + additional;
    if needed > items.capacity() {
        items.reserve_exact(expand(needed) - items.len());
    }
}

/// Keys a field lookup can match against.
pub trait FieldKey {
    fn matches_key(&self, key: &Value) -> bool;
}

impl FieldKey for Value {
    fn matches_key(&self, key: &Value) -> bool {
        self == key
    }
}

impl FieldKey for Text {
    fn matches_key(&self, key: &Value) -> bool {
        matches!(key, Value::Text(text) if text == self)
    }
}

impl FieldKey for str {
    fn matches_key(&self, key: &Value) -> bool {
        matches!(key, Value::Text(text) if text.as_str() == self)
    }
}

impl FieldKey for String {
    fn matches_key(&self, key: &Value) -> bool {
        self.as_str().matches_key(key)
    }
}

impl FieldKey for Num {
    fn matches_key(&self, key: &Value) -> bool {
        matches!(key, Value::Num(num) if num == self)
    }
}

impl FieldKey for i32 {
    fn matches_key(&self, key: &Value) -> bool {
        Num::from(*self).matches_key(key)
    }
}

/// An ordered, mutable sequence of items.
#[derive(Clone)]
pub struct Record {
    items: Arc<Vec<Item>>,
    field_count: usize,
    flags: RecordFlags,
}

impl Default for Record {
    fn default() -> Self {
        Record::new()
    }
}

impl Record {
    pub fn new() -> Self {
        Record {
            items: Arc::new(Vec::new()),
            field_count: 0,
            flags: RecordFlags::empty(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Record {
            items: Arc::new(Vec::with_capacity(expand(capacity))),
            field_count: 0,
            flags: RecordFlags::empty(),
        }
    }

    /// Build a record from anything convertible to items.
    pub fn of<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        items.into_iter().map(Into::into).collect()
    }

    fn from_vec(items: Vec<Item>) -> Self {
        let field_count = items.iter().filter(|item| item.is_field()).count();
        Record {
            items: Arc::new(items),
            field_count,
            flags: RecordFlags::empty(),
        }
    }

    // Shape

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// True when no member is a field.
    pub fn is_array(&self) -> bool {
        self.field_count == 0
    }

    /// True when every member is a field.
    pub fn is_object(&self) -> bool {
        self.field_count == self.len()
    }

    pub fn flags(&self) -> RecordFlags {
        self.flags
    }

    pub fn is_aliased(&self) -> bool {
        self.flags.contains(RecordFlags::ALIASED)
    }

    pub fn is_mutable(&self) -> bool {
        !self.flags.contains(RecordFlags::IMMUTABLE)
    }

    pub fn is_constant(&self) -> bool {
        self.items.iter().all(Item::is_constant)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Take the members, copying only if the array is shared.
    pub fn into_vec(self) -> Vec<Item> {
        Arc::try_unwrap(self.items).unwrap_or_else(|shared| shared.as_ref().clone())
    }

    // Lookup

    fn rposition_field<K: FieldKey + ?Sized>(
        &self,
        key: &K,
        kind: Option<FieldKind>,
    ) -> Option<usize> {
        rposition_field(&self.items, key, kind)
    }

    /// Value of the last field with `key`, or `Absent`.
    pub fn get<K: FieldKey + ?Sized>(&self, key: &K) -> &Value {
        self.get_field(key).map_or(&ABSENT, Field::value)
    }

    /// Value of the last attribute with `key`, or `Absent`.
    pub fn get_attr<K: FieldKey + ?Sized>(&self, key: &K) -> &Value {
        self.rposition_field(key, Some(FieldKind::Attr))
            .and_then(|index| self.items[index].as_field())
            .map_or(&ABSENT, Field::value)
    }

    /// Value of the last slot with `key`, or `Absent`.
    pub fn get_slot<K: FieldKey + ?Sized>(&self, key: &K) -> &Value {
        self.rposition_field(key, Some(FieldKind::Slot))
            .and_then(|index| self.items[index].as_field())
            .map_or(&ABSENT, Field::value)
    }

    /// The last field with `key`, of either kind.
    pub fn get_field<K: FieldKey + ?Sized>(&self, key: &K) -> Option<&Field> {
        self.rposition_field(key, None)
            .and_then(|index| self.items[index].as_field())
    }

    /// Whether any field has `key`. Bare values never match.
    pub fn has<K: FieldKey + ?Sized>(&self, key: &K) -> bool {
        self.rposition_field(key, None).is_some()
    }

    /// Position of the last field with `key`.
    pub fn index_of_key<K: FieldKey + ?Sized>(&self, key: &K) -> Option<usize> {
        self.rposition_field(key, None)
    }

    /// Member at `index`, or `Absent` past the end.
    pub fn get_item(&self, index: usize) -> &Item {
        self.items.get(index).unwrap_or(&ABSENT_ITEM)
    }

    // XML-like conventions

    /// First member, or `Absent`.
    pub fn head(&self) -> &Item {
        self.get_item(0)
    }

    /// Key of the leading attribute.
    pub fn tag(&self) -> Option<&Text> {
        match self.items.first() {
            Some(Item::Field(field)) if field.is_attr() => field.key().as_text(),
            _ => None,
        }
    }

    /// Value of the leading attribute when its key is `tag`.
    pub fn header(&self, tag: &str) -> &Value {
        match self.items.first() {
            Some(Item::Field(field)) if field.is_attr() && tag.matches_key(field.key()) => {
                field.value()
            }
            _ => &ABSENT,
        }
    }

    /// The leading attribute's value as a record of header fields.
    pub fn headers(&self, tag: &str) -> Option<Record> {
        match self.header(tag) {
            Value::Absent => None,
            Value::Extant => Some(Record::new()),
            Value::Record(record) => Some(record.clone()),
            other => Some(Record::of([other.clone()])),
        }
    }

    /// Every member after the head.
    pub fn tail(&self) -> Record {
        Record::of(self.items.iter().skip(1).cloned())
    }

    /// The tail, collapsed to a single value when it holds exactly one.
    pub fn body(&self) -> Value {
        let tail = self.tail();
        if tail.is_empty() {
            Value::Absent
        } else {
            tail.flattened()
        }
    }

    /// A lone bare-value member, or the record itself.
    pub fn flattened(&self) -> Value {
        match self.items.as_slice() {
            [Item::Value(value)] => value.clone(),
            _ => Value::Record(self.clone()),
        }
    }

    /// The content with attributes stripped.
    ///
    /// Collapses to the single remaining value when there is exactly one,
    /// and to `Extant` when only attributes were present.
    pub fn target(&self) -> Value {
        let mut first: Option<&Value> = None;
        let mut rest: Option<Record> = None;
        for item in self.items.iter() {
            match item {
                Item::Field(field) if field.is_attr() => {}
                Item::Value(value) if first.is_none() && rest.is_none() => first = Some(value),
                _ => {
                    let record = rest.get_or_insert_with(|| {
                        let mut record = Record::new();
                        if let Some(value) = first {
                            record.push_unchecked(Item::Value(value.clone()));
                        }
                        record
                    });
                    record.push_unchecked(item.clone());
                }
            }
        }
        match (first, rest) {
            (_, Some(record)) => Value::Record(record),
            (Some(value), None) => value.clone(),
            (None, None) => Value::Extant,
        }
    }

    // Ownership

    /// A cheap, independently mutable copy that shares members until the
    /// first write.
    pub fn branch(&self) -> Record {
        Record {
            items: Arc::clone(&self.items),
            field_count: self.field_count,
            flags: RecordFlags::ALIASED,
        }
    }

    /// A recursive copy sharing nothing mutable with this record.
    pub fn deep_clone(&self) -> Record {
        ensure_sufficient_stack(|| Record {
            items: Arc::new(self.items.iter().map(Item::deep_clone).collect()),
            field_count: self.field_count,
            flags: RecordFlags::empty(),
        })
    }

    /// Freeze this record and every member; later mutations fail.
    pub fn commit(&mut self) -> &mut Self {
        if self.is_mutable() {
            ensure_sufficient_stack(|| {
                for item in Arc::make_mut(&mut self.items) {
                    item.commit();
                }
            });
            self.flags = RecordFlags::IMMUTABLE;
        }
        self
    }

    /// Consuming form of [`Record::commit`].
    #[must_use]
    pub fn committed(mut self) -> Self {
        self.commit();
        self
    }

    // Mutation

    /// Copy the member array if it may be shared.
    fn unshare(&mut self) {
        if self.is_aliased() || Arc::strong_count(&self.items) > 1 {
            let mut copy = Vec::with_capacity(expand(self.items.len()));
            copy.extend(self.items.iter().cloned());
            self.items = Arc::new(copy);
            self.flags.remove(RecordFlags::ALIASED);
        }
    }

    /// Run `f` with exclusive access to the members and the field count.
    fn mutate<R>(&mut self, f: impl FnOnce(&mut Vec<Item>, &mut usize) -> R) -> StructureResult<R> {
        if !self.is_mutable() {
            return Err(immutable("record"));
        }
        self.unshare();
        Ok(f(Arc::make_mut(&mut self.items), &mut self.field_count))
    }

    fn push_unchecked(&mut self, item: Item) {
        self.unshare();
        if item.is_field() {
            self.field_count += 1;
        }
        let items = Arc::make_mut(&mut self.items);
        grow(items, 1);
        items.push(item);
    }

    pub fn push(&mut self, item: impl Into<Item>) -> StructureResult<()> {
        let item = item.into();
        self.mutate(|items, field_count| {
            if item.is_field() {
                *field_count += 1;
            }
            grow(items, 1);
            items.push(item);
        })
    }

    pub fn push_all<I, T>(&mut self, items: I) -> StructureResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Item>,
    {
        let new_items: Vec<Item> = items.into_iter().map(Into::into).collect();
        self.mutate(|items, field_count| {
            *field_count += new_items.iter().filter(|item| item.is_field()).count();
            grow(items, new_items.len());
            items.extend(new_items);
        })
    }

    pub fn insert(&mut self, index: usize, item: impl Into<Item>) -> StructureResult<()> {
        if index > self.len() {
            return Err(index_out_of_bounds(index, self.len()));
        }
        let item = item.into();
        self.mutate(|items, field_count| {
            if item.is_field() {
                *field_count += 1;
            }
            grow(items, 1);
            items.insert(index, item);
        })
    }

    /// Replace `delete_count` members starting at `start` with `new_items`,
    /// returning the removed members.
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
        let new_items: Vec<Item> = new_items.into_iter().map(Into::into).collect();
        self.mutate(|items, field_count| {
            grow(items, new_items.len());
            *field_count += new_items.iter().filter(|item| item.is_field()).count();
            let removed: Vec<Item> = items.splice(start..end, new_items).collect();
            *field_count -= removed.iter().filter(|item| item.is_field()).count();
            removed
        })
    }

    pub fn remove(&mut self, index: usize) -> StructureResult<Item> {
        if index >= self.len() {
            return Err(index_out_of_bounds(index, self.len()));
        }
        self.mutate(|items, field_count| {
            let removed = items.remove(index);
            if removed.is_field() {
                *field_count -= 1;
            }
            removed
        })
    }

    /// Replace the member at `index`, returning the previous one.
    pub fn set_item(&mut self, index: usize, item: impl Into<Item>) -> StructureResult<Item> {
        if index >= self.len() {
            return Err(index_out_of_bounds(index, self.len()));
        }
        let item = item.into();
        self.mutate(|items, field_count| {
            if item.is_field() {
                *field_count += 1;
            }
            let previous = std::mem::replace(&mut items[index], item);
            if previous.is_field() {
                *field_count -= 1;
            }
            previous
        })
    }

    /// Remove the last field with `key`, returning it, or `Absent` when no
    /// field matched.
    pub fn delete<K: FieldKey + ?Sized>(&mut self, key: &K) -> StructureResult<Item> {
        match self.rposition_field(key, None) {
            Some(index) => self.remove(index),
            None => {
                self.check_mutable()?;
                Ok(Item::absent())
            }
        }
    }

    pub fn clear(&mut self) -> StructureResult<()> {
        self.check_mutable()?;
        self.items = Arc::new(Vec::new());
        self.field_count = 0;
        self.flags.remove(RecordFlags::ALIASED);
        Ok(())
    }

    pub(crate) fn check_mutable(&self) -> StructureResult<()> {
        if self.is_mutable() {
            Ok(())
        } else {
            Err(immutable("record"))
        }
    }

    /// Set the last field with `key`, keeping its kind, or append a slot.
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> StructureResult<()> {
        let (key, value) = (key.into(), value.into());
        let range = 0..self.len();
        self.mutate(|items, field_count| set_field(items, field_count, range, None, key, value))
            .map(drop)
    }

    /// Set the last field with `key` as an attribute, or append one.
    pub fn set_attr(
        &mut self,
        key: impl Into<Text>,
        value: impl Into<Value>,
    ) -> StructureResult<()> {
        let (key, value) = (Value::Text(key.into()), value.into());
        let range = 0..self.len();
        self.mutate(|items, field_count| {
            set_field(items, field_count, range, Some(FieldKind::Attr), key, value)
        })
        .map(drop)
    }

    /// Set the last field with `key` as a slot, or append one.
    pub fn set_slot(
        &mut self,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> StructureResult<()> {
        let (key, value) = (key.into(), value.into());
        let range = 0..self.len();
        self.mutate(|items, field_count| {
            set_field(items, field_count, range, Some(FieldKind::Slot), key, value)
        })
        .map(drop)
    }

    fn updated_with(&self, kind: Option<FieldKind>, key: Value, value: Value) -> Record {
        let mut record = self.branch();
        record.unshare();
        let range = 0..record.len();
        set_field(
            Arc::make_mut(&mut record.items),
            &mut record.field_count,
            range,
            kind,
            key,
            value,
        );
        record
    }

    /// A branch with `key` set; this record is left untouched.
    #[must_use]
    pub fn updated(&self, key: impl Into<Value>, value: impl Into<Value>) -> Record {
        self.updated_with(None, key.into(), value.into())
    }

    #[must_use]
    pub fn updated_attr(&self, key: impl Into<Text>, value: impl Into<Value>) -> Record {
        self.updated_with(Some(FieldKind::Attr), Value::Text(key.into()), value.into())
    }

    #[must_use]
    pub fn updated_slot(&self, key: impl Into<Value>, value: impl Into<Value>) -> Record {
        self.updated_with(Some(FieldKind::Slot), key.into(), value.into())
    }

    // Sub-ranges

    fn check_range(&self, lower: usize, upper: usize) -> StructureResult<()> {
        if lower > upper || upper > self.len() {
            Err(range_out_of_bounds(lower, upper, self.len()))
        } else {
            Ok(())
        }
    }

    /// An owned copy of the members in `[lower, upper)`.
    pub fn slice(&self, lower: usize, upper: usize) -> StructureResult<Record> {
        self.check_range(lower, upper)?;
        Ok(Record::from_vec(self.items[lower..upper].to_vec()))
    }

    /// A mutable window over `[lower, upper)` of this record.
    pub fn view_mut(&mut self, lower: usize, upper: usize) -> StructureResult<RecordView<'_>> {
        self.check_range(lower, upper)?;
        Ok(RecordView::new(self, lower, upper))
    }

    /// A forward cursor positioned at the first member.
    pub fn cursor(&mut self) -> RecordCursor<'_> {
        RecordCursor::new(self)
    }
}

/// Position of the last field in `items` matching `key` and `kind`.
pub(crate) fn rposition_field<K: FieldKey + ?Sized>(
    items: &[Item],
    key: &K,
    kind: Option<FieldKind>,
) -> Option<usize> {
    items.iter().rposition(|item| match item {
        Item::Field(field) => {
            kind.map_or(true, |kind| field.kind() == kind) && key.matches_key(field.key())
        }
        Item::Value(_) => false,
    })
}

/// The set protocol, restricted to `range`.
///
/// Overwrites the last field with `key` in place when it is mutable and of
/// the requested kind, replaces it with a fresh field otherwise, and inserts
/// a new field at the end of the range when none matches. Returns whether a
/// member was inserted.
fn set_field(
    items: &mut Vec<Item>,
    field_count: &mut usize,
    range: Range<usize>,
    kind: Option<FieldKind>,
    key: Value,
    value: Value,
) -> bool {
    let lower = range.start;
    match rposition_field(&items[range.clone()], &key, None) {
        Some(offset) => {
            let index = lower + offset;
            let (in_place, wanted) = match &items[index] {
                Item::Field(field) => {
                    let wanted = kind.unwrap_or(field.kind());
                    (field.is_mutable() && field.kind() == wanted, wanted)
                }
                Item::Value(_) => (false, kind.unwrap_or(FieldKind::Slot)),
            };
            if in_place {
                if let Item::Field(field) = &mut items[index] {
                    let _ = field.set_value(value);
                }
            } else {
                items[index] = Item::Field(Field::of_kind(wanted, key, value));
            }
            false
        }
        None => {
            let field = Field::of_kind(kind.unwrap_or(FieldKind::Slot), key, value);
            grow(items, 1);
            items.insert(range.end, Item::Field(field));
            *field_count += 1;
            true
        }
    }
}

impl FromIterator<Item> for Record {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut items = Vec::with_capacity(expand(iter.size_hint().0));
        items.extend(iter);
        Record::from_vec(items)
    }
}

impl From<Vec<Item>> for Record {
    fn from(items: Vec<Item>) -> Self {
        Record::from_vec(items)
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
