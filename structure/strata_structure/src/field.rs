//! Key/value members of a record.

use bitflags::bitflags;

use crate::errors::immutable;
use crate::value::type_order;
use crate::{StructureResult, Text, Value};

/// The two field kinds.
///
/// Declaration order is sort order: attributes before slots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Text-keyed attribute, conventionally a record's tag or modifier.
    Attr,
    /// Field keyed by any value.
    Slot,
}

impl FieldKind {
    pub fn type_order(self) -> u8 {
        match self {
            FieldKind::Attr => type_order::ATTR,
            FieldKind::Slot => type_order::SLOT,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FieldFlags: u8 {
        /// Committed; `set_value` fails.
        const IMMUTABLE = 1 << 0;
    }
}

/// A key/value pair.
///
/// Attribute keys are always `Value::Text`; constructors that receive a
/// non-text key for an attribute produce a slot instead.
#[derive(Clone)]
pub struct Field {
    kind: FieldKind,
    key: Value,
    value: Value,
    flags: FieldFlags,
}

impl Field {
    pub fn attr(key: impl Into<Text>, value: impl Into<Value>) -> Self {
        Field {
            kind: FieldKind::Attr,
            key: Value::Text(key.into()),
            value: value.into(),
            flags: FieldFlags::empty(),
        }
    }

    pub fn slot(key: impl Into<Value>, value: impl Into<Value>) -> Self {
        Field {
            kind: FieldKind::Slot,
            key: key.into(),
            value: value.into(),
            flags: FieldFlags::empty(),
        }
    }

    /// Build a field of the requested kind, falling back to a slot when an
    /// attribute is requested with a non-text key.
    pub fn of_kind(kind: FieldKind, key: Value, value: Value) -> Self {
        let kind = match (&kind, &key) {
            (FieldKind::Attr, Value::Text(_)) => FieldKind::Attr,
            _ => FieldKind::Slot,
        };
        Field {
            kind,
            key,
            value,
            flags: FieldFlags::empty(),
        }
    }

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_attr(&self) -> bool {
        self.kind == FieldKind::Attr
    }

    pub fn is_slot(&self) -> bool {
        self.kind == FieldKind::Slot
    }

    #[inline]
    pub fn key(&self) -> &Value {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn into_parts(self) -> (Value, Value) {
        (self.key, self.value)
    }

    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    pub fn is_mutable(&self) -> bool {
        !self.flags.contains(FieldFlags::IMMUTABLE)
    }

    pub fn type_order(&self) -> u8 {
        self.kind.type_order()
    }

    pub fn is_constant(&self) -> bool {
        self.key.is_constant() && self.value.is_constant()
    }

    /// Replace the value in place, returning the previous one.
    pub fn set_value(&mut self, value: impl Into<Value>) -> StructureResult<Value> {
        if !self.is_mutable() {
            return Err(immutable("field"));
        }
        Ok(std::mem::replace(&mut self.value, value.into()))
    }

    /// A mutable copy of this field holding `value`.
    pub fn updated_value(&self, value: impl Into<Value>) -> Field {
        Field {
            kind: self.kind,
            key: self.key.clone(),
            value: value.into(),
            flags: FieldFlags::empty(),
        }
    }

    /// Freeze this field and its value subtree.
    pub fn commit(&mut self) -> &mut Self {
        self.flags.insert(FieldFlags::IMMUTABLE);
        self.value.commit();
        self
    }

    /// Independent copy with a recursively cloned value.
    pub fn deep_clone(&self) -> Field {
        Field {
            kind: self.kind,
            key: self.key.clone(),
            value: self.value.deep_clone(),
            flags: FieldFlags::empty(),
        }
    }
}
