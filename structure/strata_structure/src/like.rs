//! Conversion to and from plain native data.
//!
//! [`Like`] is the shape of structure data once the item model is stripped
//! away: scalars, byte strings, arrays and string-keyed objects. Object keys
//! carry the field kind: attributes are written `@key` and bare members of a
//! mixed record `$index`, so a record survives the round trip.

use std::any::Any;

use crate::errors::unsupported_native;
use crate::{Data, Field, FieldKind, Item, Num, Record, StructureResult, Text, Value};

/// Plain native data.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Like {
    /// `Absent`, and expressions, which have no native form.
    Undefined,
    /// `Extant`.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Like>),
    /// Members in record order.
    Object(Vec<(String, Like)>),
}

impl Item {
    pub fn to_like(&self) -> Like {
        match self {
            Item::Field(field) => Like::Object(vec![(field_key(field), field.value().to_like())]),
            Item::Value(value) => value.to_like(),
        }
    }
}

impl Value {
    pub fn to_like(&self) -> Like {
        match self {
            Value::Absent | Value::Func(_) | Value::Operator(_) | Value::Selector(_) => {
                Like::Undefined
            }
            Value::Extant => Like::Null,
            Value::Bool(b) => Like::Bool(*b),
            Value::Num(num) => Like::Number(num.value()),
            Value::Text(text) => Like::String(text.as_str().to_owned()),
            Value::Data(data) => Like::Bytes(data.to_buffer()),
            Value::Record(record) => record.to_like(),
        }
    }

    pub fn from_like(like: &Like) -> Value {
        match like {
            Like::Undefined => Value::Absent,
            Like::Null => Value::Extant,
            Like::Bool(b) => Value::Bool(*b),
            Like::Number(n) => Value::Num(Num::new(*n)),
            Like::String(s) => Value::from(s.as_str()),
            Like::Bytes(bytes) => Value::Data(Data::from_bytes(bytes)),
            Like::Array(elements) => Value::Record(
                elements
                    .iter()
                    .map(|element| Item::Value(Value::from_like(element)))
                    .collect(),
            ),
            Like::Object(entries) => Value::Record(
                entries
                    .iter()
                    .map(|(key, like)| member_from_like(key, like))
                    .collect(),
            ),
        }
    }

    /// Ingest a native Rust value.
    ///
    /// Accepts booleans, primitive numbers, strings, byte vectors, [`Like`]
    /// and the item model's own types; anything else fails with
    /// `UnsupportedNative` naming the type.
    pub fn from_any<T: Any>(native: &T) -> StructureResult<Value> {
        let any = native as &dyn Any;

        macro_rules! try_downcast {
            ($($ty:ty),*) => {
                $(
                    if let Some(value) = any.downcast_ref::<$ty>() {
                        return Ok(Value::from(value.clone()));
                    }
                )*
            };
        }

        try_downcast!(
            bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, String, &'static str,
            Vec<u8>, Text, Num, Data, Record, Value
        );
        if let Some(item) = any.downcast_ref::<Item>() {
            return Ok(item.to_value());
        }
        if let Some(like) = any.downcast_ref::<Like>() {
            return Ok(Value::from_like(like));
        }
        Err(unsupported_native::<T>())
    }
}

impl Record {
    /// An array when the record has no fields, an object otherwise.
    pub fn to_like(&self) -> Like {
        if self.is_array() {
            return Like::Array(self.iter().map(Item::to_like).collect());
        }
        Like::Object(
            self.iter()
                .enumerate()
                .map(|(index, member)| match member {
                    Item::Field(field) => (field_key(field), field.value().to_like()),
                    Item::Value(value) => (format!("${index}"), value.to_like()),
                })
                .collect(),
        )
    }
}

fn field_key(field: &Field) -> String {
    let key = match field.key() {
        Value::Text(text) => text.as_str().to_owned(),
        other => other.to_string(),
    };
    match field.kind() {
        FieldKind::Attr => format!("@{key}"),
        FieldKind::Slot => key,
    }
}

fn member_from_like(key: &str, like: &Like) -> Item {
    let value = Value::from_like(like);
    if let Some(name) = key.strip_prefix('@') {
        return Item::attr(name, value);
    }
    if key
        .strip_prefix('$')
        .is_some_and(|index| index.parse::<usize>().is_ok())
    {
        return Item::Value(value);
    }
    Item::slot(key, value)
}

#[cfg(test)]
mod tests;
