//! The closed set of value kinds.
//!
//! [`Value`] is every [`Item`](crate::Item) that is not a field. Leaf kinds
//! (`Absent`, `Extant`, `Bool`, `Num`, `Text`, `Data`) are constants;
//! `Record` is the container; `Func`, `Operator` and `Selector` are
//! expressions that only produce a result when evaluated by an
//! [`Interpreter`](crate::Interpreter).

use crate::{Data, Func, Num, Operator, Record, Selector, Text};

/// Shared absent value, for accessors that return references.
pub(crate) static ABSENT: Value = Value::Absent;

/// Cross-kind sort keys. Lower orders sort first.
pub mod type_order {
    pub const ATTR: u8 = 1;
    pub const SLOT: u8 = 2;
    pub const RECORD: u8 = 3;
    pub const DATA: u8 = 4;
    pub const TEXT: u8 = 5;
    pub const NUM: u8 = 6;
    pub const BOOL: u8 = 7;
    // Selectors occupy 10..=19, operators 20..=42, funcs 50..=51
    pub const LAMBDA: u8 = 50;
    pub const BRIDGE: u8 = 51;
    pub const EXTANT: u8 = 98;
    pub const ABSENT: u8 = 99;
}

/// A non-field structure value.
#[derive(Clone, Default)]
pub enum Value {
    /// No value; sorts after everything else.
    #[default]
    Absent,
    /// Present but empty.
    Extant,
    Bool(bool),
    Num(Num),
    Text(Text),
    Data(Data),
    Record(Record),
    Func(Func),
    Operator(Operator),
    Selector(Selector),
}

impl Value {
    #[inline]
    pub fn absent() -> Value {
        Value::Absent
    }

    #[inline]
    pub fn extant() -> Value {
        Value::Extant
    }

    /// Sort key for ordering values of different kinds.
    pub fn type_order(&self) -> u8 {
        match self {
            Value::Absent => type_order::ABSENT,
            Value::Extant => type_order::EXTANT,
            Value::Bool(_) => type_order::BOOL,
            Value::Num(_) => type_order::NUM,
            Value::Text(_) => type_order::TEXT,
            Value::Data(_) => type_order::DATA,
            Value::Record(_) => type_order::RECORD,
            Value::Func(func) => func.type_order(),
            Value::Operator(operator) => operator.type_order(),
            Value::Selector(selector) => selector.type_order(),
        }
    }

    /// Everything except `Absent`.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Absent)
    }

    /// Everything except `Absent` and `Extant`.
    #[inline]
    pub fn is_distinct(&self) -> bool {
        !matches!(self, Value::Absent | Value::Extant)
    }

    /// Truthiness: false for `Absent`, `Extant`, `false`, and empty records.
    pub fn is_definite(&self) -> bool {
        match self {
            Value::Absent | Value::Extant | Value::Bool(false) => false,
            Value::Record(record) => !record.is_empty(),
            _ => true,
        }
    }

    /// True when evaluation can never change this value.
    pub fn is_constant(&self) -> bool {
        match self {
            Value::Record(record) => record.is_constant(),
            Value::Func(_) | Value::Operator(_) | Value::Selector(_) => false,
            _ => true,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            Value::Func(_) | Value::Operator(_) | Value::Selector(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<Num> {
        match self {
            Value::Num(num) => Some(*num),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Data> {
        match self {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Func> {
        match self {
            Value::Func(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<&Operator> {
        match self {
            Value::Operator(operator) => Some(operator),
            _ => None,
        }
    }

    pub fn as_selector(&self) -> Option<&Selector> {
        match self {
            Value::Selector(selector) => Some(selector),
            _ => None,
        }
    }

    /// Freeze records and data buffers in this subtree.
    pub fn commit(&mut self) -> &mut Self {
        match self {
            Value::Record(record) => {
                record.commit();
            }
            Value::Data(data) => {
                data.commit();
            }
            _ => {}
        }
        self
    }

    /// Fully independent copy; records and buffers are copied recursively
    /// and come back mutable.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::Record(record) => Value::Record(record.deep_clone()),
            Value::Data(data) => Value::Data(Data::from_bytes(data.as_slice())),
            other => other.clone(),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Num> for Value {
    fn from(value: Num) -> Self {
        Value::Num(value)
    }
}

macro_rules! value_from_num {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Num(Num::from(value))
                }
            }
        )*
    };
}

value_from_num!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<Text> for Value {
    fn from(value: Text) -> Self {
        Value::Text(value)
    }
}

impl From<&Text> for Value {
    fn from(value: &Text) -> Self {
        Value::Text(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(Text::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(Text::from(value))
    }
}

impl From<Data> for Value {
    fn from(value: Data) -> Self {
        Value::Data(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Data(Data::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Data(Data::from(value))
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl From<Func> for Value {
    fn from(value: Func) -> Self {
        Value::Func(value)
    }
}

impl From<Operator> for Value {
    fn from(value: Operator) -> Self {
        Value::Operator(value)
    }
}

impl From<Selector> for Value {
    fn from(value: Selector) -> Self {
        Value::Selector(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Extant
    }
}

#[cfg(test)]
mod tests;
