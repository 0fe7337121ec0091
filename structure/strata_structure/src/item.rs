//! The root node type.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::value::ABSENT;
use crate::{Data, Field, Func, Num, Operator, Record, Selector, Text, Value};

/// Shared absent item, for accessors that return references.
pub(crate) static ABSENT_ITEM: Item = Item::Value(Value::Absent);

/// Any node in a structure tree: a field or a bare value.
#[derive(Clone)]
pub enum Item {
    Field(Field),
    Value(Value),
}

impl Item {
    #[inline]
    pub fn absent() -> Item {
        Item::Value(Value::Absent)
    }

    #[inline]
    pub fn extant() -> Item {
        Item::Value(Value::Extant)
    }

    pub fn attr(key: impl Into<Text>, value: impl Into<Value>) -> Item {
        Item::Field(Field::attr(key, value))
    }

    pub fn slot(key: impl Into<Value>, value: impl Into<Value>) -> Item {
        Item::Field(Field::slot(key, value))
    }

    /// The field key, or `Absent` for a bare value.
    pub fn key(&self) -> &Value {
        match self {
            Item::Field(field) => field.key(),
            Item::Value(_) => &ABSENT,
        }
    }

    /// The field value, or the value itself.
    #[inline]
    pub fn as_value(&self) -> &Value {
        match self {
            Item::Field(field) => field.value(),
            Item::Value(value) => value,
        }
    }

    pub fn to_value(&self) -> Value {
        self.as_value().clone()
    }

    pub fn into_value(self) -> Value {
        match self {
            Item::Field(field) => field.into_value(),
            Item::Value(value) => value,
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Item::Field(field) => Some(field),
            Item::Value(_) => None,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, Item::Field(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Item::Value(_))
    }

    pub fn type_order(&self) -> u8 {
        match self {
            Item::Field(field) => field.type_order(),
            Item::Value(value) => value.type_order(),
        }
    }

    /// Fields are always defined.
    pub fn is_defined(&self) -> bool {
        match self {
            Item::Field(_) => true,
            Item::Value(value) => value.is_defined(),
        }
    }

    pub fn is_distinct(&self) -> bool {
        match self {
            Item::Field(_) => true,
            Item::Value(value) => value.is_distinct(),
        }
    }

    pub fn is_definite(&self) -> bool {
        match self {
            Item::Field(_) => true,
            Item::Value(value) => value.is_definite(),
        }
    }

    pub fn is_constant(&self) -> bool {
        match self {
            Item::Field(field) => field.is_constant(),
            Item::Value(value) => value.is_constant(),
        }
    }

    pub fn is_expression(&self) -> bool {
        match self {
            Item::Field(_) => false,
            Item::Value(value) => value.is_expression(),
        }
    }

    /// Freeze this subtree.
    pub fn commit(&mut self) -> &mut Self {
        match self {
            Item::Field(field) => {
                field.commit();
            }
            Item::Value(value) => {
                value.commit();
            }
        }
        self
    }

    /// Consuming form of [`Item::commit`].
    #[must_use]
    pub fn committed(mut self) -> Self {
        self.commit();
        self
    }

    pub fn deep_clone(&self) -> Item {
        match self {
            Item::Field(field) => Item::Field(field.deep_clone()),
            Item::Value(value) => Item::Value(value.deep_clone()),
        }
    }

    /// Structural hash; equal items produce equal codes.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl Default for Item {
    fn default() -> Self {
        Item::absent()
    }
}

impl From<Value> for Item {
    fn from(value: Value) -> Self {
        Item::Value(value)
    }
}

impl From<&Value> for Item {
    fn from(value: &Value) -> Self {
        Item::Value(value.clone())
    }
}

impl From<Field> for Item {
    fn from(field: Field) -> Self {
        Item::Field(field)
    }
}

macro_rules! item_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Item {
                fn from(value: $ty) -> Self {
                    Item::Value(Value::from(value))
                }
            }
        )*
    };
}

item_from_value!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, Num, Text, &Text, &str, String,
    Data, Vec<u8>, &[u8], Record, Func, Operator, Selector, ()
);
