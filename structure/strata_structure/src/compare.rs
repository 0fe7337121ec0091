//! Total order, equality, equivalence, and hashing across every item kind.
//!
//! Items of different kinds compare by [`type_order`](crate::Item::type_order)
//! alone; items of the same kind compare by content. Equality is exactly
//! `cmp == Equal`, and equal items hash alike. Ownership flags (aliased,
//! immutable) never take part.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use strata_stack::ensure_sufficient_stack;

use crate::{Field, Item, Record, Value};

/// Default tolerance for [`Item::equivalent`].
pub const EPSILON: f64 = 1.0e-8;

// Value

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Absent, Value::Absent) | (Value::Extant, Value::Extant) => Ordering::Equal,
            // true sorts before false
            (Value::Bool(a), Value::Bool(b)) => b.cmp(a),
            (Value::Num(a), Value::Num(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Data(a), Value::Data(b)) => a.cmp(b),
            (Value::Record(a), Value::Record(b)) => a.cmp(b),
            (Value::Func(a), Value::Func(b)) => a.cmp(b),
            (Value::Operator(a), Value::Operator(b)) => {
                ensure_sufficient_stack(|| a.cmp(b))
            }
            (Value::Selector(a), Value::Selector(b)) => {
                ensure_sufficient_stack(|| a.cmp(b))
            }
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_order().hash(state);
        match self {
            Value::Absent | Value::Extant => {}
            Value::Bool(value) => value.hash(state),
            Value::Num(num) => num.hash(state),
            Value::Text(text) => state.write_u64(text.hash_code()),
            Value::Data(data) => data.hash(state),
            Value::Record(record) => record.hash(state),
            Value::Func(func) => func.hash(state),
            Value::Operator(operator) => ensure_sufficient_stack(|| operator.hash(state)),
            Value::Selector(selector) => ensure_sufficient_stack(|| selector.hash(state)),
        }
    }
}

// Field

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Field {}

impl PartialOrd for Field {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Field {
    /// Kind first, then key, then value.
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| self.key().cmp(other.key()))
            .then_with(|| self.value().cmp(other.value()))
    }
}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_order().hash(state);
        self.key().hash(state);
        self.value().hash(state);
    }
}

// Item

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Item {}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Item::Field(a), Item::Field(b)) => a.cmp(b),
            (Item::Value(a), Item::Value(b)) => a.cmp(b),
            _ => self.type_order().cmp(&other.type_order()),
        }
    }
}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Item::Field(field) => field.hash(state),
            Item::Value(value) => value.hash(state),
        }
    }
}

// Record

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    /// Member-wise; a strict prefix sorts first.
    fn cmp(&self, other: &Self) -> Ordering {
        ensure_sufficient_stack(|| self.as_slice().cmp(other.as_slice()))
    }
}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        ensure_sufficient_stack(|| self.as_slice().hash(state));
    }
}

// Equivalence

impl Value {
    /// Equality that tolerates numeric drift up to `epsilon`, recursively.
    pub fn equivalent_to(&self, that: &Value, epsilon: f64) -> bool {
        match (self, that) {
            (Value::Num(a), Value::Num(b)) => a.equivalent_to(*b, epsilon),
            (Value::Record(a), Value::Record(b)) => a.equivalent_to(b, epsilon),
            _ => self == that,
        }
    }

    /// [`Value::equivalent_to`] with the default [`EPSILON`].
    pub fn equivalent(&self, that: &Value) -> bool {
        self.equivalent_to(that, EPSILON)
    }
}

impl Field {
    pub fn equivalent_to(&self, that: &Field, epsilon: f64) -> bool {
        self.kind() == that.kind()
            && self.key().equivalent_to(that.key(), epsilon)
            && self.value().equivalent_to(that.value(), epsilon)
    }
}

impl Item {
    pub fn equivalent_to(&self, that: &Item, epsilon: f64) -> bool {
        match (self, that) {
            (Item::Field(a), Item::Field(b)) => a.equivalent_to(b, epsilon),
            (Item::Value(a), Item::Value(b)) => a.equivalent_to(b, epsilon),
            _ => false,
        }
    }

    /// [`Item::equivalent_to`] with the default [`EPSILON`].
    pub fn equivalent(&self, that: &Item) -> bool {
        self.equivalent_to(that, EPSILON)
    }
}

impl Record {
    pub fn equivalent_to(&self, that: &Record, epsilon: f64) -> bool {
        self.len() == that.len()
            && ensure_sufficient_stack(|| {
                self.iter()
                    .zip(that.iter())
                    .all(|(a, b)| a.equivalent_to(b, epsilon))
            })
    }
}

#[cfg(test)]
mod tests;
