//! Tweening between two items.

use crate::{Field, FieldKind, Item, Num, Record, Value};

/// A function from a parameter `u` to an item, with `u = 0` giving the
/// start item and `u = 1` the end item.
///
/// Built by [`Item::interpolate_to`], which picks the finest structure both
/// endpoints share.
#[derive(Clone, Debug, PartialEq)]
pub enum Interpolator {
    /// No shared structure: the start until `u` reaches 1, then the end.
    Step { from: Item, to: Item },
    /// Linear between two numbers.
    Num { from: f64, to: f64 },
    /// A field whose key and kind are fixed and whose value tweens.
    Field {
        kind: FieldKind,
        key: Value,
        value: Box<Interpolator>,
    },
    /// Member-wise over two records of equal length.
    Record(Vec<Interpolator>),
}

impl Interpolator {
    pub fn between(from: &Item, to: &Item) -> Interpolator {
        match (from, to) {
            (Item::Field(a), Item::Field(b)) if a.kind() == b.kind() && a.key() == b.key() => {
                Interpolator::Field {
                    kind: a.kind(),
                    key: a.key().clone(),
                    value: Box::new(Interpolator::between(
                        &Item::from(a.value()),
                        &Item::from(b.value()),
                    )),
                }
            }
            (Item::Value(Value::Num(a)), Item::Value(Value::Num(b))) => Interpolator::Num {
                from: a.value(),
                to: b.value(),
            },
            (Item::Value(Value::Record(a)), Item::Value(Value::Record(b))) if a.len() == b.len() => {
                Interpolator::Record(
                    a.iter()
                        .zip(b.iter())
                        .map(|(a, b)| Interpolator::between(a, b))
                        .collect(),
                )
            }
            _ => Interpolator::Step {
                from: from.clone().committed(),
                to: to.clone().committed(),
            },
        }
    }

    /// The item at parameter `u`.
    pub fn interpolate(&self, u: f64) -> Item {
        match self {
            Interpolator::Step { from, to } => {
                if u < 1.0 {
                    from.clone()
                } else {
                    to.clone()
                }
            }
            Interpolator::Num { from, to } => Item::from(Num::new(from * (1.0 - u) + to * u)),
            Interpolator::Field { kind, key, value } => Item::Field(Field::of_kind(
                *kind,
                key.clone(),
                value.interpolate(u).into_value(),
            )),
            Interpolator::Record(members) => Item::from(
                members
                    .iter()
                    .map(|member| member.interpolate(u))
                    .collect::<Record>(),
            ),
        }
    }

    pub fn start(&self) -> Item {
        self.interpolate(0.0)
    }

    pub fn end(&self) -> Item {
        self.interpolate(1.0)
    }
}

impl Item {
    /// An interpolator from this item to `that`.
    pub fn interpolate_to(&self, that: &Item) -> Interpolator {
        Interpolator::between(self, that)
    }
}

#[cfg(test)]
mod tests;
