//! Selector pipelines.
//!
//! A [`Selector`] is a chain of stages, each holding its continuation in
//! `then` and ending in [`Selector::Identity`]. Pipelines are built fluently
//! from `Selector::identity()`:
//!
//! ```text
//! // $a.*.[$x > 1]
//! Selector::identity()
//!     .get("a")
//!     .children()
//!     .filter(Operator::binary(BinaryOp::Gt, Selector::identity().get("x"), 1))
//! ```
//!
//! Traversal lives in `eval.rs`.

mod eval;

use crate::{Item, Num, Text, Value};

pub(crate) mod type_order {
    pub const IDENTITY: u8 = 10;
    pub const LITERAL: u8 = 11;
    pub const GET: u8 = 12;
    pub const GET_ATTR: u8 = 13;
    pub const GET_ITEM: u8 = 14;
    pub const KEYS: u8 = 15;
    pub const VALUES: u8 = 16;
    pub const CHILDREN: u8 = 17;
    pub const DESCENDANTS: u8 = 18;
    pub const FILTER: u8 = 19;
}

/// One stage of a selection pipeline.
///
/// Variant order matches type order, so the derived ordering is the
/// same-kind tie-break.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Selector {
    /// Selects the current scope.
    Identity,
    /// Ignores the scope and selects `item`, evaluated.
    Literal { item: Box<Item>, then: Box<Selector> },
    /// The value of the last field with `key` in the current scope.
    Get { key: Box<Value>, then: Box<Selector> },
    /// Like `Get`, restricted to attributes.
    GetAttr { key: Text, then: Box<Selector> },
    /// The member at `index`.
    GetItem { index: Num, then: Box<Selector> },
    /// Each field key.
    Keys { then: Box<Selector> },
    /// Each member value.
    Values { then: Box<Selector> },
    /// Each member, as its own scope. A field contributes its value and
    /// keeps its key when transformed.
    Children { then: Box<Selector> },
    /// Every member value, pre-order, descending through record values.
    Descendants { then: Box<Selector> },
    /// The current scope when `predicate` evaluates to a defined item.
    Filter {
        predicate: Box<Item>,
        then: Box<Selector>,
    },
}

impl Default for Selector {
    fn default() -> Self {
        Selector::Identity
    }
}

impl Selector {
    #[inline]
    pub fn identity() -> Selector {
        Selector::Identity
    }

    pub fn type_order(&self) -> u8 {
        match self {
            Selector::Identity => type_order::IDENTITY,
            Selector::Literal { .. } => type_order::LITERAL,
            Selector::Get { .. } => type_order::GET,
            Selector::GetAttr { .. } => type_order::GET_ATTR,
            Selector::GetItem { .. } => type_order::GET_ITEM,
            Selector::Keys { .. } => type_order::KEYS,
            Selector::Values { .. } => type_order::VALUES,
            Selector::Children { .. } => type_order::CHILDREN,
            Selector::Descendants { .. } => type_order::DESCENDANTS,
            Selector::Filter { .. } => type_order::FILTER,
        }
    }

    /// The continuation, or `None` for `Identity`.
    pub fn then(&self) -> Option<&Selector> {
        match self {
            Selector::Identity => None,
            Selector::Literal { then, .. }
            | Selector::Get { then, .. }
            | Selector::GetAttr { then, .. }
            | Selector::GetItem { then, .. }
            | Selector::Keys { then }
            | Selector::Values { then }
            | Selector::Children { then }
            | Selector::Descendants { then }
            | Selector::Filter { then, .. } => Some(then),
        }
    }

    /// Number of stages before the terminal `Identity`.
    pub fn stage_count(&self) -> usize {
        let mut count = 0;
        let mut stage = self;
        while let Some(then) = stage.then() {
            count += 1;
            stage = then;
        }
        count
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Selector::Identity)
    }

    /// Run `next` after this pipeline by replacing its terminal `Identity`.
    #[must_use]
    pub fn and_then(self, next: Selector) -> Selector {
        fn chain(then: Box<Selector>, next: Selector) -> Box<Selector> {
            Box::new((*then).and_then(next))
        }
        match self {
            Selector::Identity => next,
            Selector::Literal { item, then } => Selector::Literal {
                item,
                then: chain(then, next),
            },
            Selector::Get { key, then } => Selector::Get {
                key,
                then: chain(then, next),
            },
            Selector::GetAttr { key, then } => Selector::GetAttr {
                key,
                then: chain(then, next),
            },
            Selector::GetItem { index, then } => Selector::GetItem {
                index,
                then: chain(then, next),
            },
            Selector::Keys { then } => Selector::Keys { then: chain(then, next) },
            Selector::Values { then } => Selector::Values { then: chain(then, next) },
            Selector::Children { then } => Selector::Children { then: chain(then, next) },
            Selector::Descendants { then } => Selector::Descendants { then: chain(then, next) },
            Selector::Filter { predicate, then } => Selector::Filter {
                predicate,
                then: chain(then, next),
            },
        }
    }

    // Fluent builders; each appends one stage.

    #[must_use]
    pub fn literal(self, item: impl Into<Item>) -> Selector {
        self.and_then(Selector::Literal {
            item: Box::new(item.into()),
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn get(self, key: impl Into<Value>) -> Selector {
        self.and_then(Selector::Get {
            key: Box::new(key.into()),
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn get_attr(self, key: impl Into<Text>) -> Selector {
        self.and_then(Selector::GetAttr {
            key: key.into(),
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn get_item(self, index: impl Into<Num>) -> Selector {
        self.and_then(Selector::GetItem {
            index: index.into(),
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn keys(self) -> Selector {
        self.and_then(Selector::Keys {
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn values(self) -> Selector {
        self.and_then(Selector::Values {
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn children(self) -> Selector {
        self.and_then(Selector::Children {
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn descendants(self) -> Selector {
        self.and_then(Selector::Descendants {
            then: Box::default(),
        })
    }

    #[must_use]
    pub fn filter(self, predicate: impl Into<Item>) -> Selector {
        self.and_then(Selector::Filter {
            predicate: Box::new(predicate.into()),
            then: Box::default(),
        })
    }
}
