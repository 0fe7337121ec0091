//! Strata Structure - structured value model and its query language.
//!
//! This crate provides:
//! - The item model: [`Item`] is a [`Field`] or a [`Value`]; values are
//!   leaves ([`Num`], [`Text`], [`Data`], ...), [`Record`] containers, or
//!   expressions ([`Operator`], [`Selector`], [`Func`])
//! - A total order, exact equality and epsilon-tolerant equivalence across
//!   every kind
//! - Copy-on-write records and buffers with `branch` / `commit` ownership
//! - The [`Interpreter`], which evaluates expressions against an explicit
//!   scope stack
//!
//! # Ownership
//!
//! Records and data buffers share their storage when cloned or branched and
//! copy it on the first write, so handing out a copy is cheap and never
//! disturbs the original. `commit` freezes a subtree; a committed subtree is
//! safe to share for reading indefinitely, and every write to it fails with
//! [`StructureError::Immutable`].

mod compare;
mod data;
mod display;
mod errors;
mod eval;
mod field;
mod func;
mod interpolate;
mod interpreter;
mod item;
mod like;
mod num;
mod operator;
mod ops;
mod record;
mod selector;
mod text;
mod tracing_setup;
mod value;

pub use compare::EPSILON;
pub use data::{Data, DataFlags};
pub use errors::{StructureError, StructureResult};
pub use field::{Field, FieldFlags, FieldKind};
pub use func::{BridgeFunc, Func, LambdaFunc};
pub use interpolate::Interpolator;
pub use interpreter::{
    Interpreter, InterpreterBuilder, InterpreterObserver, InterpreterSettings, LiftedScope,
    ScopedInterpreter, TracingObserver, DEFAULT_MAX_SCOPE_DEPTH,
};
pub use item::Item;
pub use like::Like;
pub use num::{Num, NumHint};
pub use operator::{BinaryOp, Operator, UnaryOp};
pub use ops::{evaluate_binary, evaluate_conditional, evaluate_unary};
pub use record::{FieldKey, Record, RecordCursor, RecordFlags, RecordView};
pub use selector::Selector;
pub use text::Text;
pub use tracing_setup::init_tracing;
pub use value::{type_order, Value};
