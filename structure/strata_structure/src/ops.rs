//! Operator dispatch over items.
//!
//! Direct enum-based dispatch: the kind set is closed, so operand pairs are
//! matched exhaustively instead of going through trait objects.
//!
//! Results follow three rules. An expression operand defers the computation
//! by building an [`Operator`] node. A field operand contributes its value,
//! and a defined result is rewrapped in a field with the same key and kind.
//! Any other kind mismatch yields `Absent`; nothing here fails.

use crate::{BinaryOp, Field, Item, Num, Operator, Text, UnaryOp, Value};

/// Apply a binary operator to two items.
pub fn evaluate_binary(op: BinaryOp, lhs: &Item, rhs: &Item) -> Item {
    if lhs.is_expression() || rhs.is_expression() {
        return Item::from(Operator::binary(op, lhs.clone(), rhs.clone()));
    }
    match op {
        BinaryOp::Or => {
            if lhs.is_definite() {
                lhs.clone()
            } else {
                rhs.clone()
            }
        }
        BinaryOp::And => {
            if lhs.is_definite() {
                rhs.clone()
            } else {
                lhs.clone()
            }
        }
        BinaryOp::Lt => truth(lhs < rhs),
        BinaryOp::Le => truth(lhs <= rhs),
        BinaryOp::Eq => truth(lhs == rhs),
        BinaryOp::Ne => truth(lhs != rhs),
        BinaryOp::Ge => truth(lhs >= rhs),
        BinaryOp::Gt => truth(lhs > rhs),
        BinaryOp::BitwiseOr
        | BinaryOp::BitwiseXor
        | BinaryOp::BitwiseAnd
        | BinaryOp::Plus
        | BinaryOp::Minus
        | BinaryOp::Times
        | BinaryOp::Divide
        | BinaryOp::Modulo => eval_field_binary(op, lhs, rhs),
    }
}

/// Apply a unary operator to an item.
pub fn evaluate_unary(op: UnaryOp, operand: &Item) -> Item {
    if operand.is_expression() {
        return Item::from(Operator::unary(op, operand.clone()));
    }
    match (op, operand) {
        (UnaryOp::Not, Item::Value(Value::Bool(value))) => Item::from(!value),
        (UnaryOp::Not, _) => {
            if operand.is_definite() {
                Item::absent()
            } else {
                Item::from(true)
            }
        }
        (_, Item::Field(field)) => rewrap(field, eval_unary_value(op, field.value())),
        (_, Item::Value(value)) => Item::Value(eval_unary_value(op, value)),
    }
}

/// Pick `then_term` or `else_term` by the definiteness of `condition`.
pub fn evaluate_conditional(condition: &Item, then_term: &Item, else_term: &Item) -> Item {
    if condition.is_expression() || then_term.is_expression() || else_term.is_expression() {
        return Item::from(Operator::conditional(
            condition.clone(),
            then_term.clone(),
            else_term.clone(),
        ));
    }
    if condition.is_definite() {
        then_term.clone()
    } else {
        else_term.clone()
    }
}

/// `Bool(true)` on success, `Absent` otherwise.
#[inline]
fn truth(holds: bool) -> Item {
    if holds {
        Item::from(true)
    } else {
        Item::absent()
    }
}

fn rewrap(field: &Field, value: Value) -> Item {
    if value.is_defined() {
        Item::Field(field.updated_value(value))
    } else {
        Item::absent()
    }
}

fn eval_field_binary(op: BinaryOp, lhs: &Item, rhs: &Item) -> Item {
    match (lhs, rhs) {
        (Item::Field(a), Item::Field(b)) => {
            if a.kind() == b.kind() && a.key() == b.key() {
                rewrap(a, eval_value_binary(op, a.value(), b.value()))
            } else {
                Item::absent()
            }
        }
        (Item::Field(a), Item::Value(b)) => rewrap(a, eval_value_binary(op, a.value(), b)),
        (Item::Value(_), Item::Field(_)) => Item::absent(),
        (Item::Value(a), Item::Value(b)) => Item::Value(eval_value_binary(op, a, b)),
    }
}

fn eval_value_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> Value {
    if lhs.is_expression() || rhs.is_expression() {
        return Value::Operator(Operator::binary(op, lhs.clone(), rhs.clone()));
    }
    match (lhs, rhs) {
        (Value::Num(a), Value::Num(b)) => eval_num_binary(op, *a, *b),
        (Value::Bool(a), Value::Bool(b)) => eval_bool_binary(op, *a, *b),
        (Value::Text(a), Value::Text(b)) => eval_text_binary(op, a, b),
        _ => Value::Absent,
    }
}

fn eval_num_binary(op: BinaryOp, a: Num, b: Num) -> Value {
    let result = match op {
        BinaryOp::Plus => a.plus(b),
        BinaryOp::Minus => a.minus(b),
        BinaryOp::Times => a.times(b),
        BinaryOp::Divide => a.divide(b),
        BinaryOp::Modulo => a.modulo(b),
        BinaryOp::BitwiseOr => a.bitwise_or(b),
        BinaryOp::BitwiseXor => a.bitwise_xor(b),
        BinaryOp::BitwiseAnd => a.bitwise_and(b),
        _ => return Value::Absent,
    };
    Value::Num(result)
}

fn eval_bool_binary(op: BinaryOp, a: bool, b: bool) -> Value {
    match op {
        BinaryOp::BitwiseOr => Value::Bool(a | b),
        BinaryOp::BitwiseXor => Value::Bool(a ^ b),
        BinaryOp::BitwiseAnd => Value::Bool(a & b),
        _ => Value::Absent,
    }
}

fn eval_text_binary(op: BinaryOp, a: &Text, b: &Text) -> Value {
    match op {
        BinaryOp::Plus => Value::Text(a.concat(b)),
        _ => Value::Absent,
    }
}

fn eval_unary_value(op: UnaryOp, operand: &Value) -> Value {
    if operand.is_expression() {
        return Value::Operator(Operator::unary(op, operand.clone()));
    }
    match (op, operand) {
        (UnaryOp::Negative, Value::Num(num)) => Value::Num(num.negative()),
        (UnaryOp::Positive, Value::Num(num)) => Value::Num(num.positive()),
        (UnaryOp::Inverse, Value::Num(num)) => Value::Num(num.inverse()),
        (UnaryOp::BitwiseNot, Value::Num(num)) => Value::Num(num.bitwise_not()),
        (UnaryOp::BitwiseNot, Value::Bool(value)) => Value::Bool(!value),
        _ => Value::Absent,
    }
}

macro_rules! binary_methods {
    ($($(#[$meta:meta])* $name:ident => $op:ident),* $(,)?) => {
        impl Item {
            $(
                $(#[$meta])*
                pub fn $name(&self, that: &Item) -> Item {
                    evaluate_binary(BinaryOp::$op, self, that)
                }
            )*
        }
    };
}

binary_methods! {
    /// `self` when definite, else `that`.
    or => Or,
    /// `that` when `self` is definite, else `self`.
    and => And,
    bitwise_or => BitwiseOr,
    bitwise_xor => BitwiseXor,
    bitwise_and => BitwiseAnd,
    less_than => Lt,
    less_or_equal => Le,
    equal_to => Eq,
    not_equal_to => Ne,
    greater_or_equal => Ge,
    greater_than => Gt,
    /// Numeric sum, or text concatenation.
    plus => Plus,
    minus => Minus,
    times => Times,
    divide => Divide,
    modulo => Modulo,
}

impl Item {
    /// Logical negation: `Bool` flips; anything else is `true` only when
    /// indefinite.
    pub fn not(&self) -> Item {
        evaluate_unary(UnaryOp::Not, self)
    }

    pub fn bitwise_not(&self) -> Item {
        evaluate_unary(UnaryOp::BitwiseNot, self)
    }

    pub fn negative(&self) -> Item {
        evaluate_unary(UnaryOp::Negative, self)
    }

    pub fn positive(&self) -> Item {
        evaluate_unary(UnaryOp::Positive, self)
    }

    pub fn inverse(&self) -> Item {
        evaluate_unary(UnaryOp::Inverse, self)
    }

    pub fn conditional(&self, then_term: &Item, else_term: &Item) -> Item {
        evaluate_conditional(self, then_term, else_term)
    }
}
