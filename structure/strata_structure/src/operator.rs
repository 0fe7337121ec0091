//! Symbolic operator nodes.
//!
//! An [`Operator`] is a deferred computation. It is built whenever an
//! operator is applied to an expression operand, and resolved later against
//! an [`Interpreter`] scope by [`Operator::evaluate`] or partially resolved by
//! [`Operator::substitute`].

use strata_stack::ensure_sufficient_stack;

use crate::ops::{evaluate_binary, evaluate_conditional, evaluate_unary};
use crate::{Interpreter, Item, Value};

/// Binary operators, in sort order.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Bitwise
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,

    // Comparison
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,

    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseAnd => "&",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Ge => ">=",
            Self::Gt => ">",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    /// Returns the precedence level of this operator.
    ///
    /// Higher number = lower precedence (binds less tightly).
    /// Used when rendering to decide where parentheses are needed.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Times | Self::Divide | Self::Modulo => 3,
            Self::Plus | Self::Minus => 4,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 7,
            Self::Eq | Self::Ne => 8,
            Self::BitwiseAnd => 9,
            Self::BitwiseXor => 10,
            Self::BitwiseOr => 11,
            Self::And => 12,
            Self::Or => 13,
        }
    }

    pub const fn type_order(self) -> u8 {
        match self {
            Self::Or => 21,
            Self::And => 22,
            Self::BitwiseOr => 23,
            Self::BitwiseXor => 24,
            Self::BitwiseAnd => 25,
            Self::Lt => 26,
            Self::Le => 27,
            Self::Eq => 28,
            Self::Ne => 29,
            Self::Ge => 30,
            Self::Gt => 31,
            Self::Plus => 32,
            Self::Minus => 33,
            Self::Times => 34,
            Self::Divide => 35,
            Self::Modulo => 36,
        }
    }
}

/// Unary operators, in sort order.
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug)]
pub enum UnaryOp {
    Not,
    BitwiseNot,
    Negative,
    Positive,
    Inverse,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Not => "!",
            Self::BitwiseNot => "~",
            Self::Negative => "-",
            Self::Positive => "+",
            Self::Inverse => "/",
        }
    }

    pub const fn type_order(self) -> u8 {
        match self {
            Self::Not => 37,
            Self::BitwiseNot => 38,
            Self::Negative => 39,
            Self::Positive => 40,
            Self::Inverse => 41,
        }
    }
}

/// Precedence of the conditional operator, below every binary operator.
pub(crate) const CONDITIONAL_PRECEDENCE: u8 = 14;

pub(crate) mod type_order {
    pub const CONDITIONAL: u8 = 20;
    pub const INVOKE: u8 = 42;
}

/// A deferred computation over items.
///
/// Variant order matches type order, so the derived ordering is the
/// same-kind tie-break on operands.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Operator {
    /// `if_term ? then_term : else_term`
    Conditional {
        if_term: Box<Item>,
        then_term: Box<Item>,
        else_term: Box<Item>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Item>,
        rhs: Box<Item>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Item>,
    },
    /// Call of `func` with `args`; a record of `args` is positional.
    Invoke { func: Box<Value>, args: Box<Value> },
}

impl Operator {
    pub fn conditional(
        if_term: impl Into<Item>,
        then_term: impl Into<Item>,
        else_term: impl Into<Item>,
    ) -> Self {
        Operator::Conditional {
            if_term: Box::new(if_term.into()),
            then_term: Box::new(then_term.into()),
            else_term: Box::new(else_term.into()),
        }
    }

    pub fn binary(op: BinaryOp, lhs: impl Into<Item>, rhs: impl Into<Item>) -> Self {
        Operator::Binary {
            op,
            lhs: Box::new(lhs.into()),
            rhs: Box::new(rhs.into()),
        }
    }

    pub fn unary(op: UnaryOp, operand: impl Into<Item>) -> Self {
        Operator::Unary {
            op,
            operand: Box::new(operand.into()),
        }
    }

    pub fn invoke(func: impl Into<Value>, args: impl Into<Value>) -> Self {
        Operator::Invoke {
            func: Box::new(func.into()),
            args: Box::new(args.into()),
        }
    }

    pub fn type_order(&self) -> u8 {
        match self {
            Operator::Conditional { .. } => type_order::CONDITIONAL,
            Operator::Binary { op, .. } => op.type_order(),
            Operator::Unary { op, .. } => op.type_order(),
            Operator::Invoke { .. } => type_order::INVOKE,
        }
    }

    /// Resolve against the interpreter's scope.
    ///
    /// `||`, `&&` and the conditional short-circuit. A result that is still
    /// symbolic collapses to `Absent`.
    #[tracing::instrument(level = "trace", skip_all, fields(order = self.type_order()))]
    pub fn evaluate(&self, interpreter: &mut Interpreter) -> Item {
        interpreter.will_operate(self);
        let result = ensure_sufficient_stack(|| self.evaluate_operands(interpreter));
        interpreter.did_operate(self, &result);
        result
    }

    fn evaluate_operands(&self, interpreter: &mut Interpreter) -> Item {
        match self {
            Operator::Conditional {
                if_term,
                then_term,
                else_term,
            } => {
                if if_term.evaluate(interpreter).is_definite() {
                    then_term.evaluate(interpreter)
                } else {
                    else_term.evaluate(interpreter)
                }
            }
            Operator::Binary {
                op: BinaryOp::Or,
                lhs,
                rhs,
            } => {
                let lhs = lhs.evaluate(interpreter);
                if lhs.is_definite() {
                    lhs
                } else {
                    rhs.evaluate(interpreter)
                }
            }
            Operator::Binary {
                op: BinaryOp::And,
                lhs,
                rhs,
            } => {
                let lhs = lhs.evaluate(interpreter);
                if lhs.is_definite() {
                    rhs.evaluate(interpreter)
                } else {
                    lhs
                }
            }
            Operator::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(interpreter);
                let rhs = rhs.evaluate(interpreter);
                collapse(evaluate_binary(*op, &lhs, &rhs))
            }
            Operator::Unary { op, operand } => {
                let operand = operand.evaluate(interpreter);
                collapse(evaluate_unary(*op, &operand))
            }
            Operator::Invoke { func, args } => match func.evaluate(interpreter).into_value() {
                Value::Func(func) => func.invoke(args, interpreter, self),
                _ => Item::absent(),
            },
        }
    }

    /// Resolve what the scope can resolve, keeping the rest symbolic.
    pub fn substitute(&self, interpreter: &mut Interpreter) -> Item {
        ensure_sufficient_stack(|| match self {
            Operator::Conditional {
                if_term,
                then_term,
                else_term,
            } => {
                let condition = if_term.substitute(interpreter);
                if condition.is_expression() {
                    let then_term = then_term.substitute(interpreter);
                    let else_term = else_term.substitute(interpreter);
                    evaluate_conditional(&condition, &then_term, &else_term)
                } else if condition.is_definite() {
                    then_term.substitute(interpreter)
                } else {
                    else_term.substitute(interpreter)
                }
            }
            Operator::Binary { op, lhs, rhs } => {
                let lhs = lhs.substitute(interpreter);
                let rhs = rhs.substitute(interpreter);
                evaluate_binary(*op, &lhs, &rhs)
            }
            Operator::Unary { op, operand } => {
                let operand = operand.substitute(interpreter);
                evaluate_unary(*op, &operand)
            }
            Operator::Invoke { func, args } => {
                let func = func.substitute(interpreter).into_value();
                let args = args.substitute(interpreter).into_value();
                if let Value::Func(callee) = &func {
                    if let Some(expanded) = callee.expand(&args, interpreter) {
                        return expanded;
                    }
                }
                Item::from(Operator::invoke(func, args))
            }
        })
    }
}

/// Symbolic leftovers after evaluation mean the result is undefined.
fn collapse(item: Item) -> Item {
    if item.is_expression() {
        Item::absent()
    } else {
        item
    }
}
