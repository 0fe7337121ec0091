//! `Display` and `Debug` for the item model.
//!
//! `Display` renders a compact markup: records in braces, attributes as
//! `@key` or `@key(value)`, slots as `key:value`, non-identifier text quoted,
//! data as `%` plus base64, operators infix with the parentheses their
//! precedence requires, and selectors as `$` paths.

use std::fmt;

use strata_stack::ensure_sufficient_stack;

use crate::operator::CONDITIONAL_PRECEDENCE;
use crate::{Field, FieldKind, Func, Item, Num, Operator, Record, Selector, Text, Value};

/// Precedence of unary operators, tighter than any binary operator.
const UNARY_PRECEDENCE: u8 = 2;

fn write_text(f: &mut fmt::Formatter<'_>, text: &Text) -> fmt::Result {
    if text.is_ident() {
        f.write_str(text)
    } else {
        write!(f, "{:?}", text.as_str())
    }
}

fn write_members<'a>(
    f: &mut fmt::Formatter<'_>,
    members: impl IntoIterator<Item = &'a Item>,
) -> fmt::Result {
    for (i, member) in members.into_iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{member}")?;
    }
    Ok(())
}

/// Binding strength of an operand; larger binds less tightly.
fn precedence(item: &Item) -> u8 {
    match item.as_value() {
        Value::Operator(Operator::Binary { op, .. }) => op.precedence(),
        Value::Operator(Operator::Conditional { .. }) => CONDITIONAL_PRECEDENCE,
        Value::Operator(Operator::Unary { .. }) => UNARY_PRECEDENCE,
        _ => 0,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Item, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl fmt::Debug for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hint().is_empty() {
            write!(f, "Num({})", self.value())
        } else {
            write!(f, "Num({}, {:?})", self.value(), self.hint())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent | Value::Extant => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Num(num) => write!(f, "{num}"),
            Value::Text(text) => write_text(f, text),
            Value::Data(data) => {
                write!(f, "%")?;
                data.write_base64(f)
            }
            Value::Record(record) => write!(f, "{record}"),
            Value::Func(func) => write!(f, "{func}"),
            Value::Operator(operator) => write!(f, "{operator}"),
            Value::Selector(selector) => write!(f, "{selector}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "Absent"),
            Value::Extant => write!(f, "Extant"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Num(num) => write!(f, "{num:?}"),
            Value::Text(text) => write!(f, "Text({text:?})"),
            Value::Data(data) => write!(f, "{data:?}"),
            Value::Record(record) => write!(f, "{record:?}"),
            Value::Func(func) => write!(f, "{func:?}"),
            Value::Operator(operator) => write!(f, "{operator:?}"),
            Value::Selector(selector) => write!(f, "Selector({selector})"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            FieldKind::Attr => {
                write!(f, "@{}", self.key())?;
                match self.value() {
                    Value::Extant => Ok(()),
                    Value::Record(record) => {
                        write!(f, "(")?;
                        write_members(f, record)?;
                        write!(f, ")")
                    }
                    value => write!(f, "({value})"),
                }
            }
            FieldKind::Slot => write!(f, "{}:{}", self.key(), self.value()),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.kind() {
            FieldKind::Attr => "Attr",
            FieldKind::Slot => "Slot",
        };
        f.debug_tuple(name).field(self.key()).field(self.value()).finish()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Field(field) => write!(f, "{field}"),
            Item::Value(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Field(field) => write!(f, "{field:?}"),
            Item::Value(value) => write!(f, "{value:?}"),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            write!(f, "{{")?;
            write_members(f, self)?;
            write!(f, "}}")
        })
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| {
            write!(f, "Record")?;
            f.debug_list().entries(self.iter()).finish()
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Conditional {
                if_term,
                then_term,
                else_term,
            } => {
                write_operand(f, if_term, precedence(if_term) >= CONDITIONAL_PRECEDENCE)?;
                write!(f, " ? ")?;
                write_operand(f, then_term, false)?;
                write!(f, " : ")?;
                write_operand(f, else_term, false)
            }
            Operator::Binary { op, lhs, rhs } => {
                let level = op.precedence();
                write_operand(f, lhs, precedence(lhs) > level)?;
                write!(f, " {} ", op.as_symbol())?;
                write_operand(f, rhs, precedence(rhs) >= level)
            }
            Operator::Unary { op, operand } => {
                write!(f, "{}", op.as_symbol())?;
                write_operand(f, operand, precedence(operand) > UNARY_PRECEDENCE)
            }
            Operator::Invoke { func, args } => {
                write!(f, "{func}(")?;
                match args.as_ref() {
                    Value::Record(record) => write_members(f, record)?,
                    arg => write!(f, "{arg}")?,
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Func::Lambda(lambda) => write!(f, "{} >> {}", lambda.bindings(), lambda.template()),
            Func::Bridge(bridge) => write!(f, "{}", bridge.name()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        let mut stage = self;
        let mut first = true;
        while let Some(then) = stage.then() {
            let dotted = !first && !matches!(stage, Selector::Filter { .. });
            if dotted {
                write!(f, ".")?;
            }
            match stage {
                Selector::Literal { item, .. } => write!(f, "({item})")?,
                Selector::Get { key, .. } => write!(f, "{key}")?,
                Selector::GetAttr { key, .. } => {
                    write!(f, "@")?;
                    write_text(f, key)?;
                }
                Selector::GetItem { index, .. } => write!(f, "#{index}")?,
                Selector::Keys { .. } => write!(f, "*:")?,
                Selector::Values { .. } => write!(f, ":*")?,
                Selector::Children { .. } => write!(f, "*")?,
                Selector::Descendants { .. } => write!(f, "**")?,
                Selector::Filter { predicate, .. } => write!(f, "[{predicate}]")?,
                Selector::Identity => {}
            }
            first = false;
            stage = then;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
