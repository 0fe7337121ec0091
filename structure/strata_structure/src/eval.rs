//! Evaluation and substitution of items against an interpreter.
//!
//! Constants evaluate to themselves. Expressions resolve against the top of
//! the scope stack. A record pushes itself as a scope while its members
//! evaluate, so members can refer to their siblings, and drops members that
//! come out undefined.

use strata_stack::ensure_sufficient_stack;

use crate::{Field, Interpreter, Item, Record, Value};

impl Item {
    pub fn evaluate(&self, interpreter: &mut Interpreter) -> Item {
        match self {
            Item::Field(field) => field.evaluate(interpreter),
            Item::Value(value) => value.evaluate(interpreter),
        }
    }

    pub fn substitute(&self, interpreter: &mut Interpreter) -> Item {
        match self {
            Item::Field(field) => field.substitute(interpreter),
            Item::Value(value) => value.substitute(interpreter),
        }
    }
}

impl Value {
    pub fn evaluate(&self, interpreter: &mut Interpreter) -> Item {
        match self {
            Value::Record(record) => record.evaluate(interpreter),
            Value::Operator(operator) => operator.evaluate(interpreter),
            Value::Selector(selector) => selector.evaluate(interpreter),
            _ => Item::Value(self.clone()),
        }
    }

    pub fn substitute(&self, interpreter: &mut Interpreter) -> Item {
        match self {
            Value::Record(record) => record.substitute(interpreter),
            Value::Operator(operator) => operator.substitute(interpreter),
            Value::Selector(selector) => selector.substitute(interpreter),
            _ => Item::Value(self.clone()),
        }
    }
}

impl Field {
    /// The field with its value evaluated, or `Absent` when the value
    /// evaluates to nothing.
    pub fn evaluate(&self, interpreter: &mut Interpreter) -> Item {
        if self.value().is_constant() {
            return Item::Field(self.clone());
        }
        let value = self.value().evaluate(interpreter).into_value();
        if value.is_defined() {
            Item::Field(self.updated_value(value))
        } else {
            Item::absent()
        }
    }

    pub fn substitute(&self, interpreter: &mut Interpreter) -> Item {
        if self.value().is_constant() {
            return Item::Field(self.clone());
        }
        let value = self.value().substitute(interpreter).into_value();
        if value.is_defined() {
            Item::Field(self.updated_value(value))
        } else {
            Item::absent()
        }
    }
}

impl Record {
    /// Evaluate every member with this record in scope.
    pub fn evaluate(&self, interpreter: &mut Interpreter) -> Item {
        if self.is_constant() {
            return Item::from(self.clone());
        }
        ensure_sufficient_stack(|| {
            self.with_own_scope(interpreter, |record, interpreter| {
                record
                    .iter()
                    .map(|member| member.evaluate(interpreter))
                    .filter(Item::is_defined)
                    .collect::<Record>()
            })
        })
    }

    /// Substitute every member with this record in scope.
    pub fn substitute(&self, interpreter: &mut Interpreter) -> Item {
        if self.is_constant() {
            return Item::from(self.clone());
        }
        ensure_sufficient_stack(|| {
            self.with_own_scope(interpreter, |record, interpreter| {
                record
                    .iter()
                    .map(|member| member.substitute(interpreter))
                    .filter(Item::is_defined)
                    .collect::<Record>()
            })
        })
    }

    /// Run `f` with this record pushed as a scope. On overflow the members
    /// are resolved against the enclosing scope instead.
    fn with_own_scope(
        &self,
        interpreter: &mut Interpreter,
        f: fn(&Record, &mut Interpreter) -> Record,
    ) -> Item {
        let record = interpreter
            .with_scope(Item::from(self.clone()), |scoped| f(self, scoped))
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "record resolved without its own scope");
                f(self, interpreter)
            });
        Item::from(record)
    }
}
