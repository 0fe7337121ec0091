//! Selector traversal: `for_selected`, `map_selected`, `evaluate`.
//!
//! Every stage that selects out of a record lifts the current scope off the
//! stack and pushes each selected member in its place, so the stack depth
//! seen by the continuation equals the depth seen by the stage. Guards
//! restore the stack on every exit path, including short-circuits.

use strata_stack::ensure_sufficient_stack;

use super::Selector;
use crate::errors::scope_underflow;
use crate::record::rposition_field;
use crate::{Field, FieldKind, Interpreter, Item, Num, Record, StructureResult, Value};

/// What happened to a member after its selection was transformed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Outcome {
    Kept,
    Replaced,
    Deleted,
}

impl Selector {
    /// Visit every scope this pipeline selects.
    ///
    /// `callback` runs with each selection on top of the interpreter's
    /// scope stack. The first `Some` it returns stops the walk and is
    /// returned. The stack is left exactly as it was found.
    pub fn for_selected<T, F>(&self, interpreter: &mut Interpreter, callback: &mut F) -> Option<T>
    where
        F: FnMut(&mut Interpreter) -> Option<T>,
    {
        interpreter.will_select(self);
        let selected = ensure_sufficient_stack(|| self.select(interpreter, callback));
        interpreter.did_select(self, selected.is_some());
        selected
    }

    fn select<T, F>(&self, interpreter: &mut Interpreter, callback: &mut F) -> Option<T>
    where
        F: FnMut(&mut Interpreter) -> Option<T>,
    {
        match self {
            Selector::Identity => callback(interpreter),
            Selector::Literal { item, then } => {
                let literal = item.evaluate(interpreter);
                if literal.is_defined() {
                    select_in(interpreter, literal, then, callback)
                } else {
                    None
                }
            }
            Selector::Get { key, then } => {
                let key = resolve_key(key, interpreter);
                select_field(interpreter, &key, None, then, callback)
            }
            Selector::GetAttr { key, then } => {
                let key = Value::Text(key.clone());
                select_field(interpreter, &key, Some(FieldKind::Attr), then, callback)
            }
            Selector::GetItem { index, then } => {
                let mut lifted = interpreter.lift_scope()?;
                let member = {
                    let record = lifted.scope().as_value().as_record()?;
                    record.get_item(member_index(*index, record.len())?).clone()
                };
                select_in(&mut lifted, member, then, callback)
            }
            Selector::Keys { then } => {
                let mut lifted = interpreter.lift_scope()?;
                let record = lifted.scope().as_value().as_record()?.clone();
                record.iter().find_map(|member| {
                    let field = member.as_field()?;
                    select_in(&mut lifted, Item::from(field.key()), then, callback)
                })
            }
            Selector::Values { then } => {
                let mut lifted = interpreter.lift_scope()?;
                let record = lifted.scope().as_value().as_record()?.clone();
                record
                    .iter()
                    .find_map(|member| select_in(&mut lifted, Item::from(member.as_value()), then, callback))
            }
            Selector::Children { then } => {
                let mut lifted = interpreter.lift_scope()?;
                let record = lifted.scope().as_value().as_record()?.clone();
                record
                    .iter()
                    .find_map(|member| select_in(&mut lifted, Item::from(member.as_value()), then, callback))
            }
            Selector::Descendants { then } => {
                let mut lifted = interpreter.lift_scope()?;
                let record = lifted.scope().as_value().as_record()?.clone();
                record.iter().find_map(|member| {
                    let selection = Item::from(member.as_value());
                    let nested = selection.as_value().as_record().is_some();
                    lifted
                        .with_scope(selection, |scoped| {
                            let selected = then.for_selected(scoped, callback);
                            if selected.is_none() && nested {
                                self.for_selected(scoped, callback)
                            } else {
                                selected
                            }
                        })
                        .unwrap_or_else(|error| {
                            tracing::warn!(%error, "descendant skipped");
                            None
                        })
                })
            }
            Selector::Filter { predicate, then } => {
                if predicate.evaluate(interpreter).is_defined() {
                    then.for_selected(interpreter, callback)
                } else {
                    None
                }
            }
        }
    }

    /// Rewrite every selection in the top scope.
    ///
    /// `transform` receives each selected item and returns its replacement.
    /// An `Absent` replacement deletes the member that held the selection; a
    /// replacement equal to the selection leaves the member untouched. The
    /// rewritten scope replaces the top of the stack and is returned.
    ///
    /// Fails when a member must change inside a committed record, or when
    /// the scope stack is empty or overflows.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn map_selected<F>(&self, interpreter: &mut Interpreter, mut transform: F) -> StructureResult<Item>
    where
        F: FnMut(&mut Interpreter, &Item) -> Item,
    {
        if interpreter.peek_scope().is_none() {
            return Err(scope_underflow());
        }
        let result = self.transform_selected(interpreter, &mut transform)?;
        interpreter.swap_scope(result.clone())?;
        Ok(result)
    }

    /// The top scope with this pipeline's selections transformed. The stack
    /// itself is left unchanged.
    fn transform_selected<F>(&self, interpreter: &mut Interpreter, transform: &mut F) -> StructureResult<Item>
    where
        F: FnMut(&mut Interpreter, &Item) -> Item,
    {
        interpreter.will_transform(self);
        let result = ensure_sufficient_stack(|| self.transform(interpreter, transform))?;
        interpreter.did_transform(self, &result);
        Ok(result)
    }

    fn transform<F>(&self, interpreter: &mut Interpreter, transform: &mut F) -> StructureResult<Item>
    where
        F: FnMut(&mut Interpreter, &Item) -> Item,
    {
        match self {
            Selector::Identity => {
                let scope = interpreter.peek_scope().cloned().unwrap_or_default();
                Ok(transform(interpreter, &scope))
            }
            Selector::Literal { .. } => Ok(interpreter.peek_scope().cloned().unwrap_or_default()),
            Selector::Get { key, then } => {
                let key = resolve_key(key, interpreter);
                map_record(interpreter, |interpreter, record| {
                    match rposition_field(record.as_slice(), &key, None) {
                        Some(index) => map_field_value(interpreter, record, index, then, transform),
                        None => Ok(false),
                    }
                })
            }
            Selector::GetAttr { key, then } => map_record(interpreter, |interpreter, record| {
                match rposition_field(record.as_slice(), key, Some(FieldKind::Attr)) {
                    Some(index) => map_field_value(interpreter, record, index, then, transform),
                    None => Ok(false),
                }
            }),
            Selector::GetItem { index, then } => map_record(interpreter, |interpreter, record| {
                let Some(index) = member_index(*index, record.len()) else {
                    return Ok(false);
                };
                let member = record.get_item(index).clone();
                let result = map_in(interpreter, member.clone(), then, transform)?;
                Ok(apply(record, index, &member, result, None)? != Outcome::Kept)
            }),
            Selector::Keys { then } => map_record(interpreter, |interpreter, record| {
                let mut changed = false;
                let mut cursor = record.cursor();
                while let Some(member) = cursor.head().cloned() {
                    let Item::Field(field) = member else {
                        cursor.step();
                        continue;
                    };
                    let key = Item::from(field.key());
                    let result = map_in(interpreter, key.clone(), then, transform)?;
                    if !result.is_defined() {
                        cursor.delete()?;
                        changed = true;
                        continue;
                    }
                    if result != key {
                        let kind = field.kind();
                        let (_, value) = field.into_parts();
                        cursor.set(Field::of_kind(kind, result.into_value(), value))?;
                        changed = true;
                    }
                    cursor.step();
                }
                Ok(changed)
            }),
            Selector::Values { then } => map_record(interpreter, |interpreter, record| {
                map_members(interpreter, record, |interpreter, member| {
                    let selection = Item::from(member.as_value());
                    let result = map_in(interpreter, selection.clone(), then, transform)?;
                    Ok((selection, result))
                })
            }),
            Selector::Children { then } => map_record(interpreter, |interpreter, record| {
                map_members(interpreter, record, |interpreter, member| {
                    let selection = Item::from(member.as_value());
                    let result = map_in(interpreter, selection.clone(), then, transform)?;
                    Ok((selection, result))
                })
            }),
            Selector::Descendants { then } => map_record(interpreter, |interpreter, record| {
                map_members(interpreter, record, |interpreter, member| {
                    let selection = Item::from(member.as_value());
                    let result = map_in(interpreter, selection.clone(), then, transform)?;
                    if result == selection && selection.as_value().as_record().is_some() {
                        let result = map_in(interpreter, selection.clone(), self, transform)?;
                        return Ok((selection, result));
                    }
                    Ok((selection, result))
                })
            }),
            Selector::Filter { predicate, then } => {
                if predicate.evaluate(interpreter).is_defined() {
                    then.transform_selected(interpreter, transform)
                } else {
                    Ok(interpreter.peek_scope().cloned().unwrap_or_default())
                }
            }
        }
    }

    /// Collect every selection: `Absent` when there is none, the selection
    /// itself when there is one, and a record of all of them otherwise.
    pub fn evaluate(&self, interpreter: &mut Interpreter) -> Item {
        let mut selected: Vec<Item> = Vec::new();
        self.for_selected(interpreter, &mut |interpreter: &mut Interpreter| -> Option<()> {
            if let Some(scope) = interpreter.peek_scope() {
                selected.push(scope.clone());
            }
            None
        });
        match selected.len() {
            0 => Item::absent(),
            1 => selected.pop().unwrap_or_default(),
            _ => Item::from(Record::from(selected)),
        }
    }

    /// The selection when the scope resolves it, otherwise this selector.
    pub fn substitute(&self, interpreter: &mut Interpreter) -> Item {
        let selected = self.evaluate(interpreter);
        if selected.is_defined() {
            selected
        } else {
            Item::from(self.clone())
        }
    }
}

/// Evaluate an expression key; literal keys are used as is.
fn resolve_key(key: &Value, interpreter: &mut Interpreter) -> Value {
    if key.is_expression() {
        key.evaluate(interpreter).into_value()
    } else {
        key.clone()
    }
}

/// A non-negative integral index below `len`.
fn member_index(index: Num, len: usize) -> Option<usize> {
    let value = index.value();
    if value.is_nan() || value < 0.0 || value.fract() != 0.0 {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "checked non-negative and integral above"
    )]
    let index = value as usize;
    (index < len).then_some(index)
}

/// Run `then` with `scope` pushed. Overflow skips the selection.
fn select_in<T, F>(interpreter: &mut Interpreter, scope: Item, then: &Selector, callback: &mut F) -> Option<T>
where
    F: FnMut(&mut Interpreter) -> Option<T>,
{
    interpreter
        .with_scope(scope, |scoped| then.for_selected(scoped, callback))
        .unwrap_or_else(|error| {
            tracing::warn!(%error, "selection skipped");
            None
        })
}

/// Look `key` up in the top scope only. A scope that is not a record, or
/// has no such key, selects nothing.
fn select_field<T, F>(
    interpreter: &mut Interpreter,
    key: &Value,
    kind: Option<FieldKind>,
    then: &Selector,
    callback: &mut F,
) -> Option<T>
where
    F: FnMut(&mut Interpreter) -> Option<T>,
{
    let mut lifted = interpreter.lift_scope()?;
    let found = lifted
        .scope()
        .as_value()
        .as_record()
        .and_then(|record| rposition_field(record.as_slice(), key, kind).map(|index| record.get_item(index).to_value()));
    match found {
        Some(value) => select_in(&mut lifted, Item::Value(value), then, callback),
        None => None,
    }
}

/// Transform `scope` through `then` with `scope` pushed.
fn map_in<F>(interpreter: &mut Interpreter, scope: Item, then: &Selector, transform: &mut F) -> StructureResult<Item>
where
    F: FnMut(&mut Interpreter, &Item) -> Item,
{
    interpreter.with_scope(scope, |scoped| then.transform_selected(scoped, transform))?
}

/// Lift the top scope and run `f` on a working copy of its record.
///
/// `f` reports whether it changed the record. The copy shares members with
/// the original until the first write, so an unchanged scope is returned as
/// is and a committed one only fails when written.
fn map_record<F>(interpreter: &mut Interpreter, f: F) -> StructureResult<Item>
where
    F: FnOnce(&mut Interpreter, &mut Record) -> StructureResult<bool>,
{
    let Some(mut lifted) = interpreter.lift_scope() else {
        return Err(scope_underflow());
    };
    let scope = lifted.scope().clone();
    let Some(record) = scope.as_value().as_record() else {
        return Ok(scope);
    };
    let mut record = record.clone();
    if !f(&mut *lifted, &mut record)? {
        return Ok(scope);
    }
    Ok(match &scope {
        Item::Field(field) => Item::Field(field.updated_value(record)),
        Item::Value(_) => Item::from(record),
    })
}

/// Transform the value of the field at `index` and write it back.
fn map_field_value<F>(
    interpreter: &mut Interpreter,
    record: &mut Record,
    index: usize,
    then: &Selector,
    transform: &mut F,
) -> StructureResult<bool>
where
    F: FnMut(&mut Interpreter, &Item) -> Item,
{
    let member = record.get_item(index).clone();
    let selection = Item::from(member.as_value());
    let result = map_in(interpreter, selection.clone(), then, transform)?;
    Ok(apply(record, index, &selection, result, member.as_field())? != Outcome::Kept)
}

/// Walk every member with a cursor, rewriting each from the pair
/// `(selection, result)` that `f` returns for it.
fn map_members<F>(interpreter: &mut Interpreter, record: &mut Record, mut f: F) -> StructureResult<bool>
where
    F: FnMut(&mut Interpreter, &Item) -> StructureResult<(Item, Item)>,
{
    let mut changed = false;
    let mut cursor = record.cursor();
    while let Some(member) = cursor.head().cloned() {
        let (selection, result) = f(interpreter, &member)?;
        if !result.is_defined() {
            cursor.delete()?;
            changed = true;
            continue;
        }
        if result != selection {
            let replacement = match (&member, selection.is_field()) {
                (Item::Field(field), false) => Item::Field(field.updated_value(result.into_value())),
                _ => result,
            };
            cursor.set(replacement)?;
            changed = true;
        }
        cursor.step();
    }
    Ok(changed)
}

/// Write `result` back over the member at `index`.
///
/// `field` is the member when the selection was its value rather than the
/// member itself; a changed value is then rewrapped in that field.
fn apply(
    record: &mut Record,
    index: usize,
    selection: &Item,
    result: Item,
    field: Option<&Field>,
) -> StructureResult<Outcome> {
    if !result.is_defined() {
        record.remove(index)?;
        return Ok(Outcome::Deleted);
    }
    if result == *selection {
        return Ok(Outcome::Kept);
    }
    let replacement = match field {
        Some(field) => Item::Field(field.updated_value(result.into_value())),
        None => result,
    };
    record.set_item(index, replacement)?;
    Ok(Outcome::Replaced)
}
