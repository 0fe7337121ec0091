//! Callable values reached through invoke operators.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Interpreter, Item, Operator, Record, Selector, Text, Value};

pub(crate) mod type_order {
    pub use crate::value::type_order::{BRIDGE, LAMBDA};
}

/// A callable value.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Func {
    Lambda(LambdaFunc),
    Bridge(BridgeFunc),
}

impl Func {
    pub fn type_order(&self) -> u8 {
        match self {
            Func::Lambda(_) => type_order::LAMBDA,
            Func::Bridge(_) => type_order::BRIDGE,
        }
    }

    /// Call with `args`, resolving each argument in the caller's scope.
    ///
    /// `caller` is the invoke operator being evaluated.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn invoke(&self, args: &Value, interpreter: &mut Interpreter, caller: &Operator) -> Item {
        match self {
            Func::Lambda(lambda) => lambda.invoke(args, interpreter),
            Func::Bridge(bridge) => bridge.invoke(args, interpreter, caller),
        }
    }

    /// Inline expansion during substitution. Bridges never expand.
    pub fn expand(&self, args: &Value, interpreter: &mut Interpreter) -> Option<Item> {
        match self {
            Func::Lambda(lambda) => Some(lambda.expand(args, interpreter)),
            Func::Bridge(_) => None,
        }
    }
}

impl From<LambdaFunc> for Func {
    fn from(lambda: LambdaFunc) -> Self {
        Func::Lambda(lambda)
    }
}

impl From<BridgeFunc> for Func {
    fn from(bridge: BridgeFunc) -> Self {
        Func::Bridge(bridge)
    }
}

/// A function defined in the structure itself: parameter bindings and a
/// template evaluated with those parameters in scope.
///
/// Bindings are a single name or a record of names; a name is a text or a
/// bare `Get` selector such as `$x`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LambdaFunc {
    bindings: Box<Value>,
    template: Box<Value>,
}

impl LambdaFunc {
    pub fn new(bindings: impl Into<Value>, template: impl Into<Value>) -> Self {
        LambdaFunc {
            bindings: Box::new(bindings.into()),
            template: Box::new(template.into()),
        }
    }

    pub fn bindings(&self) -> &Value {
        &self.bindings
    }

    pub fn template(&self) -> &Value {
        &self.template
    }

    fn binding_names(&self) -> Vec<Value> {
        match self.bindings.as_ref() {
            Value::Record(record) => record
                .iter()
                .filter_map(|item| binding_name(item.as_value()))
                .collect(),
            other => binding_name(other).into_iter().collect(),
        }
    }

    /// Bind positional `args` to parameter slots, resolving each argument
    /// with `resolve`.
    fn bind(
        &self,
        args: &Value,
        interpreter: &mut Interpreter,
        resolve: fn(&Item, &mut Interpreter) -> Item,
    ) -> Record {
        self.binding_names()
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let arg = match args {
                    Value::Record(record) => record.get_item(index).clone(),
                    other if index == 0 => Item::from(other.clone()),
                    _ => Item::absent(),
                };
                Item::slot(name, resolve(&arg, interpreter).into_value())
            })
            .collect()
    }

    fn invoke(&self, args: &Value, interpreter: &mut Interpreter) -> Item {
        let params = self.bind(args, interpreter, Item::evaluate);
        interpreter
            .with_scope(Item::from(params), |scoped| self.template.evaluate(scoped))
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "lambda invocation skipped");
                Item::absent()
            })
    }

    fn expand(&self, args: &Value, interpreter: &mut Interpreter) -> Item {
        let params = self.bind(args, interpreter, Item::substitute);
        interpreter
            .with_scope(Item::from(params), |scoped| self.template.substitute(scoped))
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "lambda expansion skipped");
                Item::absent()
            })
    }
}

fn binding_name(binding: &Value) -> Option<Value> {
    match binding {
        Value::Text(_) => Some(binding.clone()),
        Value::Selector(Selector::Get { key, then }) if matches!(**then, Selector::Identity) => {
            Some(key.as_ref().clone())
        }
        _ => None,
    }
}

type BridgeCall = dyn Fn(&Value, &mut Interpreter, &Operator) -> Item + Send + Sync;

/// A native function injected by the embedding application, such as a
/// member of a math namespace.
///
/// The native function receives the evaluated arguments, the interpreter
/// and the invoke operator that called it.
///
/// Identity is the name: two bridges with the same name are equal.
#[derive(Clone)]
pub struct BridgeFunc {
    name: Text,
    call: Arc<BridgeCall>,
}

impl BridgeFunc {
    pub fn new(
        name: impl Into<Text>,
        call: impl Fn(&Value, &mut Interpreter, &Operator) -> Item + Send + Sync + 'static,
    ) -> Self {
        BridgeFunc {
            name: name.into(),
            call: Arc::new(call),
        }
    }

    pub fn name(&self) -> &Text {
        &self.name
    }

    /// Evaluate `args` and hand them to the native function.
    fn invoke(&self, args: &Value, interpreter: &mut Interpreter, caller: &Operator) -> Item {
        let args = args.evaluate(interpreter).into_value();
        (self.call)(&args, interpreter, caller)
    }
}

impl PartialEq for BridgeFunc {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for BridgeFunc {}

impl PartialOrd for BridgeFunc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BridgeFunc {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for BridgeFunc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for BridgeFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BridgeFunc").field(&self.name).finish()
    }
}
