//! Scope-stack interpreter for operators and selectors.
//!
//! The [`Interpreter`] owns an explicit stack of scopes. Selectors and
//! operators resolve lookups against the top of that stack, and every
//! traversal pushes and pops through it rather than holding scopes in native
//! locals, so [`Interpreter::scope_depth`] is always the true nesting depth.
//!
//! Instrumentation goes through an [`InterpreterObserver`]; the default
//! [`TracingObserver`] reports every hook as a `trace` event.

mod builder;
mod observer;
mod scope_guard;

use std::fmt;

use smallvec::SmallVec;

pub use builder::InterpreterBuilder;
pub use observer::{InterpreterObserver, TracingObserver};
pub use scope_guard::{LiftedScope, ScopedInterpreter};

use crate::errors::{scope_overflow, scope_underflow};
use crate::item::ABSENT_ITEM;
use crate::{Item, Operator, Selector, StructureResult};

/// Default limit on scope-stack depth.
pub const DEFAULT_MAX_SCOPE_DEPTH: usize = 1024;

/// Interpreter configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InterpreterSettings {
    /// Pushing past this many scopes fails with `ScopeOverflow`.
    pub max_scope_depth: usize,
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        InterpreterSettings {
            max_scope_depth: DEFAULT_MAX_SCOPE_DEPTH,
        }
    }
}

/// Evaluation context: a scope stack plus instrumentation hooks.
pub struct Interpreter {
    scopes: SmallVec<[Item; 8]>,
    settings: InterpreterSettings,
    observer: Box<dyn InterpreterObserver>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            scopes: SmallVec::new(),
            settings: InterpreterSettings::default(),
            observer: Box::new(TracingObserver),
        }
    }

    /// An interpreter whose global scope is `scope`.
    pub fn from_scope(scope: impl Into<Item>) -> Self {
        let mut interpreter = Interpreter::new();
        interpreter.scopes.push(scope.into());
        interpreter
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn settings(&self) -> &InterpreterSettings {
        &self.settings
    }

    // Scope stack

    #[inline]
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// The scope stack, outermost first.
    pub fn scopes(&self) -> &[Item] {
        &self.scopes
    }

    pub fn push_scope(&mut self, scope: impl Into<Item>) -> StructureResult<()> {
        if self.scopes.len() >= self.settings.max_scope_depth {
            return Err(scope_overflow(self.settings.max_scope_depth));
        }
        self.scopes.push(scope.into());
        Ok(())
    }

    pub fn pop_scope(&mut self) -> StructureResult<Item> {
        self.scopes.pop().ok_or_else(scope_underflow)
    }

    #[inline]
    pub fn peek_scope(&self) -> Option<&Item> {
        self.scopes.last()
    }

    /// Replace the top scope, returning the one it replaced.
    pub fn swap_scope(&mut self, scope: impl Into<Item>) -> StructureResult<Item> {
        match self.scopes.last_mut() {
            Some(top) => Ok(std::mem::replace(top, scope.into())),
            None => Err(scope_underflow()),
        }
    }

    /// Drop scopes above `depth`.
    pub(crate) fn truncate_scopes(&mut self, depth: usize) {
        self.scopes.truncate(depth);
    }

    /// Push without the depth check; restores a scope that was lifted.
    pub(crate) fn restore_scope(&mut self, scope: Item) {
        self.scopes.push(scope);
    }

    fn top(&self) -> &Item {
        self.scopes.last().unwrap_or(&ABSENT_ITEM)
    }

    // Hooks

    pub(crate) fn will_select(&mut self, selector: &Selector) {
        let scope = self.scopes.last().unwrap_or(&ABSENT_ITEM);
        self.observer.will_select(scope, selector);
    }

    pub(crate) fn did_select(&mut self, selector: &Selector, selected: bool) {
        let scope = self.scopes.last().unwrap_or(&ABSENT_ITEM);
        self.observer.did_select(scope, selector, selected);
    }

    pub(crate) fn will_transform(&mut self, selector: &Selector) {
        let scope = self.scopes.last().unwrap_or(&ABSENT_ITEM);
        self.observer.will_transform(scope, selector);
    }

    pub(crate) fn did_transform(&mut self, selector: &Selector, result: &Item) {
        let scope = self.scopes.last().unwrap_or(&ABSENT_ITEM);
        self.observer.did_transform(scope, selector, result);
    }

    pub(crate) fn will_operate(&mut self, operator: &Operator) {
        self.observer.will_operate(operator);
    }

    pub(crate) fn did_operate(&mut self, operator: &Operator, result: &Item) {
        self.observer.did_operate(operator, result);
    }
}

impl fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpreter")
            .field("scope", self.top())
            .field("scope_depth", &self.scope_depth())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
