//! RAII-style scope guards for the interpreter's scope stack.
//!
//! Both guards record the stack depth they start from and restore it when
//! dropped, including during unwinding and on early return from a
//! short-circuiting traversal.
//!
//! # Usage
//!
//! ```text
//! // Push a scope for the guard's lifetime
//! {
//!     let mut scoped = interpreter.scoped(params)?;
//!     template.evaluate(&mut scoped);
//! } // stack truncated here
//!
//! // Take the top scope out of view, put it back afterwards
//! if let Some(lifted) = interpreter.lift_scope() {
//!     let scope = lifted.scope().clone();
//!     ...
//! } // scope pushed back here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::{Item, StructureResult};

/// Guard for a pushed scope.
///
/// Access the interpreter through this guard; it implements `Deref` and
/// `DerefMut`. On drop the stack is truncated to the depth it had before
/// the push, which also discards anything a callee failed to pop.
pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    depth: usize,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.truncate_scopes(self.depth);
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// Guard for a scope popped off the top of the stack.
///
/// While the guard lives, the lifted scope is out of view and selections
/// pushed through the guard take its place. On drop the stack is truncated back to the depth just
/// after the pop and the lifted scope (or its [`replace`](Self::replace)ment)
/// is pushed back.
pub struct LiftedScope<'a> {
    interpreter: &'a mut Interpreter,
    scope: Option<Item>,
    depth: usize,
}

impl LiftedScope<'_> {
    /// The lifted scope.
    pub fn scope(&self) -> &Item {
        self.scope.as_ref().unwrap_or(&crate::item::ABSENT_ITEM)
    }

    /// Restore `scope` instead of the original on drop.
    pub fn replace(&mut self, scope: Item) -> Option<Item> {
        self.scope.replace(scope)
    }
}

impl Drop for LiftedScope<'_> {
    fn drop(&mut self) {
        self.interpreter.truncate_scopes(self.depth);
        if let Some(scope) = self.scope.take() {
            self.interpreter.restore_scope(scope);
        }
    }
}

impl Deref for LiftedScope<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for LiftedScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push `scope` and return a guard that pops it on drop.
    pub fn scoped(&mut self, scope: impl Into<Item>) -> StructureResult<ScopedInterpreter<'_>> {
        let depth = self.scope_depth();
        self.push_scope(scope)?;
        Ok(ScopedInterpreter {
            interpreter: self,
            depth,
        })
    }

    /// Run `f` with `scope` pushed; the stack is restored afterwards.
    pub fn with_scope<T, F>(&mut self, scope: impl Into<Item>, f: F) -> StructureResult<T>
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped(scope)?;
        Ok(f(&mut scoped))
    }

    /// Pop the top scope into a guard that pushes it back on drop.
    ///
    /// Returns `None` when the stack is empty.
    pub fn lift_scope(&mut self) -> Option<LiftedScope<'_>> {
        let scope = self.scopes.pop()?;
        let depth = self.scope_depth();
        Some(LiftedScope {
            interpreter: self,
            scope: Some(scope),
            depth,
        })
    }

    /// Run `f` with the top scope lifted; the stack is restored afterwards.
    pub fn with_lifted_scope<T, F>(&mut self, f: F) -> Option<T>
    where
        F: FnOnce(&mut LiftedScope<'_>) -> T,
    {
        let mut lifted = self.lift_scope()?;
        Some(f(&mut lifted))
    }
}
