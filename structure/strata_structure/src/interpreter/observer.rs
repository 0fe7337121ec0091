//! Instrumentation hooks.

use crate::{Item, Operator, Selector};

/// Receives the interpreter's lifecycle hooks.
///
/// `scope` is the top of the scope stack when the hook fires, or `Absent`
/// when the stack is empty. Every method defaults to a no-op.
pub trait InterpreterObserver {
    fn will_select(&mut self, scope: &Item, selector: &Selector) {
        let _ = (scope, selector);
    }

    fn did_select(&mut self, scope: &Item, selector: &Selector, selected: bool) {
        let _ = (scope, selector, selected);
    }

    fn will_transform(&mut self, scope: &Item, selector: &Selector) {
        let _ = (scope, selector);
    }

    fn did_transform(&mut self, scope: &Item, selector: &Selector, result: &Item) {
        let _ = (scope, selector, result);
    }

    fn will_operate(&mut self, operator: &Operator) {
        let _ = operator;
    }

    fn did_operate(&mut self, operator: &Operator, result: &Item) {
        let _ = (operator, result);
    }
}

/// Reports every hook as a `trace` event on the `strata_structure` target.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingObserver;

impl InterpreterObserver for TracingObserver {
    fn will_select(&mut self, scope: &Item, selector: &Selector) {
        tracing::trace!(%scope, %selector, "will select");
    }

    fn did_select(&mut self, scope: &Item, selector: &Selector, selected: bool) {
        tracing::trace!(%scope, %selector, selected, "did select");
    }

    fn will_transform(&mut self, scope: &Item, selector: &Selector) {
        tracing::trace!(%scope, %selector, "will transform");
    }

    fn did_transform(&mut self, scope: &Item, selector: &Selector, result: &Item) {
        tracing::trace!(%scope, %selector, %result, "did transform");
    }

    fn will_operate(&mut self, operator: &Operator) {
        tracing::trace!(%operator, "will operate");
    }

    fn did_operate(&mut self, operator: &Operator, result: &Item) {
        tracing::trace!(%operator, %result, "did operate");
    }
}
