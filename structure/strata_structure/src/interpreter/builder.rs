//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use smallvec::SmallVec;

use super::{Interpreter, InterpreterObserver, InterpreterSettings, TracingObserver};
use crate::errors::scope_overflow;
use crate::{Item, StructureResult};

/// Builder for [`Interpreter`] instances.
///
/// ```text
/// let interpreter = Interpreter::builder()
///     .max_scope_depth(64)
///     .scope(globals)
///     .build()?;
/// ```
#[derive(Default)]
pub struct InterpreterBuilder {
    settings: InterpreterSettings,
    observer: Option<Box<dyn InterpreterObserver>>,
    scopes: Vec<Item>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder::default()
    }

    #[must_use]
    pub fn settings(mut self, settings: InterpreterSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn max_scope_depth(mut self, max_scope_depth: usize) -> Self {
        self.settings.max_scope_depth = max_scope_depth;
        self
    }

    /// Replace the default [`TracingObserver`].
    #[must_use]
    pub fn observer(mut self, observer: impl InterpreterObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Push an initial scope; later calls nest inside earlier ones.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<Item>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Fails when the initial scopes exceed the depth limit.
    pub fn build(self) -> StructureResult<Interpreter> {
        if self.scopes.len() > self.settings.max_scope_depth {
            return Err(scope_overflow(self.settings.max_scope_depth));
        }
        Ok(Interpreter {
            scopes: SmallVec::from_vec(self.scopes),
            settings: self.settings,
            observer: self
                .observer
                .unwrap_or_else(|| Box::new(TracingObserver)),
        })
    }
}
