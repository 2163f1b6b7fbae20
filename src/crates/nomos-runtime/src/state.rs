// state.rs

use miette::SourceSpan;
use nomos_sema::TypeArena;

use crate::bindings::Frame;
use crate::errors::EvalError;
use crate::options::EvalOptions;
use crate::store::ValueStore;
use crate::value::Value;

/// Everything evaluation mutates besides the scope chain.
#[derive(Debug, Default)]
pub struct EvalState {
    pub arena: TypeArena,
    pub store: ValueStore,
    options: EvalOptions,
    depth: usize,
}

impl EvalState {
    pub fn new(arena: TypeArena, options: EvalOptions) -> Self {
        Self {
            arena,
            store: ValueStore::new(),
            options,
            depth: 0,
        }
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Current call nesting.
    pub fn call_depth(&self) -> usize {
        self.depth
    }

    /// Follow `Ref` handles to the value they name.
    pub fn resolve(&self, value: &Value, span: SourceSpan) -> Result<Value, EvalError> {
        let mut current = value;
        while let Value::Ref(r) = current {
            current = self
                .store
                .get(*r)
                .ok_or(EvalError::DanglingReference { span })?;
        }
        Ok(current.clone())
    }

    /// Release every store slot a scope's bindings own.
    pub fn release_frame(&mut self, frame: Frame) {
        for value in frame.into_values() {
            if let Value::Ref(r) = value {
                self.store.release(r);
            }
        }
    }

    pub(crate) fn enter_call(&mut self, span: SourceSpan) -> Result<(), EvalError> {
        if self.depth >= self.options.max_call_depth {
            tracing::debug!(depth = self.depth, "call depth limit reached");
            return Err(EvalError::CallDepthExceeded {
                limit: self.options.max_call_depth,
                span,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_call(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
