// callable.rs
//! Function values: host-provided natives and evaluated lambdas.

use std::fmt;
use std::rc::Rc;

use miette::SourceSpan;
use nomos_sema::{TypeArena, TypeId};

use crate::bindings::Bindings;
use crate::errors::EvalError;
use crate::expr::TypedExpr;
use crate::state::EvalState;
use crate::value::Value;

/// Anything a call expression can invoke.
///
/// The evaluator checks arity and call depth before `call`; implementations
/// receive exactly `arity()` resolved arguments.
pub trait Callable {
    /// Function type of this callable.
    fn ty(&self) -> TypeId;

    fn arity(&self) -> usize;

    fn call(&self, state: &mut EvalState, args: Vec<Value>, span: SourceSpan) -> Result<Value, EvalError>;
}

impl fmt::Debug for dyn Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("ty", &self.ty())
            .field("arity", &self.arity())
            .finish()
    }
}

pub type NativeBody = dyn Fn(&mut EvalState, &[Value], SourceSpan) -> Result<Value, EvalError>;

/// A function implemented by the host.
pub struct NativeFunction {
    name: String,
    ty: TypeId,
    arity: usize,
    body: Box<NativeBody>,
}

impl NativeFunction {
    /// Wrap `body` as a function of type `ty`, which must be a function type.
    pub fn new(
        arena: &TypeArena,
        name: impl Into<String>,
        ty: TypeId,
        body: impl Fn(&mut EvalState, &[Value], SourceSpan) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        let arity = arena.unwrap_function(ty).map_or(0, |(params, _)| params.len());
        Self {
            name: name.into(),
            ty,
            arity,
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Callable for NativeFunction {
    fn ty(&self) -> TypeId {
        self.ty
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, state: &mut EvalState, args: Vec<Value>, span: SourceSpan) -> Result<Value, EvalError> {
        (self.body)(state, &args, span)
    }
}

/// A function value produced by a lambda expression. Captures resolved
/// copies of the bindings visible where it was created.
#[derive(Debug)]
pub struct LambdaFunction {
    params: Vec<String>,
    body: Rc<TypedExpr>,
    captured: Vec<(String, Value)>,
    ty: TypeId,
}

impl LambdaFunction {
    pub fn new(params: Vec<String>, body: Rc<TypedExpr>, captured: Vec<(String, Value)>, ty: TypeId) -> Self {
        Self {
            params,
            body,
            captured,
            ty,
        }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl Callable for LambdaFunction {
    fn ty(&self) -> TypeId {
        self.ty
    }

    fn arity(&self) -> usize {
        self.params.len()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(arity = self.params.len()))]
    fn call(&self, state: &mut EvalState, args: Vec<Value>, _span: SourceSpan) -> Result<Value, EvalError> {
        let mut bindings = Bindings::new();
        for (name, value) in &self.captured {
            bindings.insert(name.as_str(), value.clone());
        }

        bindings.enter();
        for (name, arg) in self.params.iter().zip(args) {
            let r = state.store.insert(arg);
            bindings.insert(name.as_str(), Value::Ref(r));
        }
        let result = self.body.eval(state, &mut bindings);
        if let Some(frame) = bindings.leave() {
            state.release_frame(frame);
        }
        state.release_frame(bindings.into_top_level());
        result
    }
}
