// expr.rs
//
// Typed expression trees and their evaluation.

use std::rc::Rc;

use miette::SourceSpan;
use nomos_sema::{BinaryOp, TypeId, UnaryOp};

use crate::bindings::Bindings;
use crate::callable::LambdaFunction;
use crate::errors::{EvalError, OpError};
use crate::state::EvalState;
use crate::value::Value;

/// An expression annotated with its static type.
#[derive(Debug, Clone)]
pub struct TypedExpr {
    pub kind: ExprKind,
    pub ty: TypeId,
    pub span: SourceSpan,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Literal(Value),
    Name(String),
    Unary {
        op: UnaryOp,
        operand: Box<TypedExpr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<TypedExpr>,
        rhs: Box<TypedExpr>,
    },
    /// Bind `name` in the innermost scope; evaluates to the bound value.
    Let {
        name: String,
        value: Box<TypedExpr>,
    },
    /// Tuple of the items; no items is Unit.
    Product(Vec<TypedExpr>),
    Lambda {
        params: Vec<String>,
        body: Rc<TypedExpr>,
    },
    Call {
        callee: Box<TypedExpr>,
        args: Vec<TypedExpr>,
    },
    /// Member of a module value.
    Access {
        module: Box<TypedExpr>,
        member: String,
    },
    /// A new scope; evaluates to its last item, or Unit when empty.
    Block(Vec<TypedExpr>),
}

impl TypedExpr {
    pub fn new(kind: ExprKind, ty: TypeId, span: SourceSpan) -> Self {
        Self { kind, ty, span }
    }

    pub fn eval(&self, state: &mut EvalState, bindings: &mut Bindings) -> Result<Value, EvalError> {
        match &self.kind {
            ExprKind::Literal(value) => Ok(value.clone()),

            ExprKind::Name(name) => {
                let bound = bindings.find(name).ok_or_else(|| EvalError::UnboundName {
                    name: name.clone(),
                    span: self.span,
                })?;
                state.resolve(bound, self.span)
            }

            ExprKind::Unary { op, operand } => {
                let value = operand.eval(state, bindings)?;
                value.unary_op(*op).map_err(|e| match e {
                    OpError::DivisionByZero => EvalError::DivisionByZero { span: self.span },
                    OpError::TooLarge => EvalError::ResultTooLarge {
                        op: op.to_string(),
                        span: self.span,
                    },
                    OpError::Undefined => EvalError::UndefinedUnaryOp {
                        op: op.to_string(),
                        operand: describe(state, &value),
                        span: self.span,
                    },
                })
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let l = lhs.eval(state, bindings)?;
                let r = rhs.eval(state, bindings)?;
                let precision = state.options().real_precision;
                l.binary_op_with_precision(*op, &r, precision).map_err(|e| match e {
                    OpError::DivisionByZero => EvalError::DivisionByZero { span: self.span },
                    OpError::TooLarge => EvalError::ResultTooLarge {
                        op: op.to_string(),
                        span: self.span,
                    },
                    OpError::Undefined => EvalError::UndefinedBinaryOp {
                        op: op.to_string(),
                        lhs: describe(state, &l),
                        rhs: describe(state, &r),
                        span: self.span,
                    },
                })
            }

            ExprKind::Let { name, value } => {
                let v = value.eval(state, bindings)?;
                let r = state.store.insert(v.clone());
                if let Some(Value::Ref(shadowed)) = bindings.insert(name.as_str(), Value::Ref(r)) {
                    state.store.release(shadowed);
                }
                Ok(v)
            }

            ExprKind::Product(items) => {
                let values = items
                    .iter()
                    .map(|item| item.eval(state, bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::product(values))
            }

            ExprKind::Lambda { params, body } => {
                let mut captured = Vec::new();
                for (name, value) in bindings.visible() {
                    captured.push((name, state.resolve(&value, self.span)?));
                }
                Ok(Value::Function(Rc::new(LambdaFunction::new(
                    params.clone(),
                    Rc::clone(body),
                    captured,
                    self.ty,
                ))))
            }

            ExprKind::Call { callee, args } => {
                let target = callee.eval(state, bindings)?;
                let Value::Function(function) = &target else {
                    return Err(EvalError::NotCallable {
                        found: describe(state, &target),
                        span: callee.span,
                    });
                };
                let function = Rc::clone(function);
                if function.arity() != args.len() {
                    return Err(EvalError::ArityMismatch {
                        expected: function.arity(),
                        found: args.len(),
                        span: self.span,
                    });
                }
                let mut values = args
                    .iter()
                    .map(|arg| arg.eval(state, bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                convert_arguments(state, function.ty(), &mut values);

                state.enter_call(self.span)?;
                let result = function.call(state, values, self.span);
                state.leave_call();
                result
            }

            ExprKind::Access { module, member } => {
                let target = module.eval(state, bindings)?;
                let Value::Module(m) = &target else {
                    return Err(EvalError::NotAModule {
                        found: describe(state, &target),
                        span: module.span,
                    });
                };
                m.access(member)
                    .cloned()
                    .ok_or_else(|| {
                        let mut available: Vec<_> = m.member_names().collect();
                        available.sort_unstable();
                        EvalError::NoSuchMember {
                            module: m.name().to_string(),
                            member: member.clone(),
                            available: available.join(", "),
                            span: self.span,
                        }
                    })
            }

            ExprKind::Block(items) => {
                bindings.enter();
                tracing::trace!(depth = bindings.depth(), items = items.len(), "entered block");
                let result = eval_sequence(items, state, bindings);
                if let Some(frame) = bindings.leave() {
                    state.release_frame(frame);
                }
                result
            }
        }
    }
}

/// Evaluate `items` in order, yielding the last value (Unit if none).
fn eval_sequence(items: &[TypedExpr], state: &mut EvalState, bindings: &mut Bindings) -> Result<Value, EvalError> {
    let mut last = Value::Unit;
    for item in items {
        last = item.eval(state, bindings)?;
    }
    Ok(last)
}

/// Widen numeric arguments to the numeric parameter types of `function_ty`,
/// so a body sees values of the types it was checked against.
fn convert_arguments(state: &EvalState, function_ty: TypeId, values: &mut [Value]) {
    let Some((params, _)) = state.arena.unwrap_function(function_ty) else {
        return;
    };
    let precision = state.options().real_precision;
    for (value, &param) in values.iter_mut().zip(params.iter()) {
        let converted = state
            .arena
            .numeric_type(param)
            .and_then(|target| value.convert_to(target, precision));
        if let Some(converted) = converted {
            *value = converted;
        }
    }
}

/// Type name of a value, for diagnostics.
fn describe(state: &mut EvalState, value: &Value) -> String {
    let ty = value.ty(&mut state.arena);
    state.arena.display(ty)
}
