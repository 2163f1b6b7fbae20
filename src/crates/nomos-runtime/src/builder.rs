// builder.rs
//
// Constructs typed expressions, assigning each node its static type and
// rejecting ill-typed combinations up front.

use std::rc::Rc;

use miette::SourceSpan;
use nomos_bignum::{AInt, ARatio, AReal, ParseNumberError};
use nomos_sema::{BinaryOp, NumericKind, TypeArena, TypeId, UnaryOp, literal_type};

use crate::errors::EvalError;
use crate::expr::{ExprKind, TypedExpr};
use crate::numeric::{int_value, nat_value, ratio_value};
use crate::state::EvalState;
use crate::value::Value;

pub struct ExprBuilder<'a> {
    arena: &'a mut TypeArena,
    real_precision: u32,
}

impl<'a> ExprBuilder<'a> {
    pub fn new(arena: &'a mut TypeArena) -> Self {
        Self {
            arena,
            real_precision: AReal::DEFAULT_PRECISION,
        }
    }

    /// Builder over the state's arena, with literal precision taken from
    /// its options.
    pub fn for_state(state: &'a mut EvalState) -> Self {
        let real_precision = state.options().real_precision;
        Self {
            arena: &mut state.arena,
            real_precision,
        }
    }

    /// Mantissa bits for real literals too precise for `f64`.
    pub fn with_real_precision(mut self, bits: u32) -> Self {
        self.real_precision = bits;
        self
    }

    pub fn arena(&mut self) -> &mut TypeArena {
        &mut *self.arena
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Any value as a literal, typed by its representation.
    pub fn value(&mut self, value: Value, span: SourceSpan) -> TypedExpr {
        let ty = value.ty(self.arena);
        TypedExpr::new(ExprKind::Literal(value), ty, span)
    }

    pub fn unit(&mut self, span: SourceSpan) -> TypedExpr {
        self.value(Value::Unit, span)
    }

    pub fn boolean(&mut self, b: bool, span: SourceSpan) -> TypedExpr {
        self.value(Value::Bool(b), span)
    }

    pub fn text(&mut self, s: &str, span: SourceSpan) -> TypedExpr {
        self.value(Value::text(s), span)
    }

    /// Integer literal in the narrowest fixed width holding it: Nat when
    /// non-negative, Int otherwise.
    pub fn integer(&mut self, src: &str, radix: u32, span: SourceSpan) -> Result<TypedExpr, EvalError> {
        let n = AInt::from_str_radix(src, radix).map_err(|e| invalid(e, span))?;
        let value = if n.is_negative() {
            let width = literal_type(NumericKind::Int, n.num_bits()).width;
            int_value(n, width)
        } else {
            let width = literal_type(NumericKind::Nat, n.num_bits_unsigned()).width;
            nat_value(n, width)
        };
        Ok(self.value(value, span))
    }

    /// `n/d` literal, reduced, in the narrowest fixed width holding both
    /// components.
    pub fn ratio(&mut self, src: &str, radix: u32, span: SourceSpan) -> Result<TypedExpr, EvalError> {
        let r = ARatio::from_str_radix(src, radix).map_err(|e| invalid(e, span))?;
        let width = literal_type(NumericKind::Ratio, r.numer_bits().max(r.denom_bits())).width;
        Ok(self.value(ratio_value(r, width), span))
    }

    /// Decimal real literal: `Real32` or `Real64` when the value survives
    /// the round trip exactly, an arbitrary real otherwise.
    pub fn real(&mut self, src: &str, span: SourceSpan) -> Result<TypedExpr, EvalError> {
        let x = AReal::from_str_radix(src, 10, self.real_precision).map_err(|e| invalid(e, span))?;
        let value = if x.rounds_to_f32() {
            Value::Real32(x.to_f32())
        } else if x.rounds_to_f64() {
            Value::Real64(x.to_f64())
        } else {
            Value::AReal(x)
        };
        Ok(self.value(value, span))
    }

    // ========================================================================
    // Operators
    // ========================================================================

    pub fn unary(&mut self, op: UnaryOp, operand: TypedExpr, span: SourceSpan) -> Result<TypedExpr, EvalError> {
        let ty = self
            .arena
            .unary_result_type(op, operand.ty)
            .ok_or_else(|| EvalError::UndefinedUnaryOp {
                op: op.to_string(),
                operand: self.arena.display(operand.ty),
                span,
            })?;
        let operand = Box::new(operand);
        Ok(TypedExpr::new(ExprKind::Unary { op, operand }, ty, span))
    }

    pub fn binary(
        &mut self,
        op: BinaryOp,
        lhs: TypedExpr,
        rhs: TypedExpr,
        span: SourceSpan,
    ) -> Result<TypedExpr, EvalError> {
        let Some(ty) = self.arena.binary_result_type(op, lhs.ty, rhs.ty) else {
            return Err(EvalError::UndefinedBinaryOp {
                op: op.to_string(),
                lhs: self.arena.display(lhs.ty),
                rhs: self.arena.display(rhs.ty),
                span,
            });
        };
        let kind = ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
        Ok(TypedExpr::new(kind, ty, span))
    }

    // ========================================================================
    // Bindings and structure
    // ========================================================================

    /// Reference to a binding of a known type.
    pub fn name(&mut self, name: &str, ty: TypeId, span: SourceSpan) -> TypedExpr {
        TypedExpr::new(ExprKind::Name(name.to_string()), ty, span)
    }

    pub fn let_binding(&mut self, name: &str, value: TypedExpr, span: SourceSpan) -> TypedExpr {
        let ty = value.ty;
        let kind = ExprKind::Let {
            name: name.to_string(),
            value: Box::new(value),
        };
        TypedExpr::new(kind, ty, span)
    }

    pub fn block(&mut self, items: Vec<TypedExpr>, span: SourceSpan) -> TypedExpr {
        let ty = items.last().map_or(TypeId::UNIT, |last| last.ty);
        TypedExpr::new(ExprKind::Block(items), ty, span)
    }

    pub fn product(&mut self, items: Vec<TypedExpr>, span: SourceSpan) -> TypedExpr {
        let ty = self.arena.product(items.iter().map(|item| item.ty));
        TypedExpr::new(ExprKind::Product(items), ty, span)
    }

    pub fn lambda(&mut self, params: Vec<(String, TypeId)>, body: TypedExpr, span: SourceSpan) -> TypedExpr {
        let ty = self.arena.function(params.iter().map(|(_, ty)| *ty), body.ty);
        let kind = ExprKind::Lambda {
            params: params.into_iter().map(|(name, _)| name).collect(),
            body: Rc::new(body),
        };
        TypedExpr::new(kind, ty, span)
    }

    pub fn call(&mut self, callee: TypedExpr, args: Vec<TypedExpr>, span: SourceSpan) -> Result<TypedExpr, EvalError> {
        let Some((params, result)) = self.arena.unwrap_function(callee.ty) else {
            return Err(EvalError::NotCallable {
                found: self.arena.display(callee.ty),
                span: callee.span,
            });
        };
        if params.len() != args.len() {
            return Err(EvalError::ArityMismatch {
                expected: params.len(),
                found: args.len(),
                span,
            });
        }
        for (arg, &param) in args.iter().zip(params.iter()) {
            if !self.arena.is_castable(arg.ty, param) {
                return Err(EvalError::ArgumentTypeMismatch {
                    expected: self.arena.display(param),
                    found: self.arena.display(arg.ty),
                    span: arg.span,
                });
            }
        }
        let kind = ExprKind::Call {
            callee: Box::new(callee),
            args,
        };
        Ok(TypedExpr::new(kind, result, span))
    }

    /// Member `member` of type `ty` from a module-typed expression.
    pub fn access(&mut self, module: TypedExpr, member: &str, ty: TypeId, span: SourceSpan) -> TypedExpr {
        let kind = ExprKind::Access {
            module: Box::new(module),
            member: member.to_string(),
        };
        TypedExpr::new(kind, ty, span)
    }
}

fn invalid(source: ParseNumberError, span: SourceSpan) -> EvalError {
    EvalError::InvalidLiteral { source, span }
}
