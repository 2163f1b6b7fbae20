// type_arena/promote.rs
//
// Promotion, signedness and operator result typing.

use crate::numeric_model;
use crate::ops::{BinaryOp, OpSet, UnaryOp};

use super::arena::TypeArena;
use super::sema_type::*;
use super::type_id::TypeId;

impl TypeArena {
    /// Least general type able to hold the operands of a binary operation on
    /// `a` and `b`. Only numeric and text scalars widen; anything else
    /// promotes to the Sum `a | b` and must be dispatched at runtime.
    pub fn promote(&mut self, a: TypeId, b: TypeId) -> TypeId {
        if a == b || b.is_bottom() {
            return a;
        }
        if a.is_bottom() {
            return b;
        }
        if a.is_top() || b.is_top() {
            return TypeId::TOP;
        }

        match (self.get(a).clone(), self.get(b).clone()) {
            (SemaType::Numeric(x), SemaType::Numeric(y)) => {
                return self.numeric(numeric_model::promote_numeric(x, y));
            }
            (SemaType::Number, SemaType::Numeric(_)) | (SemaType::Numeric(_), SemaType::Number) => {
                return TypeId::NUMBER;
            }
            (SemaType::Text(x), SemaType::Text(y)) => return self.text(x.max(y)),
            _ => {}
        }

        tracing::debug!(a = %self.display(a), b = %self.display(b), "promotion falls back to a sum");
        self.sum([a, b])
    }

    /// Nat becomes the narrowest Int holding every value of it. Any other
    /// type is returned unchanged.
    pub fn make_signed(&mut self, ty: TypeId) -> TypeId {
        match self.numeric_type(ty) {
            Some(n) if n.kind == NumericKind::Nat => {
                self.numeric(numeric_model::make_signed_numeric(n))
            }
            _ => ty,
        }
    }

    /// Operators a type supports. Pseudo types report the usage they were
    /// created with; sums support what every case supports.
    pub fn supported_ops(&self, ty: TypeId) -> OpSet {
        match self.get(ty) {
            SemaType::Number | SemaType::Numeric(_) => OpSet::NUMERIC,
            SemaType::Bool => OpSet::BOOL,
            SemaType::Text(_) => OpSet::TEXT,
            SemaType::Unit | SemaType::Product(_) => OpSet::EQUALITY,
            SemaType::Pseudo { usage, .. } => *usage,
            SemaType::Sum(cases) => cases
                .iter()
                .map(|&c| self.supported_ops(c))
                .reduce(OpSet::intersection)
                .unwrap_or(OpSet::NONE),
            _ => OpSet::NONE,
        }
    }

    /// Static result type of `lhs op rhs`, or `None` if the operator is not
    /// defined for these operand types.
    pub fn binary_result_type(&mut self, op: BinaryOp, lhs: TypeId, rhs: TypeId) -> Option<TypeId> {
        if self.is_pseudo(lhs) || self.is_pseudo(rhs) {
            return Some(self.pseudo(OpSet::NONE.with_binary(op)));
        }
        if !self.supported_ops(lhs).supports_binary(op)
            || !self.supported_ops(rhs).supports_binary(op)
        {
            return None;
        }

        if op.is_logic() {
            let related = match op {
                BinaryOp::And | BinaryOp::Or => lhs.is_bool() && rhs.is_bool(),
                BinaryOp::Eq | BinaryOp::Ne => {
                    (self.is_numeric(lhs) && self.is_numeric(rhs))
                        || self.is_castable(lhs, rhs)
                        || self.is_castable(rhs, lhs)
                }
                _ => self.is_numeric(lhs) && self.is_numeric(rhs),
            };
            return related.then_some(TypeId::BOOL);
        }

        if op == BinaryOp::Concat {
            let (l, r) = (self.text_kind(lhs)?, self.text_kind(rhs)?);
            return Some(self.text(l.max(r)));
        }

        if lhs == TypeId::NUMBER || rhs == TypeId::NUMBER {
            return Some(TypeId::NUMBER);
        }
        let (l, r) = (self.numeric_type(lhs)?, self.numeric_type(rhs)?);
        let result = numeric_model::arithmetic_result(op, l, r)?;
        Some(self.numeric(result))
    }

    /// Static result type of `op operand`, or `None` if undefined.
    pub fn unary_result_type(&mut self, op: UnaryOp, operand: TypeId) -> Option<TypeId> {
        if self.is_pseudo(operand) {
            return Some(self.pseudo(OpSet::NONE.with_unary(op)));
        }
        if !self.supported_ops(operand).supports_unary(op) {
            return None;
        }
        match op {
            UnaryOp::Neg => Some(self.make_signed(operand)),
            UnaryOp::Not => Some(TypeId::BOOL),
        }
    }
}
