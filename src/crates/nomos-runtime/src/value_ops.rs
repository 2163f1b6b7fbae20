// value_ops.rs
//
// Operator dispatch on runtime values.

use std::cmp::Ordering;
use std::rc::Rc;

use nomos_bignum::AReal;
use nomos_sema::{BinaryOp, UnaryOp};

use crate::errors::OpError;
use crate::numeric::{compare, numeric_binary, numeric_neg};
use crate::value::Value;

impl Value {
    /// `self op rhs`. Both operands must already be resolved (no `Ref`).
    pub fn binary_op(&self, op: BinaryOp, rhs: &Value) -> Result<Value, OpError> {
        self.binary_op_with_precision(op, rhs, AReal::DEFAULT_PRECISION)
    }

    /// As [`Value::binary_op`], with `precision` bits for results that
    /// land on an arbitrary real. A wider operand precision wins.
    pub fn binary_op_with_precision(
        &self,
        op: BinaryOp,
        rhs: &Value,
        precision: u32,
    ) -> Result<Value, OpError> {
        match (self, rhs) {
            (Value::Bool(a), Value::Bool(b)) => bool_op(op, *a, *b),
            (Value::Unit, Value::Unit) => equality(op, true),
            (Value::Type(a), Value::Type(b)) => equality(op, a == b),
            (Value::Product(a), Value::Product(b)) => product_eq(op, a, b),
            _ if self.text_kind().is_some() && rhs.text_kind().is_some() => text_op(op, self, rhs),
            _ if self.is_numeric() && rhs.is_numeric() => {
                if op.is_logic() {
                    numeric_logic(op, self, rhs)
                } else {
                    numeric_binary(op, self, rhs, precision)
                }
            }
            _ => Err(OpError::Undefined),
        }
    }

    pub fn unary_op(&self, op: UnaryOp) -> Result<Value, OpError> {
        match (op, self) {
            (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOp::Neg, v) if v.is_numeric() => numeric_neg(v),
            _ => Err(OpError::Undefined),
        }
    }
}

fn equality(op: BinaryOp, equal: bool) -> Result<Value, OpError> {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(equal)),
        BinaryOp::Ne => Ok(Value::Bool(!equal)),
        _ => Err(OpError::Undefined),
    }
}

fn bool_op(op: BinaryOp, a: bool, b: bool) -> Result<Value, OpError> {
    match op {
        BinaryOp::And => Ok(Value::Bool(a && b)),
        BinaryOp::Or => Ok(Value::Bool(a || b)),
        _ => equality(op, a == b),
    }
}

fn numeric_logic(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, OpError> {
    let order = compare(lhs, rhs);
    let result = match op {
        BinaryOp::Eq => order == Some(Ordering::Equal),
        // NaN is unequal to everything, itself included
        BinaryOp::Ne => order != Some(Ordering::Equal),
        BinaryOp::Lt => order == Some(Ordering::Less),
        BinaryOp::Le => matches!(order, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::Gt => order == Some(Ordering::Greater),
        BinaryOp::Ge => matches!(order, Some(Ordering::Greater | Ordering::Equal)),
        _ => return Err(OpError::Undefined),
    };
    Ok(Value::Bool(result))
}

fn text_op(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, OpError> {
    let (Some(a), Some(b)) = (lhs.as_str(), rhs.as_str()) else {
        return Err(OpError::Undefined);
    };
    match op {
        BinaryOp::Concat => {
            let joined: Rc<str> = Rc::from(format!("{a}{b}"));
            // ASCII only when both sides are
            Ok(match (lhs, rhs) {
                (Value::Ascii(_), Value::Ascii(_)) => Value::Ascii(joined),
                _ => Value::Utf8(joined),
            })
        }
        _ => equality(op, a == b),
    }
}

fn product_eq(op: BinaryOp, a: &[Value], b: &[Value]) -> Result<Value, OpError> {
    if !op.is_equality() {
        return Err(OpError::Undefined);
    }
    let mut equal = a.len() == b.len();
    if equal {
        for (x, y) in a.iter().zip(b) {
            // Components of unrelated kinds are simply unequal
            let same = match x.binary_op(BinaryOp::Eq, y) {
                Ok(v) => v.as_bool() == Some(true),
                Err(OpError::Undefined) => false,
                Err(e) => return Err(e),
            };
            if !same {
                equal = false;
                break;
            }
        }
    }
    equality(op, equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_operators() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);
        assert_eq!(t.binary_op(BinaryOp::And, &f), Ok(Value::Bool(false)));
        assert_eq!(t.binary_op(BinaryOp::Or, &f), Ok(Value::Bool(true)));
        assert_eq!(t.binary_op(BinaryOp::Ne, &f), Ok(Value::Bool(true)));
        assert_eq!(t.unary_op(UnaryOp::Not), Ok(f.clone()));
        assert_eq!(t.binary_op(BinaryOp::Add, &f), Err(OpError::Undefined));
    }

    #[test]
    fn numeric_equality_ignores_width() {
        let eq = Value::Nat16(7).binary_op(BinaryOp::Eq, &Value::Int64(7));
        assert_eq!(eq, Ok(Value::Bool(true)));
        let lt = Value::Int16(-1).binary_op(BinaryOp::Lt, &Value::Nat64(0));
        assert_eq!(lt, Ok(Value::Bool(true)));
    }

    #[test]
    fn nan_is_unordered() {
        let nan = Value::Real64(f64::NAN);
        assert_eq!(nan.binary_op(BinaryOp::Eq, &nan), Ok(Value::Bool(false)));
        assert_eq!(nan.binary_op(BinaryOp::Ne, &nan), Ok(Value::Bool(true)));
        assert_eq!(nan.binary_op(BinaryOp::Ge, &Value::Nat16(1)), Ok(Value::Bool(false)));
    }

    #[test]
    fn concat_widens_text_kind() {
        let a = Value::text("ab");
        let u = Value::text("é");
        assert_eq!(a.binary_op(BinaryOp::Concat, &a), Ok(Value::text("abab")));
        let mixed = a.binary_op(BinaryOp::Concat, &u).unwrap();
        assert!(matches!(mixed, Value::Utf8(ref s) if &**s == "abé"));
        assert_eq!(a.binary_op(BinaryOp::Lt, &u), Err(OpError::Undefined));
    }

    #[test]
    fn products_compare_componentwise() {
        let p = Value::product(vec![Value::Nat16(1), Value::Bool(true)]);
        let q = Value::product(vec![Value::Int32(1), Value::Bool(true)]);
        let r = Value::product(vec![Value::Nat16(1)]);
        assert_eq!(p.binary_op(BinaryOp::Eq, &q), Ok(Value::Bool(true)));
        assert_eq!(p.binary_op(BinaryOp::Eq, &r), Ok(Value::Bool(false)));
        assert_eq!(p.binary_op(BinaryOp::Add, &q), Err(OpError::Undefined));
    }

    #[test]
    fn products_with_unrelated_components_are_unequal() {
        let p = Value::product(vec![Value::Nat16(1), Value::Bool(true)]);
        let q = Value::product(vec![Value::Bool(true), Value::Nat16(1)]);
        assert_eq!(p.binary_op(BinaryOp::Eq, &q), Ok(Value::Bool(false)));
        assert_eq!(p.binary_op(BinaryOp::Ne, &q), Ok(Value::Bool(true)));
    }

    #[test]
    fn real_precision_applies_to_arbitrary_results() {
        let sum = Value::Nat64(1)
            .binary_op_with_precision(BinaryOp::Add, &Value::Real32(0.5), 64)
            .unwrap();
        assert!(matches!(sum, Value::AReal(ref x) if x.precision() == 64), "{sum:?}");
        let default = Value::Nat64(1).binary_op(BinaryOp::Add, &Value::Real32(0.5)).unwrap();
        assert!(matches!(default, Value::AReal(ref x) if x.precision() == AReal::DEFAULT_PRECISION));
    }

    #[test]
    fn mismatched_categories_are_undefined() {
        assert_eq!(
            Value::Nat16(1).binary_op(BinaryOp::Add, &Value::Bool(true)),
            Err(OpError::Undefined)
        );
        assert_eq!(Value::text("x").unary_op(UnaryOp::Neg), Err(OpError::Undefined));
    }
}
