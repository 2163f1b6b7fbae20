// numeric/dispatch.rs
//
// Arithmetic and comparison on numeric values of any representation pair.

use std::cmp::Ordering;

use nomos_bignum::{AInt, ARatio, AReal};
use nomos_sema::{
    BinaryOp, NumericKind, NumericType, arithmetic_result, make_signed_numeric, pow_result,
};

use super::convert::{int_value, nat_value, ratio_value};
use crate::errors::OpError;
use crate::value::Value;

/// Both operands in the working representation of the result.
enum Operands {
    Integral(AInt, AInt),
    Ratio(ARatio, ARatio),
    Real32(f32, f32),
    Real64(f64, f64),
    Real(AReal, AReal),
}

/// Exact results (and exact pow bases) may not grow past this many bits.
const MAX_EXACT_BITS: u64 = 1 << 24;

/// Binary magnitude limit for arbitrary-real powers.
const MAX_REAL_SCALE: u64 = 1 << 40;

/// Precision for arbitrary reals: the widest operand's, or `requested`.
fn real_precision(lhs: &Value, rhs: &Value, requested: u32) -> u32 {
    [lhs, rhs]
        .iter()
        .filter_map(|v| match v {
            Value::AReal(x) => Some(x.precision()),
            _ => None,
        })
        .fold(requested, u32::max)
}

fn canonicalize(
    lhs: &Value,
    rhs: &Value,
    target: NumericType,
    precision: u32,
) -> Result<Operands, OpError> {
    let operands = match (target.kind, target.width) {
        (NumericKind::Nat | NumericKind::Int, _) => {
            lhs.to_exact_int().zip(rhs.to_exact_int()).map(|(a, b)| Operands::Integral(a, b))
        }
        (NumericKind::Ratio, _) => lhs
            .to_exact_ratio()
            .zip(rhs.to_exact_ratio())
            .map(|(a, b)| Operands::Ratio(a, b)),
        (NumericKind::Real, 32) => lhs
            .to_f32_lossy()
            .zip(rhs.to_f32_lossy())
            .map(|(a, b)| Operands::Real32(a, b)),
        (NumericKind::Real, 64) => lhs
            .to_f64_lossy()
            .zip(rhs.to_f64_lossy())
            .map(|(a, b)| Operands::Real64(a, b)),
        (NumericKind::Real, _) => {
            let precision = real_precision(lhs, rhs, precision);
            lhs.to_real(precision)
                .zip(rhs.to_real(precision))
                .map(|(a, b)| Operands::Real(a, b))
        }
    };
    operands.ok_or(OpError::Undefined)
}

/// Result of an arithmetic operator (Add, Sub, Mul, Div, Mod, Pow) on two
/// numeric values. `precision` applies when the result is an arbitrary real.
pub(crate) fn numeric_binary(
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
    precision: u32,
) -> Result<Value, OpError> {
    let (Some(lt), Some(rt)) = (lhs.numeric_type(), rhs.numeric_type()) else {
        return Err(OpError::Undefined);
    };
    if op == BinaryOp::Pow {
        return pow(lhs, rhs, pow_result(lt, rt).ok_or(OpError::Undefined)?);
    }
    let target = arithmetic_result(op, lt, rt).ok_or(OpError::Undefined)?;

    match canonicalize(lhs, rhs, target, precision)? {
        Operands::Integral(a, b) => {
            let value = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Mod => a.checked_rem_euclid(&b).ok_or(OpError::DivisionByZero)?,
                _ => return Err(OpError::Undefined),
            };
            Ok(match target.kind {
                NumericKind::Nat => nat_value(value, target.width),
                _ => int_value(value, target.width),
            })
        }
        Operands::Ratio(a, b) => {
            let value = match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a.checked_div(&b).ok_or(OpError::DivisionByZero)?,
                _ => return Err(OpError::Undefined),
            };
            Ok(ratio_value(value, target.width))
        }
        Operands::Real32(a, b) => float_op(op, a, b).map(Value::Real32),
        Operands::Real64(a, b) => float_op(op, a, b).map(Value::Real64),
        Operands::Real(a, b) => {
            let value = match op {
                BinaryOp::Add => &a + &b,
                BinaryOp::Sub => &a - &b,
                BinaryOp::Mul => &a * &b,
                BinaryOp::Div => a.checked_div(&b).ok_or(OpError::DivisionByZero)?,
                _ => return Err(OpError::Undefined),
            };
            Ok(Value::AReal(value))
        }
    }
}

fn float_op<F>(op: BinaryOp, a: F, b: F) -> Result<F, OpError>
where
    F: num_traits::Float,
{
    Ok(match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div if b.is_zero() => return Err(OpError::DivisionByZero),
        BinaryOp::Div => a / b,
        _ => return Err(OpError::Undefined),
    })
}

/// Integral exponent as `i64`, `None` if not a whole number or out of range.
fn whole_exponent(exponent: &Value) -> Option<i64> {
    let r = exponent.to_exact_ratio()?;
    if !r.is_integer() {
        return None;
    }
    r.numer().to_i64()
}

/// Refuse powers whose result would need more than `limit` bits when the
/// base needs `bits`.
fn check_pow_size(bits: u64, n: i64, limit: u64) -> Result<(), OpError> {
    if bits.saturating_mul(n.unsigned_abs()) > limit {
        return Err(OpError::TooLarge);
    }
    Ok(())
}

fn pow(base: &Value, exponent: &Value, target: NumericType) -> Result<Value, OpError> {
    let zero_base = base.to_exact_ratio().is_some_and(|r| r.is_zero());
    let negative_exponent = exponent.to_exact_ratio().is_some_and(|r| r.is_negative());
    if zero_base && negative_exponent {
        return Err(OpError::DivisionByZero);
    }

    match base {
        Value::Real32(b) => {
            let e = exponent.to_f32_lossy().ok_or(OpError::Undefined)?;
            Ok(Value::Real32(match whole_exponent(exponent).and_then(|e| i32::try_from(e).ok()) {
                Some(n) => b.powi(n),
                None => b.powf(e),
            }))
        }
        Value::Real64(b) => {
            let e = exponent.to_f64_lossy().ok_or(OpError::Undefined)?;
            Ok(Value::Real64(match whole_exponent(exponent).and_then(|e| i32::try_from(e).ok()) {
                Some(n) => b.powi(n),
                None => b.powf(e),
            }))
        }
        Value::AReal(b) => {
            // No transcendental functions on arbitrary reals
            let n = whole_exponent(exponent).ok_or(OpError::Undefined)?;
            check_pow_size(b.scale_bits() + 1, n, MAX_REAL_SCALE)?;
            b.pow(n).map(Value::AReal).ok_or(OpError::DivisionByZero)
        }
        _ => {
            let n = whole_exponent(exponent).ok_or(OpError::Undefined)?;
            match target.kind {
                NumericKind::Ratio => {
                    let b = base.to_exact_ratio().ok_or(OpError::Undefined)?;
                    let bits = b.numer_bits().max(b.denom_bits());
                    check_pow_size(bits.saturating_sub(1), n, MAX_EXACT_BITS)?;
                    let value = b.pow(n).ok_or(OpError::Undefined)?;
                    Ok(ratio_value(value, target.width))
                }
                kind => {
                    let b = base.to_exact_int().ok_or(OpError::Undefined)?;
                    check_pow_size(b.num_bits_unsigned().saturating_sub(1), n, MAX_EXACT_BITS)?;
                    let n = u32::try_from(n).map_err(|_| OpError::Undefined)?;
                    let value = b.pow(n);
                    Ok(match kind {
                        NumericKind::Nat => nat_value(value, target.width),
                        _ => int_value(value, target.width),
                    })
                }
            }
        }
    }
}

/// Exact order of two numeric values. `None` if either is NaN or not
/// numeric.
pub(crate) fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    let integral = |v: &Value| v.numeric_type().is_some_and(|n| n.kind.is_integral());
    if integral(lhs) && integral(rhs) {
        return Some(lhs.to_exact_int()?.cmp(&rhs.to_exact_int()?));
    }
    match (lhs.to_exact_ratio(), rhs.to_exact_ratio()) {
        (Some(a), Some(b)) => Some(a.cmp(&b)),
        // Infinities still order against finite values; NaN does not
        _ => lhs.to_f64_lossy()?.partial_cmp(&rhs.to_f64_lossy()?),
    }
}

/// Negation. Naturals become the narrowest signed type holding them.
pub(crate) fn numeric_neg(value: &Value) -> Result<Value, OpError> {
    let ty = value.numeric_type().ok_or(OpError::Undefined)?;
    let target = make_signed_numeric(ty);
    Ok(match value {
        Value::Real32(x) => Value::Real32(-x),
        Value::Real64(x) => Value::Real64(-x),
        Value::AReal(x) => Value::AReal(-x),
        Value::Ratio32(_) | Value::Ratio64(_) | Value::Ratio128(_) | Value::ARatio(_) => {
            let r = value.to_exact_ratio().ok_or(OpError::Undefined)?;
            ratio_value(-r, target.width)
        }
        _ => {
            let i = value.to_exact_int().ok_or(OpError::Undefined)?;
            int_value(-i, target.width)
        }
    })
}
