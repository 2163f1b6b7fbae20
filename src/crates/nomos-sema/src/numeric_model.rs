// numeric_model.rs
//
// The numeric lattice: width lifting across categories, representable widths,
// and result-type rules shared between the type arena and the value engine.

use crate::ops::BinaryOp;
use crate::type_arena::{NumericKind, NumericType};

/// Widths with a fixed-size runtime representation, per category.
const INTEGRAL_WIDTHS: &[u32] = &[16, 32, 64];
const RATIO_WIDTHS: &[u32] = &[32, 64, 128];
const REAL_WIDTHS: &[u32] = &[32, 64];

/// Fixed widths available for `kind`, narrowest first.
pub fn representable_widths(kind: NumericKind) -> &'static [u32] {
    match kind {
        NumericKind::Nat | NumericKind::Int => INTEGRAL_WIDTHS,
        NumericKind::Ratio => RATIO_WIDTHS,
        NumericKind::Real => REAL_WIDTHS,
    }
}

/// Explicit mantissa bits of a binary IEEE real of `width` bits.
pub fn real_mantissa_bits(width: u32) -> Option<u32> {
    match width {
        16 => Some(10),
        32 => Some(23),
        64 => Some(52),
        128 => Some(112),
        _ => None,
    }
}

/// Round `width` up to the next representable width of `kind`.
/// `None` if `width` exceeds the widest fixed representation.
pub fn round_width(kind: NumericKind, width: u32) -> Option<u32> {
    representable_widths(kind)
        .iter()
        .copied()
        .find(|&w| w >= width)
}

/// Width needed in category `to` to hold every value of `from` exactly.
///
/// - `Nat(n)` lifts to `Int(n + 1)`
/// - `Int(n)` lifts to `Ratio(2n)`
/// - `Ratio(2n)` lifts to the narrowest `Real(b)` whose mantissa holds `n` bits
///
/// Abstract widths lift to abstract widths (`Some(0)`). Returns `None` when
/// `to` is more specific than `from`, or when no finite real is wide enough.
pub fn lift_width(from: NumericType, to: NumericKind) -> Option<u32> {
    if to < from.kind {
        return None;
    }
    if from.is_abstract() {
        return Some(0);
    }
    let mut kind = from.kind;
    let mut width = from.width;
    while kind < to {
        match kind {
            NumericKind::Nat => {
                width = width.checked_add(1)?;
                kind = NumericKind::Int;
            }
            NumericKind::Int => {
                width = width.checked_mul(2)?;
                kind = NumericKind::Ratio;
            }
            NumericKind::Ratio => {
                let component = width.div_ceil(2);
                width = REAL_WIDTHS
                    .iter()
                    .copied()
                    .find(|&b| real_mantissa_bits(b).is_some_and(|m| component <= m))?;
                kind = NumericKind::Real;
            }
            NumericKind::Real => unreachable!("Real is the least specific category"),
        }
    }
    Some(width)
}

/// Lossless castability between two numeric types.
pub fn fits(from: NumericType, to: NumericType) -> bool {
    if from == to {
        return true;
    }
    if from.kind > to.kind {
        return false;
    }
    if to.is_abstract() {
        return true;
    }
    if from.is_abstract() {
        return false;
    }
    lift_width(from, to.kind).is_some_and(|w| w <= to.width)
}

/// Common type able to hold both operands: the less specific category, at
/// the narrowest representable width that holds both lifted widths.
pub fn promote_numeric(a: NumericType, b: NumericType) -> NumericType {
    widen(a, b, a.kind.max(b.kind), Some)
}

fn widen(
    a: NumericType,
    b: NumericType,
    kind: NumericKind,
    grow: impl Fn(u32) -> Option<u32>,
) -> NumericType {
    if a.is_abstract() || b.is_abstract() {
        return NumericType::abstract_of(kind);
    }
    let (Some(wa), Some(wb)) = (lift_width(a, kind), lift_width(b, kind)) else {
        return NumericType::abstract_of(kind);
    };
    grow(wa.max(wb))
        .and_then(|w| round_width(kind, w))
        .map_or(NumericType::abstract_of(kind), |w| NumericType::new(kind, w))
}

/// Nat becomes the narrowest Int holding it; other types are unchanged.
pub fn make_signed_numeric(ty: NumericType) -> NumericType {
    if ty.kind != NumericKind::Nat {
        return ty;
    }
    if ty.is_abstract() {
        return NumericType::abstract_of(NumericKind::Int);
    }
    lift_width(ty, NumericKind::Int)
        .and_then(|w| round_width(NumericKind::Int, w))
        .map_or(NumericType::abstract_of(NumericKind::Int), |w| {
            NumericType::new(NumericKind::Int, w)
        })
}

/// Representation of the result of an arithmetic operator on two numeric
/// operands, or `None` if the operator is not defined for them.
///
/// - Add/Sub/Mul on integral categories grow the width so no fixed-width
///   result can overflow (one extra bit for Add/Sub, double for Mul).
/// - Sub on naturals becomes signed; Div on integral categories becomes Ratio.
/// - Ratio and Real keep the wider width; the value engine escalates Ratio
///   results that do not fit.
/// - Mod is integral only.
pub fn arithmetic_result(op: BinaryOp, a: NumericType, b: NumericType) -> Option<NumericType> {
    let kind = a.kind.max(b.kind);
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => {
            let kind = if op == BinaryOp::Sub && kind == NumericKind::Nat {
                NumericKind::Int
            } else {
                kind
            };
            let integral = kind.is_integral();
            Some(widen(a, b, kind, |w| match (integral, op) {
                (false, _) => Some(w),
                (true, BinaryOp::Mul) => w.checked_mul(2),
                (true, _) => w.checked_add(1),
            }))
        }
        BinaryOp::Div => Some(widen(a, b, kind.max(NumericKind::Ratio), Some)),
        BinaryOp::Mod if kind.is_integral() => Some(promote_numeric(a, b)),
        BinaryOp::Pow => pow_result(a, b),
        _ => None,
    }
}

/// Result of `base ^ exponent`. Integral and rational bases need an
/// integral exponent; a signed exponent on an integral base may invert it,
/// so the result is a Ratio.
pub fn pow_result(base: NumericType, exponent: NumericType) -> Option<NumericType> {
    match base.kind {
        NumericKind::Real => Some(base),
        _ if !exponent.kind.is_integral() => None,
        NumericKind::Nat | NumericKind::Int if exponent.kind == NumericKind::Int => {
            Some(NumericType::abstract_of(NumericKind::Ratio))
        }
        kind => Some(NumericType::abstract_of(kind)),
    }
}

/// Narrowest type of `kind` for a literal needing `bits` bits. For Ratio,
/// `bits` is the per-component width.
pub fn literal_type(kind: NumericKind, bits: u64) -> NumericType {
    let bits = if kind == NumericKind::Ratio {
        bits.saturating_mul(2)
    } else {
        bits
    };
    u32::try_from(bits)
        .ok()
        .and_then(|b| round_width(kind, b))
        .map_or(NumericType::abstract_of(kind), |w| NumericType::new(kind, w))
}
