// numeric/convert.rs
//
// Exact views of numeric values and narrowing back to fixed widths.

use nomos_bignum::{AInt, ARatio, AReal};
use nomos_sema::{NumericKind, NumericType, fits, representable_widths};

use super::fixed::{Ratio32, Ratio64, Ratio128};
use crate::value::Value;

impl Value {
    /// Exact integer of a Nat or Int value.
    pub fn to_exact_int(&self) -> Option<AInt> {
        Some(match self {
            Value::Nat16(v) => AInt::from(*v),
            Value::Nat32(v) => AInt::from(*v),
            Value::Nat64(v) => AInt::from(*v),
            Value::Int16(v) => AInt::from(*v),
            Value::Int32(v) => AInt::from(*v),
            Value::Int64(v) => AInt::from(*v),
            Value::ANat(v) | Value::AInt(v) => v.clone(),
            _ => return None,
        })
    }

    /// Exact rational of any finite numeric value.
    pub fn to_exact_ratio(&self) -> Option<ARatio> {
        match self {
            Value::Ratio32(r) => Some(r.to_exact()),
            Value::Ratio64(r) => Some(r.to_exact()),
            Value::Ratio128(r) => Some(r.to_exact()),
            Value::ARatio(r) => Some(r.clone()),
            Value::Real32(x) => Some(AReal::from_f64(f64::from(*x), 24)?.to_ratio()),
            Value::Real64(x) => Some(AReal::from_f64(*x, 53)?.to_ratio()),
            Value::AReal(x) => Some(x.to_ratio()),
            other => other.to_exact_int().map(ARatio::from_integer),
        }
    }

    /// Arbitrary-precision real of a finite numeric value.
    pub(crate) fn to_real(&self, precision: u32) -> Option<AReal> {
        match self {
            Value::Real32(x) => AReal::from_f64(f64::from(*x), precision),
            Value::Real64(x) => AReal::from_f64(*x, precision),
            Value::AReal(x) => Some(x.with_precision(precision)),
            other => {
                if let Some(i) = other.to_exact_int() {
                    return Some(AReal::from_int(&i, precision));
                }
                other.to_exact_ratio().map(|r| AReal::from_ratio(&r, precision))
            }
        }
    }

    /// This value in the representation of `target`, when its own type
    /// fits there losslessly. Reals of `target` width 0 use `precision`.
    pub(crate) fn convert_to(&self, target: NumericType, precision: u32) -> Option<Value> {
        let from = self.numeric_type()?;
        if from == target || !fits(from, target) {
            return None;
        }
        Some(match (target.kind, target.width) {
            (NumericKind::Nat, w) => nat_value(self.to_exact_int()?, w),
            (NumericKind::Int, w) => int_value(self.to_exact_int()?, w),
            (NumericKind::Ratio, w) => ratio_value(self.to_exact_ratio()?, w),
            (NumericKind::Real, 32) => Value::Real32(self.to_f32_lossy()?),
            (NumericKind::Real, 64) => Value::Real64(self.to_f64_lossy()?),
            (NumericKind::Real, _) => Value::AReal(self.to_real(precision)?),
        })
    }

    /// Nearest `f64`, keeping infinities and NaN.
    pub(crate) fn to_f64_lossy(&self) -> Option<f64> {
        match self {
            Value::Real32(x) => Some(f64::from(*x)),
            Value::Real64(x) => Some(*x),
            Value::AReal(x) => Some(x.to_f64()),
            other => other.to_exact_ratio().map(|r| r.to_f64()),
        }
    }

    /// Nearest `f32`, keeping infinities and NaN.
    pub(crate) fn to_f32_lossy(&self) -> Option<f32> {
        match self {
            Value::Real32(x) => Some(*x),
            Value::Real64(x) => Some(*x as f32),
            Value::AReal(x) => Some(x.to_f32()),
            other => other
                .to_exact_ratio()
                .map(|r| AReal::from_ratio(&r, 24).to_f32()),
        }
    }
}

/// First fixed width of `kind` at or above `width` whose representation
/// `fixed` accepts. Width 0 asks for the arbitrary representation.
fn narrowest(kind: NumericKind, width: u32, fixed: impl Fn(u32) -> Option<Value>) -> Option<Value> {
    if width == 0 {
        return None;
    }
    let found = representable_widths(kind)
        .iter()
        .copied()
        .filter(|&w| w >= width)
        .find_map(fixed);
    let landed = found.as_ref().and_then(Value::numeric_type).map(|n| n.width);
    if landed != Some(width) {
        tracing::trace!(kind = kind.name(), width, ?landed, "result escalated past its static width");
    }
    found
}

pub(crate) fn nat_value(value: AInt, width: u32) -> Value {
    if value.is_negative() {
        return int_value(value, width);
    }
    narrowest(NumericKind::Nat, width, |w| match w {
        16 => value.to_u16().map(Value::Nat16),
        32 => value.to_u32().map(Value::Nat32),
        64 => value.to_u64().map(Value::Nat64),
        _ => None,
    })
    .unwrap_or(Value::ANat(value))
}

pub(crate) fn int_value(value: AInt, width: u32) -> Value {
    narrowest(NumericKind::Int, width, |w| match w {
        16 => value.to_i16().map(Value::Int16),
        32 => value.to_i32().map(Value::Int32),
        64 => value.to_i64().map(Value::Int64),
        _ => None,
    })
    .unwrap_or(Value::AInt(value))
}

pub(crate) fn ratio_value(value: ARatio, width: u32) -> Value {
    narrowest(NumericKind::Ratio, width, |w| match w {
        32 => Ratio32::from_exact(&value).map(Value::Ratio32),
        64 => Ratio64::from_exact(&value).map(Value::Ratio64),
        128 => Ratio128::from_exact(&value).map(Value::Ratio128),
        _ => None,
    })
    .unwrap_or(Value::ARatio(value))
}
