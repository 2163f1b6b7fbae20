// int.rs
//
// AInt: unbounded signed integer.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Num, One, Signed, ToPrimitive, Zero};

use crate::{ParseNumberError, digits_of, split_sign};

/// Arbitrary-precision integer.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AInt(pub(crate) BigInt);

impl AInt {
    pub fn zero() -> Self {
        AInt(BigInt::zero())
    }

    pub fn one() -> Self {
        AInt(BigInt::one())
    }

    /// Parse a literal in `radix` (2..=36). Accepts a leading sign and `_`
    /// digit separators.
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseNumberError> {
        let (negative, rest) = split_sign(src, radix)?;
        let digits = digits_of(rest, radix)?;
        let magnitude = BigInt::from_str_radix(&digits, radix)
            .map_err(|_| ParseNumberError::Empty)?;
        Ok(AInt(if negative { -magnitude } else { magnitude }))
    }

    pub fn from_bigint(value: BigInt) -> Self {
        AInt(value)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_bigint(self) -> BigInt {
        self.0
    }

    /// Bits needed to store this value in two's complement.
    ///
    /// Zero and one both need two bits (`0b00`, `0b01`); `-1` needs one more
    /// than its magnitude just like any other value.
    pub fn num_bits(&self) -> u64 {
        self.0.bits().max(1) + 1
    }

    /// Bits needed to store the magnitude as an unsigned value.
    pub fn num_bits_unsigned(&self) -> u64 {
        self.0.bits().max(1)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        AInt(self.0.abs())
    }

    pub fn pow(&self, exponent: u32) -> Self {
        AInt(num_traits::pow(self.0.clone(), exponent as usize))
    }

    /// Euclidean remainder; the result is never negative.
    pub fn checked_rem_euclid(&self, rhs: &AInt) -> Option<AInt> {
        if rhs.is_zero() {
            return None;
        }
        let r = self.0.mod_floor(&rhs.0);
        Some(AInt(if r.is_negative() { r + rhs.0.abs() } else { r }))
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn to_i32(&self) -> Option<i32> {
        self.0.to_i32()
    }

    pub fn to_u32(&self) -> Option<u32> {
        self.0.to_u32()
    }

    pub fn to_i16(&self) -> Option<i16> {
        self.0.to_i16()
    }

    pub fn to_u16(&self) -> Option<u16> {
        self.0.to_u16()
    }

    /// Nearest `f64`; huge magnitudes become infinite.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(if self.is_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        })
    }

    pub fn to_str_radix(&self, radix: u32) -> String {
        self.0.to_str_radix(radix)
    }

    pub fn cmp_zero(&self) -> Ordering {
        self.0.cmp(&BigInt::zero())
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for AInt {
                fn from(v: $t) -> Self {
                    AInt(BigInt::from(v))
                }
            }
        )*
    };
}

impl_from_primitive!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

impl From<BigInt> for AInt {
    fn from(v: BigInt) -> Self {
        AInt(v)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for AInt {
            type Output = AInt;
            fn $method(self, rhs: AInt) -> AInt {
                AInt($trait::$method(self.0, rhs.0))
            }
        }

        impl<'a> $trait<&'a AInt> for &'a AInt {
            type Output = AInt;
            fn $method(self, rhs: &'a AInt) -> AInt {
                AInt($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for AInt {
    type Output = AInt;
    fn neg(self) -> AInt {
        AInt(-self.0)
    }
}

impl Neg for &AInt {
    type Output = AInt;
    fn neg(self) -> AInt {
        AInt(-&self.0)
    }
}

impl fmt::Display for AInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_and_hex() {
        assert_eq!(AInt::from_str_radix("120000", 10).unwrap(), AInt::from(120000));
        assert_eq!(AInt::from_str_radix("-ff", 16).unwrap(), AInt::from(-255));
        assert_eq!(AInt::from_str_radix("1_000", 10).unwrap(), AInt::from(1000));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            AInt::from_str_radix("12a", 10),
            Err(ParseNumberError::InvalidDigit { digit: 'a', radix: 10 })
        );
        assert_eq!(AInt::from_str_radix("-", 10), Err(ParseNumberError::Empty));
        assert_eq!(
            AInt::from_str_radix("1", 40),
            Err(ParseNumberError::UnsupportedRadix(40))
        );
    }

    #[test]
    fn bit_counts() {
        assert_eq!(AInt::from(0).num_bits(), 2);
        assert_eq!(AInt::from(255).num_bits_unsigned(), 8);
        assert_eq!(AInt::from(255).num_bits(), 9);
        assert_eq!(AInt::from(-128).num_bits(), 9);
        assert_eq!(AInt::from(u64::MAX).num_bits(), 65);
    }

    #[test]
    fn arithmetic_does_not_overflow() {
        let max = AInt::from(i64::MAX);
        let sum = &max + &max;
        assert_eq!(sum.to_i64(), None);
        assert_eq!(sum, AInt::from(i64::MAX as i128 * 2));
        assert_eq!(-AInt::from(5), AInt::from(-5));
        assert_eq!(AInt::from(-7).abs(), AInt::from(7));
    }

    #[test]
    fn euclidean_remainder() {
        assert_eq!(
            AInt::from(-7).checked_rem_euclid(&AInt::from(3)),
            Some(AInt::from(2))
        );
        assert_eq!(
            AInt::from(7).checked_rem_euclid(&AInt::from(-3)),
            Some(AInt::from(1))
        );
        assert_eq!(AInt::from(7).checked_rem_euclid(&AInt::zero()), None);
    }

    #[test]
    fn pow_and_display() {
        assert_eq!(AInt::from(2).pow(70).to_string(), "1180591620717411303424");
        assert_eq!(AInt::from(-3).to_str_radix(2), "-11");
    }
}
