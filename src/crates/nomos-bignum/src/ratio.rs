// ratio.rs
//
// ARatio: exact rational in canonical form (lowest terms, positive denominator).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::{AInt, ParseNumberError, split_sign};

/// Arbitrary-precision rational number.
///
/// Every constructor normalises, so structural equality is value equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ARatio {
    numer: AInt,
    denom: AInt,
}

impl ARatio {
    /// Build `numer / denom`, or `None` when `denom` is zero.
    pub fn new(numer: AInt, denom: AInt) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        Some(Self::reduce(numer.0, denom.0))
    }

    pub fn from_integer(value: AInt) -> Self {
        ARatio {
            numer: value,
            denom: AInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(AInt::zero())
    }

    // denom must be non-zero
    fn reduce(numer: BigInt, denom: BigInt) -> Self {
        debug_assert!(!denom.is_zero());
        let g = numer.gcd(&denom);
        let (mut n, mut d) = if g.is_one() {
            (numer, denom)
        } else {
            (numer / &g, denom / &g)
        };
        if d.is_negative() {
            n = -n;
            d = -d;
        }
        ARatio {
            numer: AInt(n),
            denom: AInt(d),
        }
    }

    /// Parse `"num/den"` or a bare integer, both in `radix`.
    pub fn from_str_radix(src: &str, radix: u32) -> Result<Self, ParseNumberError> {
        // Validates the radix before we split.
        split_sign(src, radix)?;
        match src.split_once('/') {
            Some((n, d)) => {
                let numer = AInt::from_str_radix(n, radix)?;
                let denom = AInt::from_str_radix(d, radix)?;
                Self::new(numer, denom).ok_or(ParseNumberError::ZeroDenominator)
            }
            None => Ok(Self::from_integer(AInt::from_str_radix(src, radix)?)),
        }
    }

    pub fn numer(&self) -> &AInt {
        &self.numer
    }

    pub fn denom(&self) -> &AInt {
        &self.denom
    }

    /// Signed bit width of the numerator.
    pub fn numer_bits(&self) -> u64 {
        self.numer.num_bits()
    }

    /// Unsigned bit width of the (always positive) denominator.
    pub fn denom_bits(&self) -> u64 {
        self.denom.num_bits_unsigned()
    }

    /// Bits per component needed to store this ratio with equal-width parts.
    pub fn num_bits(&self) -> u64 {
        self.numer_bits().max(self.denom_bits())
    }

    pub fn is_integer(&self) -> bool {
        self.denom.0.is_one()
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    pub fn abs(&self) -> Self {
        ARatio {
            numer: self.numer.abs(),
            denom: self.denom.clone(),
        }
    }

    /// Multiplicative inverse, `None` for zero.
    pub fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        Some(Self::reduce(self.denom.0.clone(), self.numer.0.clone()))
    }

    pub fn checked_div(&self, rhs: &ARatio) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self::reduce(
            &self.numer.0 * &rhs.denom.0,
            &self.denom.0 * &rhs.numer.0,
        ))
    }

    /// Integer power. A negative exponent inverts first, so zero raised to
    /// a negative power is `None`.
    pub fn pow(&self, exponent: i64) -> Option<Self> {
        let base = if exponent < 0 { self.recip()? } else { self.clone() };
        let e = u32::try_from(exponent.unsigned_abs()).ok()?;
        Some(ARatio {
            numer: base.numer.pow(e),
            denom: base.denom.pow(e),
        })
    }

    /// Truncate toward zero.
    pub fn trunc(&self) -> AInt {
        AInt(&self.numer.0 / &self.denom.0)
    }

    pub fn to_f64(&self) -> f64 {
        crate::AReal::from_ratio(self, 53).to_f64()
    }
}

impl From<AInt> for ARatio {
    fn from(v: AInt) -> Self {
        Self::from_integer(v)
    }
}

impl Ord for ARatio {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication keeps the order.
        (&self.numer.0 * &other.denom.0).cmp(&(&other.numer.0 * &self.denom.0))
    }
}

impl PartialOrd for ARatio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &ARatio {
    type Output = ARatio;
    fn add(self, rhs: &ARatio) -> ARatio {
        ARatio::reduce(
            &self.numer.0 * &rhs.denom.0 + &rhs.numer.0 * &self.denom.0,
            &self.denom.0 * &rhs.denom.0,
        )
    }
}

impl Sub for &ARatio {
    type Output = ARatio;
    fn sub(self, rhs: &ARatio) -> ARatio {
        ARatio::reduce(
            &self.numer.0 * &rhs.denom.0 - &rhs.numer.0 * &self.denom.0,
            &self.denom.0 * &rhs.denom.0,
        )
    }
}

impl Mul for &ARatio {
    type Output = ARatio;
    fn mul(self, rhs: &ARatio) -> ARatio {
        ARatio::reduce(&self.numer.0 * &rhs.numer.0, &self.denom.0 * &rhs.denom.0)
    }
}

impl Add for ARatio {
    type Output = ARatio;
    fn add(self, rhs: ARatio) -> ARatio {
        &self + &rhs
    }
}

impl Sub for ARatio {
    type Output = ARatio;
    fn sub(self, rhs: ARatio) -> ARatio {
        &self - &rhs
    }
}

impl Mul for ARatio {
    type Output = ARatio;
    fn mul(self, rhs: ARatio) -> ARatio {
        &self * &rhs
    }
}

impl Neg for ARatio {
    type Output = ARatio;
    fn neg(self) -> ARatio {
        ARatio {
            numer: -self.numer,
            denom: self.denom,
        }
    }
}

impl Neg for &ARatio {
    type Output = ARatio;
    fn neg(self) -> ARatio {
        -self.clone()
    }
}

impl fmt::Display for ARatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}
