// real.rs
//
// AReal: binary floating point with an explicit precision, rounded to
// nearest-even after every operation.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::{AInt, ARatio, ParseNumberError, digits_of, split_sign};

/// Arbitrary-precision real: `mantissa * 2^exponent`.
///
/// The mantissa is kept odd (or zero), so two reals with the same value
/// have the same representation regardless of their precision.
#[derive(Clone, Debug)]
pub struct AReal {
    mantissa: BigInt,
    exponent: i64,
    precision: u32,
}

impl AReal {
    /// Precision, in mantissa bits, used when none is requested.
    pub const DEFAULT_PRECISION: u32 = 256;

    const MIN_PRECISION: u32 = 2;

    pub fn zero(precision: u32) -> Self {
        AReal {
            mantissa: BigInt::zero(),
            exponent: 0,
            precision: precision.max(Self::MIN_PRECISION),
        }
    }

    // ========================================================================
    // Rounding core
    // ========================================================================

    /// Round `(-1)^negative * mag * 2^exponent` to `precision` bits.
    /// `sticky` records that non-zero bits were already discarded below `mag`.
    fn rounded(
        mut mag: BigUint,
        negative: bool,
        mut exponent: i64,
        sticky: bool,
        precision: u32,
    ) -> Self {
        let precision = precision.max(Self::MIN_PRECISION);
        let bits = mag.bits();
        if bits > precision as u64 {
            let drop = bits - precision as u64;
            let half = BigUint::one() << (drop - 1);
            let mask = (BigUint::one() << drop) - 1u32;
            let low = &mag & &mask;
            mag >>= drop;
            exponent += drop as i64;
            let round_up = match low.cmp(&half) {
                Ordering::Greater => true,
                Ordering::Equal => sticky || mag.is_odd(),
                Ordering::Less => false,
            };
            if round_up {
                mag += 1u32;
            }
        }
        Self::normalized(mag, negative, exponent, precision)
    }

    fn normalized(mut mag: BigUint, negative: bool, mut exponent: i64, precision: u32) -> Self {
        if mag.is_zero() {
            return Self::zero(precision);
        }
        let tz = mag.trailing_zeros().unwrap_or(0);
        mag >>= tz;
        exponent += tz as i64;
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        AReal {
            mantissa: BigInt::from_biguint(sign, mag),
            exponent,
            precision,
        }
    }

    fn from_parts(value: BigInt, exponent: i64, precision: u32) -> Self {
        let (sign, mag) = value.into_parts();
        Self::rounded(mag, sign == Sign::Minus, exponent, false, precision)
    }

    /// Correctly rounded `num / den * 2^exponent`; `den` must be non-zero.
    fn from_quotient(
        num: BigUint,
        den: BigUint,
        negative: bool,
        exponent: i64,
        precision: u32,
    ) -> Self {
        debug_assert!(!den.is_zero());
        if num.is_zero() {
            return Self::zero(precision);
        }
        // Keep two guard bits above the requested precision in the quotient.
        let target = precision.max(Self::MIN_PRECISION) as i64 + 2;
        let shift = target - (num.bits() as i64 - den.bits() as i64);
        let (n, d) = if shift >= 0 {
            (num << shift as u64, den)
        } else {
            (num, den << shift.unsigned_abs())
        };
        let (q, r) = n.div_rem(&d);
        Self::rounded(q, negative, exponent - shift, !r.is_zero(), precision)
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    pub fn from_int(value: &AInt, precision: u32) -> Self {
        Self::from_parts(value.0.clone(), 0, precision)
    }

    pub fn from_ratio(value: &ARatio, precision: u32) -> Self {
        Self::from_quotient(
            value.numer().0.magnitude().clone(),
            value.denom().0.magnitude().clone(),
            value.is_negative(),
            0,
            precision,
        )
    }

    /// Exact conversion from `f64`; `None` for NaN and infinities.
    pub fn from_f64(value: f64, precision: u32) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        if value == 0.0 {
            return Some(Self::zero(precision));
        }
        let bits = value.to_bits();
        let negative = bits >> 63 == 1;
        let biased = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);
        let (mag, exponent) = if biased == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), biased - 1075)
        };
        Some(Self::rounded(
            BigUint::from(mag),
            negative,
            exponent,
            false,
            precision.max(53),
        ))
    }

    /// Parse a decimal or radix literal such as `3.25`, `-0.1`, `1e-3`
    /// (exponent only in radix 10) or `ff.8` in radix 16.
    pub fn from_str_radix(src: &str, radix: u32, precision: u32) -> Result<Self, ParseNumberError> {
        let (negative, rest) = split_sign(src, radix)?;
        let (body, exp10) = match rest.find(['e', 'E']) {
            Some(at) if radix == 10 => {
                let exp = &rest[at + 1..];
                let (exp_negative, exp_digits) = split_sign(exp, 10)?;
                let exp_digits = digits_of(exp_digits, 10)?;
                let magnitude: i64 = exp_digits
                    .parse()
                    .map_err(|_| ParseNumberError::ExponentOutOfRange)?;
                (&rest[..at], if exp_negative { -magnitude } else { magnitude })
            }
            _ => (rest, 0),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseNumberError::Empty);
        }
        let int_digits = if int_part.is_empty() {
            String::from("0")
        } else {
            digits_of(int_part, radix)?
        };
        let frac_digits = if frac_part.is_empty() {
            String::new()
        } else {
            digits_of(frac_part, radix)?
        };

        let all = format!("{int_digits}{frac_digits}");
        let mut numer = AInt::from_str_radix(&all, radix)?;
        let mut denom = AInt::from(radix).pow(frac_digits.len() as u32);
        let scale = u32::try_from(exp10.unsigned_abs())
            .map_err(|_| ParseNumberError::ExponentOutOfRange)?;
        if exp10 >= 0 {
            numer = &numer * &AInt::from(10).pow(scale);
        } else {
            denom = &denom * &AInt::from(10).pow(scale);
        }
        if negative {
            numer = -numer;
        }
        let ratio = ARatio::new(numer, denom).ok_or(ParseNumberError::ZeroDenominator)?;
        Ok(Self::from_ratio(&ratio, precision))
    }

    /// Exact rational value.
    pub fn to_ratio(&self) -> ARatio {
        if self.exponent >= 0 {
            ARatio::from_integer(AInt(&self.mantissa << self.exponent as u64))
        } else {
            let denom = BigInt::one() << self.exponent.unsigned_abs();
            ARatio::new(AInt(self.mantissa.clone()), AInt(denom))
                .unwrap_or_else(ARatio::zero)
        }
    }

    /// Nearest `f64` (ties to even). Out-of-range values saturate to
    /// infinity or flush to zero.
    pub fn to_f64(&self) -> f64 {
        self.to_float_bits(53, -1074)
    }

    /// Nearest `f32` (ties to even).
    pub fn to_f32(&self) -> f32 {
        self.to_float_bits(24, -149) as f32
    }

    /// Round once to a float with `mantissa_bits` of precision whose least
    /// significant bit may not fall below `2^min_exponent`.
    fn to_float_bits(&self, mantissa_bits: u32, min_exponent: i64) -> f64 {
        let zero = if self.is_negative() { -0.0 } else { 0.0 };
        if self.is_zero() {
            return 0.0;
        }
        let mut mag = self.mantissa.magnitude().clone();
        let mut exponent = self.exponent;
        let bits = mag.bits() as i64;
        // Subnormal results keep fewer bits
        let keep = (mantissa_bits as i64).min(exponent + bits - min_exponent);
        if keep < 0 {
            return zero;
        }
        if keep < bits {
            let drop = (bits - keep) as u64;
            let half = BigUint::one() << (drop - 1);
            let low = &mag & ((BigUint::one() << drop) - 1u32);
            mag >>= drop;
            exponent += drop as i64;
            let round_up = match low.cmp(&half) {
                Ordering::Greater => true,
                Ordering::Equal => mag.is_odd(),
                Ordering::Less => false,
            };
            if round_up {
                mag += 1u32;
            }
        }
        if mag.is_zero() {
            return zero;
        }
        let m = mag.to_u64().unwrap_or(0) as f64;
        ldexp(if self.is_negative() { -m } else { m }, exponent)
    }

    /// True if converting to `f64` and back gives this exact value.
    pub fn rounds_to_f64(&self) -> bool {
        let f = self.to_f64();
        f.is_finite() && Self::from_f64(f, self.precision).is_some_and(|back| back == *self)
    }

    /// True if converting to `f32` and back gives this exact value.
    pub fn rounds_to_f32(&self) -> bool {
        let f = self.to_f32();
        f.is_finite()
            && Self::from_f64(f as f64, self.precision).is_some_and(|back| back == *self)
    }

    /// Same value rounded to a different precision.
    pub fn with_precision(&self, precision: u32) -> Self {
        Self::rounded(
            self.mantissa.magnitude().clone(),
            self.is_negative(),
            self.exponent,
            false,
            precision,
        )
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// `|floor(log2 |self|)|`, the binary order of magnitude; 0 for zero.
    pub fn scale_bits(&self) -> u64 {
        if self.is_zero() {
            return 0;
        }
        (self.exponent + self.mantissa.bits() as i64 - 1).unsigned_abs()
    }

    /// Significant bits in the mantissa.
    pub fn num_bits(&self) -> u64 {
        self.mantissa.bits()
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.exponent >= 0 || self.is_zero()
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    fn aligned(&self, rhs: &AReal) -> (BigInt, BigInt, i64) {
        let e = self.exponent.min(rhs.exponent);
        let a = &self.mantissa << (self.exponent - e) as u64;
        let b = &rhs.mantissa << (rhs.exponent - e) as u64;
        (a, b, e)
    }

    pub fn abs(&self) -> Self {
        AReal {
            mantissa: self.mantissa.abs(),
            ..self.clone()
        }
    }

    pub fn checked_div(&self, rhs: &AReal) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        let precision = self.precision.max(rhs.precision);
        Some(Self::from_quotient(
            self.mantissa.magnitude().clone(),
            rhs.mantissa.magnitude().clone(),
            self.is_negative() != rhs.is_negative(),
            self.exponent - rhs.exponent,
            precision,
        ))
    }

    /// Integer power by repeated squaring. Zero to a negative power is `None`.
    pub fn pow(&self, exponent: i64) -> Option<Self> {
        let mut result = Self::from_int(&AInt::one(), self.precision);
        let mut base = self.clone();
        let mut n = exponent.unsigned_abs();
        while n > 0 {
            if n & 1 == 1 {
                result = &result * &base;
            }
            n >>= 1;
            if n > 0 {
                base = &base * &base;
            }
        }
        if exponent < 0 {
            Self::from_int(&AInt::one(), self.precision).checked_div(&result)
        } else {
            Some(result)
        }
    }

    fn max_display_digits(&self) -> usize {
        // floor((precision - 1) * log10(2))
        let digits = (self.precision.saturating_sub(1) as u64 * 30103) / 100_000;
        digits.max(1) as usize
    }
}

fn ldexp(mut x: f64, e: i64) -> f64 {
    let mut e = e.clamp(-2200, 2200);
    while e > 1000 {
        x *= 2f64.powi(1000);
        e -= 1000;
    }
    while e < -1000 {
        x *= 2f64.powi(-1000);
        e += 1000;
    }
    x * 2f64.powi(e as i32)
}

impl TryFrom<f64> for AReal {
    type Error = ParseNumberError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value, Self::DEFAULT_PRECISION).ok_or(ParseNumberError::NonFinite)
    }
}

impl PartialEq for AReal {
    fn eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa && self.exponent == other.exponent
    }
}

impl Eq for AReal {}

impl Hash for AReal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mantissa.hash(state);
        self.exponent.hash(state);
    }
}

impl Ord for AReal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

impl PartialOrd for AReal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &AReal {
    type Output = AReal;
    fn add(self, rhs: &AReal) -> AReal {
        let (a, b, e) = self.aligned(rhs);
        AReal::from_parts(a + b, e, self.precision.max(rhs.precision))
    }
}

impl Sub for &AReal {
    type Output = AReal;
    fn sub(self, rhs: &AReal) -> AReal {
        let (a, b, e) = self.aligned(rhs);
        AReal::from_parts(a - b, e, self.precision.max(rhs.precision))
    }
}

impl Mul for &AReal {
    type Output = AReal;
    fn mul(self, rhs: &AReal) -> AReal {
        AReal::from_parts(
            &self.mantissa * &rhs.mantissa,
            self.exponent + rhs.exponent,
            self.precision.max(rhs.precision),
        )
    }
}

impl Neg for &AReal {
    type Output = AReal;
    fn neg(self) -> AReal {
        AReal {
            mantissa: -&self.mantissa,
            ..self.clone()
        }
    }
}

impl Neg for AReal {
    type Output = AReal;
    fn neg(self) -> AReal {
        AReal {
            mantissa: -self.mantissa,
            ..self
        }
    }
}

impl fmt::Display for AReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0.0");
        }
        // value = digits / 10^scale
        let mag = self.mantissa.magnitude().clone();
        let (digits, mut scale) = if self.exponent >= 0 {
            (mag << self.exponent as u64, 0u64)
        } else {
            let k = self.exponent.unsigned_abs();
            (mag * num_traits::pow(BigUint::from(5u32), k as usize), k)
        };
        let mut text = digits.to_str_radix(10);
        let limit = self.max_display_digits();
        if scale > 0 && text.len() > limit {
            // Round away digits below the precision, but never integer digits.
            let drop = ((text.len() - limit) as u64).min(scale);
            let divisor = num_traits::pow(BigUint::from(10u32), drop as usize);
            let (mut q, r) = digits.div_rem(&divisor);
            match (r * 2u32).cmp(&divisor) {
                Ordering::Greater => q += 1u32,
                Ordering::Equal if q.is_odd() => q += 1u32,
                _ => {}
            }
            text = q.to_str_radix(10);
            scale -= drop;
        }

        let scale = scale as usize;
        let (int_part, frac_part) = if scale == 0 {
            (text, String::new())
        } else if text.len() > scale {
            let split = text.len() - scale;
            (text[..split].to_string(), text[split..].to_string())
        } else {
            ("0".to_string(), format!("{}{}", "0".repeat(scale - text.len()), text))
        };
        let frac = frac_part.trim_end_matches('0');
        let sign = if self.is_negative() { "-" } else { "" };
        if frac.is_empty() {
            write!(f, "{sign}{int_part}.0")
        } else {
            write!(f, "{sign}{int_part}.{frac}")
        }
    }
}
