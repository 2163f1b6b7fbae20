//! Arbitrary-precision numbers: the ceiling representation of every numeric
//! category in the nomos numeric tower.
//!
//! - [`AInt`]: unbounded integers
//! - [`ARatio`]: exact rationals, always kept in lowest terms
//! - [`AReal`]: binary floating point with a configurable precision
//!
//! Division by zero is never attempted here; every dividing entry point is
//! `checked_*` and returns `None` for a zero divisor.

mod error;
mod int;
mod ratio;
mod real;

pub use error::ParseNumberError;
pub use int::AInt;
pub use ratio::ARatio;
pub use real::AReal;

/// Validate a radix and split an optional leading sign.
pub(crate) fn split_sign(src: &str, radix: u32) -> Result<(bool, &str), ParseNumberError> {
    if !(2..=36).contains(&radix) {
        return Err(ParseNumberError::UnsupportedRadix(radix));
    }
    let src = src.trim();
    let (negative, rest) = match src.as_bytes().first() {
        Some(b'-') => (true, &src[1..]),
        Some(b'+') => (false, &src[1..]),
        _ => (false, src),
    };
    if rest.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    Ok((negative, rest))
}

/// Collect the digits of `src` in `radix`, skipping `_` separators.
pub(crate) fn digits_of(src: &str, radix: u32) -> Result<String, ParseNumberError> {
    let mut out = String::with_capacity(src.len());
    for c in src.chars() {
        if c == '_' {
            continue;
        }
        if c.to_digit(radix).is_none() {
            return Err(ParseNumberError::InvalidDigit { digit: c, radix });
        }
        out.push(c);
    }
    if out.is_empty() {
        return Err(ParseNumberError::Empty);
    }
    Ok(out)
}
