// error.rs

use thiserror::Error;

/// Failure to build an arbitrary-precision number from external input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("empty numeric literal")]
    Empty,

    #[error("invalid digit '{digit}' for radix {radix}")]
    InvalidDigit { digit: char, radix: u32 },

    #[error("unsupported radix {0} (expected 2..=36)")]
    UnsupportedRadix(u32),

    #[error("rational literal has a zero denominator")]
    ZeroDenominator,

    #[error("exponent out of range in real literal")]
    ExponentOutOfRange,

    #[error("cannot represent a non-finite float exactly")]
    NonFinite,
}
