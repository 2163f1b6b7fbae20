// numeric/fixed.rs
//
// Fixed-width rationals. A RatioN value keeps a signed numerator and an
// unsigned denominator of N/2 bits each, always in lowest terms.

use std::fmt;

use nomos_bignum::{AInt, ARatio};

macro_rules! fixed_ratio {
    ($name:ident, $numer:ty, $denom:ty, $width:expr, $to_numer:ident, $to_denom:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            numer: $numer,
            denom: $denom,
        }

        impl $name {
            /// Total width in bits of both components.
            pub const WIDTH: u32 = $width;

            /// Canonical ratio `numer / denom`. `None` for a zero
            /// denominator.
            pub fn new(numer: $numer, denom: $denom) -> Option<Self> {
                let exact = ARatio::new(AInt::from(numer), AInt::from(denom))?;
                // Reducing never grows either component.
                Self::from_exact(&exact)
            }

            /// Narrow an exact ratio, `None` if a component does not fit.
            pub fn from_exact(value: &ARatio) -> Option<Self> {
                Some(Self {
                    numer: value.numer().$to_numer()?,
                    denom: value.denom().$to_denom()?,
                })
            }

            pub fn numer(self) -> $numer {
                self.numer
            }

            pub fn denom(self) -> $denom {
                self.denom
            }

            pub fn to_exact(self) -> ARatio {
                // Invariant: denom is never zero
                ARatio::new(AInt::from(self.numer), AInt::from(self.denom))
                    .unwrap_or_else(ARatio::zero)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}/{}", self.numer, self.denom)
            }
        }
    };
}

fixed_ratio!(Ratio32, i16, u16, 32, to_i16, to_u16);
fixed_ratio!(Ratio64, i32, u32, 64, to_i32, to_u32);
fixed_ratio!(Ratio128, i64, u64, 128, to_i64, to_u64);
