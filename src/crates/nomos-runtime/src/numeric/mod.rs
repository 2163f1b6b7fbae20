//! Numeric representations, exact conversions and operator dispatch.
//!
//! Operands are first brought to the representation the numeric lattice
//! assigns to the operation's result, the operation is carried out exactly,
//! and the result is narrowed back to the smallest fixed width at or above
//! the static width. A result that no fixed width holds escalates to the
//! arbitrary representation of its category.

mod convert;
mod dispatch;
mod fixed;

pub(crate) use convert::{int_value, nat_value, ratio_value};
pub(crate) use dispatch::{compare, numeric_binary, numeric_neg};
pub use fixed::{Ratio32, Ratio64, Ratio128};
