// src/lib.rs
//! nomos: a structural type lattice with a numeric tower, and a tree
//! evaluator whose values follow the same promotion rules.
//!
//! The work is split across member crates, re-exported here:
//!
//! - [`bignum`]: arbitrary-precision integers, rationals and binary reals
//! - [`sema`]: interned types, castability, promotion, operator typing
//! - [`runtime`]: tagged values, numeric dispatch, scopes and evaluation

pub mod logging;
pub mod report;

pub use nomos_bignum as bignum;
pub use nomos_runtime as runtime;
pub use nomos_sema as sema;

pub use logging::init_tracing;
pub use nomos_runtime::{EvalError, EvalOptions, EvalState, ExprBuilder, TypedExpr, Value};
pub use nomos_sema::{BinaryOp, TypeArena, TypeId, UnaryOp};
