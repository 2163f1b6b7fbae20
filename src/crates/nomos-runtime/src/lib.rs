//! nomos runtime: tagged values, numeric dispatch over the promotion
//! lattice, and evaluation of typed expression trees.

pub mod bindings;
pub mod builder;
pub mod callable;
pub mod errors;
pub mod expr;
pub mod module;
pub mod numeric;
pub mod options;
pub mod state;
pub mod store;
pub mod value;
mod value_ops;

// Re-exports: public API surface
pub use bindings::{Bindings, Frame};
pub use builder::ExprBuilder;
pub use callable::{Callable, LambdaFunction, NativeBody, NativeFunction};
pub use errors::{EvalError, OpError};
pub use expr::{ExprKind, TypedExpr};
pub use module::ModuleValue;
pub use numeric::{Ratio32, Ratio64, Ratio128};
pub use options::EvalOptions;
pub use state::EvalState;
pub use store::{ValueRef, ValueStore};
pub use value::Value;
