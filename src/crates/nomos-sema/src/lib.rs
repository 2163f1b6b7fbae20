//! nomos semantic core: interned structural types, the numeric promotion
//! lattice, operators and symbol mangling.

pub mod mangle;
pub mod numeric_model;
pub mod ops;
pub mod type_arena;
pub mod type_display;

// Re-exports: public API surface
pub use numeric_model::{
    arithmetic_result, fits, lift_width, literal_type, make_signed_numeric, pow_result,
    promote_numeric, representable_widths, round_width,
};
pub use ops::{BinaryOp, OpSet, UnaryOp};
pub use type_arena::{
    NumericKind, NumericType, RecordField, SemaType, TextKind, TypeArena, TypeId, TypeIdVec,
};
pub use type_display::display_type_id;
