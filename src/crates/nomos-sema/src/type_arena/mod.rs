// type_arena/mod.rs
//
// Interned type system using TypeId handles for O(1) equality and minimal allocations.
//
// This module provides the canonical type representation for nomos:
// - TypeId: u32 handle to an interned type (Copy, trivial Eq/Hash)
// - TypeArena: per-compilation storage with automatic deduplication
// - SemaType: the canonical type representation using TypeId for child types
// - castability and promotion over the numeric lattice

mod arena;
mod cast;
mod promote;
mod query;
pub mod sema_type;
#[cfg(test)]
mod tests;
pub mod type_id;

pub use arena::*;
pub use sema_type::*;
pub use type_id::*;
