// type_arena/type_id.rs
//
// TypeId: interned type handle with reserved constants for nullary types.

use smallvec::SmallVec;

/// Handle to an interned type in a [`TypeArena`](super::TypeArena).
///
/// Handles are only meaningful for the arena that produced them. Within one
/// arena, handle equality is structural type equality.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    // ========================================================================
    // Reserved TypeIds
    // These are guaranteed to be interned at these indices by TypeArena::new()
    // ========================================================================

    pub const TOP: TypeId = TypeId(0);
    pub const BOTTOM: TypeId = TypeId(1);
    /// The type of types.
    pub const META: TypeId = TypeId(2);
    pub const MODULE: TypeId = TypeId(3);
    pub const UNIT: TypeId = TypeId(4);
    pub const BOOL: TypeId = TypeId(5);
    pub const NUMBER: TypeId = TypeId(6);

    // Abstract (unbounded) numeric categories, width 0
    pub const NAT: TypeId = TypeId(7);
    pub const INT: TypeId = TypeId(8);
    pub const RATIO: TypeId = TypeId(9);
    pub const REAL: TypeId = TypeId(10);

    // Text
    pub const STRING: TypeId = TypeId(11);
    pub const STRING_ASCII: TypeId = TypeId(12);
    pub const STRING_UTF8: TypeId = TypeId(13);

    /// First non-reserved TypeId index (for dynamic types)
    pub const FIRST_DYNAMIC: u32 = 14;

    /// Get the raw index (for debugging/serialization)
    pub fn index(self) -> u32 {
        self.0
    }

    pub(super) fn from_raw(index: u32) -> Self {
        TypeId(index)
    }

    #[inline]
    pub fn is_top(self) -> bool {
        self == Self::TOP
    }

    #[inline]
    pub fn is_bottom(self) -> bool {
        self == Self::BOTTOM
    }

    #[inline]
    pub fn is_bool(self) -> bool {
        self == Self::BOOL
    }

    #[inline]
    pub fn is_unit(self) -> bool {
        self == Self::UNIT
    }

    /// One of Nat, Int, Ratio or Real at width 0 (no arena needed)
    #[inline]
    pub fn is_abstract_numeric(self) -> bool {
        self.0 >= Self::NAT.0 && self.0 <= Self::REAL.0
    }

    /// Any of the three text types (no arena needed)
    #[inline]
    pub fn is_text(self) -> bool {
        self.0 >= Self::STRING.0 && self.0 <= Self::STRING_UTF8.0
    }

    #[inline]
    pub fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

/// SmallVec for type children - inline up to 4 (covers most sums, products, params)
pub type TypeIdVec = SmallVec<[TypeId; 4]>;
