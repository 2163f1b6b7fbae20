// type_arena/arena.rs
//
// TypeArena: interning storage and the structural type builders.

use rustc_hash::FxHashMap;

use crate::ops::OpSet;

use super::sema_type::*;
use super::type_id::{TypeId, TypeIdVec};

/// Per-compilation type storage with automatic deduplication.
///
/// Every builder returns the canonical handle for its structural input, so
/// two calls with equal input always return equal handles. Types are never
/// removed; the arena frees them all at once when dropped.
#[derive(Debug, Clone)]
pub struct TypeArena {
    types: Vec<SemaType>,
    intern_map: FxHashMap<SemaType, TypeId>,
    next_pseudo: u32,
}

impl Default for TypeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeArena {
    pub fn new() -> Self {
        let mut arena = Self {
            types: Vec::new(),
            intern_map: FxHashMap::default(),
            next_pseudo: 0,
        };

        // Reserved types, in TypeId order
        let reserved = [
            (SemaType::Top, TypeId::TOP),
            (SemaType::Bottom, TypeId::BOTTOM),
            (SemaType::Meta, TypeId::META),
            (SemaType::Module, TypeId::MODULE),
            (SemaType::Unit, TypeId::UNIT),
            (SemaType::Bool, TypeId::BOOL),
            (SemaType::Number, TypeId::NUMBER),
            (
                SemaType::Numeric(NumericType::abstract_of(NumericKind::Nat)),
                TypeId::NAT,
            ),
            (
                SemaType::Numeric(NumericType::abstract_of(NumericKind::Int)),
                TypeId::INT,
            ),
            (
                SemaType::Numeric(NumericType::abstract_of(NumericKind::Ratio)),
                TypeId::RATIO,
            ),
            (
                SemaType::Numeric(NumericType::abstract_of(NumericKind::Real)),
                TypeId::REAL,
            ),
            (SemaType::Text(TextKind::String), TypeId::STRING),
            (SemaType::Text(TextKind::Ascii), TypeId::STRING_ASCII),
            (SemaType::Text(TextKind::Utf8), TypeId::STRING_UTF8),
        ];
        for (ty, expected) in reserved {
            let id = arena.intern(ty);
            debug_assert_eq!(id, expected);
        }
        debug_assert_eq!(arena.types.len() as u32, TypeId::FIRST_DYNAMIC);

        arena
    }

    /// Intern a type, returning the existing TypeId if already present
    pub(super) fn intern(&mut self, ty: SemaType) -> TypeId {
        if let Some(&id) = self.intern_map.get(&ty) {
            return id;
        }
        let id = TypeId::from_raw(self.types.len() as u32);
        if id.index() >= TypeId::FIRST_DYNAMIC {
            tracing::trace!(id = id.index(), ty = ?ty, "interned new type");
        }
        self.types.push(ty.clone());
        self.intern_map.insert(ty, id);
        id
    }

    /// Get the SemaType for a TypeId
    pub fn get(&self, id: TypeId) -> &SemaType {
        &self.types[id.index() as usize]
    }

    /// Number of distinct types interned so far, reserved ones included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // ========================================================================
    // Scalar builders
    // ========================================================================

    /// Canonical numeric type. Width 0 returns the reserved abstract handle.
    pub fn numeric(&mut self, ty: NumericType) -> TypeId {
        if ty.is_abstract() {
            return match ty.kind {
                NumericKind::Nat => TypeId::NAT,
                NumericKind::Int => TypeId::INT,
                NumericKind::Ratio => TypeId::RATIO,
                NumericKind::Real => TypeId::REAL,
            };
        }
        self.intern(SemaType::Numeric(ty))
    }

    pub fn nat(&mut self, width: u32) -> TypeId {
        self.numeric(NumericType::new(NumericKind::Nat, width))
    }

    pub fn int(&mut self, width: u32) -> TypeId {
        self.numeric(NumericType::new(NumericKind::Int, width))
    }

    pub fn ratio(&mut self, width: u32) -> TypeId {
        self.numeric(NumericType::new(NumericKind::Ratio, width))
    }

    pub fn real(&mut self, width: u32) -> TypeId {
        self.numeric(NumericType::new(NumericKind::Real, width))
    }

    /// Text types are all reserved; no interning needed.
    pub fn text(&self, kind: TextKind) -> TypeId {
        match kind {
            TextKind::String => TypeId::STRING,
            TextKind::Ascii => TypeId::STRING_ASCII,
            TextKind::Utf8 => TypeId::STRING_UTF8,
        }
    }

    /// A fresh placeholder type. Never equal to any other type, including
    /// other pseudo types with the same usage.
    pub fn pseudo(&mut self, usage: OpSet) -> TypeId {
        let index = self.next_pseudo;
        self.next_pseudo += 1;
        self.intern(SemaType::Pseudo { index, usage })
    }

    // ========================================================================
    // Compound builders
    // ========================================================================

    /// Array of `len` elements; `len == 0` is an unsized array.
    pub fn array(&mut self, element: TypeId, len: u64) -> TypeId {
        self.intern(SemaType::Array { element, len })
    }

    /// Function type. Parameter order is significant.
    pub fn function(
        &mut self,
        params: impl IntoIterator<Item = TypeId>,
        result: TypeId,
    ) -> TypeId {
        self.intern(SemaType::Function {
            result,
            params: params.into_iter().collect(),
        })
    }

    /// A function type closing over values of the `closed` types.
    pub fn closure(
        &mut self,
        function: TypeId,
        closed: impl IntoIterator<Item = TypeId>,
    ) -> TypeId {
        debug_assert!(matches!(self.get(function), SemaType::Function { .. }));
        self.intern(SemaType::Closure {
            function,
            closed: closed.into_iter().collect(),
        })
    }

    /// Sum (union) type: nested sums are flattened, cases sorted and
    /// deduplicated. One case is that case; no cases is Bottom; Top absorbs
    /// everything.
    pub fn sum(&mut self, cases: impl IntoIterator<Item = TypeId>) -> TypeId {
        let mut flattened: TypeIdVec = TypeIdVec::new();
        for case in cases {
            match self.get(case) {
                SemaType::Sum(inner) => flattened.extend(inner.iter().copied()),
                SemaType::Bottom => {}
                _ => flattened.push(case),
            }
        }

        if flattened.contains(&TypeId::TOP) {
            return TypeId::TOP;
        }

        flattened.sort_unstable();
        flattened.dedup();

        match flattened.len() {
            0 => TypeId::BOTTOM,
            1 => flattened[0],
            _ => self.intern(SemaType::Sum(flattened)),
        }
    }

    /// Product (tuple) type. Component order is significant; the empty
    /// product is Unit.
    pub fn product(&mut self, components: impl IntoIterator<Item = TypeId>) -> TypeId {
        let components: TypeIdVec = components.into_iter().collect();
        if components.is_empty() {
            return TypeId::UNIT;
        }
        self.intern(SemaType::Product(components))
    }

    /// Record type. Field order is significant.
    pub fn record<N: Into<Box<str>>>(
        &mut self,
        fields: impl IntoIterator<Item = (N, TypeId)>,
    ) -> TypeId {
        let fields: FieldVec = fields
            .into_iter()
            .map(|(name, ty)| RecordField {
                name: name.into(),
                ty,
            })
            .collect();
        self.intern(SemaType::Record(fields))
    }
}
