// type_arena/query.rs
//
// TypeArena query methods: predicates and unwrap helpers.

use super::arena::TypeArena;
use super::sema_type::*;
use super::type_id::{TypeId, TypeIdVec};

impl TypeArena {
    // ========================================================================
    // Query methods - predicates and unwrap helpers
    // ========================================================================

    /// Numeric category and width, for `Numeric` types only (not Number).
    #[inline]
    pub fn numeric_type(&self, id: TypeId) -> Option<NumericType> {
        match self.get(id) {
            SemaType::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    /// Any numeric type, Number included.
    pub fn is_numeric(&self, id: TypeId) -> bool {
        id == TypeId::NUMBER || self.numeric_type(id).is_some()
    }

    pub fn is_integral(&self, id: TypeId) -> bool {
        self.numeric_type(id).is_some_and(|n| n.kind.is_integral())
    }

    #[inline]
    pub fn text_kind(&self, id: TypeId) -> Option<TextKind> {
        match self.get(id) {
            SemaType::Text(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_pseudo(&self, id: TypeId) -> bool {
        matches!(self.get(id), SemaType::Pseudo { .. })
    }

    pub fn is_scalar(&self, id: TypeId) -> bool {
        self.get(id).is_scalar()
    }

    /// Unwrap a function type, returning (params, result).
    pub fn unwrap_function(&self, id: TypeId) -> Option<(&TypeIdVec, TypeId)> {
        match self.get(id) {
            SemaType::Function { params, result } => Some((params, *result)),
            SemaType::Closure { function, .. } => self.unwrap_function(*function),
            _ => None,
        }
    }

    pub fn unwrap_array(&self, id: TypeId) -> Option<(TypeId, u64)> {
        match self.get(id) {
            SemaType::Array { element, len } => Some((*element, *len)),
            _ => None,
        }
    }

    pub fn unwrap_product(&self, id: TypeId) -> Option<&TypeIdVec> {
        match self.get(id) {
            SemaType::Product(components) => Some(components),
            _ => None,
        }
    }

    pub fn unwrap_sum(&self, id: TypeId) -> Option<&TypeIdVec> {
        match self.get(id) {
            SemaType::Sum(cases) => Some(cases),
            _ => None,
        }
    }

    pub fn unwrap_record(&self, id: TypeId) -> Option<&FieldVec> {
        match self.get(id) {
            SemaType::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Type of a record field by name.
    pub fn record_field(&self, id: TypeId, name: &str) -> Option<TypeId> {
        self.unwrap_record(id)?
            .iter()
            .find(|f| &*f.name == name)
            .map(|f| f.ty)
    }
}
