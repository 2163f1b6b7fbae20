// type_arena/cast.rs
//
// Castability: can a value of one type be represented as another without loss.

use crate::numeric_model;

use super::arena::TypeArena;
use super::sema_type::*;
use super::type_id::TypeId;

impl TypeArena {
    /// True if every value of `from` is representable as `to` without loss.
    ///
    /// Total: unrelated types are simply not castable.
    pub fn is_castable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to || to.is_top() || from.is_bottom() {
            return true;
        }

        match (self.get(from), self.get(to)) {
            // Anything satisfies a placeholder.
            (_, SemaType::Pseudo { .. }) => true,

            (SemaType::Numeric(_), SemaType::Number) => true,
            (SemaType::Numeric(a), SemaType::Numeric(b)) => numeric_model::fits(*a, *b),

            (SemaType::Text(a), SemaType::Text(b)) => a <= b,

            (
                SemaType::Array { element, len },
                SemaType::Array {
                    element: to_element,
                    len: to_len,
                },
            ) => element == to_element && (*to_len == 0 || (*len != 0 && len <= to_len)),

            (SemaType::Product(a), SemaType::Product(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| self.is_castable(x, y))
            }

            // A sum casts out only if every case does.
            (SemaType::Sum(cases), _) => cases.iter().all(|&c| self.is_castable(c, to)),
            // Into a sum: some case must accept it.
            (_, SemaType::Sum(cases)) => cases.iter().any(|&c| self.is_castable(from, c)),

            // A closure can stand in for its plain function type.
            (SemaType::Closure { function, .. }, SemaType::Function { .. }) => *function == to,

            _ => false,
        }
    }
}
