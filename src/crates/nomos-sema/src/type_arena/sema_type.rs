// type_arena/sema_type.rs
//
// SemaType: the canonical interned type representation and its scalar parts.

use smallvec::SmallVec;

use crate::ops::OpSet;

use super::type_id::{TypeId, TypeIdVec};

/// Numeric categories, ordered from most to least specific.
///
/// `Nat < Int < Ratio < Real`; `Number` sits above all of them and is a
/// separate [`SemaType`] variant since it carries no width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericKind {
    Nat,
    Int,
    Ratio,
    Real,
}

impl NumericKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Nat => "Nat",
            Self::Int => "Int",
            Self::Ratio => "Ratio",
            Self::Real => "Real",
        }
    }

    /// The next less specific category, if any.
    pub fn general(self) -> Option<NumericKind> {
        match self {
            Self::Nat => Some(Self::Int),
            Self::Int => Some(Self::Ratio),
            Self::Ratio => Some(Self::Real),
            Self::Real => None,
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(self, Self::Nat | Self::Int)
    }
}

/// A numeric category with a bit width. Width 0 is the unbounded
/// (arbitrary-precision) element of the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericType {
    pub kind: NumericKind,
    pub width: u32,
}

impl NumericType {
    pub const fn new(kind: NumericKind, width: u32) -> Self {
        NumericType { kind, width }
    }

    pub const fn abstract_of(kind: NumericKind) -> Self {
        NumericType { kind, width: 0 }
    }

    #[inline]
    pub fn is_abstract(self) -> bool {
        self.width == 0
    }
}

/// Text categories. ASCII text is valid UTF8 text, which is valid generic text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextKind {
    Ascii,
    Utf8,
    String,
}

impl TextKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascii => "StringASCII",
            Self::Utf8 => "StringUTF8",
            Self::String => "String",
        }
    }
}

/// A named record field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordField {
    pub name: Box<str>,
    pub ty: TypeId,
}

pub type FieldVec = SmallVec<[RecordField; 4]>;

/// The canonical interned type representation.
///
/// Children are referenced by [`TypeId`], so hashing and comparing a
/// `SemaType` is shallow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemaType {
    Top,
    Bottom,
    Meta,
    Module,
    Unit,
    Bool,
    /// Any numeric value.
    Number,
    Numeric(NumericType),
    Text(TextKind),
    /// Placeholder for a type not resolved yet. `index` keeps every pseudo
    /// type distinct; `usage` is the operator set the final type must support.
    Pseudo {
        index: u32,
        usage: OpSet,
    },
    /// `len == 0` is an unsized array.
    Array {
        element: TypeId,
        len: u64,
    },
    Function {
        result: TypeId,
        params: TypeIdVec,
    },
    Closure {
        function: TypeId,
        closed: TypeIdVec,
    },
    /// Cases sorted by TypeId, deduplicated, never nested, at least two.
    Sum(TypeIdVec),
    Product(TypeIdVec),
    Record(FieldVec),
}

impl SemaType {
    /// Scalars: Unit, Bool, the numeric and the text types.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            SemaType::Unit
                | SemaType::Bool
                | SemaType::Number
                | SemaType::Numeric(_)
                | SemaType::Text(_)
        )
    }
}
