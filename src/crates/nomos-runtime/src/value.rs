// value.rs
//
// Tagged runtime values. Every value carries its concrete representation;
// numeric variants map one-to-one onto the numeric types of the lattice.

use std::fmt;
use std::rc::Rc;

use nomos_bignum::{AInt, ARatio, AReal};
use nomos_sema::{NumericKind, NumericType, TextKind, TypeArena, TypeId};

use crate::callable::Callable;
use crate::module::ModuleValue;
use crate::numeric::{Ratio32, Ratio64, Ratio128};
use crate::store::ValueRef;

#[derive(Clone)]
pub enum Value {
    Unit,
    Bool(bool),

    Nat16(u16),
    Nat32(u32),
    Nat64(u64),
    ANat(AInt),

    Int16(i16),
    Int32(i32),
    Int64(i64),
    AInt(AInt),

    Ratio32(Ratio32),
    Ratio64(Ratio64),
    Ratio128(Ratio128),
    ARatio(ARatio),

    Real32(f32),
    Real64(f64),
    AReal(AReal),

    Ascii(Rc<str>),
    Utf8(Rc<str>),

    /// Non-empty tuple. The empty product is `Unit`.
    Product(Rc<[Value]>),
    Function(Rc<dyn Callable>),
    Module(Rc<ModuleValue>),
    /// A type used as a value.
    Type(TypeId),
    /// Handle to a value owned by the store.
    Ref(ValueRef),
}

impl Value {
    /// Text value tagged ASCII when every byte is ASCII, UTF-8 otherwise.
    pub fn text(s: &str) -> Value {
        if s.is_ascii() {
            Value::Ascii(Rc::from(s))
        } else {
            Value::Utf8(Rc::from(s))
        }
    }

    /// Tuple of `items`; no items is `Unit`.
    pub fn product(items: Vec<Value>) -> Value {
        if items.is_empty() {
            Value::Unit
        } else {
            Value::Product(Rc::from(items))
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Ascii(s) | Value::Utf8(s) => Some(s),
            _ => None,
        }
    }

    pub fn text_kind(&self) -> Option<TextKind> {
        match self {
            Value::Ascii(_) => Some(TextKind::Ascii),
            Value::Utf8(_) => Some(TextKind::Utf8),
            _ => None,
        }
    }

    /// Numeric type of this representation, `None` for non-numeric values.
    pub fn numeric_type(&self) -> Option<NumericType> {
        use NumericKind::*;
        let (kind, width) = match self {
            Value::Nat16(_) => (Nat, 16),
            Value::Nat32(_) => (Nat, 32),
            Value::Nat64(_) => (Nat, 64),
            Value::ANat(_) => (Nat, 0),
            Value::Int16(_) => (Int, 16),
            Value::Int32(_) => (Int, 32),
            Value::Int64(_) => (Int, 64),
            Value::AInt(_) => (Int, 0),
            Value::Ratio32(_) => (Ratio, 32),
            Value::Ratio64(_) => (Ratio, 64),
            Value::Ratio128(_) => (Ratio, 128),
            Value::ARatio(_) => (Ratio, 0),
            Value::Real32(_) => (Real, 32),
            Value::Real64(_) => (Real, 64),
            Value::AReal(_) => (Real, 0),
            _ => return None,
        };
        Some(NumericType::new(kind, width))
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_type().is_some()
    }

    /// Type of this value. A `Ref` has not been resolved, so its type is
    /// unknown and reported as Top.
    pub fn ty(&self, arena: &mut TypeArena) -> TypeId {
        match self {
            Value::Unit => TypeId::UNIT,
            Value::Bool(_) => TypeId::BOOL,
            Value::Ascii(_) => TypeId::STRING_ASCII,
            Value::Utf8(_) => TypeId::STRING_UTF8,
            Value::Product(items) => {
                let components: Vec<TypeId> = items.iter().map(|v| v.ty(arena)).collect();
                arena.product(components)
            }
            Value::Function(f) => f.ty(),
            Value::Module(_) => TypeId::MODULE,
            Value::Type(_) => TypeId::META,
            Value::Ref(_) => TypeId::TOP,
            numeric => numeric
                .numeric_type()
                .map_or(TypeId::TOP, |n| arena.numeric(n)),
        }
    }

    /// Display form that spells type values by name.
    pub fn display_with(&self, arena: &TypeArena) -> String {
        match self {
            Value::Type(id) => arena.display(*id),
            Value::Product(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.display_with(arena)).collect();
                format!("({})", parts.join(", "))
            }
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality of representations: `Nat16(1)` and `Nat32(1)`
    /// differ. Use `BinaryOp::Eq` for numeric equality across widths.
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Unit, Unit) => true,
            (Bool(a), Bool(b)) => a == b,
            (Nat16(a), Nat16(b)) => a == b,
            (Nat32(a), Nat32(b)) => a == b,
            (Nat64(a), Nat64(b)) => a == b,
            (ANat(a), ANat(b)) => a == b,
            (Int16(a), Int16(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (AInt(a), AInt(b)) => a == b,
            (Ratio32(a), Ratio32(b)) => a == b,
            (Ratio64(a), Ratio64(b)) => a == b,
            (Ratio128(a), Ratio128(b)) => a == b,
            (ARatio(a), ARatio(b)) => a == b,
            (Real32(a), Real32(b)) => a == b,
            (Real64(a), Real64(b)) => a == b,
            (AReal(a), AReal(b)) => a == b,
            (Ascii(a), Ascii(b)) | (Utf8(a), Utf8(b)) => a == b,
            (Product(a), Product(b)) => a == b,
            (Function(a), Function(b)) => Rc::ptr_eq(a, b),
            (Module(a), Module(b)) => Rc::ptr_eq(a, b),
            (Type(a), Type(b)) => a == b,
            (Ref(a), Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Nat16(v) => write!(f, "{v}"),
            Value::Nat32(v) => write!(f, "{v}"),
            Value::Nat64(v) => write!(f, "{v}"),
            Value::ANat(v) | Value::AInt(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::Int64(v) => write!(f, "{v}"),
            Value::Ratio32(v) => write!(f, "{v}"),
            Value::Ratio64(v) => write!(f, "{v}"),
            Value::Ratio128(v) => write!(f, "{v}"),
            Value::ARatio(v) => write!(f, "{v}"),
            // Debug keeps the fractional part: 2.0 rather than 2
            Value::Real32(v) => write!(f, "{v:?}"),
            Value::Real64(v) => write!(f, "{v:?}"),
            Value::AReal(v) => write!(f, "{v}"),
            Value::Ascii(s) | Value::Utf8(s) => write!(f, "{:?}", &**s),
            Value::Product(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Value::Function(_) => f.write_str("<function>"),
            Value::Module(m) => write!(f, "<module {}>", m.name()),
            Value::Type(id) => write!(f, "<type #{}>", id.index()),
            Value::Ref(r) => write!(f, "<ref {r:?}>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.numeric_type() {
            Some(n) if n.is_abstract() => write!(f, "{}({self})", n.kind.name()),
            Some(n) => write!(f, "{}{}({self})", n.kind.name(), n.width),
            None => write!(f, "{self}"),
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    u16 => Nat16,
    u32 => Nat32,
    u64 => Nat64,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    Ratio32 => Ratio32,
    Ratio64 => Ratio64,
    Ratio128 => Ratio128,
    ARatio => ARatio,
    f32 => Real32,
    f64 => Real64,
    AReal => AReal,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unit
    }
}
