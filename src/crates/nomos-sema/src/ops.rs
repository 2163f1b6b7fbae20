// ops.rs
//
// Operators shared by the typechecker and the evaluator, plus the
// per-type operator sets.

use std::fmt;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 15] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Pow,
        BinaryOp::Concat,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Eq,
        BinaryOp::Ne,
        BinaryOp::Lt,
        BinaryOp::Le,
        BinaryOp::Gt,
        BinaryOp::Ge,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Mod,
            "^" => Self::Pow,
            "++" => Self::Concat,
            "&" => Self::And,
            "|" => Self::Or,
            "==" => Self::Eq,
            "!=" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::Concat => "++",
            Self::And => "&",
            Self::Or => "|",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Binding strength for Pratt parsing (higher binds tighter).
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::Ne => 3,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 4,
            Self::Add | Self::Sub | Self::Concat => 5,
            Self::Mul | Self::Div | Self::Mod => 6,
            Self::Pow => 7,
        }
    }

    /// Pow groups to the right (`a ^ b ^ c == a ^ (b ^ c)`).
    pub fn is_right_assoc(self) -> bool {
        self == Self::Pow
    }

    /// Operators whose result is always Bool.
    pub fn is_logic(self) -> bool {
        matches!(self, Self::And | Self::Or) || self.is_comparison()
    }

    pub fn is_comparison(self) -> bool {
        self.is_equality() || self.is_ordering()
    }

    pub fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }

    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod | Self::Pow
        )
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(Self::Neg),
            "!" => Some(Self::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Set of operators a type supports, or that a pseudo type must support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OpSet {
    binary: u16,
    unary: u8,
}

impl OpSet {
    pub const NONE: OpSet = OpSet {
        binary: 0,
        unary: 0,
    };

    /// Arithmetic, ordering and equality, plus negation.
    pub const NUMERIC: OpSet = OpSet::NONE
        .with_binary(BinaryOp::Add)
        .with_binary(BinaryOp::Sub)
        .with_binary(BinaryOp::Mul)
        .with_binary(BinaryOp::Div)
        .with_binary(BinaryOp::Mod)
        .with_binary(BinaryOp::Pow)
        .with_binary(BinaryOp::Eq)
        .with_binary(BinaryOp::Ne)
        .with_binary(BinaryOp::Lt)
        .with_binary(BinaryOp::Le)
        .with_binary(BinaryOp::Gt)
        .with_binary(BinaryOp::Ge)
        .with_unary(UnaryOp::Neg);

    pub const BOOL: OpSet = OpSet::NONE
        .with_binary(BinaryOp::And)
        .with_binary(BinaryOp::Or)
        .with_binary(BinaryOp::Eq)
        .with_binary(BinaryOp::Ne)
        .with_unary(UnaryOp::Not);

    pub const TEXT: OpSet = OpSet::NONE
        .with_binary(BinaryOp::Concat)
        .with_binary(BinaryOp::Eq)
        .with_binary(BinaryOp::Ne);

    pub const EQUALITY: OpSet = OpSet::NONE
        .with_binary(BinaryOp::Eq)
        .with_binary(BinaryOp::Ne);

    pub const fn with_binary(self, op: BinaryOp) -> OpSet {
        OpSet {
            binary: self.binary | (1 << (op as u16)),
            unary: self.unary,
        }
    }

    pub const fn with_unary(self, op: UnaryOp) -> OpSet {
        OpSet {
            binary: self.binary,
            unary: self.unary | (1 << (op as u8)),
        }
    }

    pub fn supports_binary(self, op: BinaryOp) -> bool {
        self.binary & op.bit() != 0
    }

    pub fn supports_unary(self, op: UnaryOp) -> bool {
        self.unary & op.bit() != 0
    }

    pub fn union(self, other: OpSet) -> OpSet {
        OpSet {
            binary: self.binary | other.binary,
            unary: self.unary | other.unary,
        }
    }

    /// Operators present in both sets.
    pub fn intersection(self, other: OpSet) -> OpSet {
        OpSet {
            binary: self.binary & other.binary,
            unary: self.unary & other.unary,
        }
    }

    pub fn is_empty(self) -> bool {
        self.binary == 0 && self.unary == 0
    }

    pub fn binary_ops(self) -> impl Iterator<Item = BinaryOp> {
        BinaryOp::ALL
            .into_iter()
            .filter(move |&op| self.supports_binary(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_roundtrip() {
        for op in BinaryOp::ALL {
            assert_eq!(BinaryOp::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(UnaryOp::from_symbol("!"), Some(UnaryOp::Not));
        assert_eq!(BinaryOp::from_symbol("**"), None);
    }

    #[test]
    fn precedence_order() {
        assert!(BinaryOp::Pow.precedence() > BinaryOp::Mul.precedence());
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::Eq.precedence());
        assert!(BinaryOp::Eq.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
        assert_eq!(BinaryOp::Concat.precedence(), BinaryOp::Add.precedence());
    }

    #[test]
    fn logic_ops() {
        assert!(BinaryOp::Le.is_logic());
        assert!(BinaryOp::Or.is_logic());
        assert!(!BinaryOp::Add.is_logic());
        assert!(!BinaryOp::Concat.is_logic());
    }

    #[test]
    fn op_sets() {
        assert!(OpSet::NUMERIC.supports_binary(BinaryOp::Pow));
        assert!(!OpSet::NUMERIC.supports_binary(BinaryOp::Concat));
        assert!(OpSet::BOOL.supports_unary(UnaryOp::Not));
        assert!(!OpSet::BOOL.supports_unary(UnaryOp::Neg));
        let both = OpSet::TEXT.intersection(OpSet::BOOL);
        assert_eq!(both, OpSet::EQUALITY);
        assert_eq!(OpSet::EQUALITY.binary_ops().count(), 2);
        assert!(OpSet::NONE.is_empty());
    }
}
