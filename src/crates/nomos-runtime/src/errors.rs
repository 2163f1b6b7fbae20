// errors.rs
//! Evaluation errors (E3xxx).

#![allow(unused_assignments)] // False positives from thiserror derive

use miette::{Diagnostic, SourceSpan};
use nomos_bignum::ParseNumberError;
use thiserror::Error;

/// Why a value operation produced no result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpError {
    /// The operator is not defined for this pair of representations.
    #[error("operation not defined for these operands")]
    Undefined,

    #[error("division by zero")]
    DivisionByZero,

    /// An exact result would be too large to hold.
    #[error("result too large")]
    TooLarge,
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum EvalError {
    #[error("operator '{op}' is not defined for {lhs} and {rhs}")]
    #[diagnostic(code(E3001))]
    UndefinedBinaryOp {
        op: String,
        lhs: String,
        rhs: String,
        #[label("no result for these operands")]
        span: SourceSpan,
    },

    #[error("operator '{op}' is not defined for {operand}")]
    #[diagnostic(code(E3002))]
    UndefinedUnaryOp {
        op: String,
        operand: String,
        #[label("no result for this operand")]
        span: SourceSpan,
    },

    #[error("division by zero")]
    #[diagnostic(code(E3003))]
    DivisionByZero {
        #[label("divisor is zero")]
        span: SourceSpan,
    },

    #[error("unbound name '{name}'")]
    #[diagnostic(code(E3004))]
    UnboundName {
        name: String,
        #[label("not found in scope")]
        span: SourceSpan,
    },

    #[error("expected {expected} arguments, found {found}")]
    #[diagnostic(code(E3005))]
    ArityMismatch {
        expected: usize,
        found: usize,
        #[label("wrong number of arguments")]
        span: SourceSpan,
    },

    #[error("value of type {found} is not callable")]
    #[diagnostic(code(E3006))]
    NotCallable {
        found: String,
        #[label("not a function")]
        span: SourceSpan,
    },

    #[error("module '{module}' has no member '{member}'")]
    #[diagnostic(code(E3007), help("available members: {available}"))]
    NoSuchMember {
        module: String,
        member: String,
        available: String,
        #[label("unknown member")]
        span: SourceSpan,
    },

    #[error("value of type {found} is not a module")]
    #[diagnostic(code(E3008))]
    NotAModule {
        found: String,
        #[label("member access on a non-module")]
        span: SourceSpan,
    },

    #[error("reference to a released binding")]
    #[diagnostic(
        code(E3009),
        help("bindings are released when their scope ends")
    )]
    DanglingReference {
        #[label("binding no longer live")]
        span: SourceSpan,
    },

    #[error("call depth limit of {limit} exceeded")]
    #[diagnostic(code(E3010), help("raise EvalOptions::max_call_depth"))]
    CallDepthExceeded {
        limit: usize,
        #[label("too deeply nested")]
        span: SourceSpan,
    },

    #[error("invalid numeric literal")]
    #[diagnostic(code(E3011))]
    InvalidLiteral {
        #[source]
        source: ParseNumberError,
        #[label("{source}")]
        span: SourceSpan,
    },

    #[error("expected argument of type {expected}, found {found}")]
    #[diagnostic(code(E3012))]
    ArgumentTypeMismatch {
        expected: String,
        found: String,
        #[label("argument type mismatch")]
        span: SourceSpan,
    },

    #[error("result of '{op}' is too large")]
    #[diagnostic(code(E3013), help("exact results are limited in size; use a Real operand"))]
    ResultTooLarge {
        op: String,
        #[label("result would not fit in memory")]
        span: SourceSpan,
    },
}

impl EvalError {
    /// Source location the error points at.
    pub fn span(&self) -> SourceSpan {
        match self {
            EvalError::UndefinedBinaryOp { span, .. }
            | EvalError::UndefinedUnaryOp { span, .. }
            | EvalError::DivisionByZero { span }
            | EvalError::UnboundName { span, .. }
            | EvalError::ArityMismatch { span, .. }
            | EvalError::NotCallable { span, .. }
            | EvalError::NoSuchMember { span, .. }
            | EvalError::NotAModule { span, .. }
            | EvalError::DanglingReference { span }
            | EvalError::CallDepthExceeded { span, .. }
            | EvalError::InvalidLiteral { span, .. }
            | EvalError::ArgumentTypeMismatch { span, .. }
            | EvalError::ResultTooLarge { span, .. } => *span,
        }
    }
}
