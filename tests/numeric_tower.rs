// tests/numeric_tower.rs
//
// Value-level arithmetic agrees with exact arithmetic and with the static
// result types the type arena assigns.

use nomos::bignum::{AInt, ARatio};
use nomos::runtime::{OpError, Ratio32, Ratio64, Ratio128, Value};
use nomos::sema::{BinaryOp, NumericKind, TypeArena};
use proptest::prelude::*;

fn ratio(n: i64, d: i64) -> ARatio {
    ARatio::new(AInt::from(n), AInt::from(d)).unwrap()
}

#[test]
fn nat16_addition_lands_in_nat32() {
    let sum = Value::Nat16(60_000).binary_op(BinaryOp::Add, &Value::Nat16(60_000));
    assert_eq!(sum, Ok(Value::Nat32(120_000)));
}

#[test]
fn nat_subtraction_below_zero_is_int() {
    let diff = Value::Nat16(3).binary_op(BinaryOp::Sub, &Value::Nat16(5)).unwrap();
    assert_eq!(diff.to_exact_int(), Some(AInt::from(-2)));
    assert_eq!(diff.numeric_type().map(|n| n.kind), Some(NumericKind::Int));
}

#[test]
fn nat_division_is_exact_ratio() {
    let q = Value::Nat16(7).binary_op(BinaryOp::Div, &Value::Nat16(2)).unwrap();
    assert_eq!(q.to_exact_ratio(), Some(ratio(7, 2)));
    assert_eq!(q.to_string(), "7/2");
}

#[test]
fn int64_max_over_one() {
    let q = Value::Int64(i64::MAX)
        .binary_op(BinaryOp::Div, &Value::Int16(1))
        .unwrap();
    assert_eq!(q.to_exact_ratio(), Some(ratio(i64::MAX, 1)));
}

#[test]
fn ratio_double_negation_is_identity() {
    let r = Value::Ratio64(Ratio64::new(-3, 8).unwrap());
    let once = r.unary_op(nomos::UnaryOp::Neg).unwrap();
    assert_eq!(once.to_exact_ratio(), Some(ratio(3, 8)));
    assert_eq!(once.unary_op(nomos::UnaryOp::Neg), Ok(r));
}

#[test]
fn equality_across_categories() {
    let half = Value::Ratio64(Ratio64::new(1, 2).unwrap());
    assert_eq!(half.binary_op(BinaryOp::Eq, &Value::Real32(0.5)), Ok(Value::Bool(true)));
    assert_eq!(
        Value::Nat64(u64::MAX).binary_op(BinaryOp::Lt, &Value::Real64(1e30)),
        Ok(Value::Bool(true))
    );
}

fn exact_int(op: BinaryOp, a: i64, b: i64) -> AInt {
    let (a, b) = (AInt::from(a), AInt::from(b));
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        _ => unreachable!(),
    }
}

fn ring_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![Just(BinaryOp::Add), Just(BinaryOp::Sub), Just(BinaryOp::Mul)]
}

fn field_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![ring_op(), Just(BinaryOp::Div)]
}

/// Every fixed-width Nat, Int and Ratio representation.
fn exact_fixed() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u16>().prop_map(Value::Nat16),
        any::<u32>().prop_map(Value::Nat32),
        any::<u64>().prop_map(Value::Nat64),
        any::<i16>().prop_map(Value::Int16),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        (any::<i16>(), 1u16..=u16::MAX).prop_map(|(n, d)| Value::Ratio32(Ratio32::new(n, d).unwrap())),
        (any::<i32>(), 1u32..=u32::MAX).prop_map(|(n, d)| Value::Ratio64(Ratio64::new(n, d).unwrap())),
        (any::<i64>(), 1u64..=u64::MAX).prop_map(|(n, d)| Value::Ratio128(Ratio128::new(n, d).unwrap())),
    ]
}

/// Every fixed-width representation, finite reals included.
fn any_fixed() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => exact_fixed(),
        1 => any::<f32>().prop_filter("finite", |x| x.is_finite()).prop_map(Value::Real32),
        1 => any::<f64>().prop_filter("finite", |x| x.is_finite()).prop_map(Value::Real64),
    ]
}

fn exact_result(op: BinaryOp, a: &ARatio, b: &ARatio) -> Option<ARatio> {
    match op {
        BinaryOp::Add => Some(a + b),
        BinaryOp::Sub => Some(a - b),
        BinaryOp::Mul => Some(a * b),
        BinaryOp::Div => a.checked_div(b),
        _ => unreachable!(),
    }
}

proptest! {
    #[test]
    fn exact_representations_compute_exactly(op in field_op(), a in exact_fixed(), b in exact_fixed()) {
        let (x, y) = (a.to_exact_ratio().unwrap(), b.to_exact_ratio().unwrap());
        match exact_result(op, &x, &y) {
            Some(expected) => {
                let result = a.binary_op(op, &b).unwrap();
                prop_assert_eq!(result.to_exact_ratio(), Some(expected));
            }
            None => prop_assert_eq!(a.binary_op(op, &b), Err(OpError::DivisionByZero)),
        }
        prop_assert_eq!(a.binary_op(BinaryOp::Lt, &b), Ok(Value::Bool(x < y)));
    }

    #[test]
    fn results_stay_in_their_static_category(op in field_op(), a in any_fixed(), b in any_fixed()) {
        let mut arena = TypeArena::new();
        let (lt, rt) = (a.ty(&mut arena), b.ty(&mut arena));
        let static_ty = arena.binary_result_type(op, lt, rt).unwrap();
        let static_kind = arena.numeric_type(static_ty).map(|n| n.kind);
        match a.binary_op(op, &b) {
            Ok(result) => prop_assert_eq!(result.numeric_type().map(|n| n.kind), static_kind),
            Err(e) => {
                prop_assert_eq!(op, BinaryOp::Div);
                prop_assert_eq!(e, OpError::DivisionByZero);
                prop_assert!(b.to_exact_ratio().unwrap().is_zero());
            }
        }
    }

    #[test]
    fn ordering_is_exact_across_all_representations(a in any_fixed(), b in any_fixed()) {
        let (x, y) = (a.to_exact_ratio().unwrap(), b.to_exact_ratio().unwrap());
        prop_assert_eq!(a.binary_op(BinaryOp::Lt, &b), Ok(Value::Bool(x < y)));
        prop_assert_eq!(a.binary_op(BinaryOp::Eq, &b), Ok(Value::Bool(x == y)));
    }

    #[test]
    fn fixed_width_ring_ops_are_exact(op in ring_op(), a in any::<i64>(), b in any::<i32>()) {
        let result = Value::Int64(a).binary_op(op, &Value::Int32(b)).unwrap();
        prop_assert_eq!(result.to_exact_int(), Some(exact_int(op, a, b as i64)));
    }

    #[test]
    fn nat16_results_match_static_types(op in ring_op(), a in any::<u16>(), b in any::<u16>()) {
        let mut arena = TypeArena::new();
        let (lt, rt) = (arena.nat(16), arena.nat(16));
        let static_ty = arena.binary_result_type(op, lt, rt).unwrap();
        let result = Value::Nat16(a).binary_op(op, &Value::Nat16(b)).unwrap();
        prop_assert_eq!(result.ty(&mut arena), static_ty);
    }

    #[test]
    fn nat16_division_matches_static_type(a in any::<u16>(), b in 1u16..=u16::MAX) {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let static_ty = arena.binary_result_type(BinaryOp::Div, n16, n16).unwrap();
        let q = Value::Nat16(a).binary_op(BinaryOp::Div, &Value::Nat16(b)).unwrap();
        prop_assert_eq!(q.ty(&mut arena), static_ty);
        prop_assert_eq!(q.to_exact_ratio(), Some(ratio(a as i64, b as i64)));
    }

    #[test]
    fn comparison_agrees_with_integers(a in any::<i32>(), b in any::<u16>()) {
        let lt = Value::Int32(a).binary_op(BinaryOp::Lt, &Value::Nat16(b)).unwrap();
        prop_assert_eq!(lt, Value::Bool((a as i64) < b as i64));
    }

    #[test]
    fn modulo_is_non_negative(a in any::<i32>(), b in any::<i32>().prop_filter("non-zero", |b| *b != 0)) {
        let m = Value::Int32(a).binary_op(BinaryOp::Mod, &Value::Int32(b)).unwrap();
        let m = m.to_exact_int().unwrap();
        prop_assert!(!m.is_negative());
        prop_assert_eq!(m, AInt::from((a as i64).rem_euclid(b as i64)));
    }
}
