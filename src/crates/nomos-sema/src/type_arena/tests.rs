// type_arena/tests.rs
//
// Unit tests for interning, castability, promotion and operator typing.

#[cfg(test)]
mod core_tests {
    use crate::ops::{BinaryOp, OpSet, UnaryOp};
    use crate::type_arena::*;

    #[test]
    fn type_id_is_copy() {
        let id = TypeId::from_raw(42);
        let id2 = id; // Copy
        assert_eq!(id, id2);
    }

    #[test]
    fn type_id_size() {
        assert_eq!(size_of::<TypeId>(), 4);
    }

    #[test]
    fn reserved_types_are_preinterned() {
        let arena = TypeArena::new();
        assert_eq!(arena.len(), TypeId::FIRST_DYNAMIC as usize);
        assert!(matches!(arena.get(TypeId::BOOL), SemaType::Bool));
        assert!(matches!(
            arena.get(TypeId::RATIO),
            SemaType::Numeric(NumericType {
                kind: NumericKind::Ratio,
                width: 0
            })
        ));
        assert!(TypeId::STRING_UTF8.is_text());
        assert!(TypeId::REAL.is_abstract_numeric());
        assert!(!TypeId::NUMBER.is_abstract_numeric());
    }

    // ========================================================================
    // Hash-consing
    // ========================================================================

    #[test]
    fn scalar_interning_is_stable() {
        let mut arena = TypeArena::new();
        let a = arena.nat(16);
        let b = arena.nat(16);
        assert_eq!(a, b);
        assert_ne!(a, arena.int(16));
        assert_eq!(arena.nat(0), TypeId::NAT);
        assert_eq!(arena.real(0), TypeId::REAL);
        assert_eq!(arena.text(TextKind::Ascii), TypeId::STRING_ASCII);
    }

    #[test]
    fn compound_interning_is_structural() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let f1 = arena.function([n16, TypeId::BOOL], TypeId::UNIT);
        let f2 = arena.function([n16, TypeId::BOOL], TypeId::UNIT);
        let f3 = arena.function([TypeId::BOOL, n16], TypeId::UNIT);
        assert_eq!(f1, f2);
        assert_ne!(f1, f3);

        let p1 = arena.product([n16, TypeId::BOOL]);
        let p2 = arena.product([TypeId::BOOL, n16]);
        assert_ne!(p1, p2);

        let before = arena.len();
        let _ = arena.array(n16, 4);
        let _ = arena.array(n16, 4);
        assert_eq!(arena.len(), before + 1);
    }

    #[test]
    fn sum_normalizes_order_and_duplicates() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let a = arena.sum([n16, TypeId::BOOL, TypeId::STRING]);
        let b = arena.sum([TypeId::STRING, n16, TypeId::BOOL, n16]);
        assert_eq!(a, b);

        let inner = arena.sum([TypeId::BOOL, TypeId::STRING]);
        let nested = arena.sum([inner, n16]);
        assert_eq!(nested, a);
    }

    #[test]
    fn sum_degenerate_cases() {
        let mut arena = TypeArena::new();
        assert_eq!(arena.sum([TypeId::BOOL]), TypeId::BOOL);
        assert_eq!(arena.sum([TypeId::BOOL, TypeId::BOOL]), TypeId::BOOL);
        assert_eq!(arena.sum(TypeIdVec::new()), TypeId::BOTTOM);
        assert_eq!(arena.sum([TypeId::BOOL, TypeId::BOTTOM]), TypeId::BOOL);
        assert_eq!(arena.sum([TypeId::BOOL, TypeId::TOP]), TypeId::TOP);
    }

    #[test]
    fn empty_product_is_unit() {
        let mut arena = TypeArena::new();
        assert_eq!(arena.product(TypeIdVec::new()), TypeId::UNIT);
    }

    #[test]
    fn records_keep_field_names() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let r1 = arena.record([("x", n16), ("y", TypeId::BOOL)]);
        let r2 = arena.record([("x", n16), ("y", TypeId::BOOL)]);
        let r3 = arena.record([("x", n16), ("z", TypeId::BOOL)]);
        assert_eq!(r1, r2);
        assert_ne!(r1, r3);
        assert_eq!(arena.record_field(r1, "y"), Some(TypeId::BOOL));
        assert_eq!(arena.record_field(r1, "w"), None);
    }

    #[test]
    fn pseudo_types_are_always_fresh() {
        let mut arena = TypeArena::new();
        let a = arena.pseudo(OpSet::NUMERIC);
        let b = arena.pseudo(OpSet::NUMERIC);
        assert_ne!(a, b);
        assert!(arena.is_pseudo(a));
    }

    // ========================================================================
    // Castability
    // ========================================================================

    #[test]
    fn numeric_lattice_casts() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let i17 = arena.int(17);
        let i16 = arena.int(16);
        let r32 = arena.real(32);
        let q128 = arena.ratio(128);
        assert!(arena.is_castable(n16, i17));
        assert!(!arena.is_castable(n16, i16));
        assert!(!arena.is_castable(i17, n16));
        assert!(arena.is_castable(n16, r32));
        assert!(arena.is_castable(i16, TypeId::RATIO));
        assert!(arena.is_castable(q128, TypeId::REAL));
        assert!(!arena.is_castable(q128, r32));
        assert!(arena.is_castable(n16, TypeId::NUMBER));
        assert!(!arena.is_castable(TypeId::NUMBER, n16));
        assert!(arena.is_castable(TypeId::NAT, TypeId::INT));
        assert!(!arena.is_castable(TypeId::INT, TypeId::NAT));
    }

    #[test]
    fn text_casts() {
        let arena = TypeArena::new();
        assert!(arena.is_castable(TypeId::STRING_ASCII, TypeId::STRING_UTF8));
        assert!(arena.is_castable(TypeId::STRING_ASCII, TypeId::STRING));
        assert!(arena.is_castable(TypeId::STRING_UTF8, TypeId::STRING));
        assert!(!arena.is_castable(TypeId::STRING, TypeId::STRING_UTF8));
        assert!(!arena.is_castable(TypeId::STRING_UTF8, TypeId::STRING_ASCII));
    }

    #[test]
    fn array_casts() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let short = arena.array(n16, 2);
        let long = arena.array(n16, 8);
        let unsized_arr = arena.array(n16, 0);
        let other = arena.array(TypeId::BOOL, 8);
        assert!(arena.is_castable(short, long));
        assert!(!arena.is_castable(long, short));
        assert!(arena.is_castable(long, unsized_arr));
        assert!(!arena.is_castable(unsized_arr, long));
        assert!(!arena.is_castable(short, other));
    }

    #[test]
    fn product_casts_pairwise() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let i32 = arena.int(32);
        let a = arena.product([n16, TypeId::STRING_ASCII]);
        let b = arena.product([i32, TypeId::STRING]);
        let c = arena.product([i32]);
        assert!(arena.is_castable(a, b));
        assert!(!arena.is_castable(b, a));
        assert!(!arena.is_castable(a, c));
    }

    #[test]
    fn sum_casts() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let sum = arena.sum([TypeId::BOOL, TypeId::STRING]);
        assert!(arena.is_castable(TypeId::BOOL, sum));
        assert!(arena.is_castable(TypeId::STRING_ASCII, sum));
        assert!(!arena.is_castable(n16, sum));
        assert!(!arena.is_castable(sum, TypeId::BOOL));
        assert!(arena.is_castable(sum, TypeId::TOP));
    }

    #[test]
    fn top_bottom_and_pseudo_casts() {
        let mut arena = TypeArena::new();
        let p = arena.pseudo(OpSet::NONE);
        assert!(arena.is_castable(TypeId::BOOL, TypeId::TOP));
        assert!(arena.is_castable(TypeId::BOTTOM, TypeId::BOOL));
        assert!(arena.is_castable(TypeId::BOOL, p));
        assert!(!arena.is_castable(TypeId::TOP, TypeId::BOOL));
    }

    // ========================================================================
    // Promotion
    // ========================================================================

    #[test]
    fn promote_numeric_widens() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let n32 = arena.nat(32);
        let i16 = arena.int(16);
        let i32 = arena.int(32);
        let r32 = arena.real(32);
        assert_eq!(arena.promote(n16, n32), n32);
        assert_eq!(arena.promote(n16, i16), i32);
        assert_eq!(arena.promote(i16, n16), i32);
        assert_eq!(arena.promote(n16, r32), r32);
        assert_eq!(arena.promote(n16, TypeId::NUMBER), TypeId::NUMBER);
    }

    #[test]
    fn promote_overflowing_width_goes_abstract() {
        let mut arena = TypeArena::new();
        let n64 = arena.nat(64);
        let i64 = arena.int(64);
        assert_eq!(arena.promote(n64, i64), TypeId::INT);
    }

    #[test]
    fn promote_text_and_unrelated() {
        let mut arena = TypeArena::new();
        assert_eq!(
            arena.promote(TypeId::STRING_ASCII, TypeId::STRING_UTF8),
            TypeId::STRING_UTF8
        );
        let n16 = arena.nat(16);
        let sum = arena.promote(n16, TypeId::BOOL);
        assert_eq!(arena.unwrap_sum(sum).map(|c| c.len()), Some(2));
        assert_eq!(arena.promote(TypeId::BOOL, n16), sum);
    }

    #[test]
    fn promote_identities() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        assert_eq!(arena.promote(n16, n16), n16);
        assert_eq!(arena.promote(n16, TypeId::BOTTOM), n16);
        assert_eq!(arena.promote(TypeId::BOTTOM, n16), n16);
        assert_eq!(arena.promote(TypeId::TOP, n16), TypeId::TOP);
    }

    #[test]
    fn make_signed_only_touches_nat() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let i32 = arena.int(32);
        assert_eq!(arena.make_signed(n16), i32);
        assert_eq!(arena.make_signed(TypeId::NAT), TypeId::INT);
        assert_eq!(arena.make_signed(TypeId::BOOL), TypeId::BOOL);
        assert_eq!(arena.make_signed(i32), i32);
    }

    // ========================================================================
    // Operator typing
    // ========================================================================

    #[test]
    fn binary_result_types() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let n32 = arena.nat(32);
        let i32 = arena.int(32);
        let q64 = arena.ratio(64);
        assert_eq!(arena.binary_result_type(BinaryOp::Add, n16, n16), Some(n32));
        assert_eq!(arena.binary_result_type(BinaryOp::Sub, n16, n16), Some(i32));
        assert_eq!(arena.binary_result_type(BinaryOp::Div, n16, n16), Some(q64));
        assert_eq!(
            arena.binary_result_type(BinaryOp::Lt, n16, TypeId::REAL),
            Some(TypeId::BOOL)
        );
        assert_eq!(
            arena.binary_result_type(BinaryOp::And, TypeId::BOOL, TypeId::BOOL),
            Some(TypeId::BOOL)
        );
        assert_eq!(arena.binary_result_type(BinaryOp::And, n16, n16), None);
        assert_eq!(
            arena.binary_result_type(BinaryOp::Concat, TypeId::STRING_ASCII, TypeId::STRING_UTF8),
            Some(TypeId::STRING_UTF8)
        );
        assert_eq!(arena.binary_result_type(BinaryOp::Concat, n16, n16), None);
        assert_eq!(
            arena.binary_result_type(BinaryOp::Eq, TypeId::STRING, TypeId::BOOL),
            None
        );
    }

    #[test]
    fn pseudo_operands_give_pseudo_results() {
        let mut arena = TypeArena::new();
        let p = arena.pseudo(OpSet::NONE);
        let n16 = arena.nat(16);
        let result = arena.binary_result_type(BinaryOp::Mul, p, n16).unwrap();
        assert!(arena.is_pseudo(result));
        assert!(arena.supported_ops(result).supports_binary(BinaryOp::Mul));
    }

    #[test]
    fn unary_result_types() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let i32 = arena.int(32);
        assert_eq!(arena.unary_result_type(UnaryOp::Neg, n16), Some(i32));
        assert_eq!(arena.unary_result_type(UnaryOp::Neg, TypeId::REAL), Some(TypeId::REAL));
        assert_eq!(
            arena.unary_result_type(UnaryOp::Not, TypeId::BOOL),
            Some(TypeId::BOOL)
        );
        assert_eq!(arena.unary_result_type(UnaryOp::Not, n16), None);
        assert_eq!(arena.unary_result_type(UnaryOp::Neg, TypeId::STRING), None);
    }

    #[test]
    fn sums_support_common_ops() {
        let mut arena = TypeArena::new();
        let sum = arena.sum([TypeId::BOOL, TypeId::STRING]);
        assert_eq!(arena.supported_ops(sum), OpSet::EQUALITY);
    }

    // ========================================================================
    // Display and mangling
    // ========================================================================

    #[test]
    fn display_names() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let arr = arena.array(n16, 4);
        let unsized_arr = arena.array(TypeId::BOOL, 0);
        let f = arena.function([n16, TypeId::INT], TypeId::BOOL);
        let higher = arena.function([f], TypeId::UNIT);
        let sum = arena.sum([TypeId::BOOL, TypeId::UNIT]);
        let rec = arena.record([("x", n16), ("y", TypeId::STRING_UTF8)]);
        assert_eq!(arena.display(n16), "Nat16");
        assert_eq!(arena.display(TypeId::REAL), "Real");
        assert_eq!(arena.display(arr), "[4]Nat16");
        assert_eq!(arena.display(unsized_arr), "[]Bool");
        assert_eq!(arena.display(f), "Nat16 -> Int -> Bool");
        assert_eq!(arena.display(higher), "(Nat16 -> Int -> Bool) -> Unit");
        assert_eq!(arena.display(sum), "Unit | Bool");
        assert_eq!(arena.display(rec), "{x: Nat16, y: StringUTF8}");
    }

    #[test]
    fn mangle_examples() {
        let mut arena = TypeArena::new();
        let n16 = arena.nat(16);
        let f = arena.function([n16], TypeId::BOOL);
        assert_eq!(arena.mangle(n16), "N16_");
        assert_eq!(arena.mangle(TypeId::INT), "I0_");
        assert_eq!(arena.mangle(f), "F1_KlN16_");
        assert_eq!(
            arena.mangle_function(Some("math"), "even", f),
            "_m4_mathfF1_KlN16_4_even"
        );
        assert_eq!(arena.mangle_function(None, "even", f), "_fF1_KlN16_4_even");
    }

    #[test]
    fn mangle_distinguishes_similar_types() {
        let mut arena = TypeArena::new();
        let n1 = arena.nat(1);
        let n16 = arena.nat(16);
        let n6 = arena.nat(6);
        let a = arena.product([n1, n6]);
        let b = arena.product([n16]);
        assert_ne!(arena.mangle(a), arena.mangle(b));

        let r1 = arena.record([("ab", TypeId::BOOL)]);
        let r2 = arena.record([("a", TypeId::BOOL)]);
        assert_ne!(arena.mangle(r1), arena.mangle(r2));
    }
}

#[cfg(test)]
mod lattice_properties {
    use proptest::prelude::*;

    use crate::type_arena::*;

    fn arb_kind() -> impl Strategy<Value = NumericKind> {
        prop_oneof![
            Just(NumericKind::Nat),
            Just(NumericKind::Int),
            Just(NumericKind::Ratio),
            Just(NumericKind::Real),
        ]
    }

    fn arb_numeric() -> impl Strategy<Value = NumericType> {
        (arb_kind(), prop_oneof![Just(0u32), Just(16), Just(32), Just(64), 1u32..=128])
            .prop_map(|(kind, width)| NumericType::new(kind, width))
    }

    proptest! {
        #[test]
        fn interning_is_idempotent(a in arb_numeric(), b in arb_numeric()) {
            let mut arena = TypeArena::new();
            let x1 = arena.numeric(a);
            let y1 = arena.numeric(b);
            let f1 = arena.function([x1, y1], TypeId::BOOL);
            let x2 = arena.numeric(a);
            let y2 = arena.numeric(b);
            let f2 = arena.function([x2, y2], TypeId::BOOL);
            prop_assert_eq!(x1, x2);
            prop_assert_eq!(f1, f2);
            prop_assert_eq!(x1 == y1, a == b);
        }

        #[test]
        fn nat_fits_in_wider_int(n in 1u32..=256) {
            let mut arena = TypeArena::new();
            let nat = arena.nat(n);
            let int = arena.int(n + 1);
            prop_assert!(arena.is_castable(nat, int));
            prop_assert!(!arena.is_castable(int, nat));
            prop_assert!(arena.is_castable(nat, nat));
        }

        #[test]
        fn promotion_is_absorbed_by_general_abstract(x in arb_numeric(), kind in arb_kind()) {
            prop_assume!(!x.is_abstract() && x.kind <= kind);
            let mut arena = TypeArena::new();
            let finite = arena.numeric(x);
            let abstract_id = arena.numeric(NumericType::abstract_of(kind));
            prop_assert_eq!(arena.promote(finite, abstract_id), abstract_id);
            prop_assert_eq!(arena.promote(abstract_id, finite), abstract_id);
        }

        #[test]
        fn operands_cast_into_their_promotion(a in arb_numeric(), b in arb_numeric()) {
            let mut arena = TypeArena::new();
            let x = arena.numeric(a);
            let y = arena.numeric(b);
            let p = arena.promote(x, y);
            prop_assert!(arena.is_castable(x, p));
            prop_assert!(arena.is_castable(y, p));
        }

        #[test]
        fn mangling_is_injective(a in arb_numeric(), b in arb_numeric()) {
            let mut arena = TypeArena::new();
            let x = arena.numeric(a);
            let y = arena.numeric(b);
            let px = arena.product([x, y]);
            let py = arena.product([y, x]);
            prop_assert_eq!(arena.mangle(px) == arena.mangle(py), px == py);
        }
    }
}
