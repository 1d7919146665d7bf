//! Property-based tests for the BLS12-381 fields

use bls381_algorithms::{Fp, Fp12, Fp2, Fp6, Scalar};
use bls381_tests::{arb_fp, arb_fp12, arb_fp2, arb_fp6, arb_scalar};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fp_ring_axioms(a in arb_fp(), b in arb_fp(), c in arb_fp()) {
        prop_assert_eq!((a + b) + c, a + (b + c));
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!((a * b) * c, a * (b * c));
        prop_assert_eq!(a - b, a + (-b));
        prop_assert_eq!(a.square(), a * a);
    }

    #[test]
    fn fp_inverse_and_sqrt(a in arb_fp()) {
        if !bool::from(a.is_zero()) {
            prop_assert_eq!(a * a.try_invert().unwrap(), Fp::one());
        }
        let root = a.square().try_sqrt().unwrap();
        prop_assert!(root == a || root == -a);
    }

    #[test]
    fn fp_bytes_round_trip(a in arb_fp()) {
        prop_assert_eq!(Fp::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn fp_sum_of_products_matches_naive(
        a in prop::collection::vec(arb_fp(), 0..10),
        b in prop::collection::vec(arb_fp(), 10),
    ) {
        let b = &b[..a.len()];
        let naive = a.iter().zip(b.iter()).fold(Fp::zero(), |acc, (x, y)| acc + x * y);
        prop_assert_eq!(Fp::sum_of_products_slices(&a, b).unwrap(), naive);
    }

    #[test]
    fn fp2_field_axioms(a in arb_fp2(), b in arb_fp2(), c in arb_fp2()) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!((a * b) * c, a * (b * c));
        prop_assert_eq!(a.square(), a * a);
        prop_assert_eq!(a.frobenius_map().frobenius_map(), a);
        if !bool::from(a.is_zero()) {
            prop_assert_eq!(a * a.invert().unwrap(), Fp2::one());
        }
        let root = a.square().sqrt().unwrap();
        prop_assert!(root == a || root == -a);
        prop_assert_eq!(Fp2::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn fp6_field_axioms(a in arb_fp6(), b in arb_fp6(), c in arb_fp6()) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!((a * b) * c, a * (b * c));
        prop_assert_eq!(a.square(), a * a);
        prop_assert_eq!(a * a.invert().unwrap(), Fp6::one());
        prop_assert_eq!(Fp6::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn fp12_field_axioms(a in arb_fp12(), b in arb_fp12()) {
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!(a.square(), a * a);
        prop_assert_eq!(a * a.invert().unwrap(), Fp12::one());
        prop_assert_eq!(Fp12::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn tower_embeddings_commute_with_multiplication(a in arb_fp(), b in arb_fp(), x in arb_fp2(), y in arb_fp2()) {
        prop_assert_eq!(Fp2::from(a) * Fp2::from(b), Fp2::from(a * b));
        prop_assert_eq!(Fp6::from(x) * Fp6::from(y), Fp6::from(x * y));
        prop_assert_eq!(Fp12::from(x) * Fp12::from(y), Fp12::from(x * y));
        prop_assert_eq!(Fp12::from(a) * Fp12::from(b), Fp12::from(a * b));
    }

    #[test]
    fn scalar_field_axioms(a in arb_scalar(), b in arb_scalar(), c in arb_scalar()) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!((a * b) * c, a * (b * c));
        prop_assert_eq!(a - a, Scalar::zero());
        if !bool::from(a.is_zero()) {
            prop_assert_eq!(a * a.invert().unwrap(), Scalar::one());
        }
        let root = a.square().sqrt().unwrap();
        prop_assert!(root == a || root == -a);
        prop_assert_eq!(Scalar::from_bytes(&a.to_bytes()).unwrap(), a);
    }
}
