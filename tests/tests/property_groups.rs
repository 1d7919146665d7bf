//! Property-based tests for the G1 and G2 group laws

use bls381_algorithms::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use bls381_tests::{arb_g1, arb_g2, arb_scalar};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn g1_group_law(p in arb_g1(), q in arb_g1(), r in arb_g1()) {
        prop_assert_eq!((p + q) + r, p + (q + r));
        prop_assert_eq!(p + q, q + p);
        prop_assert_eq!(p + (-p), G1Projective::identity());
        prop_assert_eq!(p * Scalar::from(2u64), p.double());
        prop_assert_eq!(p.to_affine().to_curve(), p);
        prop_assert_eq!(p + q.to_affine(), p + q);
    }

    #[test]
    fn g1_scalar_distributes(a in arb_scalar(), b in arb_scalar()) {
        let g = G1Projective::generator();
        prop_assert_eq!(g * a + g * b, g * (a + b));
        prop_assert_eq!((g * a) * b, g * (a * b));
    }

    #[test]
    fn g1_encodings_round_trip(p in arb_g1()) {
        let p = p.to_affine();
        prop_assert!(bool::from(p.is_torsion_free()));
        prop_assert_eq!(G1Affine::from_compressed(&p.to_compressed()).unwrap(), p);
        prop_assert_eq!(G1Affine::from_uncompressed(&p.to_uncompressed()).unwrap(), p);
    }

    #[test]
    fn g2_group_law(p in arb_g2(), q in arb_g2()) {
        prop_assert_eq!(p + q, q + p);
        prop_assert_eq!(p + (-p), G2Projective::identity());
        prop_assert_eq!(p * Scalar::from(2u64), p.double());
        prop_assert_eq!(p + q.to_affine(), p + q);
    }

    #[test]
    fn g2_encodings_round_trip(p in arb_g2()) {
        let p = p.to_affine();
        prop_assert!(bool::from(p.is_torsion_free()));
        prop_assert_eq!(G2Affine::from_compressed(&p.to_compressed()).unwrap(), p);
        prop_assert_eq!(G2Affine::from_uncompressed(&p.to_uncompressed()).unwrap(), p);
    }

    #[test]
    fn decoding_never_panics(raw in prop::collection::vec(any::<u8>(), 48)) {
        let mut bytes = [0u8; 48];
        bytes.copy_from_slice(&raw);

        // Either a valid G1 point or a format error
        if let Ok(p) = G1Affine::from_compressed(&bytes) {
            prop_assert!(bool::from(p.is_on_curve()));
            prop_assert!(bool::from(p.is_torsion_free()));
            prop_assert_eq!(p.to_compressed(), bytes);
        }
    }
}
