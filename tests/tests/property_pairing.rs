//! Property-based tests for the pairing and Gt

use bls381_algorithms::{
    multi_miller_loop, pairing, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt,
};
use bls381_tests::{arb_g1_affine, arb_g2_affine, arb_scalar};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn pairing_is_bilinear(a in arb_scalar(), b in arb_scalar()) {
        let p = (G1Projective::generator() * a).to_affine();
        let q = (G2Projective::generator() * b).to_affine();

        prop_assert_eq!(pairing(&p, &q), Gt::generator() * (a * b));
    }

    #[test]
    fn prepared_pairing_matches_direct(p in arb_g1_affine(), q in arb_g2_affine()) {
        let prepared = G2Prepared::from(q);
        prop_assert_eq!(
            multi_miller_loop(&[(&p, &prepared)]).final_exponentiation(),
            pairing(&p, &q)
        );
    }

    #[test]
    fn identity_pairs_to_identity(p in arb_g1_affine(), q in arb_g2_affine()) {
        prop_assert_eq!(pairing(&G1Affine::identity(), &q), Gt::identity());
        prop_assert_eq!(pairing(&p, &G2Affine::identity()), Gt::identity());
    }

    #[test]
    fn gt_encoding_round_trips(a in arb_scalar()) {
        let g = Gt::generator() * a;
        prop_assert_eq!(Gt::from_bytes(&g.to_bytes()).unwrap(), g);
    }
}
