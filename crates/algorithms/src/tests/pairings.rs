//! Pairing and target group tests for BLS12-381

use crate::error::ErrorKind;
use crate::field::Fp12;
use crate::pairings::{miller_loop, pairing, Adder, Gt, MillerLoopResult, MILLER_LOOP_COEFFICIENTS};
use crate::scalar::MODULUS as SCALAR_MODULUS;
use crate::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};

#[cfg(feature = "alloc")]
use crate::pairings::{multi_miller_loop, G2Prepared};

use subtle::ConditionallySelectable;

use super::test_rng;

fn is_in_gt(f: &Fp12) -> bool {
    f.pow_vartime(&SCALAR_MODULUS) == Fp12::one()
}

// ============================================================================
// Basic Pairing Tests
// ============================================================================

#[test]
fn test_pairing_known_answer() {
    let res = pairing(&G1Affine::generator(), &G2Affine::generator());
    assert_eq!(res, Gt::generator());
    assert!(is_in_gt(res.as_fp12()));
}

#[test]
fn test_pairing_bilinearity() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();

    let p1 = (g1 * Scalar::from(2u64)).to_affine();
    let p2 = (g1 * Scalar::from(3u64)).to_affine();
    let q1 = (g2 * Scalar::from(5u64)).to_affine();
    let q2 = (g2 * Scalar::from(7u64)).to_affine();

    // e(P1 + P2, Q) == e(P1, Q) * e(P2, Q)
    let left = pairing(&(p1 + G1Projective::from(p2)).to_affine(), &q1);
    let right = pairing(&p1, &q1) + pairing(&p2, &q1);
    assert_eq!(left, right);

    // e(P, Q1 + Q2) == e(P, Q1) * e(P, Q2)
    let left = pairing(&p1, &(q1 + G2Projective::from(q2)).to_affine());
    let right = pairing(&p1, &q1) + pairing(&p1, &q2);
    assert_eq!(left, right);
}

#[test]
fn test_pairing_scalar_multiplication() {
    let mut rng = test_rng();
    let a = Scalar::random(&mut rng);
    let b = Scalar::random(&mut rng);

    let p = (G1Affine::generator() * a).to_affine();
    let q = (G2Affine::generator() * b).to_affine();

    // e([a]P, [b]Q) == e(P, Q)^(a*b)
    assert_eq!(pairing(&p, &q), Gt::generator() * (a * b));
    assert_eq!(pairing(&p, &G2Affine::generator()), Gt::generator() * a);
}

#[test]
fn test_pairing_negation() {
    let p = G1Affine::generator();
    let q = G2Affine::generator();

    assert_eq!(pairing(&-p, &q), -pairing(&p, &q));
    assert_eq!(pairing(&p, &-q), -pairing(&p, &q));
    assert_eq!(pairing(&-p, &-q), pairing(&p, &q));
}

#[test]
fn test_pairing_non_degeneracy() {
    let result = pairing(&G1Affine::generator(), &G2Affine::generator());
    assert!(!bool::from(result.is_identity()));
}

#[test]
fn test_pairing_with_identity() {
    let mut rng = test_rng();
    let p = G1Projective::random(&mut rng).to_affine();
    let q = G2Projective::random(&mut rng).to_affine();

    assert_eq!(pairing(&G1Affine::identity(), &q), Gt::identity());
    assert_eq!(pairing(&p, &G2Affine::identity()), Gt::identity());
    assert_eq!(pairing(&G1Affine::identity(), &G2Affine::identity()), Gt::identity());
}

#[test]
fn test_final_exponentiation_lands_in_gt() {
    let mut rng = test_rng();

    let f = Fp12::random(&mut rng);
    let reduced = MillerLoopResult(f).final_exponentiation();
    assert!(is_in_gt(reduced.as_fp12()));

    // Products of Miller loop results reduce to products in Gt
    let g = MillerLoopResult(Fp12::random(&mut rng));
    let sum = MillerLoopResult(f) + g;
    assert_eq!(
        sum.final_exponentiation(),
        MillerLoopResult(f).final_exponentiation() + g.final_exponentiation()
    );
    assert_eq!(MillerLoopResult::default().final_exponentiation(), Gt::identity());
}

// ============================================================================
// Miller Loop Drivers
// ============================================================================

#[cfg(feature = "alloc")]
#[test]
fn test_prepared_coefficient_count() {
    let prepared = G2Prepared::from(G2Affine::generator());
    assert_eq!(prepared.coefficients().len(), MILLER_LOOP_COEFFICIENTS);
    assert!(!bool::from(prepared.is_identity()));

    let prepared = G2Prepared::from(G2Affine::identity());
    assert_eq!(prepared.coefficients().len(), 68);
    assert!(bool::from(prepared.is_identity()));
}

#[cfg(feature = "alloc")]
#[test]
fn test_prepared_replay_matches_adder() {
    let mut rng = test_rng();
    let p = G1Projective::random(&mut rng).to_affine();
    let q = G2Projective::random(&mut rng).to_affine();

    let direct = miller_loop(&mut Adder::new(&p, &q));
    let replayed = multi_miller_loop(&[(&p, &G2Prepared::from(q))]);
    assert_eq!(replayed.0, direct);
}

#[cfg(feature = "alloc")]
#[test]
fn test_multi_miller_loop_consistency() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();

    let p1 = (g1 * Scalar::from(2u64)).to_affine();
    let p2 = (g1 * Scalar::from(3u64)).to_affine();
    let q1 = (g2 * Scalar::from(5u64)).to_affine();
    let q2 = (g2 * Scalar::from(7u64)).to_affine();

    let prep1 = G2Prepared::from(q1);
    let prep2 = G2Prepared::from(q2);

    let multi_result = multi_miller_loop(&[(&p1, &prep1), (&p2, &prep2)]).final_exponentiation();
    let individual_result = pairing(&p1, &q1) + pairing(&p2, &q2);
    assert_eq!(multi_result, individual_result);

    // 2*5 + 3*7 = 31
    assert_eq!(multi_result, Gt::generator() * Scalar::from(31u64));
}

#[cfg(feature = "alloc")]
#[test]
fn test_multi_miller_loop_with_identity() {
    let g1 = G1Projective::generator();
    let g2 = G2Projective::generator();

    let p = (g1 * Scalar::from(42u64)).to_affine();
    let q = (g2 * Scalar::from(69u64)).to_affine();

    let prep_q = G2Prepared::from(q);
    let prep_identity = G2Prepared::from(G2Affine::identity());
    let expected = pairing(&p, &q);

    let result = multi_miller_loop(&[(&p, &prep_q), (&G1Affine::identity(), &prep_q)]);
    assert_eq!(result.final_exponentiation(), expected);

    let result = multi_miller_loop(&[(&p, &prep_q), (&p, &prep_identity)]);
    assert_eq!(result.final_exponentiation(), expected);

    assert_eq!(multi_miller_loop(&[]).final_exponentiation(), Gt::identity());
}

#[cfg(feature = "alloc")]
#[test]
fn test_multi_pairing_cancellation() {
    // e(P, Q) * e(-P, Q) = 1, the shape of a signature check
    let mut rng = test_rng();
    let p = G1Projective::random(&mut rng).to_affine();
    let q = G2Prepared::from(G2Projective::random(&mut rng).to_affine());
    let neg_p = -p;

    let result = multi_miller_loop(&[(&p, &q), (&neg_p, &q)]).final_exponentiation();
    assert!(bool::from(result.is_identity()));
}

// ============================================================================
// Gt Group Tests
// ============================================================================

#[test]
fn test_gt_identity() {
    let identity = Gt::identity();
    let g = Gt::generator();

    assert_eq!(identity + g, g);
    assert_eq!(g + identity, g);
    assert_eq!(identity * Scalar::from(42u64), identity);
    assert_eq!(Gt::default(), identity);
    assert!(bool::from(identity.is_identity()));
}

#[test]
fn test_gt_group_law() {
    let mut rng = test_rng();
    let a = Gt::random(&mut rng);
    let b = Gt::random(&mut rng);
    let c = Gt::random(&mut rng);

    assert_eq!((a + b) + c, a + (b + c));
    assert_eq!(a + b, b + a);
    assert_eq!(a.double(), a + a);
    assert_eq!(a + (-a), Gt::identity());
    assert_eq!((a + b) - b, a);

    let sum: Gt = [a, b, c].iter().sum();
    assert_eq!(sum, a + b + c);
}

#[test]
fn test_gt_scalar_multiplication() {
    let g = Gt::generator();
    let x = Scalar::from(42u64);
    let y = Scalar::from(69u64);

    assert_eq!(g * x + g * y, g * (x + y));
    assert_eq!((g * x) * y, g * (x * y));
    assert_eq!(g * Scalar::zero(), Gt::identity());
    assert_eq!(g * Scalar::one(), g);
    assert_eq!(g * -Scalar::one(), -g);
    assert_eq!(x * g, g * x);
}

#[test]
fn test_gt_conditional_select() {
    let a = Gt::generator();
    let b = Gt::identity();

    assert_eq!(Gt::conditional_select(&a, &b, 0u8.into()), a);
    assert_eq!(Gt::conditional_select(&a, &b, 1u8.into()), b);
}

#[test]
fn test_gt_bytes_round_trip() {
    let mut rng = test_rng();

    for g in [Gt::identity(), Gt::generator(), Gt::random(&mut rng)] {
        let bytes = g.to_bytes();
        assert_eq!(bytes, g.as_fp12().to_bytes());
        assert_eq!(Gt::from_bytes(&bytes).unwrap(), g);
    }
}

#[test]
fn test_gt_rejects_values_outside_subgroup() {
    let mut rng = test_rng();

    // A random Fp12 value is not in the order-r subgroup
    let f = Fp12::random(&mut rng);
    let err = Gt::from_bytes(&f.to_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = Gt::from_bytes(&Fp12::zero().to_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    // Non-canonical coefficient
    let mut bytes = Gt::generator().to_bytes();
    bytes[0] = 0xff;
    let err = Gt::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    // Unitary but outside Gt: f^(p^6 - 1) without the rest of the exponent
    let unitary = f.conjugate() * f.invert().unwrap();
    assert!(!is_in_gt(&unitary));
    assert!(Gt::from_bytes(&unitary.to_bytes()).is_err());
}

#[test]
fn test_line_coefficients_embed_g1_point() {
    // A G1 point and its negation yield conjugate line evaluations, so the
    // full pairings are inverse to each other
    let p = G1Affine::generator();
    let q = G2Affine::generator();

    let f = miller_loop(&mut Adder::new(&p, &q));
    let g = miller_loop(&mut Adder::new(&-p, &q));

    let lhs = MillerLoopResult(f) + MillerLoopResult(g);
    assert_eq!(lhs.final_exponentiation(), Gt::identity());
}
