//! Group operation tests for BLS12-381 G1 and G2

use crate::error::ErrorKind;
use crate::field::{Fp, Fp2};
use crate::g1::endomorphism;
use crate::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar, BLS_X};

use subtle::{Choice, ConditionallySelectable};

use super::test_rng;

/// Smallest x >= 4 giving a point on y² = x³ + 4; almost surely not in G1
pub(super) fn g1_point_outside_subgroup() -> G1Affine {
    let four = Fp::one().double().double();
    let mut x = four;
    loop {
        if let Some(y) = Option::<Fp>::from((x.square() * x + four).sqrt()) {
            return G1Affine {
                x,
                y,
                infinity: Choice::from(0u8),
            };
        }
        x += Fp::one();
    }
}

/// Same search on the twist, starting from x = 2
pub(super) fn g2_point_outside_subgroup() -> G2Affine {
    let four = Fp::one().double().double();
    let b = Fp2 { c0: four, c1: four };
    let mut x = Fp2::from(Fp::one().double());
    loop {
        if let Some(y) = Option::<Fp2>::from((x.square() * x + b).sqrt()) {
            return G2Affine {
                x,
                y,
                infinity: Choice::from(0u8),
            };
        }
        x += Fp2::one();
    }
}

/// The curve parameter x as a scalar, sign included
fn x_scalar() -> Scalar {
    -Scalar::from(BLS_X)
}

// ============================================================================
// G1 Group Tests
// ============================================================================

#[test]
fn test_g1_generator_on_curve() {
    assert!(bool::from(G1Affine::generator().is_on_curve()));
    assert!(bool::from(G1Affine::generator().is_torsion_free()));
    assert!(bool::from(G1Affine::identity().is_on_curve()));
    assert!(bool::from(G1Projective::generator().is_on_curve()));
    assert!(!bool::from(G1Affine::generator().is_identity()));
}

#[test]
fn test_g1_identity_operations() {
    let identity = G1Projective::identity();
    let g = G1Projective::generator();
    let point = g * Scalar::from(42u64);

    assert_eq!(identity + point, point);
    assert_eq!(point + identity, point);
    assert_eq!(identity * Scalar::from(42u64), identity);
    assert_eq!(identity.double(), identity);
    assert_eq!(-identity, identity);
    assert_eq!(-G1Affine::identity(), G1Affine::identity());
    assert_eq!(point - point, identity);
    assert_eq!(G1Affine::from(identity), G1Affine::identity());
}

#[test]
fn test_g1_group_law() {
    let mut rng = test_rng();

    for _ in 0..5 {
        let p = G1Projective::random(&mut rng);
        let q = G1Projective::random(&mut rng);
        let r = G1Projective::random(&mut rng);

        assert_eq!((p + q) + r, p + (q + r));
        assert_eq!(p + q, q + p);
        assert_eq!(p + (-p), G1Projective::identity());
        assert_eq!(p.double(), p + p);
        assert_eq!(p * Scalar::from(2u64), p.double());
        assert_eq!(p.to_affine().to_curve(), p);
    }
}

#[test]
fn test_g1_doubling_edge_cases() {
    // Adding a point to itself goes through the same complete formula
    let g = G1Projective::generator();
    assert_eq!(g + g, g.double());

    let ga = G1Affine::generator();
    assert_eq!(g + ga, g.double());
    assert_eq!(ga + g, g.double());
    assert_eq!(g - ga, G1Projective::identity());
}

#[test]
fn test_g1_mixed_addition_consistency() {
    let mut rng = test_rng();

    let p = G1Projective::random(&mut rng);
    let q = G1Projective::random(&mut rng);
    let q_affine = q.to_affine();

    assert_eq!(p + q_affine, p + q);
    assert_eq!(q_affine + p, p + q);
    assert_eq!(p - q_affine, p - q);
    assert_eq!(p + G1Affine::identity(), p);
    assert_eq!(G1Projective::identity() + q_affine, q);

    // Scaled projective coordinates compare equal
    let z = Fp::random(&mut rng);
    let scaled = G1Projective {
        x: p.x * z,
        y: p.y * z,
        z: p.z * z,
    };
    assert_eq!(scaled, p);
    assert_eq!(scaled + q_affine, p + q);
}

#[test]
fn test_g1_scalar_multiplication() {
    let g = G1Projective::generator();
    let a = Scalar::from(42u64);
    let b = Scalar::from(69u64);

    assert_eq!(g * a + g * b, g * (a + b));
    assert_eq!((g * a) * b, g * (a * b));
    assert_eq!(g * Scalar::from(3u64), g + g + g);
    assert_eq!(g * Scalar::zero(), G1Projective::identity());
    assert_eq!(g * Scalar::one(), g);
    assert_eq!(g * -Scalar::one(), -g);
    assert_eq!(G1Affine::generator() * a, g * a);
    assert_eq!(a * G1Affine::generator(), g * a);
    assert_eq!(a * g, g * a);

    let mut acc = g;
    acc *= a;
    assert_eq!(acc, g * a);
}

#[test]
fn test_g1_batch_normalize() {
    let mut rng = test_rng();
    let points = [
        G1Projective::random(&mut rng),
        G1Projective::identity(),
        G1Projective::random(&mut rng).double(),
        G1Projective::generator(),
    ];

    let mut normalized = [G1Affine::identity(); 4];
    G1Projective::batch_normalize(&points, &mut normalized).unwrap();

    for (p, q) in points.iter().zip(normalized.iter()) {
        assert_eq!(p.to_affine(), *q);
    }
    assert!(bool::from(normalized[1].is_identity()));

    let mut short = [G1Affine::identity(); 3];
    let err = G1Projective::batch_normalize(&points, &mut short).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn test_g1_conditional_select() {
    let a = G1Affine::generator();
    let b = G1Affine::identity();

    assert_eq!(G1Affine::conditional_select(&a, &b, Choice::from(0u8)), a);
    assert_eq!(G1Affine::conditional_select(&a, &b, Choice::from(1u8)), b);

    let a = G1Projective::generator();
    let b = G1Projective::identity();
    assert_eq!(G1Projective::conditional_select(&a, &b, Choice::from(0u8)), a);
    assert_eq!(G1Projective::conditional_select(&a, &b, Choice::from(1u8)), b);
}

#[test]
fn test_g1_sum() {
    let g = G1Projective::generator();
    let points = [g, g.double(), g * Scalar::from(3u64)];

    let sum: G1Projective = points.iter().sum();
    assert_eq!(sum, g * Scalar::from(6u64));

    let empty: [G1Projective; 0] = [];
    assert_eq!(empty.iter().sum::<G1Projective>(), G1Projective::identity());
}

#[test]
fn test_g1_torsion_free() {
    let mut rng = test_rng();

    for _ in 0..5 {
        let p = (G1Projective::generator() * Scalar::random(&mut rng)).to_affine();
        assert!(bool::from(p.is_torsion_free()));
    }
    assert!(bool::from(G1Affine::identity().is_torsion_free()));

    let outside = g1_point_outside_subgroup();
    assert!(bool::from(outside.is_on_curve()));
    assert!(!bool::from(outside.is_torsion_free()));
}

#[test]
fn test_g1_cofactor_clearing() {
    let outside = G1Projective::from(g1_point_outside_subgroup());
    let cleared = outside.clear_cofactor();

    assert!(bool::from(cleared.is_on_curve()));
    assert!(bool::from(cleared.to_affine().is_torsion_free()));
    assert!(!bool::from(cleared.is_identity()));

    // On G1 itself clearing multiplies by 1 - x
    let g = G1Projective::generator();
    assert_eq!(g.clear_cofactor(), g * (Scalar::one() - x_scalar()));
    assert_eq!(G1Projective::identity().clear_cofactor(), G1Projective::identity());
}

#[test]
fn test_g1_mul_by_x() {
    let g = G1Projective::generator();
    assert_eq!(g.mul_by_x(), g * x_scalar());

    let mut rng = test_rng();
    let p = G1Projective::random(&mut rng);
    assert_eq!(p.mul_by_x(), p * x_scalar());
}

#[test]
fn test_g1_endomorphism() {
    // On the r-torsion the endomorphism is multiplication by -x²
    let lambda = -x_scalar().square();
    let g = G1Affine::generator();

    assert_eq!(G1Projective::from(endomorphism(&g)), g * lambda);
    assert!(bool::from(endomorphism(&g).is_on_curve()));

    // Order three
    let p = endomorphism(&endomorphism(&endomorphism(&g)));
    assert_eq!(p, g);
}

// ============================================================================
// G2 Group Tests
// ============================================================================

#[test]
fn test_g2_generator_on_curve() {
    assert!(bool::from(G2Affine::generator().is_on_curve()));
    assert!(bool::from(G2Affine::generator().is_torsion_free()));
    assert!(bool::from(G2Affine::identity().is_on_curve()));
    assert!(bool::from(G2Projective::generator().is_on_curve()));
}

#[test]
fn test_g2_identity_operations() {
    let identity = G2Projective::identity();
    let point = G2Projective::generator() * Scalar::from(42u64);

    assert_eq!(identity + point, point);
    assert_eq!(point + identity, point);
    assert_eq!(identity * Scalar::from(42u64), identity);
    assert_eq!(identity.double(), identity);
    assert_eq!(-identity, identity);
    assert_eq!(point - point, identity);
    assert_eq!(G2Affine::from(identity), G2Affine::identity());
}

#[test]
fn test_g2_group_law() {
    let mut rng = test_rng();

    for _ in 0..3 {
        let p = G2Projective::random(&mut rng);
        let q = G2Projective::random(&mut rng);
        let r = G2Projective::random(&mut rng);

        assert_eq!((p + q) + r, p + (q + r));
        assert_eq!(p + q, q + p);
        assert_eq!(p + (-p), G2Projective::identity());
        assert_eq!(p.double(), p + p);
        assert_eq!(p + q.to_affine(), p + q);
        assert_eq!(p.to_affine().to_curve(), p);
        assert!(bool::from(p.to_affine().is_torsion_free()));
    }
}

#[test]
fn test_g2_scalar_multiplication() {
    let g = G2Projective::generator();
    let a = Scalar::from(42u64);
    let b = Scalar::from(69u64);

    assert_eq!(g * a + g * b, g * (a + b));
    assert_eq!((g * a) * b, g * (a * b));
    assert_eq!(g * Scalar::from(3u64), g + g + g);
    assert_eq!(g * Scalar::zero(), G2Projective::identity());
    assert_eq!(G2Affine::generator() * a, g * a);
    assert_eq!(a * g, g * a);
}

#[test]
fn test_g2_batch_normalize() {
    let mut rng = test_rng();
    let points = [
        G2Projective::random(&mut rng),
        G2Projective::identity(),
        G2Projective::generator().double(),
    ];

    let mut normalized = [G2Affine::identity(); 3];
    G2Projective::batch_normalize(&points, &mut normalized).unwrap();

    for (p, q) in points.iter().zip(normalized.iter()) {
        assert_eq!(p.to_affine(), *q);
    }

    let mut long = [G2Affine::identity(); 4];
    let err = G2Projective::batch_normalize(&points, &mut long).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
}

#[test]
fn test_g2_sum() {
    let g = G2Projective::generator();
    let sum: G2Projective = [g, g, g].iter().sum();
    assert_eq!(sum, g * Scalar::from(3u64));
}

#[test]
fn test_g2_psi() {
    let g = G2Projective::generator();

    // psi acts as multiplication by x on G2
    assert_eq!(g.psi(), g.mul_by_x());
    assert_eq!(g.mul_by_x(), g * x_scalar());

    // and psi2 is psi applied twice, on and off the subgroup
    assert_eq!(g.psi2(), g.psi().psi());
    let outside = G2Projective::from(g2_point_outside_subgroup());
    assert_eq!(outside.psi2(), outside.psi().psi());
    assert!(bool::from(outside.psi().is_on_curve()));
}

#[test]
fn test_g2_torsion_free() {
    let mut rng = test_rng();

    let p = (G2Projective::generator() * Scalar::random(&mut rng)).to_affine();
    assert!(bool::from(p.is_torsion_free()));

    let outside = g2_point_outside_subgroup();
    assert!(bool::from(outside.is_on_curve()));
    assert!(!bool::from(outside.is_torsion_free()));
}

#[test]
fn test_g2_cofactor_clearing() {
    let outside = G2Projective::from(g2_point_outside_subgroup());
    let cleared = outside.clear_cofactor();

    assert!(bool::from(cleared.is_on_curve()));
    assert!(bool::from(cleared.to_affine().is_torsion_free()));
    assert!(!bool::from(cleared.is_identity()));

    // On G2 psi = [x], so clearing multiplies by 4x² - 2x - 1
    let x = x_scalar();
    let h = x.square().double().double() - x.double() - Scalar::one();
    let g = G2Projective::generator();
    assert_eq!(g.clear_cofactor(), g * h);
}
