//! Shared proptest strategies for the bls381 property tests
//!
//! Field elements are drawn by seeding a ChaCha20 generator from a proptest
//! value, so shrinking stays meaningful and failures replay exactly.

use bls381_algorithms::{Fp, Fp12, Fp2, Fp6, G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use proptest::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand::SeedableRng;

fn seeded() -> impl Strategy<Value = ChaCha20Rng> {
    any::<[u8; 32]>().prop_map(ChaCha20Rng::from_seed)
}

/// Uniform scalars via the 64-byte wide reduction
pub fn arb_scalar() -> impl Strategy<Value = Scalar> {
    (any::<[u8; 32]>(), any::<[u8; 32]>()).prop_map(|(lo, hi)| {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&lo);
        wide[32..].copy_from_slice(&hi);
        Scalar::from_bytes_wide(&wide)
    })
}

/// Uniform base field elements
pub fn arb_fp() -> impl Strategy<Value = Fp> {
    seeded().prop_map(|mut rng| Fp::random(&mut rng))
}

/// Uniform `Fp2` elements
pub fn arb_fp2() -> impl Strategy<Value = Fp2> {
    seeded().prop_map(|mut rng| Fp2::random(&mut rng))
}

/// Uniform `Fp6` elements
pub fn arb_fp6() -> impl Strategy<Value = Fp6> {
    seeded().prop_map(|mut rng| Fp6::random(&mut rng))
}

/// Uniform `Fp12` elements
pub fn arb_fp12() -> impl Strategy<Value = Fp12> {
    seeded().prop_map(|mut rng| Fp12::random(&mut rng))
}

/// Random multiples of the G1 generator
pub fn arb_g1() -> impl Strategy<Value = G1Projective> {
    arb_scalar().prop_map(|s| G1Projective::generator() * s)
}

/// Random multiples of the G2 generator
pub fn arb_g2() -> impl Strategy<Value = G2Projective> {
    arb_scalar().prop_map(|s| G2Projective::generator() * s)
}

/// Random affine G1 points
pub fn arb_g1_affine() -> impl Strategy<Value = G1Affine> {
    arb_g1().prop_map(|p| p.to_affine())
}

/// Random affine G2 points
pub fn arb_g2_affine() -> impl Strategy<Value = G2Affine> {
    arb_g2().prop_map(|p| p.to_affine())
}
