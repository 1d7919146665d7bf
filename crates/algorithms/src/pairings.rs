//! The optimal ate pairing and the target group `Gt`
//!
//! A pairing is computed in two phases. The Miller loop walks the bits of the
//! curve parameter `x` and folds sparse line evaluations into an `Fp12`
//! accumulator, producing a [`MillerLoopResult`]. The final exponentiation
//! then raises that value to `(p^12 - 1) / r`, landing in [`Gt`].
//!
//! The loop itself is written once, generic over a [`MillerLoopDriver`]. The
//! [`Adder`] driver evaluates a single pairing directly; the driver behind
//! [`G2Prepared`] records the line coefficients for a fixed G2 point so that
//! [`multi_miller_loop`] can replay them against any number of G1 points.

use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::error::{validate, Result};
use crate::field::{Fp, Fp12, Fp2, Fp6};
use crate::g1::G1Affine;
use crate::g2::{G2Affine, G2Projective};
use crate::scalar::{Scalar, MODULUS as SCALAR_MODULUS};
use crate::{BLS_X, BLS_X_IS_NEGATIVE};

/// Number of line coefficient triples produced by one Miller loop
pub const MILLER_LOOP_COEFFICIENTS: usize = 68;

/// The phases of a Miller loop, abstracted over what is done with each line
///
/// [`miller_loop`] calls these in a fixed order determined only by the
/// public curve parameter.
pub trait MillerLoopDriver {
    /// Accumulator threaded through the loop
    type Output;

    /// Double the running G2 point and consume the tangent line
    fn doubling_step(&mut self, f: Self::Output) -> Self::Output;
    /// Add the base G2 point and consume the chord line
    fn addition_step(&mut self, f: Self::Output) -> Self::Output;
    /// Square the accumulator between bits
    fn square_output(f: Self::Output) -> Self::Output;
    /// Conjugate the accumulator, applied once when x is negative
    fn conjugate(f: Self::Output) -> Self::Output;
    /// Starting accumulator
    fn one() -> Self::Output;
}

/// Run the Miller loop skeleton over the bits of `|x| >> 1`
///
/// The leading set bit only seeds the loop. Every following bit costs a
/// doubling step, an addition step when set, and a squaring. A final doubling
/// step accounts for the low bit shifted out of `x`.
pub fn miller_loop<D: MillerLoopDriver>(driver: &mut D) -> D::Output {
    let mut f = D::one();

    let mut found_one = false;
    for i in (0..64).rev().map(|b| (((BLS_X >> 1) >> b) & 1) == 1) {
        if !found_one {
            found_one = i;
            continue;
        }

        f = driver.doubling_step(f);

        if i {
            f = driver.addition_step(f);
        }

        f = D::square_output(f);
    }

    f = driver.doubling_step(f);

    if BLS_X_IS_NEGATIVE {
        f = D::conjugate(f);
    }

    f
}

/// Tangent step on a Jacobian accumulator, returning the line coefficients
fn doubling_step(r: &mut G2Projective) -> (Fp2, Fp2, Fp2) {
    // Adaptation of Algorithm 26, https://eprint.iacr.org/2010/354.pdf
    let tmp0 = r.x.square();
    let tmp1 = r.y.square();
    let tmp2 = tmp1.square();
    let tmp3 = (tmp1 + r.x).square() - tmp0 - tmp2;
    let tmp3 = tmp3.double();
    let tmp4 = tmp0.double() + tmp0;
    let tmp6 = r.x + tmp4;
    let tmp5 = tmp4.square();
    let zsquared = r.z.square();
    r.x = tmp5 - tmp3 - tmp3;
    r.z = (r.z + r.y).square() - tmp1 - zsquared;
    r.y = (tmp3 - r.x) * tmp4;
    let tmp2 = tmp2.double().double().double();
    r.y -= tmp2;
    let tmp3 = -(tmp4 * zsquared).double();
    let tmp6 = tmp6.square() - tmp0 - tmp5;
    let tmp1 = tmp1.double().double();
    let tmp6 = tmp6 - tmp1;
    let tmp0 = (r.z * zsquared).double();

    (tmp0, tmp3, tmp6)
}

/// Chord step adding the affine base point `q`
fn addition_step(r: &mut G2Projective, q: &G2Affine) -> (Fp2, Fp2, Fp2) {
    // Adaptation of Algorithm 27, https://eprint.iacr.org/2010/354.pdf
    let zsquared = r.z.square();
    let ysquared = q.y.square();
    let t0 = zsquared * q.x;
    let t1 = ((q.y + r.z).square() - ysquared - zsquared) * zsquared;
    let t2 = t0 - r.x;
    let t3 = t2.square();
    let t4 = t3.double().double();
    let t5 = t4 * t2;
    let t6 = t1 - r.y - r.y;
    let t9 = t6 * q.x;
    let t7 = t4 * r.x;
    r.x = t6.square() - t5 - t7 - t7;
    r.z = (r.z + t2).square() - zsquared - t3;
    let t10 = q.y + r.z;
    let t8 = (t7 - r.x) * t6;
    let t0 = (r.y * t5).double();
    r.y = t8 - t0;
    let t10 = t10.square() - ysquared;
    let ztsquared = r.z.square();
    let t10 = t10 - ztsquared;
    let t9 = t9.double() - t10;
    let t10 = r.z.double();
    let t1 = (-t6).double();

    (t10, t1, t9)
}

/// Evaluate a line at `p` and multiply it into `f`
fn ell(f: Fp12, coeffs: &(Fp2, Fp2, Fp2), p: &G1Affine) -> Fp12 {
    let mut c0 = coeffs.0;
    let mut c1 = coeffs.1;

    c0.c0 *= p.y;
    c0.c1 *= p.y;

    c1.c0 *= p.x;
    c1.c1 *= p.x;

    f.mul_by_014(&coeffs.2, &c1, &c0)
}

/// Miller loop driver that evaluates e(P, Q) directly
///
/// Holds the running G2 accumulator, the G2 base point and the G1 point each
/// line is evaluated at.
#[derive(Clone, Debug)]
pub struct Adder {
    cur: G2Projective,
    base: G2Affine,
    p: G1Affine,
}

impl Adder {
    /// Start a Miller loop for the pair `(p, q)`
    ///
    /// Neither point may be the identity; [`pairing`] substitutes the
    /// generators and discards the result in that case.
    pub fn new(p: &G1Affine, q: &G2Affine) -> Self {
        Adder {
            cur: G2Projective::from(q),
            base: *q,
            p: *p,
        }
    }
}

impl MillerLoopDriver for Adder {
    type Output = Fp12;

    fn doubling_step(&mut self, f: Self::Output) -> Self::Output {
        let coeffs = doubling_step(&mut self.cur);
        ell(f, &coeffs, &self.p)
    }

    fn addition_step(&mut self, f: Self::Output) -> Self::Output {
        let coeffs = addition_step(&mut self.cur, &self.base);
        ell(f, &coeffs, &self.p)
    }

    fn square_output(f: Self::Output) -> Self::Output {
        f.square()
    }

    fn conjugate(f: Self::Output) -> Self::Output {
        f.conjugate()
    }

    fn one() -> Self::Output {
        Fp12::one()
    }
}

/// Compute the optimal ate pairing e(p, q)
///
/// If either input is the identity the result is [`Gt::identity`]. That case
/// is handled by selection, so timing does not reveal it.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(target = "bls381", level = "debug", skip_all)
)]
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    let either_identity = p.is_identity() | q.is_identity();
    let p = G1Affine::conditional_select(p, &G1Affine::generator(), either_identity);
    let q = G2Affine::conditional_select(q, &G2Affine::generator(), either_identity);

    let mut adder = Adder::new(&p, &q);
    let tmp = miller_loop(&mut adder);
    let tmp = MillerLoopResult(Fp12::conditional_select(&tmp, &Fp12::one(), either_identity));
    tmp.final_exponentiation()
}

/// A G2 point with its Miller loop line coefficients precomputed
///
/// Preparing costs about as much as one Miller loop; every later pairing
/// against the same point skips all G2 arithmetic. A prepared point is
/// immutable and can be shared freely.
#[cfg(feature = "alloc")]
#[derive(Clone, Debug)]
pub struct G2Prepared {
    infinity: Choice,
    coeffs: Vec<(Fp2, Fp2, Fp2)>,
}

#[cfg(feature = "alloc")]
impl G2Prepared {
    /// The recorded `(c0, c1, c2)` line coefficients in loop order
    pub fn coefficients(&self) -> &[(Fp2, Fp2, Fp2)] {
        &self.coeffs
    }

    /// Whether this was prepared from the identity
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }
}

#[cfg(feature = "alloc")]
impl From<G2Affine> for G2Prepared {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "bls381", level = "debug", skip_all, name = "G2Prepared::from")
    )]
    fn from(q: G2Affine) -> G2Prepared {
        struct Recorder {
            cur: G2Projective,
            base: G2Affine,
            coeffs: Vec<(Fp2, Fp2, Fp2)>,
        }

        impl MillerLoopDriver for Recorder {
            type Output = ();

            fn doubling_step(&mut self, _: Self::Output) -> Self::Output {
                let coeffs = doubling_step(&mut self.cur);
                self.coeffs.push(coeffs);
            }

            fn addition_step(&mut self, _: Self::Output) -> Self::Output {
                let coeffs = addition_step(&mut self.cur, &self.base);
                self.coeffs.push(coeffs);
            }

            fn square_output(_: Self::Output) -> Self::Output {}

            fn conjugate(_: Self::Output) -> Self::Output {}

            fn one() -> Self::Output {}
        }

        let is_identity = q.is_identity();
        let q = G2Affine::conditional_select(&q, &G2Affine::generator(), is_identity);

        let mut recorder = Recorder {
            cur: G2Projective::from(q),
            base: q,
            coeffs: Vec::with_capacity(MILLER_LOOP_COEFFICIENTS),
        };

        miller_loop(&mut recorder);

        debug_assert_eq!(recorder.coeffs.len(), MILLER_LOOP_COEFFICIENTS);

        G2Prepared {
            infinity: is_identity,
            coeffs: recorder.coeffs,
        }
    }
}

/// Run one shared Miller loop over every `(P, Q)` pair
///
/// The product of the individual Miller loop outputs is returned; apply
/// [`MillerLoopResult::final_exponentiation`] to obtain the product of the
/// pairings. Pairs where either side is the identity contribute nothing.
#[cfg(feature = "alloc")]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(target = "bls381", level = "debug", skip_all, fields(terms = terms.len()))
)]
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    struct Replayer<'a, 'b, 'c> {
        terms: &'c [(&'a G1Affine, &'b G2Prepared)],
        index: usize,
    }

    impl<'a, 'b, 'c> Replayer<'a, 'b, 'c> {
        fn step(&mut self, mut f: Fp12) -> Fp12 {
            let index = self.index;
            for term in self.terms {
                let either_identity = term.0.is_identity() | term.1.infinity;

                let new_f = ell(f, &term.1.coeffs[index], term.0);
                f = Fp12::conditional_select(&new_f, &f, either_identity);
            }
            self.index += 1;

            f
        }
    }

    impl<'a, 'b, 'c> MillerLoopDriver for Replayer<'a, 'b, 'c> {
        type Output = Fp12;

        fn doubling_step(&mut self, f: Self::Output) -> Self::Output {
            self.step(f)
        }

        fn addition_step(&mut self, f: Self::Output) -> Self::Output {
            self.step(f)
        }

        fn square_output(f: Self::Output) -> Self::Output {
            f.square()
        }

        fn conjugate(f: Self::Output) -> Self::Output {
            f.conjugate()
        }

        fn one() -> Self::Output {
            Fp12::one()
        }
    }

    let mut replayer = Replayer { terms, index: 0 };

    MillerLoopResult(miller_loop(&mut replayer))
}

/// Output of a Miller loop, not yet reduced into `Gt`
///
/// Results combine multiplicatively via `+`, so several Miller loops can
/// share one final exponentiation.
#[derive(Copy, Clone, Debug)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl Default for MillerLoopResult {
    fn default() -> Self {
        MillerLoopResult(Fp12::one())
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for MillerLoopResult {}

impl ConditionallySelectable for MillerLoopResult {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        MillerLoopResult(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<'a, 'b> Add<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn add(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}

impl_add_binop_specify_output!(MillerLoopResult, MillerLoopResult, MillerLoopResult);

impl AddAssign<MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: MillerLoopResult) {
        *self = &*self + &rhs;
    }
}

impl<'b> AddAssign<&'b MillerLoopResult> for MillerLoopResult {
    #[inline]
    fn add_assign(&mut self, rhs: &'b MillerLoopResult) {
        *self = &*self + rhs;
    }
}

impl MillerLoopResult {
    /// Raise to `(p^12 - 1) / r`, mapping into `Gt`
    ///
    /// The easy part `(p^6 - 1)(p^2 + 1)` uses conjugation, one inversion and
    /// Frobenius maps. The hard part is the fixed chain of cyclotomic
    /// exponentiations by x from Hayashida, Hayasaka and Teruya
    /// (https://eprint.iacr.org/2020/875).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "bls381", level = "debug", skip_all)
    )]
    pub fn final_exponentiation(&self) -> Gt {
        #[must_use]
        fn fp4_square(a: Fp2, b: Fp2) -> (Fp2, Fp2) {
            let t0 = a.square();
            let t1 = b.square();
            let mut t2 = t1.mul_by_nonresidue();
            let c0 = t2 + t0;
            t2 = a + b;
            t2 = t2.square();
            t2 -= t0;
            let c1 = t2 - t1;

            (c0, c1)
        }

        // Granger and Scott, Faster Squaring in the Cyclotomic Subgroup of
        // Sixth Degree Extensions, https://eprint.iacr.org/2009/565.pdf
        #[must_use]
        fn cyclotomic_square(f: Fp12) -> Fp12 {
            let mut z0 = f.c0.c0;
            let mut z4 = f.c0.c1;
            let mut z3 = f.c0.c2;
            let mut z2 = f.c1.c0;
            let mut z1 = f.c1.c1;
            let mut z5 = f.c1.c2;

            let (t0, t1) = fp4_square(z0, z1);

            // A
            z0 = t0 - z0;
            z0 = z0.double() + t0;

            z1 = t1 + z1;
            z1 = z1.double() + t1;

            let (mut t0, t1) = fp4_square(z2, z3);
            let (t2, t3) = fp4_square(z4, z5);

            // C
            z4 = t0 - z4;
            z4 = z4.double() + t0;

            z5 = t1 + z5;
            z5 = z5.double() + t1;

            // B
            t0 = t3.mul_by_nonresidue();
            z2 = t0 + z2;
            z2 = z2.double() + t0;

            z3 = t2 - z3;
            z3 = z3.double() + t2;

            Fp12 {
                c0: Fp6 {
                    c0: z0,
                    c1: z4,
                    c2: z3,
                },
                c1: Fp6 {
                    c0: z2,
                    c1: z1,
                    c2: z5,
                },
            }
        }

        // f^x for the negative x, valid on the cyclotomic subgroup
        #[must_use]
        fn cyclotomic_exp(f: Fp12) -> Fp12 {
            let mut tmp = Fp12::one();
            let mut found_one = false;
            for i in (0..64).rev().map(|b| ((BLS_X >> b) & 1) == 1) {
                if found_one {
                    tmp = cyclotomic_square(tmp)
                } else {
                    found_one = i;
                }

                if i {
                    tmp *= f;
                }
            }

            tmp.conjugate()
        }

        let f = self.0;
        let t0 = f.conjugate();

        // Miller loop outputs are never zero
        let inverse = f.invert().unwrap_or(Fp12::one());

        let mut t1 = inverse;
        let mut t2 = t0 * t1;
        t1 = t2;
        t2 = t2.frobenius_map().frobenius_map();
        t2 *= t1;
        t1 = cyclotomic_square(t2).conjugate();
        let mut t3 = cyclotomic_exp(t2);
        let mut t4 = cyclotomic_square(t3);
        let mut t5 = t1 * t3;
        t1 = cyclotomic_exp(t5);
        let t0 = cyclotomic_exp(t1);
        let mut t6 = cyclotomic_exp(t0);
        t6 *= t4;
        t4 = cyclotomic_exp(t6);
        t5 = t5.conjugate();
        t4 *= t5 * t2;
        t5 = t2.conjugate();
        t1 *= t2;
        t1 = t1.frobenius_map().frobenius_map().frobenius_map();
        t6 *= t5;
        t6 = t6.frobenius_map();
        t3 *= t0;
        t3 = t3.frobenius_map().frobenius_map();
        t3 *= t1;
        t3 *= t6;

        Gt(t3 * t4)
    }
}

/// Element of the order-r target group, a subgroup of `Fp12*`
///
/// Written additively: `+` multiplies the underlying `Fp12` values, negation
/// conjugates and `* Scalar` exponentiates.
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl Default for Gt {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Gt {}

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl Eq for Gt {}
impl PartialEq for Gt {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl Gt {
    /// The group identity, `1` in `Fp12`
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// e(G1 generator, G2 generator)
    pub fn generator() -> Gt {
        Gt(Fp12 {
            c0: Fp6 {
                c0: Fp2 {
                    c0: Fp::from_raw_unchecked([
                        0x1972_e433_a01f_85c5,
                        0x97d3_2b76_fd77_2538,
                        0xc8ce_546f_c96b_cdf9,
                        0xcef6_3e73_66d4_0614,
                        0xa611_3427_8184_3780,
                        0x13f3_448a_3fc6_d825,
                    ]),
                    c1: Fp::from_raw_unchecked([
                        0xd263_31b0_2e9d_6995,
                        0x9d68_a482_f779_7e7d,
                        0x9c9b_2924_8d39_ea92,
                        0xf480_1ca2_e131_07aa,
                        0xa16c_0732_bdbc_b066,
                        0x083c_a4af_ba36_0478,
                    ]),
                },
                c1: Fp2 {
                    c0: Fp::from_raw_unchecked([
                        0x59e2_61db_0916_b641,
                        0x2716_b6f4_b23e_960d,
                        0xc8e5_5b10_a0bd_9c45,
                        0x0bdb_0bd9_9c4d_eda8,
                        0x8cf8_9ebf_57fd_aac5,
                        0x12d6_b792_9e77_7a5e,
                    ]),
                    c1: Fp::from_raw_unchecked([
                        0x5fc8_5188_b0e1_5f35,
                        0x34a0_6e3a_8f09_6365,
                        0xdb31_26a6_e02a_d62c,
                        0xfc6f_5aa9_7d9a_990b,
                        0xa12f_55f5_eb89_c210,
                        0x1723_703a_926f_8889,
                    ]),
                },
                c2: Fp2 {
                    c0: Fp::from_raw_unchecked([
                        0x9358_8f29_7182_8778,
                        0x43f6_5b86_11ab_7585,
                        0x3183_aaf5_ec27_9fdf,
                        0xfa73_d7e1_8ac9_9df6,
                        0x64e1_76a6_a64c_99b0,
                        0x179f_a78c_5838_8f1f,
                    ]),
                    c1: Fp::from_raw_unchecked([
                        0x672a_0a11_ca2a_ef12,
                        0x0d11_b9b5_2aa3_f16b,
                        0xa444_12d0_699d_056e,
                        0xc01d_0177_221a_5ba5,
                        0x66e0_cede_6c73_5529,
                        0x05f5_a71e_9fdd_c339,
                    ]),
                },
            },
            c1: Fp6 {
                c0: Fp2 {
                    c0: Fp::from_raw_unchecked([
                        0xd30a_88a1_b062_c679,
                        0x5ac5_6a5d_35fc_8304,
                        0xd0c8_34a6_a81f_290d,
                        0xcd54_30c2_da37_07c7,
                        0xf0c2_7ff7_8050_0af0,
                        0x0924_5da6_e2d7_2eae,
                    ]),
                    c1: Fp::from_raw_unchecked([
                        0x9f2e_0676_791b_5156,
                        0xe2d1_c823_4918_fe13,
                        0x4c9e_459f_3c56_1bf4,
                        0xa3e8_5e53_b9d3_e3c1,
                        0x820a_121e_21a7_0020,
                        0x15af_6183_41c5_9acc,
                    ]),
                },
                c1: Fp2 {
                    c0: Fp::from_raw_unchecked([
                        0x7c95_658c_2499_3ab1,
                        0x73eb_3872_1ca8_86b9,
                        0x5256_d749_4774_34bc,
                        0x8ba4_1902_ea50_4a8b,
                        0x04a3_d3f8_0c86_ce6d,
                        0x18a6_4a87_fb68_6eaa,
                    ]),
                    c1: Fp::from_raw_unchecked([
                        0xbb83_e71b_b920_cf26,
                        0x2a52_77ac_92a7_3945,
                        0xfc0e_e59f_94f0_46a0,
                        0x7158_cdf3_7860_58f7,
                        0x7cc1_061b_82f9_45f6,
                        0x03f8_47aa_9fdb_e567,
                    ]),
                },
                c2: Fp2 {
                    c0: Fp::from_raw_unchecked([
                        0x8078_dba5_6134_e657,
                        0x1cd7_ec9a_4399_8a6e,
                        0xb1aa_599a_1a99_3766,
                        0xc9a0_f62f_0842_ee44,
                        0x8e15_9be3_b605_dffa,
                        0x0c86_ba0d_4af1_3fc2,
                    ]),
                    c1: Fp::from_raw_unchecked([
                        0xe80f_f2a0_6a52_ffb1,
                        0x7694_ca48_721a_906c,
                        0x7583_183e_03b0_8514,
                        0xf567_afdd_40ce_e4e2,
                        0x9a6d_96d2_e526_a5fc,
                        0x197e_9f49_861f_2242,
                    ]),
                },
            },
        })
    }

    /// Uniformly random element, as a random multiple of the generator
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let s = Scalar::random(&mut rng);
            if !bool::from(s.is_zero()) {
                return Gt::generator() * s;
            }
        }
    }

    /// Check for the identity
    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&Self::identity())
    }

    /// Group doubling, squaring in `Fp12`
    #[inline]
    pub fn double(&self) -> Gt {
        Gt(self.0.square())
    }

    /// The underlying `Fp12` value
    pub fn as_fp12(&self) -> &Fp12 {
        &self.0
    }

    /// Serialize the underlying `Fp12` value (576 bytes)
    pub fn to_bytes(&self) -> [u8; 576] {
        self.0.to_bytes()
    }

    /// Decode 576 bytes, rejecting non-canonical encodings and any value
    /// outside the order-r subgroup
    ///
    /// The subgroup check exponentiates by the public group order in
    /// variable time.
    pub fn from_bytes(bytes: &[u8; 576]) -> Result<Gt> {
        let f = Option::<Fp12>::from(Fp12::from_bytes(bytes));
        validate::format(f.is_some(), "Gt", "non-canonical field element")?;
        let f = f.unwrap_or_default();

        let in_subgroup = f.pow_vartime(&SCALAR_MODULUS).ct_eq(&Fp12::one());
        if !bool::from(in_subgroup) {
            debug_event!("rejected Fp12 value outside the order-r subgroup");
        }
        validate::format(in_subgroup.into(), "Gt", "value is not in the order-r subgroup")?;

        Ok(Gt(f))
    }
}

impl_byte_serializable!(Gt, 576);

impl<'a> Neg for &'a Gt {
    type Output = Gt;

    #[inline]
    fn neg(self) -> Gt {
        // Elements of Gt are unitary
        Gt(self.0.conjugate())
    }
}

impl_neg_owned!(Gt);

impl<'a, 'b> Add<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn add(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl<'a, 'b> Sub<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn sub(self, rhs: &'b Gt) -> Gt {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Gt {
    type Output = Gt;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        let mut acc = Gt::identity();

        // Fixed 255-step double-and-add from the most significant bit, the top
        // bit of a canonical scalar being always clear
        for bit in other
            .to_bytes()
            .iter()
            .rev()
            .flat_map(|byte| (0..8).rev().map(move |i| Choice::from((byte >> i) & 1u8)))
            .skip(1)
        {
            acc = acc.double();
            acc = Gt::conditional_select(&acc, &(acc + self), bit);
        }

        acc
    }
}

impl<'a, 'b> Mul<&'b Gt> for &'a Scalar {
    type Output = Gt;

    #[inline]
    fn mul(self, rhs: &'b Gt) -> Gt {
        rhs * self
    }
}

impl_binops_additive!(Gt, Gt);
impl_binops_multiplicative!(Gt, Scalar);
impl_binops_multiplicative_mixed!(Scalar, Gt, Gt);

impl<T> Sum<T> for Gt
where
    T: Borrow<Gt>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}
