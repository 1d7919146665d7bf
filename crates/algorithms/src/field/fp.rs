//! BLS12-381 base field `GF(p)` where p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use bls381_internal::endian::{limbs_from_be_bytes, limbs_to_be_bytes};
use bls381_internal::montgomery::{self, WideLimbs};
use bls381_internal::{adc, limbs_ct_eq, limbs_is_zero, limbs_select, mac};
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::error::{validate, Error, Result};

// ============================================================================
// Field Constants
// ============================================================================

/// Field modulus p
pub(crate) const MODULUS: [u64; 6] = [
    0xb9fe_ffff_ffff_aaab,
    0x1eab_fffe_b153_ffff,
    0x6730_d2a0_f6b0_f624,
    0x6477_4b84_f385_12bf,
    0x4b1b_a7b6_434b_acd7,
    0x1a01_11ea_397f_e69a,
];

/// INV = -(p^{-1} mod 2^64) mod 2^64
const INV: u64 = 0x89f3_fffc_fffc_fffd;

/// R = 2^384 mod p
const R: Fp = Fp([
    0x7609_0000_0002_fffd,
    0xebf4_000b_c40c_0002,
    0x5f48_9857_53c7_58ba,
    0x77ce_5853_7052_5745,
    0x5c07_1a97_a256_ec6d,
    0x15f6_5ec3_fa80_e493,
]);

/// R^2 = 2^768 mod p
const R2: Fp = Fp([
    0xf4df_1f34_1c34_1746,
    0x0a76_e6a6_09d1_04f1,
    0x8de5_476c_4c95_b6d5,
    0x67eb_88a9_939d_83c0,
    0x9a79_3e85_b519_952d,
    0x1198_8fe5_92ca_e3aa,
]);

/// R^3 = 2^1152 mod p
const R3: Fp = Fp([
    0xed48_ac6b_d94c_a1e0,
    0x315f_831e_03a7_adf8,
    0x9a53_352a_615e_29dd,
    0x34c0_4e5e_921e_1761,
    0x2512_d435_6572_4728,
    0x0aa6_3460_9175_5d4d,
]);

/// (p + 1) / 4, the square root exponent for p = 3 mod 4
const P_PLUS_1_DIV_4: [u64; 6] = [
    0xee7f_bfff_ffff_eaab,
    0x07aa_ffff_ac54_ffff,
    0xd9cc_34a8_3dac_3d89,
    0xd91d_d2e1_3ce1_44af,
    0x92c6_e9ed_90d2_eb35,
    0x0680_447a_8e5f_f9a6,
];

/// p - 2, the Fermat inversion exponent
const P_MINUS_2: [u64; 6] = [
    0xb9fe_ffff_ffff_aaa9,
    0x1eab_fffe_b153_ffff,
    0x6730_d2a0_f6b0_f624,
    0x6477_4b84_f385_12bf,
    0x4b1b_a7b6_434b_acd7,
    0x1a01_11ea_397f_e69a,
];

/// (p - 1) / 2 + 1, the smallest lexicographically largest value
const HALF_P_PLUS_1: [u64; 6] = [
    0xdcff_7fff_ffff_d556,
    0x0f55_ffff_58a9_ffff,
    0xb398_6950_7b58_7b12,
    0xb23b_a5c2_79c2_895f,
    0x258d_d3db_21a5_d66b,
    0x0d00_88f5_1cbf_f34d,
];

// ============================================================================
// Field Element Type
// ============================================================================

/// Element in Montgomery form: Fp(a) = aR mod p, with R = 2^384
#[derive(Copy, Clone)]
pub struct Fp(pub(crate) [u64; 6]);

impl Fp {
    /// Zero element
    #[inline]
    pub const fn zero() -> Fp {
        Fp([0, 0, 0, 0, 0, 0])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp {
        R
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        limbs_is_zero(&self.0)
    }

    /// Build an element from limbs already in Montgomery form, without checks
    pub const fn from_raw_unchecked(v: [u64; 6]) -> Fp {
        Fp(v)
    }

    /// Field addition
    #[inline]
    pub fn add(&self, rhs: &Fp) -> Fp {
        Fp(montgomery::add_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Field doubling
    #[inline]
    pub fn double(&self) -> Fp {
        self.add(self)
    }

    /// Field subtraction
    #[inline]
    pub fn sub(&self, rhs: &Fp) -> Fp {
        Fp(montgomery::sub_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Additive inverse; zero maps to zero
    #[inline]
    pub fn neg(&self) -> Fp {
        Fp(montgomery::neg_mod(&self.0, &MODULUS))
    }

    /// Field multiplication
    #[inline]
    pub fn mul(&self, rhs: &Fp) -> Fp {
        Fp(montgomery::montgomery_mul(&self.0, &rhs.0, &MODULUS, INV))
    }

    /// Field squaring
    #[inline]
    pub fn square(&self) -> Fp {
        Fp(montgomery::montgomery_square(&self.0, &MODULUS, INV))
    }

    /// Reduce a double-width Montgomery product
    #[inline]
    fn montgomery_reduce(t: &WideLimbs<6>) -> Fp {
        Fp(montgomery::montgomery_reduce(t, &MODULUS, INV))
    }

    /// Compute `sum(a[i] * b[i])` with a single final reduction
    ///
    /// Products are accumulated limb by limb and reduced one Montgomery round
    /// per limb of `a`, so the whole sum costs about as much as one
    /// multiplication plus `T - 1` schoolbook products. The running value
    /// only stays below `2^385` for `T <= 9`; callers outside this crate go
    /// through [`Fp::sum_of_products_slices`], which chunks its input.
    pub(crate) fn sum_of_products<const T: usize>(a: [Fp; T], b: [Fp; T]) -> Fp {
        debug_assert!(T <= 9, "sum_of_products overflows past 9 terms");
        let mut u = [0u64; 6];

        for j in 0..6 {
            // t = u + sum_i a[i][j] * b[i]
            let mut t = [0u64; 7];
            t[..6].copy_from_slice(&u);
            for i in 0..T {
                let mut carry = 0;
                for k in 0..6 {
                    let (v, c) = mac(t[k], a[i].0[j], b[i].0[k], carry);
                    t[k] = v;
                    carry = c;
                }
                t[6] = adc(t[6], 0, carry).0;
            }

            // (t + k * p) / 2^64
            let k = t[0].wrapping_mul(INV);
            let (_, mut carry) = mac(t[0], k, MODULUS[0], 0);
            for m in 1..6 {
                let (v, c) = mac(t[m], k, MODULUS[m], carry);
                u[m - 1] = v;
                carry = c;
            }
            u[5] = adc(t[6], 0, carry).0;
        }

        Fp(montgomery::subtract_modulus(&u, &MODULUS))
    }

    /// Compute `sum(a[i] * b[i])` over slices of any length
    ///
    /// Returns [`Error::Argument`] when the slices differ in length. An empty
    /// input sums to zero.
    pub fn sum_of_products_slices(a: &[Fp], b: &[Fp]) -> Result<Fp> {
        validate::parameter(a.len() == b.len(), "b", "slice lengths differ")?;

        let mut acc = Fp::zero();
        for (ca, cb) in a.chunks(6).zip(b.chunks(6)) {
            let mut xa = [Fp::zero(); 6];
            let mut xb = [Fp::zero(); 6];
            xa[..ca.len()].copy_from_slice(ca);
            xb[..cb.len()].copy_from_slice(cb);
            acc += Fp::sum_of_products(xa, xb);
        }
        Ok(acc)
    }
}

// ============================================================================
// Advanced Field Operations
// ============================================================================

impl Fp {
    /// Variable-time exponentiation
    ///
    /// **This operation is variable time with respect to the exponent.** It
    /// is constant time in `self` only when the exponent is public.
    pub fn pow_vartime(&self, by: &[u64; 6]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res *= self;
                }
            }
        }
        res
    }

    /// Square root, if one exists
    ///
    /// Since p = 3 (mod 4) the candidate is `self^((p+1)/4)`; it is returned
    /// only when it squares back to `self`.
    #[inline]
    pub fn sqrt(&self) -> CtOption<Self> {
        let sqrt = self.pow_vartime(&P_PLUS_1_DIV_4);
        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }

    /// Multiplicative inverse by Fermat's little theorem; none for zero
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        let t = self.pow_vartime(&P_MINUS_2);
        CtOption::new(t, !self.is_zero())
    }

    /// [`Fp::sqrt`] reporting a non-residue as [`Error::Arithmetic`]
    pub fn try_sqrt(&self) -> Result<Self> {
        Option::from(self.sqrt()).ok_or(Error::arithmetic("Fp::sqrt", "not a quadratic residue"))
    }

    /// [`Fp::invert`] reporting zero as [`Error::DivideByZero`]
    pub fn try_invert(&self) -> Result<Self> {
        Option::from(self.invert()).ok_or(Error::divide_by_zero("Fp::invert"))
    }

    /// True when the canonical value is greater than (p-1)/2
    pub fn lexicographically_largest(&self) -> Choice {
        let canonical = Fp::montgomery_reduce(&WideLimbs::from_lo(self.0));
        !Choice::from(montgomery::is_below_modulus(&canonical.0, &HALF_P_PLUS_1))
    }
}

// ============================================================================
// Serialization
// ============================================================================

impl Fp {
    /// Decode from 48 big-endian bytes; fails unless the value is below p
    pub fn from_bytes(bytes: &[u8; 48]) -> CtOption<Fp> {
        let limbs: [u64; 6] = limbs_from_be_bytes(bytes);
        let is_some = Choice::from(montgomery::is_below_modulus(&limbs, &MODULUS));

        // Convert to Montgomery form
        let tmp = Fp(limbs) * R2;

        CtOption::new(tmp, is_some)
    }

    /// Encode to 48 big-endian bytes
    pub fn to_bytes(self) -> [u8; 48] {
        let tmp = Fp::montgomery_reduce(&WideLimbs::from_lo(self.0));

        let mut res = [0u8; 48];
        limbs_to_be_bytes(&tmp.0, &mut res);
        res
    }

    /// Uniformly random field element
    ///
    /// 768 random bits are reduced modulo p, which leaves a statistical
    /// distance from uniform below 2^-384.
    pub fn random(mut rng: impl RngCore) -> Fp {
        let mut bytes = [0u8; 96];
        rng.fill_bytes(&mut bytes);

        let wide: [u64; 12] = limbs_from_be_bytes(&bytes);
        let mut lo = [0u64; 6];
        let mut hi = [0u64; 6];
        lo.copy_from_slice(&wide[..6]);
        hi.copy_from_slice(&wide[6..]);

        // (lo + hi * 2^384) * R, using that lo * R2 and hi * R3 are already
        // divided by R once.
        Fp(lo) * R2 + Fp(hi) * R3
    }
}

impl_byte_serializable!(Fp, 48);

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0u8; 96];
        hex::encode_to_slice(self.to_bytes(), &mut buf).map_err(|_| fmt::Error)?;
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        write!(f, "0x{}", s)
    }
}

impl Default for Fp {
    fn default() -> Self {
        Fp::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp {}

impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        limbs_ct_eq(&self.0, &other.0)
    }
}

impl Eq for Fp {}
impl PartialEq for Fp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp(limbs_select(&a.0, &b.0, choice))
    }
}

impl<'a> Neg for &'a Fp {
    type Output = Fp;

    #[inline]
    fn neg(self) -> Fp {
        Fp::neg(self)
    }
}

impl<'a, 'b> Sub<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn sub(self, rhs: &'b Fp) -> Fp {
        Fp::sub(self, rhs)
    }
}

impl<'a, 'b> Add<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn add(self, rhs: &'b Fp) -> Fp {
        Fp::add(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp> for &'a Fp {
    type Output = Fp;

    #[inline]
    fn mul(self, rhs: &'b Fp) -> Fp {
        Fp::mul(self, rhs)
    }
}

impl_neg_owned!(Fp);
impl_binops_additive!(Fp, Fp);
impl_binops_multiplicative!(Fp, Fp);
