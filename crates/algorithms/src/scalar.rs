//! Scalar field `GF(r)` of BLS12-381 where
//! r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001

use core::borrow::Borrow;
use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, Mul, Neg, Sub};

use bls381_internal::endian::{limbs_from_le_bytes, limbs_to_le_bytes};
use bls381_internal::montgomery::{self, WideLimbs};
use bls381_internal::{limbs_ct_eq, limbs_is_zero, limbs_select};
use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::error::{Error, Result};

/// Scalar field element in Montgomery form: aR mod r, with R = 2^256
#[derive(Clone, Copy, Eq)]
pub struct Scalar(pub(crate) [u64; 4]);

/// Field modulus r, the prime order of G1, G2 and Gt
pub(crate) const MODULUS: [u64; 4] = [
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// INV = -(r^{-1} mod 2^64) mod 2^64
const INV: u64 = 0xffff_fffe_ffff_ffff;

/// R = 2^256 mod r
const R: Scalar = Scalar([
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
]);

/// R^2 = 2^512 mod r
const R2: Scalar = Scalar([
    0xc999_e990_f3f2_9c6d,
    0x2b6c_edcb_8792_5c23,
    0x05d3_1496_7254_398f,
    0x0748_d9d9_9f59_ff11,
]);

/// R^3 = 2^768 mod r
const R3: Scalar = Scalar([
    0xc62c_1807_439b_73af,
    0x1b3e_0d18_8cf0_6990,
    0x73d1_3c71_c7b5_f418,
    0x6e2a_5bb9_c8db_33e9,
]);

/// r - 2, the inversion exponent
#[cfg(test)]
const R_MINUS_2: [u64; 4] = [
    0xffff_fffe_ffff_ffff,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// (t - 1) / 2 where r - 1 = 2^S * t with t odd
const T_MINUS_1_DIV_2: [u64; 4] = [
    0x7fff_2dff_7fff_ffff,
    0x04d0_ec02_a9de_d201,
    0x94ce_bea4_199c_ec04,
    0x0000_0000_39f6_d3a9,
];

impl Scalar {
    /// 2-adicity of r - 1
    pub const S: u32 = 32;

    /// Multiplicative generator 7 of the full group `GF(r)^*`
    pub const GENERATOR: Scalar = Scalar([
        0x0000_000e_ffff_fff1,
        0x17e3_63d3_0018_9c0f,
        0xff9c_5787_6f84_57b0,
        0x3513_3220_8fc5_a8c4,
    ]);

    /// `GENERATOR^t`, a primitive 2^S-th root of unity
    pub const ROOT_OF_UNITY: Scalar = Scalar([
        0xb9b5_8d8c_5f0e_466a,
        0x5b1b_4c80_1819_d7ec,
        0x0af5_3ae3_52a3_1e64,
        0x5bf3_adda_19e9_b27b,
    ]);

    /// Zero element
    #[inline]
    pub const fn zero() -> Scalar {
        Scalar([0, 0, 0, 0])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Scalar {
        R
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        limbs_is_zero(&self.0)
    }

    /// Convert four little-endian limbs of a canonical integer into Montgomery
    /// form. Values at or above r are reduced.
    pub fn from_raw(val: [u64; 4]) -> Self {
        Scalar(val) * R2
    }

    /// Uniformly random scalar from 512 random bits
    pub fn random(mut rng: impl RngCore) -> Self {
        let mut buf = [0u8; 64];
        rng.fill_bytes(&mut buf);
        Self::from_bytes_wide(&buf)
    }

    /// Addition
    #[inline]
    pub fn add(&self, rhs: &Self) -> Self {
        Scalar(montgomery::add_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Doubling
    #[inline]
    pub fn double(&self) -> Scalar {
        self.add(self)
    }

    /// Subtraction
    #[inline]
    pub fn sub(&self, rhs: &Self) -> Self {
        Scalar(montgomery::sub_mod(&self.0, &rhs.0, &MODULUS))
    }

    /// Negation; zero maps to zero
    #[inline]
    pub fn neg(&self) -> Self {
        Scalar(montgomery::neg_mod(&self.0, &MODULUS))
    }

    /// Multiplication
    #[inline]
    pub fn mul(&self, rhs: &Self) -> Self {
        Scalar(montgomery::montgomery_mul(&self.0, &rhs.0, &MODULUS, INV))
    }

    /// Squaring
    #[inline]
    pub fn square(&self) -> Scalar {
        Scalar(montgomery::montgomery_square(&self.0, &MODULUS, INV))
    }

    /// Exponentiation by a little-endian exponent, constant time in both
    /// the base and the exponent
    pub fn pow(&self, by: &[u64; 4]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                let tmp = res * self;
                res.conditional_assign(&tmp, (((*e >> i) & 1) as u8).into());
            }
        }
        res
    }

    /// Variable-time exponentiation
    ///
    /// **This operation is variable time with respect to the exponent.**
    pub fn pow_vartime(&self, by: &[u64; 4]) -> Self {
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

    /// Multiplicative inverse; none for zero
    ///
    /// Raises to r - 2 with a fixed addition chain (github.com/kwantam/addchain):
    /// a short prelude builds the odd multipliers, then the tail alternates
    /// runs of squarings with one multiplication each.
    pub fn invert(&self) -> CtOption<Self> {
        let mut t0 = self.square();
        let mut t1 = t0 * self;
        let mut t16 = t0.square();
        let mut t6 = t16.square();
        let mut t5 = t6 * t0;
        t0 = t6 * t16;
        let mut t12 = t5 * t16;
        let mut t2 = t6.square();
        let mut t7 = t5 * t6;
        let mut t15 = t0 * t5;
        let mut t17 = t12.square();
        t1 *= t17;
        let mut t3 = t7 * t2;
        let t8 = t1 * t17;
        let t4 = t8 * t2;
        let t9 = t8 * t7;
        t7 = t4 * t5;
        let t11 = t4 * t17;
        t5 = t9 * t17;
        let t14 = t7 * t15;
        let t13 = t11 * t12;
        t12 = t11 * t17;
        t15 *= t12;
        t16 *= t15;
        t3 *= t16;
        t17 *= t3;
        t0 *= t17;
        t6 *= t0;
        t2 *= t6;

        let tail: [(usize, &Scalar); 28] = [
            (8, &t17),
            (9, &t16),
            (9, &t15),
            (9, &t15),
            (7, &t14),
            (7, &t13),
            (10, &t12),
            (9, &t11),
            (8, &t8),
            (8, self),
            (14, &t9),
            (10, &t8),
            (15, &t7),
            (10, &t6),
            (8, &t5),
            (16, &t3),
            (8, &t2),
            (7, &t4),
            (9, &t2),
            (8, &t3),
            (8, &t2),
            (8, &t2),
            (8, &t2),
            (8, &t3),
            (8, &t2),
            (8, &t2),
            (5, &t1),
            (5, &t1),
        ];

        let mut acc = t0;
        for (squarings, multiplier) in tail.iter() {
            for _ in 0..*squarings {
                acc = acc.square();
            }
            acc *= *multiplier;
        }

        CtOption::new(acc, !self.is_zero())
    }

    /// Square root by constant-time Tonelli-Shanks
    ///
    /// Every input runs the same sequence of operations: the search for the
    /// order of `b` is done with selects over the full `S`-step range rather
    /// than by early exit.
    pub fn sqrt(&self) -> CtOption<Self> {
        let w = self.pow_vartime(&T_MINUS_1_DIV_2);

        let mut v = Self::S;
        let mut x = self * w;
        let mut b = x * w;
        let mut z = Self::ROOT_OF_UNITY;

        for max_v in (1..=Self::S).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v: Choice = 1.into();

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Scalar::one());
                let squared = Scalar::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Scalar::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Scalar::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Scalar::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = Scalar::conditional_select(&result, &x, b.ct_eq(&Scalar::one()));
            z = z.square();
            b *= z;
            v = k;
        }

        CtOption::new(x, (x * x).ct_eq(self))
    }

    /// [`Scalar::sqrt`] reporting a non-residue as [`Error::Arithmetic`]
    pub fn try_sqrt(&self) -> Result<Self> {
        Option::from(self.sqrt())
            .ok_or(Error::arithmetic("Scalar::sqrt", "not a quadratic residue"))
    }

    /// [`Scalar::invert`] reporting zero as [`Error::DivideByZero`]
    pub fn try_invert(&self) -> Result<Self> {
        Option::from(self.invert()).ok_or(Error::divide_by_zero("Scalar::invert"))
    }

    /// Decode 32 little-endian bytes; fails unless the value is below r
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Scalar> {
        let limbs: [u64; 4] = limbs_from_le_bytes(bytes);
        let is_some = Choice::from(montgomery::is_below_modulus(&limbs, &MODULUS));

        // (a * R^2) / R = aR
        CtOption::new(Scalar(limbs) * R2, is_some)
    }

    /// Encode as 32 little-endian bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        let tmp = montgomery::montgomery_reduce(&WideLimbs::from_lo(self.0), &MODULUS, INV);

        let mut res = [0u8; 32];
        limbs_to_le_bytes(&tmp, &mut res);
        res
    }

    /// Reduce a 512-bit little-endian integer modulo r
    pub fn from_bytes_wide(bytes: &[u8; 64]) -> Scalar {
        let wide: [u64; 8] = limbs_from_le_bytes(bytes);
        let d0 = Scalar([wide[0], wide[1], wide[2], wide[3]]);
        let d1 = Scalar([wide[4], wide[5], wide[6], wide[7]]);
        // (d0 + d1 * 2^256) * R
        d0 * R2 + d1 * R3
    }
}

impl_byte_serializable!(Scalar, 32);

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut be = self.to_bytes();
        be.reverse();
        let mut buf = [0u8; 64];
        hex::encode_to_slice(be, &mut buf).map_err(|_| fmt::Error)?;
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        write!(f, "0x{}", s)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Scalar {
        Scalar([val, 0, 0, 0]) * R2
    }
}

impl From<Scalar> for [u8; 32] {
    fn from(value: Scalar) -> [u8; 32] {
        value.to_bytes()
    }
}

impl<'a> From<&'a Scalar> for [u8; 32] {
    fn from(value: &'a Scalar) -> [u8; 32] {
        value.to_bytes()
    }
}

impl Default for Scalar {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Scalar {}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        limbs_ct_eq(&self.0, &other.0)
    }
}

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar(limbs_select(&a.0, &b.0, choice))
    }
}

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        Scalar::neg(self)
    }
}

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        Scalar::sub(self, rhs)
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar::add(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::mul(self, rhs)
    }
}

impl_neg_owned!(Scalar);
impl_binops_additive!(Scalar, Scalar);
impl_binops_multiplicative!(Scalar, Scalar);

impl<T> Sum<T> for Scalar
where
    T: Borrow<Scalar>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::zero(), |acc, item| acc + item.borrow())
    }
}

impl<T> Product<T> for Scalar
where
    T: Borrow<Scalar>,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::one(), |acc, item| acc * item.borrow())
    }
}

#[cfg(test)]
const LARGEST: Scalar = Scalar([
    0xffff_ffff_0000_0000,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
]);

#[test]
fn test_inv() {
    let mut inv = 1u64;
    for _ in 0..63 {
        inv = inv.wrapping_mul(inv);
        inv = inv.wrapping_mul(MODULUS[0]);
    }
    inv = inv.wrapping_neg();
    assert_eq!(inv, INV);
}

#[cfg(feature = "std")]
#[test]
fn test_debug() {
    assert_eq!(
        format!("{:?}", Scalar::zero()),
        "0x0000000000000000000000000000000000000000000000000000000000000000"
    );
    assert_eq!(
        format!("{:?}", Scalar::one()),
        "0x0000000000000000000000000000000000000000000000000000000000000001"
    );
    assert_eq!(
        format!("{}", R2),
        "0x1824b159acc5056f998c4fefecbc4ff55884b7fa0003480200000001fffffffe"
    );
}

#[test]
fn test_to_bytes() {
    assert_eq!(Scalar::zero().to_bytes(), [0u8; 32]);

    let mut one = [0u8; 32];
    one[0] = 1;
    assert_eq!(Scalar::one().to_bytes(), one);

    assert_eq!(
        (-&Scalar::one()).to_bytes(),
        [
            0, 0, 0, 0, 255, 255, 255, 255, 254, 91, 254, 255, 2, 164, 189, 83, 5, 216, 161, 9, 8,
            216, 57, 51, 72, 125, 157, 41, 83, 167, 237, 115
        ]
    );
}

#[test]
fn test_from_bytes() {
    let mut a = R2;

    for _ in 0..100 {
        let bytes = a.to_bytes();
        assert_eq!(Scalar::from_bytes(&bytes).unwrap(), a);

        let bytes = (-a).to_bytes();
        assert_eq!(Scalar::from_bytes(&bytes).unwrap(), -a);

        a = a.square();
    }

    // r itself is not canonical
    let mut modulus = [0u8; 32];
    limbs_to_le_bytes(&MODULUS, &mut modulus);
    assert!(bool::from(Scalar::from_bytes(&modulus).is_none()));
    assert!(bool::from(Scalar::from_bytes(&[0xff; 32]).is_none()));
}

#[test]
fn test_from_bytes_wide() {
    let mut bytes = [0u8; 64];
    bytes[0] = 1;
    assert_eq!(Scalar::from_bytes_wide(&bytes), Scalar::one());

    // 2^256 - 1 reduces to R - 1
    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(&[0xff; 32]);
    assert_eq!(Scalar::from_bytes_wide(&bytes), Scalar::from_raw(R.0) - Scalar::one());

    // 2^512 - 1
    assert_eq!(
        Scalar::from_bytes_wide(&[0xff; 64]),
        Scalar::from_raw(R2.0) - Scalar::one()
    );
}

#[test]
fn test_addition() {
    let mut tmp = LARGEST;
    tmp += &LARGEST;

    assert_eq!(
        tmp,
        Scalar([
            0xffff_fffe_ffff_ffff,
            0x53bd_a402_fffe_5bfe,
            0x3339_d808_09a1_d805,
            0x73ed_a753_299d_7d48,
        ])
    );

    let mut tmp = LARGEST;
    tmp += &Scalar([1, 0, 0, 0]);

    assert_eq!(tmp, Scalar::zero());
}

#[test]
fn test_negation() {
    assert_eq!(-Scalar::zero(), Scalar::zero());
    assert_eq!(-LARGEST, Scalar([1, 0, 0, 0]));
    assert_eq!(Scalar::one() - Scalar::one(), Scalar::zero());
}

#[test]
fn test_inversion() {
    assert!(bool::from(Scalar::zero().invert().is_none()));
    assert_eq!(Scalar::one().invert().unwrap(), Scalar::one());
    assert_eq!((-&Scalar::one()).invert().unwrap(), -&Scalar::one());
    assert_eq!(
        Scalar::zero().try_invert(),
        Err(Error::divide_by_zero("Scalar::invert"))
    );

    let mut tmp = R2;
    for _ in 0..100 {
        let mut tmp2 = tmp.invert().unwrap();
        tmp2 *= &tmp;
        assert_eq!(tmp2, Scalar::one());
        tmp += &R2;
    }
}

#[test]
fn test_pow() {
    let a = Scalar::from(3u64);
    assert_eq!(a.pow(&[0, 0, 0, 0]), Scalar::one());
    assert_eq!(a.pow(&[5, 0, 0, 0]), Scalar::from(243u64));
    assert_eq!(a.pow(&R_MINUS_2), a.pow_vartime(&R_MINUS_2));
    assert_eq!(a.pow(&R_MINUS_2) * a, Scalar::one());
}

#[test]
fn test_root_of_unity() {
    // ROOT_OF_UNITY has order exactly 2^S
    let mut w = Scalar::ROOT_OF_UNITY;
    for _ in 0..(Scalar::S - 1) {
        w = w.square();
        assert_ne!(w, Scalar::one());
    }
    assert_eq!(w.square(), Scalar::one());
    assert_eq!(Scalar::GENERATOR, Scalar::from(7u64));
}

#[test]
fn test_sqrt() {
    assert_eq!(Scalar::zero().sqrt().unwrap(), Scalar::zero());
    assert_eq!(Scalar::one().sqrt().unwrap(), Scalar::one());

    let four = Scalar::from(4u64);
    let two = Scalar::from(2u64);
    let sqrt_four = four.sqrt().unwrap();
    assert!(sqrt_four == two || sqrt_four == -two);

    // 5 is a quadratic non-residue mod r
    assert!(bool::from(Scalar::from(5u64).sqrt().is_none()));
    assert_eq!(
        Scalar::from(5u64).try_sqrt(),
        Err(Error::arithmetic("Scalar::sqrt", "not a quadratic residue"))
    );

    // r = 1 (mod 4), so -1 is a residue
    let neg_one = -Scalar::one();
    assert_eq!(neg_one.sqrt().unwrap().square(), neg_one);

    let mut val = R2;
    for _ in 0..100 {
        let sq = val.square();
        let sqrt = sq.sqrt().unwrap();
        assert!(sqrt == val || sqrt == -val);
        val += R;
    }
}

#[test]
fn test_from_raw() {
    assert_eq!(
        Scalar::from_raw([
            0x0001_ffff_fffd,
            0x5884_b7fa_0003_4802,
            0x998c_4fef_ecbc_4ff5,
            0x1824_b159_acc5_056f
        ]),
        Scalar::from_raw([0xffff_ffff_ffff_ffff; 4])
    );

    assert_eq!(Scalar::from_raw(MODULUS), Scalar::zero());
    assert_eq!(Scalar::from_raw([1, 0, 0, 0]), R);
}

#[test]
fn test_sum_and_product() {
    let values = [Scalar::from(2u64), Scalar::from(3u64), Scalar::from(7u64)];
    assert_eq!(values.iter().sum::<Scalar>(), Scalar::from(12u64));
    assert_eq!(values.iter().product::<Scalar>(), Scalar::from(42u64));
}

#[cfg(feature = "zeroize")]
#[test]
fn test_zeroize() {
    use zeroize::Zeroize;

    let mut a = Scalar::from_raw([
        0x1fff_3231_233f_fffd,
        0x4884_b7fa_0003_4802,
        0x998c_4fef_ecbc_4ff3,
        0x1824_b159_acc5_0562,
    ]);
    a.zeroize();
    assert!(bool::from(a.is_zero()));
}
