//! Cubic extension `Fp6 = Fp2[v] / (v^3 - (u + 1))`

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fp2::Fp2;
use crate::error::{Error, Result};

/// (u + 1)^((p - 1) / 3), applied to `c1` by the Frobenius map
const FROBENIUS_COEFF_C1: Fp2 = Fp2 {
    c0: Fp::zero(),
    c1: Fp::from_raw_unchecked([
        0xcd03_c9e4_8671_f071,
        0x5dab_2246_1fcd_a5d2,
        0x5870_42af_d385_1b95,
        0x8eb6_0ebe_01ba_cb9e,
        0x03f9_7d6e_83d0_50d2,
        0x18f0_2065_5463_8741,
    ]),
};

/// (u + 1)^((2p - 2) / 3), applied to `c2` by the Frobenius map
const FROBENIUS_COEFF_C2: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x890d_c9e4_8675_45c3,
        0x2af3_2253_3285_a5d5,
        0x5088_0866_309b_7e2c,
        0xa20d_1b8c_7e88_1024,
        0x14e4_f04f_e2db_9068,
        0x14e5_6d3f_1564_853a,
    ]),
    c1: Fp::zero(),
};

/// Element `c0 + c1 * v + c2 * v^2`
#[derive(Copy, Clone)]
pub struct Fp6 {
    /// Constant coefficient
    pub c0: Fp2,
    /// Coefficient of `v`
    pub c1: Fp2,
    /// Coefficient of `v^2`
    pub c2: Fp2,
}

impl Fp6 {
    /// Zero element
    #[inline]
    pub const fn zero() -> Self {
        Fp6 {
            c0: Fp2::zero(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Self {
        Fp6 {
            c0: Fp2::one(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero() & self.c2.is_zero()
    }

    /// Uniformly random element
    pub fn random(mut rng: impl RngCore) -> Self {
        Fp6 {
            c0: Fp2::random(&mut rng),
            c1: Fp2::random(&mut rng),
            c2: Fp2::random(&mut rng),
        }
    }

    /// Multiply by `c1 * v`
    pub fn mul_by_1(&self, c1: &Fp2) -> Fp6 {
        Fp6 {
            c0: (self.c2 * c1).mul_by_nonresidue(),
            c1: self.c0 * c1,
            c2: self.c1 * c1,
        }
    }

    /// Multiply by `c0 + c1 * v`
    pub fn mul_by_01(&self, c0: &Fp2, c1: &Fp2) -> Fp6 {
        let a_a = self.c0 * c0;
        let b_b = self.c1 * c1;

        let t1 = (self.c2 * c1).mul_by_nonresidue() + a_a;
        let t2 = (c0 + c1) * (self.c0 + self.c1) - a_a - b_b;
        let t3 = self.c2 * c0 + b_b;

        Fp6 {
            c0: t1,
            c1: t2,
            c2: t3,
        }
    }

    /// Multiply by the quadratic non-residue `v` used to build `Fp12`
    pub fn mul_by_nonresidue(&self) -> Self {
        // (a + bv + cv^2) v = c(u + 1) + av + bv^2
        Fp6 {
            c0: self.c2.mul_by_nonresidue(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Raise to the p-th power
    #[inline(always)]
    pub fn frobenius_map(&self) -> Self {
        Fp6 {
            c0: self.c0.frobenius_map(),
            c1: self.c1.frobenius_map() * FROBENIUS_COEFF_C1,
            c2: self.c2.frobenius_map() * FROBENIUS_COEFF_C2,
        }
    }

    /// Field addition
    #[inline]
    pub fn add(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
            c2: self.c2 + rhs.c2,
        }
    }

    /// Field subtraction
    #[inline]
    pub fn sub(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
            c2: self.c2 - rhs.c2,
        }
    }

    /// Additive inverse
    #[inline]
    pub fn neg(&self) -> Fp6 {
        Fp6 {
            c0: -self.c0,
            c1: -self.c1,
            c2: -self.c2,
        }
    }

    /// Field multiplication (Karatsuba over the three coefficients)
    pub fn mul(&self, b: &Fp6) -> Fp6 {
        let aa = self.c0 * b.c0;
        let bb = self.c1 * b.c1;
        let cc = self.c2 * b.c2;

        let t1 = ((self.c1 + self.c2) * (b.c1 + b.c2) - bb - cc).mul_by_nonresidue() + aa;
        let t2 = (self.c0 + self.c1) * (b.c0 + b.c1) - aa - bb + cc.mul_by_nonresidue();
        let t3 = (self.c0 + self.c2) * (b.c0 + b.c2) - aa + bb - cc;

        Fp6 {
            c0: t1,
            c1: t2,
            c2: t3,
        }
    }

    /// Field squaring (CH-SQR2 from <https://eprint.iacr.org/2006/471>)
    pub fn square(&self) -> Self {
        let s0 = self.c0.square();
        let ab = self.c0 * self.c1;
        let s1 = ab.double();
        let s2 = (self.c0 - self.c1 + self.c2).square();
        let bc = self.c1 * self.c2;
        let s3 = bc.double();
        let s4 = self.c2.square();

        Fp6 {
            c0: s3.mul_by_nonresidue() + s0,
            c1: s4.mul_by_nonresidue() + s1,
            c2: s1 + s2 + s3 - s0 - s4,
        }
    }

    /// Multiplicative inverse; none for zero
    pub fn invert(&self) -> CtOption<Self> {
        let c0 = self.c0.square() - (self.c1 * self.c2).mul_by_nonresidue();
        let c1 = self.c2.square().mul_by_nonresidue() - self.c0 * self.c1;
        let c2 = self.c1.square() - self.c0 * self.c2;

        let t = (self.c1 * c2 + self.c2 * c1).mul_by_nonresidue() + self.c0 * c0;

        t.invert().map(|t| Fp6 {
            c0: t * c0,
            c1: t * c1,
            c2: t * c2,
        })
    }

    /// [`Fp6::invert`] reporting zero as [`Error::DivideByZero`]
    pub fn try_invert(&self) -> Result<Self> {
        Option::from(self.invert()).ok_or(Error::divide_by_zero("Fp6::invert"))
    }

    /// Decode from 288 bytes: `c2`, `c1`, `c0`
    pub fn from_bytes(bytes: &[u8; 288]) -> CtOption<Fp6> {
        let mut chunks = [[0u8; 96]; 3];
        for (chunk, src) in chunks.iter_mut().zip(bytes.chunks_exact(96)) {
            chunk.copy_from_slice(src);
        }

        let c2 = Fp2::from_bytes(&chunks[0]);
        let c1 = Fp2::from_bytes(&chunks[1]);
        let c0 = Fp2::from_bytes(&chunks[2]);

        CtOption::new(
            Fp6 {
                c0: c0.unwrap_or(Fp2::zero()),
                c1: c1.unwrap_or(Fp2::zero()),
                c2: c2.unwrap_or(Fp2::zero()),
            },
            c0.is_some() & c1.is_some() & c2.is_some(),
        )
    }

    /// Encode to 288 bytes: `c2`, `c1`, `c0`
    pub fn to_bytes(self) -> [u8; 288] {
        let mut res = [0u8; 288];
        res[..96].copy_from_slice(&self.c2.to_bytes());
        res[96..192].copy_from_slice(&self.c1.to_bytes());
        res[192..].copy_from_slice(&self.c0.to_bytes());
        res
    }
}

impl_byte_serializable!(Fp6, 288);

impl fmt::Debug for Fp6 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + ({:?})*v + ({:?})*v^2", self.c0, self.c1, self.c2)
    }
}

impl Default for Fp6 {
    fn default() -> Self {
        Fp6::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp6 {}

impl From<Fp> for Fp6 {
    fn from(f: Fp) -> Fp6 {
        Fp6::from(Fp2::from(f))
    }
}

impl From<Fp2> for Fp6 {
    fn from(f: Fp2) -> Fp6 {
        Fp6 {
            c0: f,
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }
}

impl ConstantTimeEq for Fp6 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl Eq for Fp6 {}
impl PartialEq for Fp6 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp6 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp6 {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp2::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl<'a> Neg for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn neg(self) -> Fp6 {
        Fp6::neg(self)
    }
}

impl<'a, 'b> Sub<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn sub(self, rhs: &'b Fp6) -> Fp6 {
        Fp6::sub(self, rhs)
    }
}

impl<'a, 'b> Add<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn add(self, rhs: &'b Fp6) -> Fp6 {
        Fp6::add(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;

    #[inline]
    fn mul(self, rhs: &'b Fp6) -> Fp6 {
        Fp6::mul(self, rhs)
    }
}

impl_neg_owned!(Fp6);
impl_binops_additive!(Fp6, Fp6);
impl_binops_multiplicative!(Fp6, Fp6);
