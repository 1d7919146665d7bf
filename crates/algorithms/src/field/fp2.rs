//! Quadratic extension `Fp2 = Fp[u] / (u^2 + 1)`

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use rand::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use crate::error::{Error, Result};

/// (p - 3) / 4
const P_MINUS_3_DIV_4: [u64; 6] = [
    0xee7f_bfff_ffff_eaaa,
    0x07aa_ffff_ac54_ffff,
    0xd9cc_34a8_3dac_3d89,
    0xd91d_d2e1_3ce1_44af,
    0x92c6_e9ed_90d2_eb35,
    0x0680_447a_8e5f_f9a6,
];

/// (p - 1) / 2
const P_MINUS_1_DIV_2: [u64; 6] = [
    0xdcff_7fff_ffff_d555,
    0x0f55_ffff_58a9_ffff,
    0xb398_6950_7b58_7b12,
    0xb23b_a5c2_79c2_895f,
    0x258d_d3db_21a5_d66b,
    0x0d00_88f5_1cbf_f34d,
];

/// Element `c0 + c1 * u`
#[derive(Copy, Clone)]
pub struct Fp2 {
    /// Constant coefficient
    pub c0: Fp,
    /// Coefficient of `u`
    pub c1: Fp,
}

impl Fp2 {
    /// Zero element
    #[inline]
    pub const fn zero() -> Fp2 {
        Fp2 {
            c0: Fp::zero(),
            c1: Fp::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp2 {
        Fp2 {
            c0: Fp::one(),
            c1: Fp::zero(),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Uniformly random element
    pub fn random(mut rng: impl RngCore) -> Fp2 {
        Fp2 {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
    }

    /// Field addition
    #[inline]
    pub fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    /// Field doubling
    #[inline]
    pub fn double(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    /// Field subtraction
    #[inline]
    pub fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    /// Additive inverse
    #[inline]
    pub fn neg(&self) -> Fp2 {
        Fp2 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }

    /// Field multiplication
    ///
    /// (a + bu)(c + du) = (ac - bd) + (ad + bc)u, with each coordinate
    /// computed as a sum of two products under one reduction.
    #[inline]
    pub fn mul(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: Fp::sum_of_products([self.c0, -self.c1], [rhs.c0, rhs.c1]),
            c1: Fp::sum_of_products([self.c0, self.c1], [rhs.c1, rhs.c0]),
        }
    }

    /// Field squaring: (a + bu)^2 = (a + b)(a - b) + 2abu
    #[inline]
    pub fn square(&self) -> Fp2 {
        let a = self.c0 + self.c1;
        let b = self.c0 - self.c1;
        let c = self.c0.double();

        Fp2 {
            c0: a * b,
            c1: c * self.c1,
        }
    }

    /// Multiply by the cubic non-residue `u + 1` used to build `Fp6`
    #[inline]
    pub fn mul_by_nonresidue(&self) -> Fp2 {
        // (a + bu)(u + 1) = (a - b) + (a + b)u
        Fp2 {
            c0: self.c0 - self.c1,
            c1: self.c0 + self.c1,
        }
    }

    /// Conjugate `c0 - c1 * u`
    #[inline]
    pub fn conjugate(&self) -> Fp2 {
        Fp2 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Raise to the p-th power; for `Fp2` this is conjugation
    #[inline]
    pub fn frobenius_map(&self) -> Fp2 {
        self.conjugate()
    }

    /// Multiplicative inverse; none for zero
    pub fn invert(&self) -> CtOption<Fp2> {
        // 1 / (a + bu) = (a - bu) / (a^2 + b^2)
        (self.c0.square() + self.c1.square()).invert().map(|t| Fp2 {
            c0: self.c0 * t,
            c1: self.c1 * -t,
        })
    }

    /// Square root, if one exists
    ///
    /// Algorithm 9 of <https://eprint.iacr.org/2012/685.pdf>, specialized to
    /// p = 3 (mod 4). Zero is its own root.
    pub fn sqrt(&self) -> CtOption<Fp2> {
        CtOption::new(Fp2::zero(), self.is_zero()).or_else(|| {
            let a1 = self.pow_vartime(&P_MINUS_3_DIV_4);
            let alpha = a1.square() * self;
            let x0 = a1 * self;

            // alpha == -1 gives the root directly as u * x0
            CtOption::new(
                Fp2 {
                    c0: -x0.c1,
                    c1: x0.c0,
                },
                alpha.ct_eq(&Fp2::one().neg()),
            )
            .or_else(|| {
                CtOption::new(
                    (alpha + Fp2::one()).pow_vartime(&P_MINUS_1_DIV_2) * x0,
                    Choice::from(1),
                )
            })
            .and_then(|sqrt| CtOption::new(sqrt, sqrt.square().ct_eq(self)))
        })
    }

    /// [`Fp2::sqrt`] reporting a non-residue as [`Error::Arithmetic`]
    pub fn try_sqrt(&self) -> Result<Fp2> {
        Option::from(self.sqrt())
            .ok_or(Error::arithmetic("Fp2::sqrt", "not a quadratic residue"))
    }

    /// [`Fp2::invert`] reporting zero as [`Error::DivideByZero`]
    pub fn try_invert(&self) -> Result<Fp2> {
        Option::from(self.invert()).ok_or(Error::divide_by_zero("Fp2::invert"))
    }

    /// Ordering used for point-compression sign bits: `c1` decides unless it
    /// is zero, in which case `c0` does
    pub fn lexicographically_largest(&self) -> Choice {
        self.c1.lexicographically_largest()
            | (self.c1.is_zero() & self.c0.lexicographically_largest())
    }

    /// Variable-time exponentiation
    ///
    /// **This operation is variable time with respect to the exponent.**
    pub fn pow_vartime(&self, by: &[u64; 6]) -> Fp2 {
        let mut res = Fp2::one();
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

    /// Decode from 96 bytes: `c1` then `c0`, each big-endian
    pub fn from_bytes(bytes: &[u8; 96]) -> CtOption<Fp2> {
        let mut c1 = [0u8; 48];
        let mut c0 = [0u8; 48];
        c1.copy_from_slice(&bytes[..48]);
        c0.copy_from_slice(&bytes[48..]);

        let c1 = Fp::from_bytes(&c1);
        let c0 = Fp::from_bytes(&c0);

        CtOption::new(
            Fp2 {
                c0: c0.unwrap_or(Fp::zero()),
                c1: c1.unwrap_or(Fp::zero()),
            },
            c0.is_some() & c1.is_some(),
        )
    }

    /// Encode to 96 bytes: `c1` then `c0`
    pub fn to_bytes(self) -> [u8; 96] {
        let mut res = [0u8; 96];
        res[..48].copy_from_slice(&self.c1.to_bytes());
        res[48..].copy_from_slice(&self.c0.to_bytes());
        res
    }
}

impl_byte_serializable!(Fp2, 96);

impl fmt::Debug for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} + {:?}*u", self.c0, self.c1)
    }
}

impl Default for Fp2 {
    fn default() -> Self {
        Fp2::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp2 {}

impl From<Fp> for Fp2 {
    fn from(f: Fp) -> Fp2 {
        Fp2 {
            c0: f,
            c1: Fp::zero(),
        }
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp2 {}
impl PartialEq for Fp2 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        Fp2::neg(self)
    }
}

impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        Fp2::sub(self, rhs)
    }
}

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        Fp2::add(self, rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        Fp2::mul(self, rhs)
    }
}

impl_neg_owned!(Fp2);
impl_binops_additive!(Fp2, Fp2);
impl_binops_multiplicative!(Fp2, Fp2);
