//! N-limb modular arithmetic in Montgomery form
//!
//! These routines are shared by the 6-limb base field and the 4-limb scalar
//! field. Inputs are little-endian limb arrays already reduced below the
//! modulus; outputs keep that invariant. Loop bounds depend only on `N`, and
//! every reduction step ends in an unconditional trial subtraction whose
//! result is picked with a borrow mask.
//!
//! Multiplication is a schoolbook product into a double-width buffer followed
//! by word-by-word Montgomery reduction (one quotient digit per limb). The
//! moduli handled here leave at least one spare top bit, which keeps every
//! intermediate sum below `2 * modulus`.

use crate::limb::{adc, mac, sbb};

/// Double-width product buffer: `lo` holds limbs `0..N`, `hi` holds `N..2N`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WideLimbs<const N: usize> {
    /// Least significant half
    pub lo: [u64; N],
    /// Most significant half
    pub hi: [u64; N],
}

impl<const N: usize> WideLimbs<N> {
    /// Zero-extend a single-width value
    #[inline(always)]
    pub const fn from_lo(lo: [u64; N]) -> Self {
        WideLimbs { lo, hi: [0u64; N] }
    }

    #[inline(always)]
    fn get(&self, k: usize) -> u64 {
        if k < N {
            self.lo[k]
        } else {
            self.hi[k - N]
        }
    }

    #[inline(always)]
    fn set(&mut self, k: usize, v: u64) {
        if k < N {
            self.lo[k] = v;
        } else {
            self.hi[k - N] = v;
        }
    }
}

/// Subtract `modulus` from `a` if `a >= modulus`
#[inline(always)]
pub fn subtract_modulus<const N: usize>(a: &[u64; N], modulus: &[u64; N]) -> [u64; N] {
    let mut d = [0u64; N];
    let mut borrow = 0;
    for i in 0..N {
        let (v, b) = sbb(a[i], modulus[i], borrow);
        d[i] = v;
        borrow = b;
    }

    // borrow is all-ones when a < modulus
    let mut out = [0u64; N];
    for i in 0..N {
        out[i] = (a[i] & borrow) | (d[i] & !borrow);
    }
    out
}

/// Constant-time `a < modulus` as a 0/1 byte
#[inline(always)]
pub fn is_below_modulus<const N: usize>(a: &[u64; N], modulus: &[u64; N]) -> u8 {
    let mut borrow = 0;
    for i in 0..N {
        let (_, b) = sbb(a[i], modulus[i], borrow);
        borrow = b;
    }
    (borrow as u8) & 1
}

/// `(a + b) mod modulus`
#[inline(always)]
pub fn add_mod<const N: usize>(a: &[u64; N], b: &[u64; N], modulus: &[u64; N]) -> [u64; N] {
    let mut sum = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        let (v, c) = adc(a[i], b[i], carry);
        sum[i] = v;
        carry = c;
    }
    subtract_modulus(&sum, modulus)
}

/// `-a mod modulus`, mapping zero to zero
#[inline(always)]
pub fn neg_mod<const N: usize>(a: &[u64; N], modulus: &[u64; N]) -> [u64; N] {
    let mut d = [0u64; N];
    let mut borrow = 0;
    let mut any = 0u64;
    for i in 0..N {
        let (v, b) = sbb(modulus[i], a[i], borrow);
        d[i] = v;
        borrow = b;
        any |= a[i];
    }

    // modulus - 0 is not canonical; mask it back to zero
    let mask = ((any == 0) as u64).wrapping_sub(1);
    for limb in d.iter_mut() {
        *limb &= mask;
    }
    d
}

/// `(a - b) mod modulus`
#[inline(always)]
pub fn sub_mod<const N: usize>(a: &[u64; N], b: &[u64; N], modulus: &[u64; N]) -> [u64; N] {
    add_mod(&neg_mod(b, modulus), a, modulus)
}

/// Schoolbook product of two N-limb values
#[inline(always)]
pub fn schoolbook_mul<const N: usize>(a: &[u64; N], b: &[u64; N]) -> WideLimbs<N> {
    let mut t = WideLimbs::from_lo([0u64; N]);
    for i in 0..N {
        let mut carry = 0;
        for j in 0..N {
            let (v, c) = mac(t.get(i + j), a[i], b[j], carry);
            t.set(i + j, v);
            carry = c;
        }
        t.set(i + N, carry);
    }
    t
}

/// Square of an N-limb value: cross products once, doubled, then the diagonal
#[inline(always)]
pub fn schoolbook_square<const N: usize>(a: &[u64; N]) -> WideLimbs<N> {
    let mut t = WideLimbs::from_lo([0u64; N]);
    for i in 0..N.saturating_sub(1) {
        let mut carry = 0;
        for j in (i + 1)..N {
            let (v, c) = mac(t.get(i + j), a[i], a[j], carry);
            t.set(i + j, v);
            carry = c;
        }
        t.set(i + N, carry);
    }

    for k in (1..2 * N).rev() {
        t.set(k, (t.get(k) << 1) | (t.get(k - 1) >> 63));
    }
    t.set(0, t.get(0) << 1);

    let mut carry = 0;
    for i in 0..N {
        let (v, c) = mac(t.get(2 * i), a[i], a[i], carry);
        t.set(2 * i, v);
        let (v, c) = adc(t.get(2 * i + 1), 0, c);
        t.set(2 * i + 1, v);
        carry = c;
    }
    t
}

/// Montgomery reduction of a double-width value: `t * R^-1 mod modulus`
///
/// `inv` is `-modulus^-1 mod 2^64`.
#[inline(always)]
pub fn montgomery_reduce<const N: usize>(
    t: &WideLimbs<N>,
    modulus: &[u64; N],
    inv: u64,
) -> [u64; N] {
    let mut t = *t;
    let mut carry2 = 0;
    for i in 0..N {
        let k = t.get(i).wrapping_mul(inv);
        let (_, mut carry) = mac(t.get(i), k, modulus[0], 0);
        for j in 1..N {
            let (v, c) = mac(t.get(i + j), k, modulus[j], carry);
            t.set(i + j, v);
            carry = c;
        }
        let (v, c) = adc(t.get(i + N), carry2, carry);
        t.set(i + N, v);
        carry2 = c;
    }
    subtract_modulus(&t.hi, modulus)
}

/// Montgomery product `a * b * R^-1 mod modulus`
#[inline(always)]
pub fn montgomery_mul<const N: usize>(
    a: &[u64; N],
    b: &[u64; N],
    modulus: &[u64; N],
    inv: u64,
) -> [u64; N] {
    montgomery_reduce(&schoolbook_mul(a, b), modulus, inv)
}

/// Montgomery square `a * a * R^-1 mod modulus`
#[inline(always)]
pub fn montgomery_square<const N: usize>(a: &[u64; N], modulus: &[u64; N], inv: u64) -> [u64; N] {
    montgomery_reduce(&schoolbook_square(a), modulus, inv)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2^61 - 1, a prime with spare top bits, as a one-limb modulus.
    const M61: [u64; 1] = [(1 << 61) - 1];

    fn inv64(m: u64) -> u64 {
        // Newton iteration for m^-1 mod 2^64, negated.
        let mut x = 1u64;
        for _ in 0..6 {
            x = x.wrapping_mul(2u64.wrapping_sub(m.wrapping_mul(x)));
        }
        x.wrapping_neg()
    }

    #[test]
    fn test_square_matches_mul() {
        let a = [0x1234_5678_9abc_def0u64, 0x0fed_cba9_8765_4321, u64::MAX, 7];
        assert_eq!(schoolbook_square(&a), schoolbook_mul(&a, &a));
    }

    #[test]
    fn test_reduce_single_limb() {
        let inv = inv64(M61[0]);
        let a = [123_456_789u64];
        let b = [987_654_321u64];

        // a * b * 2^-64 * 2^64 == a * b (mod m)
        let r = (1u128 << 64) % (M61[0] as u128);
        let ab = montgomery_mul(&a, &b, &M61, inv);
        let back = ((ab[0] as u128) * r) % (M61[0] as u128);
        assert_eq!(back, (123_456_789u128 * 987_654_321u128) % (M61[0] as u128));
    }

    #[test]
    fn test_add_neg_sub() {
        let a = [M61[0] - 1];
        let b = [5u64];
        assert_eq!(add_mod(&a, &b, &M61), [4]);
        assert_eq!(neg_mod(&[0u64], &M61), [0]);
        assert_eq!(neg_mod(&b, &M61), [M61[0] - 5]);
        assert_eq!(sub_mod(&b, &a, &M61), [6]);
        assert_eq!(is_below_modulus(&a, &M61), 1);
        assert_eq!(is_below_modulus(&M61, &M61), 0);
    }
}
