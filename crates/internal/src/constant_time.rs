//! Constant-time operations to prevent timing attacks
//!
//! Equality is decided by OR-ing limb-wise XOR differences into a single
//! accumulator and testing that accumulator against zero at the end; there is
//! no early return. Selection goes through arithmetic masks.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time equality of two limb arrays
pub fn limbs_ct_eq<const N: usize>(a: &[u64; N], b: &[u64; N]) -> Choice {
    let mut acc = 0u64;
    for i in 0..N {
        acc |= a[i] ^ b[i];
    }
    acc.ct_eq(&0)
}

/// Constant-time test of a limb array against zero
pub fn limbs_is_zero<const N: usize>(a: &[u64; N]) -> Choice {
    let mut acc = 0u64;
    for limb in a.iter() {
        acc |= *limb;
    }
    acc.ct_eq(&0)
}

/// Returns `a` if `choice` is 0 and `b` if `choice` is 1, limb by limb
pub fn limbs_select<const N: usize>(a: &[u64; N], b: &[u64; N], choice: Choice) -> [u64; N] {
    let mask = ct_mask(choice);
    let mut out = [0u64; N];
    for i in 0..N {
        out[i] = a[i] ^ (mask & (a[i] ^ b[i]));
    }
    out
}

/// Constant-time comparison of two byte strings
///
/// The length is treated as public. Every byte of `a` is compared against the
/// byte of `b` at the same offset, including any trailing bytes that do not
/// fill a whole machine word.
pub fn bytes_ct_eq(a: &[u8], b: &[u8]) -> Choice {
    if a.len() != b.len() {
        return Choice::from(0);
    }

    let mut acc = 0u64;
    let mut words_a = a.chunks_exact(8);
    let mut words_b = b.chunks_exact(8);
    for (wa, wb) in (&mut words_a).zip(&mut words_b) {
        acc |= crate::endian::u64_from_le_bytes(wa) ^ crate::endian::u64_from_le_bytes(wb);
    }
    for (x, y) in words_a.remainder().iter().zip(words_b.remainder()) {
        acc |= u64::from(x ^ y);
    }
    acc.ct_eq(&0)
}

/// Constant-time selection
///
/// Returns `a` if `condition` is false, `b` if `condition` is true.
pub fn ct_select<T>(a: &T, b: &T, condition: Choice) -> T
where
    T: ConditionallySelectable,
{
    T::conditional_select(a, b, condition)
}

/// All-ones mask for a set choice, all-zeros otherwise
#[inline(always)]
pub fn ct_mask(choice: Choice) -> u64 {
    0u64.wrapping_sub(u64::from(choice.unwrap_u8()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limbs_ct_eq() {
        let a = [1u64, 2, 3, 4, 5, 6];
        let mut b = a;
        assert!(bool::from(limbs_ct_eq(&a, &b)));

        b[5] ^= 1 << 63;
        assert!(!bool::from(limbs_ct_eq(&a, &b)));
    }

    #[test]
    fn test_limbs_select_and_zero() {
        let a = [7u64; 4];
        let b = [9u64, 0, u64::MAX, 1];
        assert_eq!(limbs_select(&a, &b, Choice::from(0)), a);
        assert_eq!(limbs_select(&a, &b, Choice::from(1)), b);

        assert!(bool::from(limbs_is_zero(&[0u64; 6])));
        assert!(!bool::from(limbs_is_zero(&[0, 0, 0, 1u64])));
    }

    #[test]
    fn test_bytes_ct_eq_checks_tail() {
        // 11 bytes: one full word and a 3-byte tail.
        let a = *b"hello world";
        let mut b = a;
        assert!(bool::from(bytes_ct_eq(&a, &b)));

        b[10] = b'D';
        assert!(!bool::from(bytes_ct_eq(&a, &b)));

        assert!(!bool::from(bytes_ct_eq(&a, &a[..10])));
    }

    #[test]
    fn test_ct_mask() {
        assert_eq!(ct_mask(Choice::from(1)), u64::MAX);
        assert_eq!(ct_mask(Choice::from(0)), 0);
        assert_eq!(ct_select(&3u32, &8u32, Choice::from(1)), 8);
    }
}
