//! Endianness utility functions
//!
//! Field elements are stored as little-endian arrays of 64-bit limbs. The base
//! field serializes big-endian (most significant limb first) and the scalar
//! field little-endian; these helpers move between the two layouts.

/// Convert a u64 from little-endian byte order to native byte order
pub fn u64_from_le_bytes(bytes: &[u8]) -> u64 {
    u64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Convert a u64 from big-endian byte order to native byte order
pub fn u64_from_be_bytes(bytes: &[u8]) -> u64 {
    u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Read `N` limbs from `8 * N` big-endian bytes, most significant limb first
pub fn limbs_from_be_bytes<const N: usize>(bytes: &[u8]) -> [u64; N] {
    debug_assert_eq!(bytes.len(), 8 * N);
    let mut limbs = [0u64; N];
    for (i, chunk) in bytes.chunks_exact(8).enumerate().take(N) {
        limbs[N - 1 - i] = u64_from_be_bytes(chunk);
    }
    limbs
}

/// Write `N` limbs as `8 * N` big-endian bytes, most significant limb first
pub fn limbs_to_be_bytes<const N: usize>(limbs: &[u64; N], out: &mut [u8]) {
    debug_assert_eq!(out.len(), 8 * N);
    for (i, chunk) in out.chunks_exact_mut(8).enumerate().take(N) {
        chunk.copy_from_slice(&limbs[N - 1 - i].to_be_bytes());
    }
}

/// Read `N` limbs from `8 * N` little-endian bytes, least significant limb first
pub fn limbs_from_le_bytes<const N: usize>(bytes: &[u8]) -> [u64; N] {
    debug_assert_eq!(bytes.len(), 8 * N);
    let mut limbs = [0u64; N];
    for (i, chunk) in bytes.chunks_exact(8).enumerate().take(N) {
        limbs[i] = u64_from_le_bytes(chunk);
    }
    limbs
}

/// Write `N` limbs as `8 * N` little-endian bytes, least significant limb first
pub fn limbs_to_le_bytes<const N: usize>(limbs: &[u64; N], out: &mut [u8]) {
    debug_assert_eq!(out.len(), 8 * N);
    for (i, chunk) in out.chunks_exact_mut(8).enumerate().take(N) {
        chunk.copy_from_slice(&limbs[i].to_le_bytes());
    }
}
