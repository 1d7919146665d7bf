//! BLS12-381 pairing-friendly curve arithmetic
//!
//! This crate provides the base field `Fp`, the scalar field, the extension
//! tower `Fp2`/`Fp6`/`Fp12`, the groups G1 and G2, and the optimal ate pairing
//! into the target group `Gt`. All arithmetic on secret values runs in
//! constant time; functions with a `_vartime` suffix are the exception and
//! must only be given public inputs.
//!
//! The library is usable in both `std` and `no_std` environments. Prepared G2
//! points and multi-pairings need the `alloc` feature.
//!
//! **Warning:** Unaudited implementation. Use at your own risk.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

/// Emits a debug-level diagnostic under the `bls381` target when the
/// `tracing` feature is enabled, and nothing otherwise.
#[cfg(feature = "tracing")]
macro_rules! debug_event {
    ($($arg:tt)*) => {
        tracing::debug!(target: "bls381", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_event {
    ($($arg:tt)*) => {};
}

#[macro_use]
mod macros;

#[macro_use]
pub mod types;

pub mod error;
pub mod field;
pub mod g1;
pub mod g2;
pub mod pairings;
pub mod scalar;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod tests;

pub use error::{validate, Error, ErrorKind, Result};
pub use field::{Fp, Fp12, Fp2, Fp6};
pub use g1::{G1Affine, G1Projective};
pub use g2::{G2Affine, G2Projective};
pub use pairings::{miller_loop, pairing, Adder, Gt, MillerLoopDriver, MillerLoopResult};
pub use scalar::Scalar;
pub use types::FixedSize;

#[cfg(feature = "alloc")]
pub use pairings::{multi_miller_loop, G2Prepared};
#[cfg(feature = "alloc")]
pub use types::ByteSerializable;

/// The curve parameter x = -0xd201000000010000, stored as its absolute value
pub const BLS_X: u64 = 0xd201_0000_0001_0000;

/// Sign of the curve parameter x
pub const BLS_X_IS_NEGATIVE: bool = true;
