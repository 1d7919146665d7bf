//! # bls381
//!
//! Constant-time arithmetic on the BLS12-381 pairing-friendly curve.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! bls381 = "0.4"
//! ```
//!
//! ## Features
//!
//! - `std` (default): standard library support, implies `alloc`
//! - `alloc`: prepared G2 points and multi-pairings
//! - `zeroize`: zeroize support for field and group elements
//! - `serde`: serde support for every serializable type
//! - `tracing`: debug diagnostics under the `bls381` target
//! - `full`: all of the above
//!
//! ## Crate Structure
//!
//! This is a facade crate over two sub-crates:
//!
//! - [`bls381-internal`]: limb arithmetic and constant-time helpers
//! - [`bls381-algorithms`]: fields, groups, pairing and the target group

#![cfg_attr(not(feature = "std"), no_std)]

pub use bls381_algorithms as algorithms;
pub use bls381_internal as internal;

pub use bls381_algorithms::{Error, ErrorKind, Result};

/// Common imports for bls381 users
pub mod prelude {
    pub use crate::algorithms::{Error, ErrorKind, Result};

    pub use crate::algorithms::{Fp, Fp12, Fp2, Fp6, Scalar};
    pub use crate::algorithms::{G1Affine, G1Projective, G2Affine, G2Projective};
    pub use crate::algorithms::{pairing, Gt, MillerLoopResult};

    #[cfg(feature = "alloc")]
    pub use crate::algorithms::{multi_miller_loop, ByteSerializable, G2Prepared};

    pub use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
}
