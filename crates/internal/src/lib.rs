//! Internal utilities for the bls381 library
//!
//! Fixed-width limb arithmetic, N-limb Montgomery arithmetic, constant-time
//! comparison and selection over limb arrays, and byte/limb conversion
//! helpers. Every function here runs in time independent of its operand
//! values.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod constant_time;
pub mod endian;
pub mod limb;
pub mod montgomery;

pub use constant_time::{bytes_ct_eq, ct_mask, ct_select, limbs_ct_eq, limbs_is_zero, limbs_select};
pub use limb::{adc, mac, mul_wide, sbb};
pub use montgomery::WideLimbs;
