//! The BLS12-381 base field and its extension tower
//!
//! `Fp2 = Fp[u]/(u^2 + 1)`, `Fp6 = Fp2[v]/(v^3 - (u + 1))` and
//! `Fp12 = Fp6[w]/(w^2 - v)`. Extension elements encode as the concatenation
//! of their coefficients, highest degree first.

pub mod fp;
pub mod fp12;
pub mod fp2;
pub mod fp6;

pub use fp::Fp;
pub use fp12::Fp12;
pub use fp2::Fp2;
pub use fp6::Fp6;
