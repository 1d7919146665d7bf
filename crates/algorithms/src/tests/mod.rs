//! BLS12-381 test suite
//!
//! Tests are organized into focused modules for better maintainability.

use rand_chacha::ChaCha20Rng;
use rand::SeedableRng;

mod groups;
mod pairings;

/// Deterministic RNG so failures reproduce
pub(crate) fn test_rng() -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(0x5dbe_6259_8c4e_0381)
}
