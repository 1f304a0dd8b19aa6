//! # Seeds
//!
//! All procedural randomness derives from one [`Seed`]. Each stage derives a
//! sub-seed for its own purpose and builds a private ChaCha stream from it,
//! so stages never consume each other's random numbers and concurrent calls
//! never share state.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    /// Purpose tag for the main terrain stream.
    pub const TERRAIN: u64 = 1;
    /// Purpose tag for secondary terrain detail (grass patches).
    pub const DETAIL: u64 = 2;
    /// Purpose tag for entity placement.
    pub const PLACEMENT: u64 = 3;

    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Builds a fresh random stream from this seed.
    #[must_use]
    pub fn rng(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self(seed)
    }
}

impl From<i64> for Seed {
    fn from(seed: i64) -> Self {
        Self(seed as u64)
    }
}
