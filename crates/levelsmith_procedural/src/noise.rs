//! # Perlin Noise Implementation
//!
//! Seeded 2D gradient noise with fractal octaves.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`Seed`], this implementation will produce
//! **exactly** the same values on any platform, any time. The permutation
//! table is shuffled by a ChaCha stream, never by a global RNG.

use rand::seq::SliceRandom;

use crate::seed::Seed;

/// Pre-computed permutation table for noise.
///
/// This is computed once from the seed and reused.
struct PermutationTable {
    /// 512-entry permutation table (256 entries, doubled for overflow handling).
    perm: [u8; 512],
}

impl PermutationTable {
    /// 8 gradient directions for 2D Perlin: axes and diagonals.
    const GRADIENTS: [[i8; 2]; 8] = [
        [1, 1],
        [-1, 1],
        [1, -1],
        [-1, -1],
        [1, 0],
        [-1, 0],
        [0, 1],
        [0, -1],
    ];

    /// Creates a new permutation table from a seed.
    fn new(seed: Seed) -> Self {
        let mut base: Vec<u8> = (0..=255).collect();
        base.shuffle(&mut seed.rng());

        // Double the table to avoid index wrapping
        let mut perm = [0u8; 512];
        for (i, value) in base.iter().chain(base.iter()).enumerate() {
            perm[i] = *value;
        }

        Self { perm }
    }

    /// Gets a permutation value (with automatic wrapping).
    #[inline]
    fn get(&self, index: usize) -> usize {
        usize::from(self.perm[index & 511])
    }

    /// Dot product of the hashed gradient with the offset vector.
    #[inline]
    fn grad(hash: usize, x: f64, y: f64) -> f64 {
        let [gx, gy] = Self::GRADIENTS[hash & 7];
        f64::from(gx) * x + f64::from(gy) * y
    }
}

/// 2D Perlin noise generator.
///
/// Produces smooth, continuous noise values in the range [-1, 1].
pub struct PerlinNoise {
    /// The permutation table.
    perm_table: PermutationTable,
}

impl PerlinNoise {
    /// Creates a new noise generator from a seed.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples 2D noise at the given coordinates.
    ///
    /// Integer lattice points always sample to 0.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = fast_floor(x);
        let y0 = fast_floor(y);

        // Position inside the unit cell
        let xf = x - f64::from(x0);
        let yf = y - f64::from(y0);

        let xi = (x0 & 255) as usize;
        let yi = (y0 & 255) as usize;

        let p = &self.perm_table;
        let aa = p.get(p.get(xi) + yi);
        let ab = p.get(p.get(xi) + yi + 1);
        let ba = p.get(p.get(xi + 1) + yi);
        let bb = p.get(p.get(xi + 1) + yi + 1);

        let u = fade(xf);
        let v = fade(yf);

        let bottom = lerp(
            u,
            PermutationTable::grad(aa, xf, yf),
            PermutationTable::grad(ba, xf - 1.0, yf),
        );
        let top = lerp(
            u,
            PermutationTable::grad(ab, xf, yf - 1.0),
            PermutationTable::grad(bb, xf - 1.0, yf - 1.0),
        );

        lerp(v, bottom, top).clamp(-1.0, 1.0)
    }

    /// Generates octaved (fractal) noise.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Coordinates
    /// * `octaves` - Number of noise layers
    /// * `persistence` - Amplitude decay per octave
    /// * `lacunarity` - Frequency increase per octave
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn octaved(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        if max_amplitude > 0.0 {
            total / max_amplitude
        } else {
            0.0
        }
    }
}

/// Fast floor function.
#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) {
        xi - 1
    } else {
        xi
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}
