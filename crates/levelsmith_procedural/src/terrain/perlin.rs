//! Thresholded fractal noise terrain.

use levelsmith_shared::{AlgorithmKind, ConfigResult, Outcome, ParameterMap, TileGrid, TileType};
use serde::Serialize;

use crate::noise::PerlinNoise;
use crate::params::ParamReader;
use crate::seed::Seed;

/// Parameters for noise terrain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerlinParams {
    /// Sampling frequency: noise units per tile.
    pub scale: f64,
    /// Number of noise layers.
    pub octaves: u32,
    /// Amplitude decay per octave.
    pub persistence: f64,
    /// Frequency increase per octave.
    pub lacunarity: f64,
    /// Noise above `threshold` is Wall, below `-threshold` is Water.
    pub threshold: f64,
}

impl PerlinParams {
    /// Accepted parameter names.
    pub const KEYS: &'static [&'static str] =
        &["scale", "octaves", "persistence", "lacunarity", "threshold"];

    /// Fraction of each band, measured from the threshold inwards, that
    /// becomes Stone (high side) or Sand (low side).
    const SHORE_BAND: f64 = 0.4;

    /// Detail noise above this turns Ground into Grass.
    const GRASS_CUTOFF: f64 = 0.25;

    /// Parses and range-checks a parameter bag.
    ///
    /// # Errors
    ///
    /// Unknown keys or out-of-range values.
    pub fn from_params(params: &ParameterMap) -> ConfigResult<Self> {
        let defaults = Self::default();
        let reader = ParamReader::new(AlgorithmKind::Perlin, params, Self::KEYS)?;
        let scale = reader.f64_in("scale", defaults.scale, 0.0..=10.0)?;
        if scale <= 0.0 {
            return Err(reader.reject("scale", "must be greater than 0"));
        }
        let threshold = reader.f64_in("threshold", defaults.threshold, 0.0..=1.0)?;
        if threshold <= 0.0 {
            return Err(reader.reject("threshold", "must be greater than 0"));
        }
        Ok(Self {
            scale,
            octaves: reader.u32_in("octaves", defaults.octaves, 1..=16)?,
            persistence: reader.f64_in("persistence", defaults.persistence, 0.0..=2.0)?,
            lacunarity: reader.f64_in("lacunarity", defaults.lacunarity, 1.0..=8.0)?,
            threshold,
        })
    }

    /// Maps a noise value onto a canonical tile type.
    fn classify(&self, value: f64, detail: f64) -> TileType {
        let inner = self.threshold * (1.0 - Self::SHORE_BAND);
        if value > self.threshold {
            TileType::Wall
        } else if value < -self.threshold {
            TileType::Water
        } else if value > inner {
            TileType::Stone
        } else if value < -inner {
            TileType::Sand
        } else if detail > Self::GRASS_CUTOFF {
            TileType::Grass
        } else {
            TileType::Ground
        }
    }

    pub(super) fn carve(&self, width: u32, height: u32, seed: Seed) -> Outcome<TileGrid> {
        let elevation = PerlinNoise::new(seed.derive(Seed::TERRAIN));
        let detail = PerlinNoise::new(seed.derive(Seed::DETAIL));
        let mut grid = TileGrid::new(width, height, TileType::Ground);

        for y in 0..height {
            for x in 0..width {
                // Sample cell centres so lattice zeros do not line up with tiles
                let fx = (f64::from(x) + 0.5) * self.scale;
                let fy = (f64::from(y) + 0.5) * self.scale;
                let value = elevation.octaved(fx, fy, self.octaves, self.persistence, self.lacunarity);
                let grass = detail.sample(fx * 2.0, fy * 2.0);
                grid.set(x, y, self.classify(value, grass));
            }
        }

        Outcome::clean(grid)
    }
}

impl Default for PerlinParams {
    fn default() -> Self {
        Self {
            scale: 0.1,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            threshold: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> ConfigResult<PerlinParams> {
        let bag: ParameterMap = serde_json::from_value(value).expect("object");
        PerlinParams::from_params(&bag)
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let parsed = params(json!({"scale": 0.2})).expect("valid");
        assert_eq!(parsed.scale, 0.2);
        assert_eq!(parsed.octaves, 4);
        assert_eq!(parsed.threshold, 0.3);
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(params(json!({"scale": 0.0})).is_err());
        assert!(params(json!({"octaves": 0})).is_err());
    }

    #[test]
    fn test_banding() {
        let p = PerlinParams::default();
        assert_eq!(p.classify(0.5, 0.0), TileType::Wall);
        assert_eq!(p.classify(-0.5, 0.0), TileType::Water);
        assert_eq!(p.classify(0.25, 0.0), TileType::Stone);
        assert_eq!(p.classify(-0.25, 0.0), TileType::Sand);
        assert_eq!(p.classify(0.0, 0.9), TileType::Grass);
        assert_eq!(p.classify(0.0, 0.0), TileType::Ground);
    }

    #[test]
    fn test_seed_changes_layout() {
        let p = PerlinParams::default();
        let a = p.carve(40, 40, Seed::new(1)).value;
        let b = p.carve(40, 40, Seed::new(2)).value;
        assert_ne!(a, b);
    }

    #[test]
    fn test_noise_terrain_has_structure() {
        let grid = PerlinParams::default().carve(64, 64, Seed::new(12345)).value;
        let histogram = grid.histogram();
        let distinct = histogram.iter().filter(|&&count| count > 0).count();
        assert!(distinct >= 3, "expected several tile types, got {histogram:?}");
    }
}
