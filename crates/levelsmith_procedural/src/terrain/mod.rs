//! # Terrain Generation
//!
//! Four interchangeable algorithms behind one enum dispatch:
//!
//! | Algorithm  | Structure                         | Connectivity            |
//! |------------|-----------------------------------|-------------------------|
//! | `perlin`   | thresholded fractal noise         | not guaranteed          |
//! | `cellular` | cave smoothing of random fill     | not guaranteed          |
//! | `maze`     | spanning tree over a cell lattice | single component        |
//! | `rooms`    | rooms chained by corridors        | single component        |
//!
//! Each variant owns only its own parameter struct. The untyped parameter
//! bag from the config is parsed exactly once, in
//! [`TerrainAlgorithm::from_config`], which rejects unknown keys with an
//! error naming the algorithm.
//!
//! Every algorithm emits a canonical layout. The [`TerrainPalette`] then
//! remaps tiles outside the config's allowlist.

mod cellular;
mod maze;
mod palette;
mod perlin;
mod rooms;

pub use cellular::CellularParams;
pub use maze::MazeParams;
pub use palette::TerrainPalette;
pub use perlin::PerlinParams;
pub use rooms::RoomParams;

use levelsmith_shared::{
    AlgorithmKind, ConfigLimits, ConfigResult, GenerationConfig, Outcome, ParameterMap, TileGrid,
};
use serde::Serialize;

use crate::seed::Seed;

/// A terrain algorithm with its resolved parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "algorithm", content = "parameters", rename_all = "lowercase")]
pub enum TerrainAlgorithm {
    /// Thresholded fractal noise.
    Perlin(PerlinParams),
    /// Cellular-automata caves.
    Cellular(CellularParams),
    /// Spanning-tree maze.
    Maze(MazeParams),
    /// Rooms chained by corridors.
    Rooms(RoomParams),
}

impl TerrainAlgorithm {
    /// Builds the algorithm named by `kind` from an untyped parameter bag.
    ///
    /// # Errors
    ///
    /// [`UnsupportedParameter`](levelsmith_shared::ConfigError::UnsupportedParameter)
    /// for keys the algorithm does not know,
    /// [`InvalidParameter`](levelsmith_shared::ConfigError::InvalidParameter)
    /// for values of the wrong type or out of range.
    pub fn from_config(kind: AlgorithmKind, params: &ParameterMap) -> ConfigResult<Self> {
        Ok(match kind {
            AlgorithmKind::Perlin => Self::Perlin(PerlinParams::from_params(params)?),
            AlgorithmKind::Cellular => Self::Cellular(CellularParams::from_params(params)?),
            AlgorithmKind::Maze => Self::Maze(MazeParams::from_params(params)?),
            AlgorithmKind::Rooms => Self::Rooms(RoomParams::from_params(params)?),
        })
    }

    /// The algorithm's registry entry.
    #[must_use]
    pub const fn kind(&self) -> AlgorithmKind {
        match self {
            Self::Perlin(_) => AlgorithmKind::Perlin,
            Self::Cellular(_) => AlgorithmKind::Cellular,
            Self::Maze(_) => AlgorithmKind::Maze,
            Self::Rooms(_) => AlgorithmKind::Rooms,
        }
    }

    /// Names of the parameters the algorithm accepts.
    #[must_use]
    pub const fn supported_parameters(kind: AlgorithmKind) -> &'static [&'static str] {
        match kind {
            AlgorithmKind::Perlin => PerlinParams::KEYS,
            AlgorithmKind::Cellular => CellularParams::KEYS,
            AlgorithmKind::Maze => MazeParams::KEYS,
            AlgorithmKind::Rooms => RoomParams::KEYS,
        }
    }

    /// Produces the canonical layout (before palette remapping).
    #[must_use]
    pub fn carve(&self, width: u32, height: u32, seed: Seed) -> Outcome<TileGrid> {
        match self {
            Self::Perlin(params) => params.carve(width, height, seed),
            Self::Cellular(params) => params.carve(width, height, seed),
            Self::Maze(params) => params.carve(width, height, seed),
            Self::Rooms(params) => params.carve(width, height, seed),
        }
    }
}

/// Terrain generator for one configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainGenerator {
    width: u32,
    height: u32,
    algorithm: TerrainAlgorithm,
    palette: TerrainPalette,
}

impl TerrainGenerator {
    /// Creates a generator from resolved parts.
    #[must_use]
    pub const fn new(
        width: u32,
        height: u32,
        algorithm: TerrainAlgorithm,
        palette: TerrainPalette,
    ) -> Self {
        Self {
            width,
            height,
            algorithm,
            palette,
        }
    }

    /// Checks a config against the default [`ConfigLimits`] and resolves its
    /// algorithm parameters and tile allowlist.
    ///
    /// # Errors
    ///
    /// Any dimension, entity, parameter or allowlist error. Nothing is
    /// generated on error.
    pub fn from_config(config: &GenerationConfig) -> ConfigResult<Self> {
        Self::from_config_with_limits(config, &ConfigLimits::default())
    }

    /// As [`TerrainGenerator::from_config`], with explicit dimension limits.
    ///
    /// # Errors
    ///
    /// As [`TerrainGenerator::from_config`].
    pub fn from_config_with_limits(config: &GenerationConfig, limits: &ConfigLimits) -> ConfigResult<Self> {
        config.validate(limits)?;
        let algorithm =
            TerrainAlgorithm::from_config(config.generation_algorithm, &config.algorithm_parameters)?;
        let palette = TerrainPalette::new(&config.terrain_types)?;
        Ok(Self::new(config.width, config.height, algorithm, palette))
    }

    /// The resolved algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> &TerrainAlgorithm {
        &self.algorithm
    }

    /// The tile allowlist.
    #[must_use]
    pub const fn palette(&self) -> &TerrainPalette {
        &self.palette
    }

    /// Generates the grid for `seed`.
    ///
    /// Identical generators and seeds always yield identical grids.
    #[must_use]
    pub fn generate(&self, seed: Seed) -> Outcome<TileGrid> {
        tracing::debug!(
            "generating {}x{} terrain with {} (seed {})",
            self.width,
            self.height,
            self.algorithm.kind(),
            seed.value()
        );
        let mut outcome = self.algorithm.carve(self.width, self.height, seed);
        self.palette.apply(&mut outcome.value);
        for warning in &outcome.warnings {
            tracing::warn!("terrain generation degraded: {warning}");
        }
        outcome
    }
}

/// Generates the terrain a config describes.
///
/// # Errors
///
/// Configuration errors from [`TerrainGenerator::from_config`].
pub fn generate(config: &GenerationConfig, seed: Seed) -> ConfigResult<Outcome<TileGrid>> {
    Ok(TerrainGenerator::from_config(config)?.generate(seed))
}

/// Axis-aligned rectangle of tiles used by the structured algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rect {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) w: u32,
    pub(crate) h: u32,
}

impl Rect {
    pub(crate) const fn center(self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Overlap test with a `margin`-tile gap required between rectangles.
    pub(crate) const fn overlaps(self, other: Self, margin: u32) -> bool {
        self.x < other.x + other.w + margin
            && other.x < self.x + self.w + margin
            && self.y < other.y + other.h + margin
            && other.y < self.y + self.h + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelsmith_shared::{ConfigError, TileType};
    use serde_json::json;

    #[test]
    fn test_dispatch_matches_kind() {
        for kind in AlgorithmKind::ALL {
            let algorithm = TerrainAlgorithm::from_config(kind, &ParameterMap::new()).expect("defaults");
            assert_eq!(algorithm.kind(), kind);
        }
    }

    #[test]
    fn test_foreign_parameter_rejected() {
        let config = GenerationConfig::new(20, 20, AlgorithmKind::Maze)
            .with_parameter("octaves", json!(4));
        assert_eq!(
            TerrainGenerator::from_config(&config).err(),
            Some(ConfigError::UnsupportedParameter {
                algorithm: AlgorithmKind::Maze,
                parameter: "octaves".to_string(),
            })
        );
    }

    #[test]
    fn test_every_algorithm_fills_requested_bounds() {
        for kind in AlgorithmKind::ALL {
            let config = GenerationConfig::new(37, 23, kind);
            let grid = generate(&config, Seed::new(5)).expect("valid").value;
            assert_eq!((grid.width(), grid.height()), (37, 23), "{kind}");
            assert_eq!(grid.len(), 37 * 23);
        }
    }

    #[test]
    fn test_every_algorithm_is_deterministic() {
        for kind in AlgorithmKind::ALL {
            let config = GenerationConfig::new(30, 30, kind);
            let a = generate(&config, Seed::new(77)).expect("valid");
            let b = generate(&config, Seed::new(77)).expect("valid");
            assert_eq!(a, b, "{kind} should be deterministic");
        }
    }

    #[test]
    fn test_palette_applied_to_output() {
        let config = GenerationConfig::new(30, 30, AlgorithmKind::Maze)
            .with_terrain_types([TileType::Grass, TileType::Lava]);
        let grid = generate(&config, Seed::new(1)).expect("valid").value;
        let histogram = grid.histogram();
        assert_eq!(histogram[TileType::Wall.index()], 0);
        assert_eq!(histogram[TileType::Ground.index()], 0);
        assert!(histogram[TileType::Lava.index()] > 0);
        assert!(histogram[TileType::Grass.index()] > 0);
    }

    #[test]
    fn test_out_of_range_dimensions_rejected() {
        for (width, height) in [(0, 0), (3, 2), (9, 40), (1001, 10)] {
            let config = GenerationConfig::new(width, height, AlgorithmKind::Cellular);
            assert!(
                matches!(
                    TerrainGenerator::from_config(&config),
                    Err(ConfigError::InvalidDimensions { .. })
                ),
                "{width}x{height} should be rejected"
            );
        }
    }

    #[test]
    fn test_explicit_limits_widen_range() {
        let config = GenerationConfig::new(1200, 12, AlgorithmKind::Perlin);
        let limits = ConfigLimits {
            max_width: 2000,
            ..ConfigLimits::default()
        };
        assert!(TerrainGenerator::from_config(&config).is_err());
        assert!(TerrainGenerator::from_config_with_limits(&config, &limits).is_ok());
    }

    #[test]
    fn test_rect_overlap_margin() {
        let a = Rect { x: 1, y: 1, w: 3, h: 3 };
        let b = Rect { x: 4, y: 1, w: 3, h: 3 };
        assert!(!a.overlaps(b, 0));
        assert!(a.overlaps(b, 1));
    }
}
