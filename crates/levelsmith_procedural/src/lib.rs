//! # Levelsmith Procedural Generation
//!
//! Deterministic terrain generation and entity placement.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: the same `(config, seed)` always yields the same grid
//!    and the same entity list, bit for bit
//! 2. **Isolated**: every call derives its own ChaCha stream from the seed,
//!    so concurrent calls never share randomness
//! 3. **Best effort**: layouts that cannot be realized in full still produce
//!    a grid, with a [`GenerationWarning`](levelsmith_shared::GenerationWarning)
//!
//! ## Core Components
//!
//! - `Seed`: seed value and purpose-derived sub-seeds
//! - `PerlinNoise`: 2D gradient noise with octaves
//! - `TerrainAlgorithm` / `TerrainGenerator`: the four grid algorithms behind one dispatch
//! - `TerrainPalette`: enforces the config's tile-type allowlist
//! - `EntityPlacer`: strategy-biased, constraint-checked placement
//!
//! ## Example
//!
//! ```rust,ignore
//! use levelsmith_procedural::{terrain, EntityPlacer, Seed};
//! use levelsmith_shared::{AlgorithmKind, GenerationConfig};
//!
//! let config = GenerationConfig::new(40, 30, AlgorithmKind::Rooms).with_seed(7);
//! let seed = Seed::from(config.seed);
//! let grid = terrain::generate(&config, seed)?.value;
//! let entities = EntityPlacer::default().place(&grid, &config, seed).value;
//! ```

#![deny(unsafe_code)]

pub mod noise;
mod params;
pub mod placement;
pub mod seed;
pub mod terrain;

pub use noise::PerlinNoise;
pub use placement::{EntityPlacer, PlacementTuning};
pub use seed::Seed;
pub use terrain::{
    CellularParams, MazeParams, PerlinParams, RoomParams, TerrainAlgorithm, TerrainGenerator,
    TerrainPalette,
};
