//! # Levelsmith
//!
//! Procedural 2D level generation and validation.
//!
//! ```text
//! GenerationConfig ──▶ TerrainGenerator ──▶ EntityPlacer ──▶ LevelAssembler ──▶ LevelValidator
//!      (JSON)              TileGrid          Vec<Entity>          Level            LevelReport
//! ```
//!
//! Configuration errors abort before any generation work. Shortfalls along
//! the way (rooms that did not fit, entities with nowhere to go) degrade
//! the result and are returned as warnings. Validation findings are data.
//!
//! ## Example
//!
//! ```rust,ignore
//! use levelsmith::{LevelPipeline, EngineConfig};
//! use levelsmith::shared::{AlgorithmKind, EntityConfig, EntityType, GenerationConfig};
//!
//! let config = GenerationConfig::new(48, 32, AlgorithmKind::Rooms)
//!     .with_seed(42)
//!     .with_entity(EntityConfig::new(EntityType::Player, 1))
//!     .with_entity(EntityConfig::new(EntityType::Exit, 1));
//!
//! let output = LevelPipeline::new(EngineConfig::default()).run(&config)?;
//! println!("quality {:.2}", output.report.quality_score);
//! ```

#![deny(unsafe_code)]

pub mod assembly;
pub mod error;
pub mod pipeline;
pub mod settings;

/// Re-export of the data model crate.
pub use levelsmith_shared as shared;

/// Re-export of the generation crate.
pub use levelsmith_procedural as procedural;

/// Re-export of the validation crate.
pub use levelsmith_validation as validation;

pub use assembly::LevelAssembler;
pub use error::{EngineError, EngineResult};
pub use pipeline::{LevelPipeline, PipelineOutput};
pub use settings::EngineConfig;
